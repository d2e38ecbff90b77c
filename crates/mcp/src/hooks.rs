//! Observer hooks around tool dispatch
//!
//! Synchronously-invoked observers, kept apart from the broker core. The
//! default implementation logs the before/success/error milestones of every
//! call.

use serde_json::Value;
use tracing::{debug, error, info};

use crate::tool::{ToolError, ToolResult};

pub trait ToolObserver: Send + Sync {
    fn on_call(&self, _tool: &str, _args: &Value) {}
    fn on_success(&self, _tool: &str, _result: &ToolResult) {}
    fn on_error(&self, _tool: &str, _error: &ToolError) {}
}

/// Tracing-backed observer.
pub struct LoggingObserver;

impl ToolObserver for LoggingObserver {
    fn on_call(&self, tool: &str, args: &Value) {
        debug!(tool, %args, "tool call received");
    }

    fn on_success(&self, tool: &str, result: &ToolResult) {
        info!(tool, is_error = result.is_error, "tool call completed");
    }

    fn on_error(&self, tool: &str, err: &ToolError) {
        error!(tool, error = %err, "tool call failed");
    }
}
