//! Tool registry and dispatch

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::Value;
use tracing::warn;

use crate::hooks::ToolObserver;
use crate::tool::{Tool, ToolContext, ToolError, ToolResult};

/// Holds the registered tools and drives each call through the observer
/// hooks and panic recovery. Unexpected failures become error-kind results;
/// only caller cancellation propagates upward.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    observers: Vec<Arc<dyn ToolObserver>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tool(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn add_observer(&mut self, observer: Arc<dyn ToolObserver>) {
        self.observers.push(observer);
    }

    pub fn tool(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub async fn dispatch(
        &self,
        name: &str,
        ctx: &ToolContext,
        args: Value,
    ) -> Result<ToolResult, ToolError> {
        let Some(tool) = self.tools.get(name) else {
            return Ok(ToolResult::error(format!("unknown tool: {name}")));
        };

        for observer in &self.observers {
            observer.on_call(name, &args);
        }

        let result = match AssertUnwindSafe(tool.call(ctx, args)).catch_unwind().await {
            Ok(result) => result,
            Err(_panic) => {
                warn!(tool = name, "tool panicked, converting to error result");
                Ok(ToolResult::error("tool call failed unexpectedly"))
            }
        };

        match &result {
            Ok(res) => {
                for observer in &self.observers {
                    observer.on_success(name, res);
                }
            }
            Err(err) => {
                for observer in &self.observers {
                    observer.on_error(name, err);
                }
            }
        }
        result
    }
}
