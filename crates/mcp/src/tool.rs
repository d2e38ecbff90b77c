//! Tool trait and call-level types

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Per-call context captured by the transport layer.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    /// Raw `Authorization` header of the originating protocol request.
    pub authorization: Option<String>,
    /// Fires when the caller's own execution context ends.
    pub cancel: CancellationToken,
}

impl ToolContext {
    pub fn with_authorization(header: impl Into<String>) -> Self {
        Self {
            authorization: Some(header.into()),
            cancel: CancellationToken::new(),
        }
    }
}

/// Structured result returned to the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

/// Failures that escape a tool call instead of becoming an error result.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The caller went away. Propagated so the host drops the response
    /// instead of reporting a tool failure.
    #[error("tool call cancelled by caller")]
    Cancelled,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn schema(&self) -> Value;
    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<ToolResult, ToolError>;
}
