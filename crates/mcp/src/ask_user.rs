//! The ask_user tool: park an agent's tool call on a human answer

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use askuser_broker::{AskUserBroker, WaitOutcome};
use askuser_common::{AuthResolver, DEFAULT_WAIT_TIMEOUT};

use crate::tool::{Tool, ToolContext, ToolError, ToolResult};

/// Tool name used for registration and dispatch.
pub const ASK_USER_TOOL_NAME: &str = "ask_user";

#[derive(Debug, Deserialize)]
struct AskUserArgs {
    question: String,
}

/// Binds the broker into the tool protocol: creates the request, then parks
/// the calling task until a human answers, the wait times out, or the caller
/// disappears. A timeout is reported as a pending indicator, never a tool
/// failure; the question stays open either way.
pub struct AskUserTool {
    broker: Arc<AskUserBroker>,
    resolver: AuthResolver,
    wait_timeout: Duration,
}

impl AskUserTool {
    /// A `wait_timeout` of zero selects [`DEFAULT_WAIT_TIMEOUT`].
    pub fn new(broker: Arc<AskUserBroker>, resolver: AuthResolver, wait_timeout: Duration) -> Self {
        let wait_timeout = if wait_timeout.is_zero() {
            DEFAULT_WAIT_TIMEOUT
        } else {
            wait_timeout
        };
        Self {
            broker,
            resolver,
            wait_timeout,
        }
    }
}

#[async_trait]
impl Tool for AskUserTool {
    fn name(&self) -> &str {
        ASK_USER_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Ask the supervising human a clarifying question and wait for the answer. \
         If the wait times out the question stays open; check back later using \
         the returned request id."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "question": {
                    "type": "string",
                    "description": "The question to put to the human operator"
                }
            },
            "required": ["question"]
        })
    }

    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<ToolResult, ToolError> {
        let Some(header) = ctx.authorization.as_deref() else {
            return Ok(ToolResult::error(
                "authorization header is missing or malformed",
            ));
        };
        let auth = match (self.resolver)(header) {
            Ok(auth) => auth,
            Err(err) => return Ok(ToolResult::error(err.to_string())),
        };

        let args: AskUserArgs = match serde_json::from_value(args) {
            Ok(args) => args,
            Err(err) => return Ok(ToolResult::error(format!("invalid arguments: {err}"))),
        };

        let request = match self.broker.create_request(&auth, &args.question) {
            Ok(request) => request,
            Err(err) => return Ok(ToolResult::error(err.to_string())),
        };
        info!(
            request_id = %request.id,
            user_id = %auth.user_id,
            "ask_user waiting for answer"
        );

        let released = self
            .broker
            .await_answer(request.id, self.wait_timeout, ctx.cancel.clone())
            .await;
        let (request, outcome) = match released {
            Ok(released) => released,
            Err(err) => {
                warn!(request_id = %request.id, error = %err, "ask_user wait failed");
                return Ok(ToolResult::error("failed to wait for an answer"));
            }
        };

        match outcome {
            WaitOutcome::Answered => Ok(ToolResult::text(request.answer.unwrap_or_default())),
            WaitOutcome::TimedOut => Ok(ToolResult::text(
                json!({
                    "status": "pending",
                    "request_id": request.id,
                    "message": "The user has not answered yet; the question stays \
                                open under this request id. Check back later.",
                })
                .to_string(),
            )),
            WaitOutcome::Cancelled => Err(ToolError::Cancelled),
        }
    }
}
