use thiserror::Error;

use crate::types::RequestId;

/// Error taxonomy for the ask-user system.
///
/// Wait timeouts and caller cancellation are deliberately absent: they are
/// normal outcomes of waiting, reported by the broker as `WaitOutcome`.
#[derive(Debug, Error)]
pub enum AskUserError {
    #[error("authorization header is missing or malformed")]
    InvalidAuthorization,

    #[error("request belongs to a different user")]
    Forbidden,

    #[error("request not found: {0}")]
    RequestNotFound(RequestId),

    #[error("question cannot be empty")]
    EmptyQuestion,

    #[error("answer cannot be empty")]
    EmptyAnswer,

    #[error("request already answered: {0}")]
    AlreadyAnswered(RequestId),

    #[error("duplicate request id: {0}")]
    DuplicateId(RequestId),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AskUserError>;
