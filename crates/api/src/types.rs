//! Type definitions for the ask-user REST API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use askuser_common::AskRequest;

/// Tenant-scoped view over the registry, returned by the list endpoint.
///
/// Pending is oldest-first so the dashboard shows questions in the order
/// they were asked; history is most recently answered first.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListResponse {
    pub pending: Vec<AskRequest>,
    pub history: Vec<AskRequest>,
    pub user_id: String,
    pub ai_id: String,
    pub key_hint: String,
}

/// Body of the answer submission endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnswerBody {
    pub answer: String,
}

/// Envelope for the updated request returned by the answer endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct AnswerResponse {
    pub request: AskRequest,
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub timestamp: DateTime<Utc>,
}
