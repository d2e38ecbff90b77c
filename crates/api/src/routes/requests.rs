//! Request listing and answer submission routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Json,
};
use chrono::Utc;
use tracing::{error, info, warn};

use askuser_broker::AskUserBroker;
use askuser_common::{parse_authorization, AskUserError, AuthContext, RequestId};

use crate::server::AppState;
use crate::types::{AnswerBody, AnswerResponse, ErrorResponse, ListResponse};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: Some(code.to_string()),
            timestamp: Utc::now(),
        }),
    )
}

fn resolve_auth(headers: &HeaderMap) -> Result<AuthContext, ApiError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    parse_authorization(header).map_err(|err| {
        error_response(
            StatusCode::UNAUTHORIZED,
            "INVALID_AUTHORIZATION",
            err.to_string(),
        )
    })
}

fn require_broker(state: &AppState) -> Result<Arc<AskUserBroker>, ApiError> {
    state.broker().ok_or_else(|| {
        error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "BROKER_UNAVAILABLE",
            "ask-user broker is not available",
        )
    })
}

fn broker_error(err: AskUserError) -> ApiError {
    match &err {
        AskUserError::InvalidAuthorization => error_response(
            StatusCode::UNAUTHORIZED,
            "INVALID_AUTHORIZATION",
            err.to_string(),
        ),
        AskUserError::Forbidden => {
            error_response(StatusCode::FORBIDDEN, "FORBIDDEN", err.to_string())
        }
        AskUserError::RequestNotFound(_) => {
            error_response(StatusCode::NOT_FOUND, "REQUEST_NOT_FOUND", err.to_string())
        }
        AskUserError::EmptyQuestion | AskUserError::EmptyAnswer => {
            error_response(StatusCode::BAD_REQUEST, "VALIDATION", err.to_string())
        }
        AskUserError::AlreadyAnswered(_) => {
            error_response(StatusCode::CONFLICT, "ALREADY_ANSWERED", err.to_string())
        }
        AskUserError::DuplicateId(_) | AskUserError::Internal(_) => {
            error!(error = %err, "ask-user broker failure");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
                "internal server error",
            )
        }
    }
}

/// List the caller's pending questions and answer history
#[utoipa::path(
    get,
    path = "/api/requests",
    responses(
        (status = 200, description = "Requests visible to the authenticated user", body = ListResponse),
        (status = 401, description = "Missing or unparseable credential", body = ErrorResponse),
        (status = 503, description = "Broker unavailable", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "ask_user"
)]
pub async fn list_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListResponse>, ApiError> {
    let auth = resolve_auth(&headers)?;
    let broker = require_broker(&state)?;

    let (pending, history) = broker.list_requests(&auth).map_err(broker_error)?;
    info!(
        user_id = %auth.user_id,
        pending = pending.len(),
        history = history.len(),
        "listed ask-user requests"
    );

    Ok(Json(ListResponse {
        pending,
        history,
        user_id: auth.user_id,
        ai_id: auth.ai_id,
        key_hint: auth.key_hint,
    }))
}

/// Submit the human answer for a pending request
#[utoipa::path(
    post,
    path = "/api/requests/{id}",
    params(
        ("id" = String, Path, description = "Request id (UUID)")
    ),
    request_body = AnswerBody,
    responses(
        (status = 200, description = "Updated request", body = AnswerResponse),
        (status = 400, description = "Malformed id or body", body = ErrorResponse),
        (status = 401, description = "Missing or unparseable credential", body = ErrorResponse),
        (status = 403, description = "Request belongs to a different user", body = ErrorResponse),
        (status = 404, description = "Unknown request id", body = ErrorResponse),
        (status = 409, description = "Request already answered", body = ErrorResponse),
        (status = 503, description = "Broker unavailable", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "ask_user"
)]
pub async fn answer_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Option<Json<AnswerBody>>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let id = RequestId::parse(&id).map_err(|_| {
        error_response(
            StatusCode::BAD_REQUEST,
            "INVALID_REQUEST_ID",
            "invalid request id",
        )
    })?;
    let auth = resolve_auth(&headers)?;
    let broker = require_broker(&state)?;

    let Some(Json(body)) = body else {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "INVALID_PAYLOAD",
            "invalid payload",
        ));
    };

    let request = broker
        .answer_request(&auth, id, &body.answer)
        .map_err(|err| {
            warn!(request_id = %id, user_id = %auth.user_id, error = %err, "answer rejected");
            broker_error(err)
        })?;

    Ok(Json(AnswerResponse { request }))
}
