//! # Ask-User REST facade
//!
//! Thin HTTP surface over the ask-user broker, consumed by a polling
//! dashboard. All business logic lives in `askuser-broker`; this crate only
//! translates between HTTP and broker calls.
//!
//! ## Endpoints
//!
//! - **GET** `/api/requests`: the caller's pending questions and answer
//!   history, resolved from the `Authorization` header
//! - **POST** `/api/requests/{id}`: submit the human answer for a pending
//!   request
//! - **GET** `/health`: liveness
//! - **GET** `/api-doc/openapi.json`: OpenAPI document
//!
//! ## Error Handling
//!
//! Broker errors map onto status codes (401 unparseable credential, 403
//! tenant mismatch, 404 unknown id, 409 already answered, 400 validation,
//! 503 broker unavailable); bodies use the structured [`types::ErrorResponse`]
//! shape.

pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod types;

pub use server::{AppState, AskUserServer};
pub use types::*;
