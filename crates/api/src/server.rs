//! Axum server wiring for the ask-user HTTP facade

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;

use askuser_broker::AskUserBroker;
use askuser_common::SystemConfig;

use crate::middleware::logging::logging_middleware;
use crate::openapi::ApiDoc;
use crate::routes;

/// Maximum accepted request body. Answers are short; anything bigger is noise.
const BODY_LIMIT_BYTES: usize = 1 << 20;

/// Shared state injected into every route handler.
///
/// The broker slot is optional so the facade can be mounted with the
/// ask-user capability disabled; handlers answer 503 in that case.
#[derive(Clone)]
pub struct AppState {
    broker: Option<Arc<AskUserBroker>>,
}

impl AppState {
    pub fn new(broker: Option<Arc<AskUserBroker>>) -> Self {
        Self { broker }
    }

    pub fn broker(&self) -> Option<Arc<AskUserBroker>> {
        self.broker.clone()
    }
}

pub struct AskUserServer {
    config: SystemConfig,
    state: AppState,
}

impl AskUserServer {
    pub fn new(config: SystemConfig, broker: Option<Arc<AskUserBroker>>) -> Self {
        Self {
            config,
            state: AppState::new(broker),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/requests", get(routes::requests::list_requests))
            .route("/api/requests/:id", post(routes::requests::answer_request))
            .route("/health", get(routes::health::health))
            .route(
                "/api-doc/openapi.json",
                get(|| async { Json(ApiDoc::openapi()) }),
            )
            .layer(middleware::from_fn(logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
            .with_state(self.state.clone())
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!(%addr, "ask-user API listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("shutdown signal received");
            })
            .await?;
        Ok(())
    }
}
