use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

/// Request/response logging with a generated request id.
pub async fn logging_middleware(mut request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = request.method().clone();
    let uri = request.uri().clone();

    // Expose the request id to downstream handlers and clients.
    if let Ok(value) = request_id.parse() {
        request.headers_mut().insert("x-request-id", value);
    }

    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        "incoming http request"
    );

    let response = next.run(request).await;

    let status = response.status();
    let duration = start_time.elapsed();
    if status.is_server_error() {
        error!(
            request_id = %request_id,
            status = %status,
            duration_ms = %duration.as_millis(),
            "http request failed"
        );
    } else {
        info!(
            request_id = %request_id,
            status = %status,
            duration_ms = %duration.as_millis(),
            "http request completed"
        );
    }

    response
}
