//! OpenAPI specification for the ask-user REST API
//!
//! Generated from the route handlers and response types with utoipa and
//! served at `/api-doc/openapi.json`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI document for the ask-user API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ask-User API",
        description = "REST surface for reviewing and answering questions \
                       raised by AI agents. A dashboard polls the list \
                       endpoint and submits answers; each blocked agent tool \
                       call is released as soon as its answer arrives.",
    ),
    paths(
        crate::routes::requests::list_requests,
        crate::routes::requests::answer_request,
        crate::routes::health::health,
    ),
    components(schemas(
        crate::types::ListResponse,
        crate::types::AnswerBody,
        crate::types::AnswerResponse,
        crate::types::HealthResponse,
        crate::types::ErrorResponse,
        askuser_common::AskRequest,
        askuser_common::RequestStatus,
        askuser_common::RequestId,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "ask_user", description = "Pending questions and answer history"),
        (name = "system", description = "Service health"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}
