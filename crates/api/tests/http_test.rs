//! HTTP facade tests: status mapping, tenant isolation, end-to-end flow

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use askuser_api::AskUserServer;
use askuser_broker::{AskUserBroker, WaitOutcome};
use askuser_common::{parse_authorization, AuthContext, RequestId, SystemConfig};

const U1_TOKEN: &str = "Bearer U1:A1:topsecret";
const U2_TOKEN: &str = "Bearer U2:A2:othersecret";

fn app(broker: Option<Arc<AskUserBroker>>) -> Router {
    AskUserServer::new(SystemConfig::default(), broker).router()
}

fn u1() -> AuthContext {
    parse_authorization(U1_TOKEN).unwrap()
}

fn get_requests(token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri("/api/requests");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_answer(id: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/requests/{id}"))
        .header(header::AUTHORIZATION, token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_requires_authorization() {
    let app = app(Some(Arc::new(AskUserBroker::new())));

    let response = app.oneshot(get_requests(None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_empty_includes_identity_fields() {
    let app = app(Some(Arc::new(AskUserBroker::new())));

    let response = app.oneshot(get_requests(Some(U1_TOKEN))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["pending"], json!([]));
    assert_eq!(body["history"], json!([]));
    assert_eq!(body["user_id"], "U1");
    assert_eq!(body["ai_id"], "A1");
    assert_eq!(body["key_hint"], "cret");
}

#[tokio::test]
async fn test_missing_broker_is_service_unavailable() {
    let app = app(None);

    let response = app.oneshot(get_requests(Some(U1_TOKEN))).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_answer_invalid_id_is_bad_request() {
    let app = app(Some(Arc::new(AskUserBroker::new())));

    let response = app
        .oneshot(post_answer("not-a-uuid", U1_TOKEN, &json!({"answer": "yes"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_answer_unknown_id_is_not_found() {
    let app = app(Some(Arc::new(AskUserBroker::new())));

    let response = app
        .oneshot(post_answer(
            &RequestId::new().to_string(),
            U1_TOKEN,
            &json!({"answer": "yes"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_answer_malformed_body_is_bad_request() {
    let broker = Arc::new(AskUserBroker::new());
    let request = broker.create_request(&u1(), "q").unwrap();
    let app = app(Some(broker));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/requests/{}", request.id))
                .header(header::AUTHORIZATION, U1_TOKEN)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_answer_empty_answer_is_bad_request() {
    let broker = Arc::new(AskUserBroker::new());
    let request = broker.create_request(&u1(), "q").unwrap();
    let app = app(Some(broker));

    let response = app
        .oneshot(post_answer(
            &request.id.to_string(),
            U1_TOKEN,
            &json!({"answer": "   "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_answer_cross_tenant_is_forbidden() {
    let broker = Arc::new(AskUserBroker::new());
    let request = broker.create_request(&u1(), "q").unwrap();
    let app = app(Some(broker.clone()));

    let response = app
        .oneshot(post_answer(
            &request.id.to_string(),
            U2_TOKEN,
            &json!({"answer": "mine now"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The foreign request is also invisible in U2's listing.
    let app = AskUserServer::new(SystemConfig::default(), Some(broker)).router();
    let response = app.oneshot(get_requests(Some(U2_TOKEN))).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["pending"], json!([]));
    assert_eq!(body["history"], json!([]));
}

#[tokio::test]
async fn test_double_answer_is_conflict_and_preserves_first() {
    let broker = Arc::new(AskUserBroker::new());
    let request = broker.create_request(&u1(), "q").unwrap();
    let id = request.id.to_string();
    let app = app(Some(broker));

    let response = app
        .clone()
        .oneshot(post_answer(&id, U1_TOKEN, &json!({"answer": "first"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_answer(&id, U1_TOKEN, &json!({"answer": "second"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app.oneshot(get_requests(Some(U1_TOKEN))).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["history"][0]["answer"], "first");
}

#[tokio::test]
async fn test_end_to_end_deploy_scenario() {
    let broker = Arc::new(AskUserBroker::new());
    let app = app(Some(broker.clone()));

    let request = broker.create_request(&u1(), "Deploy to prod?").unwrap();

    // Visible in U1's pending list.
    let response = app
        .clone()
        .oneshot(get_requests(Some(U1_TOKEN)))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["pending"][0]["question"], "Deploy to prod?");
    assert_eq!(body["pending"][0]["status"], "pending");

    // Invisible to U2.
    let response = app
        .clone()
        .oneshot(get_requests(Some(U2_TOKEN)))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["pending"], json!([]));

    // A tool call blocks on the answer while the human submits over HTTP.
    let waiter = {
        let broker = broker.clone();
        let id = request.id;
        tokio::spawn(async move {
            broker
                .await_answer(id, Duration::from_secs(30), CancellationToken::new())
                .await
                .unwrap()
        })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;

    let response = app
        .clone()
        .oneshot(post_answer(
            &request.id.to_string(),
            U1_TOKEN,
            &json!({"answer": "yes"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["request"]["status"], "answered");
    assert_eq!(body["request"]["answer"], "yes");

    let (answered, outcome) = waiter.await.unwrap();
    assert_eq!(outcome, WaitOutcome::Answered);
    assert_eq!(answered.answer.as_deref(), Some("yes"));

    // And it shows up in U1's history.
    let response = app.oneshot(get_requests(Some(U1_TOKEN))).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["pending"], json!([]));
    assert_eq!(body["history"][0]["answer"], "yes");
    assert_eq!(body["history"][0]["status"], "answered");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = app(None);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
