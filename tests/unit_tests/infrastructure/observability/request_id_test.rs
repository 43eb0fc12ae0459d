use axum::Router;
use axum::body::Body;
use axum::extract::Extension;
use axum::http::{HeaderValue, Request};
use axum::middleware;
use axum::routing::get;
use tower::ServiceExt;

use speech_services::infrastructure::observability::{
    REQUEST_ID_HEADER, RequestId, request_id_middleware,
};

fn app() -> Router {
    Router::new()
        .route(
            "/",
            get(|Extension(id): Extension<RequestId>| async move { id.0 }),
        )
        .layer(middleware::from_fn(request_id_middleware))
}

#[test]
fn given_request_id_header_constant_when_accessed_then_returns_correct_value() {
    assert_eq!(REQUEST_ID_HEADER, "x-request-id");
}

#[test]
fn given_missing_header_when_building_request_id_then_uuid_is_generated() {
    let id = RequestId::from_header(None);
    assert!(uuid::Uuid::parse_str(&id.0).is_ok());
}

#[test]
fn given_blank_header_when_building_request_id_then_uuid_is_generated() {
    let header = HeaderValue::from_static("   ");
    let id = RequestId::from_header(Some(&header));
    assert!(uuid::Uuid::parse_str(&id.0).is_ok());
}

#[tokio::test]
async fn given_incoming_request_id_when_served_then_it_is_propagated_and_echoed() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(REQUEST_ID_HEADER, "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-42");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"req-42");
}

#[tokio::test]
async fn given_no_request_id_when_served_then_response_carries_generated_id() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let header = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(header).is_ok());
}
