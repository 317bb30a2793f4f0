//! API integration tests that run without a database.
//!
//! The application boots even when no pool is configured; routing,
//! validation, and authentication gating are all exercised here by
//! driving the full router with `tower::ServiceExt::oneshot`. Requests
//! that would reach the store answer 503.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

fn app() -> Router<()> {
    apphub::create_app_with_pool(None)
}

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_protected_route_without_token_returns_401() {
    for uri in ["/me", "/apps", "/plans", "/subscriptions"] {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "GET {}", uri);
    }
}

#[tokio::test]
async fn test_protected_route_with_malformed_header_returns_401() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/apps")
                .header(header::AUTHORIZATION, "Token abc123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_without_database_returns_503() {
    // A well-formed bearer token cannot be resolved without the store.
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/apps")
                .header(header::AUTHORIZATION, format!("Bearer {}", "ab".repeat(32)))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_signup_rejects_short_password() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/signup",
            serde_json::json!({
                "email": "ada@example.com",
                "displayName": "Ada Lovelace",
                "password": "short"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["field"], "password");
}

#[tokio::test]
async fn test_signup_rejects_invalid_email() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/signup",
            serde_json::json!({
                "email": "not-an-email",
                "displayName": "Ada Lovelace",
                "password": "long-enough-password"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["field"], "email");
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_signup_rejects_blank_display_name() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/signup",
            serde_json::json!({
                "email": "ada@example.com",
                "displayName": "   ",
                "password": "long-enough-password"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["field"], "displayName");
}

#[tokio::test]
async fn test_valid_signup_without_database_returns_503() {
    // Validation passes, the store is unreachable.
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/signup",
            serde_json::json!({
                "email": "ada@example.com",
                "displayName": "Ada Lovelace",
                "password": "long-enough-password"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_login_without_database_returns_503() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/login",
            serde_json::json!({
                "identifier": "ada@example.com",
                "password": "long-enough-password"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_error_body_shape() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/signup",
            serde_json::json!({
                "email": "ada@example.com",
                "displayName": "Ada",
                "password": ""
            }),
        ))
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    let body = response_json(response).await;
    assert!(body["error"].is_string());
    assert_eq!(body["status"], 400);
}
