//! Router-level tests that run without a live database: the pool is built
//! lazily and never contacted unless a handler actually reaches for it.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use snippetbox::router::{AppState, app};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use std::time::Duration;
use tower::ServiceExt;

fn lazy_state() -> AppState {
    let options = MySqlConnectOptions::new()
        .host("127.0.0.1")
        .port(1)
        .username("web")
        .password("pass")
        .database("snippetbox");
    let pool = MySqlPoolOptions::new()
        .acquire_timeout(Duration::from_secs(1))
        .connect_lazy_with(options);
    AppState::new(pool)
}

fn create_request(payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/snippet/create")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn error_code(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    json["error"]["code"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = app(lazy_state())
        .oneshot(
            Request::builder()
                .uri("/missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_rejects_blank_title_before_touching_the_database() {
    let payload = json!({"title": "   ", "content": "a snippet", "expires_days": 7});
    let response = app(lazy_state())
        .oneshot(create_request(&payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(response).await, "INVALID_SNIPPET");
}

#[tokio::test]
async fn create_rejects_overlong_title() {
    let payload = json!({
        "title": "x".repeat(101),
        "content": "a snippet",
        "expires_days": 7,
    });
    let response = app(lazy_state())
        .oneshot(create_request(&payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_rejects_unsupported_expiry() {
    let payload = json!({"title": "ok", "content": "a snippet", "expires_days": 2});
    let response = app(lazy_state())
        .oneshot(create_request(&payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn database_failures_surface_as_internal_errors() {
    // Valid payload, unreachable database: the handler's pool error must map
    // to a 500 with the standard body, not a hung request.
    let payload = json!({"title": "ok", "content": "a snippet", "expires_days": 7});
    let response = app(lazy_state())
        .oneshot(create_request(&payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_code(response).await, "INTERNAL_ERROR");
}
