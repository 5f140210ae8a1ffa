//! Common test utilities
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use budget_buddy::api::{self, AppState};
use budget_buddy::db;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;

/// Fresh in-memory database with the schema applied
pub async fn setup_test_db() -> sqlx::SqlitePool {
    db::connect_in_memory()
        .await
        .expect("Failed to open in-memory database")
}

/// API router over a fresh database, as mounted under /api/v1
pub async fn setup_app() -> Router {
    let pool = setup_test_db().await;
    let state = AppState::new(pool, chrono::Duration::hours(1));
    api::create_router(state.clone()).with_state(state)
}

/// Send a request and return status plus the raw body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, headers, body)
}

/// Send a request and decode a JSON body (Null for empty bodies)
pub async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send(app, request).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

pub fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let builder = match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    };
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let builder = Request::builder().method("GET").uri(uri);
    let builder = match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    };
    builder.body(Body::empty()).unwrap()
}

/// Register a user and log in, returning the session token
pub async fn register_and_login(app: &Router, username: &str, password: &str) -> String {
    let credentials = serde_json::json!({ "username": username, "password": password });

    let (status, _) = send_json(app, post_json("/auth/register", None, credentials.clone())).await;
    assert_eq!(status, StatusCode::CREATED, "registration of {username} failed");

    let (status, json) = send_json(app, post_json("/auth/login", None, credentials)).await;
    assert_eq!(status, StatusCode::OK, "login of {username} failed");

    json["token"].as_str().unwrap().to_string()
}
