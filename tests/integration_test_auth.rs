mod common;

use axum::http::{header, StatusCode};
use common::{parse_body, TestApp, ADMIN_EMAIL};
use serde_json::json;

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = TestApp::new().await;
    app.create_admin().await;

    let response = app.request(
        "POST",
        "/api/v1/auth/login",
        Some(json!({"email": ADMIN_EMAIL, "password": "admin123"})),
        None,
    ).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(cookie.contains("access_token="));
    assert!(cookie.contains("HttpOnly"));

    let body = parse_body(response).await;
    assert_eq!(body["admin"]["email"], ADMIN_EMAIL);
    assert!(body["admin"].get("password_hash").is_none());
    assert!(!body["csrf_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = TestApp::new().await;
    app.create_admin().await;

    let response = app.request(
        "POST",
        "/api/v1/auth/login",
        Some(json!({"email": ADMIN_EMAIL, "password": "wrong"})),
        None,
    ).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.request(
        "POST",
        "/api/v1/auth/login",
        Some(json!({"email": "nobody@example.com", "password": "admin123"})),
        None,
    ).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_and_logout() {
    let app = TestApp::new().await;
    let auth = app.admin_session().await;

    let response = app.request("GET", "/api/v1/auth/me", None, Some(&auth)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_body(response).await["email"], ADMIN_EMAIL);

    let response = app.request("POST", "/api/v1/auth/logout", None, Some(&auth)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cleared.starts_with("access_token="));

    let response = app.request("GET", "/api/v1/auth/me", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tampered_cookie_rejected() {
    let app = TestApp::new().await;
    let mut auth = app.admin_session().await;
    auth.access_token.push('x');

    let response = app.request("GET", "/api/v1/seminars", None, Some(&auth)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_seed_endpoint_creates_admin() {
    let app = TestApp::new().await;

    let payload = json!({"email": "yeni@example.com", "password": "gizli123", "name": "Yeni"});
    let response = app.request("POST", "/api/v1/admin/seed", Some(payload.clone()), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["admin"]["email"], "yeni@example.com");

    let response = app.request("POST", "/api/v1/admin/seed", Some(payload), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.request(
        "POST",
        "/api/v1/auth/login",
        Some(json!({"email": "yeni@example.com", "password": "gizli123"})),
        None,
    ).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.request("POST", "/api/v1/admin/seed", Some(json!({"email": "x@example.com"})), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_seed_endpoint_disabled_in_production() {
    let app = TestApp::with_env("production").await;

    let response = app.request(
        "POST",
        "/api/v1/admin/seed",
        Some(json!({"email": "yeni@example.com", "password": "gizli123"})),
        None,
    ).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_body(response).await["status"], "ok");
}
