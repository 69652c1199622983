use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Duration;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use melos_accounts::{AccessPolicy, AppState, CredentialStore, TokenAuthority, build_router};

const SECRET: &[u8] = b"integration-test-secret-0123456789";

fn app_with(policy: AccessPolicy) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        CredentialStore::new(),
        TokenAuthority::new(SECRET, Duration::hours(1)),
        policy,
    ));
    (build_router(state.clone()), state)
}

fn app() -> (Router, Arc<AppState>) {
    app_with(AccessPolicy::default())
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn register(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    call(
        app,
        "POST",
        "/api/register",
        None,
        Some(json!({"username": username, "password": password})),
    )
    .await
}

async fn login(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    call(
        app,
        "POST",
        "/api/login",
        None,
        Some(json!({"username": username, "password": password})),
    )
    .await
}

async fn token_for(app: &Router, username: &str, password: &str) -> String {
    register(app, username, password).await;
    let (status, body) = login(app, username, password).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn melos_walkthrough() {
    let (app, state) = app();

    let (status, body) = register(&app, "melos", "Password1234").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], 0);
    assert_eq!(body["msg"], "User registered successfully");

    let (status, body) = login(&app, "melos", "Password1234").await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap().to_string();
    assert_eq!(state.tokens.verify(&token).unwrap().username, "melos");

    let (status, _) = call(
        &app,
        "PUT",
        "/api/users/melos",
        Some(&token),
        Some(json!({"password": "newpass"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = login(&app, "melos", "Password1234").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "Invalid credentials");

    let (status, body) = login(&app, "melos", "newpass").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].is_string());
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let (app, state) = app();

    assert_eq!(register(&app, "melos", "a").await.0, StatusCode::CREATED);
    let (status, body) = register(&app, "melos", "b").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Username already taken");
    assert_eq!(state.store.len(), 1);
}

#[tokio::test]
async fn empty_username_is_rejected() {
    let (app, state) = app();
    let (status, body) = register(&app, "", "pw").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_ne!(body["code"], 0);
    assert!(state.store.is_empty());
}

#[tokio::test]
async fn empty_password_is_accepted() {
    let (app, _) = app();
    assert_eq!(register(&app, "melos", "").await.0, StatusCode::CREATED);
    let token = token_for(&app, "melos", "").await;

    let (status, _) = call(
        &app,
        "PUT",
        "/api/users/melos",
        Some(&token),
        Some(json!({"password": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login(&app, "melos", "").await.0, StatusCode::OK);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let (app, _) = app();
    let req = Request::builder()
        .method("POST")
        .uri("/api/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_failures_look_the_same() {
    let (app, _) = app();
    register(&app, "melos", "Password1234").await;

    let (s1, b1) = login(&app, "melos", "wrong").await;
    let (s2, b2) = login(&app, "nobody", "Password1234").await;
    assert_eq!(s1, StatusCode::UNAUTHORIZED);
    assert_eq!(s1, s2);
    assert_eq!(b1, b2);
}

#[tokio::test]
async fn protected_routes_require_token() {
    let (app, _) = app();

    let (status, body) = call(&app, "GET", "/api/users", None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["msg"], "Access denied");

    let (status, body) = call(&app, "GET", "/api/users", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["msg"], "Invalid token");

    let (status, _) = call(&app, "DELETE", "/api/users/melos", None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn token_from_other_secret_is_forbidden() {
    let (app, _) = app();
    let foreign = TokenAuthority::new(b"some-other-secret-0123456789abcdef", Duration::hours(1))
        .issue("melos")
        .unwrap();

    let (status, body) = call(&app, "GET", "/api/users", Some(&foreign), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["msg"], "Invalid token");
}

#[tokio::test]
async fn expired_token_is_forbidden() {
    let (app, _) = app();
    let stale = TokenAuthority::new(SECRET, Duration::seconds(-5))
        .issue("melos")
        .unwrap();

    let (status, _) = call(&app, "GET", "/api/users", Some(&stale), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn list_and_get_hide_hashes_by_default() {
    let (app, _) = app();
    let token = token_for(&app, "melos", "Password1234").await;
    register(&app, "zeno", "pw").await;

    let (status, body) = call(&app, "GET", "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!([{"username": "melos"}, {"username": "zeno"}])
    );

    let (status, body) = call(&app, "GET", "/api/users/zeno", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"username": "zeno"}));
}

#[tokio::test]
async fn hashes_exposed_when_configured() {
    let (app, _) = app_with(AccessPolicy {
        expose_password_hash: true,
        ..AccessPolicy::default()
    });
    let token = token_for(&app, "melos", "Password1234").await;

    let (_, body) = call(&app, "GET", "/api/users/melos", Some(&token), None).await;
    let hash = body["data"]["password_hash"].as_str().unwrap();
    assert!(hash.starts_with("$argon2id$"));
    assert!(!hash.contains("Password1234"));
}

#[tokio::test]
async fn get_unknown_user_is_not_found() {
    let (app, _) = app();
    let token = token_for(&app, "melos", "pw").await;

    let (status, body) = call(&app, "GET", "/api/users/ghost", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "User not found");

    let (status, _) = call(
        &app,
        "PUT",
        "/api/users/ghost",
        Some(&token),
        Some(json!({"password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_reregister() {
    let (app, _) = app();
    let token = token_for(&app, "melos", "pw").await;

    let (status, _) = call(&app, "DELETE", "/api/users/melos", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    // The token stays valid after the account is gone: it only proves
    // possession, not that the account still exists.
    let (status, _) = call(&app, "GET", "/api/users/melos", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "DELETE", "/api/users/melos", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(register(&app, "melos", "fresh").await.0, StatusCode::CREATED);
    assert_eq!(login(&app, "melos", "fresh").await.0, StatusCode::OK);
}

#[tokio::test]
async fn any_session_may_modify_any_account_by_default() {
    let (app, _) = app();
    let token = token_for(&app, "melos", "pw").await;
    register(&app, "zeno", "pw").await;

    let (status, _) = call(
        &app,
        "PUT",
        "/api/users/zeno",
        Some(&token),
        Some(json!({"password": "taken-over"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login(&app, "zeno", "taken-over").await.0, StatusCode::OK);
}

#[tokio::test]
async fn ownership_enforced_when_configured() {
    let (app, state) = app_with(AccessPolicy {
        enforce_ownership: true,
        ..AccessPolicy::default()
    });
    let token = token_for(&app, "melos", "pw").await;
    register(&app, "zeno", "pw").await;

    let (status, _) = call(
        &app,
        "PUT",
        "/api/users/zeno",
        Some(&token),
        Some(json!({"password": "taken-over"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(&app, "DELETE", "/api/users/zeno", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(state.store.contains("zeno"));

    let (status, _) = call(
        &app,
        "PUT",
        "/api/users/melos",
        Some(&token),
        Some(json!({"password": "mine"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn health_reports_user_count() {
    let (app, _) = app();
    register(&app, "melos", "pw").await;

    let (status, body) = call(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["users"], 1);
}

#[tokio::test]
async fn openapi_json_is_served() {
    let (app, _) = app();
    let (status, body) = call(&app, "GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "User Authentication API");
}
