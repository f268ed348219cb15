use axum::http::{header, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};

use crate::test_helpers::{bearer, StubReply, TestApp};

#[derive(Serialize)]
struct LoginForm<'a> {
    username: &'a str,
    password: &'a str,
}

fn app() -> TestApp {
    TestApp::new(StubReply::Fragments(vec!["ok"]))
}

#[tokio::test]
async fn test_register_issues_bearer_token_with_default_credits() {
    let app = app();

    let response = app
        .server
        .post("/register")
        .json(&json!({"email": "ada@example.com", "password": "hunter22"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["token_type"], "bearer");
    let token = body["access_token"].as_str().unwrap().to_string();
    assert!(token.starts_with("sk-"));

    let me = app.server.get("/me").add_header(header::AUTHORIZATION, bearer(&token)).await;
    assert_eq!(me.status_code(), StatusCode::OK);
    assert_eq!(
        me.json::<Value>(),
        json!({"email": "ada@example.com", "credits": 100, "subscription": null})
    );
}

#[tokio::test]
async fn test_register_duplicate_email_is_400() {
    let app = app();
    let payload = json!({"email": "ada@example.com", "password": "hunter22"});

    app.server.post("/register").json(&payload).await;
    let response = app.server.post("/register").json(&payload).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["detail"], "Email already registered");
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = app();

    let response = app
        .server
        .post("/register")
        .json(&json!({"email": "not-an-email", "password": "hunter22"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_with_form_credentials() {
    let app = app();
    let user = app.user_with_credits("ada@example.com", 5).await;

    let response = app
        .server
        .post("/token")
        .form(&LoginForm { username: "ada@example.com", password: "secret" })
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["access_token"], user.api_key.as_str());
}

#[tokio::test]
async fn test_login_with_wrong_password_is_400() {
    let app = app();
    app.user_with_credits("ada@example.com", 5).await;

    let response = app
        .server
        .post("/token")
        .form(&LoginForm { username: "ada@example.com", password: "nope" })
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["detail"], "Incorrect email or password");
}

#[tokio::test]
async fn test_usage_lists_own_records_newest_first() {
    let app = app();
    let user = app.user_with_credits("ada@example.com", 5).await;

    for message in ["one", "two"] {
        let response = app
            .server
            .post("/chat")
            .add_header(header::AUTHORIZATION, bearer(&user.api_key))
            .json(&json!({"message": message}))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }
    crate::test_helpers::wait_for_ledger(&app.store, 2).await;

    let response = app
        .server
        .get("/usage")
        .add_query_param("limit", 1)
        .add_header(header::AUTHORIZATION, bearer(&user.api_key))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let records = response.json::<Vec<Value>>();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["user_id"], user.id);
    assert_eq!(records[0]["tokens_used"], 1);
}

#[tokio::test]
async fn test_public_routes() {
    let app = app();

    let root = app.server.get("/").await;
    assert_eq!(root.json::<Value>()["message"], "Welcome to the Taskmind API");

    for path in ["/health", "/healthz"] {
        let response = app.server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>(), json!({"status": "ok"}));
    }

    let version = app.server.get("/version").await;
    assert_eq!(version.status_code(), StatusCode::OK);
    assert!(version.json::<Value>()["cargo_version"].is_string());
}
