//! Admin auth integration tests.
//!
//! Run with: `cargo test -p makeuslive-api --test auth_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use helpers::auth::{bearer, login_admin, TEST_ADMIN_EMAIL};
use helpers::{api_path, setup_test_app};

#[tokio::test]
async fn test_login_and_me() {
    let app = setup_test_app().await;
    let client = app.client();

    let token = login_admin(client).await;

    let response = client
        .get(&api_path("/admin/me"))
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(response.status_code(), 200);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["email"], TEST_ADMIN_EMAIL);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post(&api_path("/admin/login"))
        .json(&serde_json::json!({
            "email": TEST_ADMIN_EMAIL,
            "password": "definitely-wrong",
        }))
        .await;
    assert_eq!(response.status_code(), 401);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_rejects_unknown_email_with_same_error() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post(&api_path("/admin/login"))
        .json(&serde_json::json!({
            "email": "nobody@makeuslive.test",
            "password": "whatever-password",
        }))
        .await;
    assert_eq!(response.status_code(), 401);
    // Same message as a wrong password: no account enumeration
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client.get(&api_path("/admin/posts")).await;
    assert_eq!(response.status_code(), 401);

    let response = client
        .get(&api_path("/admin/posts"))
        .add_header("Authorization", "Bearer not.a.token")
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_repeated_login_failures_are_throttled() {
    let app = setup_test_app().await;
    let client = app.client();

    // The test config allows 5 failures per window
    for _ in 0..5 {
        let response = client
            .post(&api_path("/admin/login"))
            .json(&serde_json::json!({
                "email": TEST_ADMIN_EMAIL,
                "password": "wrong",
            }))
            .await;
        assert_eq!(response.status_code(), 401);
    }

    let response = client
        .post(&api_path("/admin/login"))
        .json(&serde_json::json!({
            "email": TEST_ADMIN_EMAIL,
            "password": "wrong",
        }))
        .await;
    assert_eq!(response.status_code(), 429);
}
