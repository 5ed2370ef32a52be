//! Admin auth helpers for integration tests.

use axum_test::TestServer;

use super::api_path;

pub const TEST_ADMIN_EMAIL: &str = "admin@makeuslive.test";
pub const TEST_ADMIN_PASSWORD: &str = "correct-horse-battery-staple";

/// Log in as the seeded admin and return the bearer token.
pub async fn login_admin(server: &TestServer) -> String {
    let response = server
        .post(&api_path("/admin/login"))
        .json(&serde_json::json!({
            "email": TEST_ADMIN_EMAIL,
            "password": TEST_ADMIN_PASSWORD,
        }))
        .await;
    assert_eq!(response.status_code(), 200, "admin login should succeed");
    response.json::<serde_json::Value>()["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}

/// Authorization header value for the given token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
