//! Consent log integration tests.
//!
//! Run with: `cargo test -p makeuslive-api --test consent_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use helpers::auth::{bearer, login_admin};
use helpers::{api_path, setup_test_app};
use uuid::Uuid;

#[tokio::test]
async fn test_consent_event_recorded_with_necessary_implied() {
    let app = setup_test_app().await;
    let client = app.client();

    let visitor_id = Uuid::new_v4();
    let response = client
        .post(&api_path("/consent"))
        .add_header("User-Agent", "integration-test/1.0")
        .json(&serde_json::json!({
            "visitor_id": visitor_id,
            "categories": {"analytics": true, "marketing": false, "necessary": false},
        }))
        .await;
    assert_eq!(response.status_code(), 201);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["visitor_id"], visitor_id.to_string());
    assert_eq!(body["categories"]["analytics"], true);
    assert_eq!(body["categories"]["marketing"], false);
    // Clients cannot opt out of the necessary category
    assert_eq!(body["categories"]["necessary"], true);
    assert_eq!(body["user_agent"], "integration-test/1.0");
}

#[tokio::test]
async fn test_consent_rejects_oversized_category_map() {
    let app = setup_test_app().await;
    let client = app.client();

    let categories: serde_json::Map<String, serde_json::Value> = (0..25)
        .map(|i| (format!("category-{}", i), serde_json::json!(true)))
        .collect();
    let response = client
        .post(&api_path("/consent"))
        .json(&serde_json::json!({
            "visitor_id": Uuid::new_v4(),
            "categories": categories,
        }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_admin_lists_consent_events_newest_first() {
    let app = setup_test_app().await;
    let client = app.client();

    for granted in [true, false] {
        let response = client
            .post(&api_path("/consent"))
            .json(&serde_json::json!({
                "visitor_id": Uuid::new_v4(),
                "categories": {"analytics": granted},
            }))
            .await;
        assert_eq!(response.status_code(), 201);
    }

    let token = login_admin(client).await;
    let listed = client
        .get(&api_path("/admin/consent-events"))
        .add_header("Authorization", bearer(&token))
        .await
        .json::<serde_json::Value>();
    let events = listed.as_array().unwrap();
    assert_eq!(events.len(), 2);
    // Newest first: the second insert leads
    assert_eq!(events[0]["categories"]["analytics"], false);
}
