//! Contact form integration tests.
//!
//! Run with: `cargo test -p makeuslive-api --test contact_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use helpers::auth::{bearer, login_admin};
use helpers::{api_path, setup_test_app};

#[tokio::test]
async fn test_contact_submission_persists() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post(&api_path("/contact"))
        .json(&serde_json::json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "+44 20 7946 0000",
            "message": "We would like a new site.",
        }))
        .await;
    assert_eq!(response.status_code(), 201);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["name"], "Ada Lovelace");

    // Visible to the admin, newest first
    let token = login_admin(client).await;
    let listed = client
        .get(&api_path("/admin/contact-submissions"))
        .add_header("Authorization", bearer(&token))
        .await
        .json::<serde_json::Value>();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_contact_validation_returns_field_errors() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post(&api_path("/contact"))
        .json(&serde_json::json!({
            "name": "",
            "email": "not-an-email",
            "message": "",
        }))
        .await;
    assert_eq!(response.status_code(), 400);
    let body = response.json::<serde_json::Value>();
    let fields: Vec<&str> = body["field_errors"]
        .as_array()
        .expect("field_errors present")
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"message"));
}

#[tokio::test]
async fn test_contact_rejects_non_json_garbage() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post(&api_path("/contact"))
        .content_type("application/json")
        .text("{not json")
        .await;
    assert_eq!(response.status_code(), 400);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_admin_can_delete_contact_submission() {
    let app = setup_test_app().await;
    let client = app.client();

    let created = client
        .post(&api_path("/contact"))
        .json(&serde_json::json!({
            "name": "Grace",
            "email": "grace@example.com",
            "message": "Hi",
        }))
        .await
        .json::<serde_json::Value>();
    let id = created["id"].as_str().unwrap();

    let token = login_admin(client).await;
    let response = client
        .delete(&api_path(&format!("/admin/contact-submissions/{}", id)))
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(response.status_code(), 204);

    let response = client
        .get(&api_path(&format!("/admin/contact-submissions/{}", id)))
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(response.status_code(), 404);
}
