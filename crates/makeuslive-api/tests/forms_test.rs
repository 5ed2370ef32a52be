//! Dynamic form pipeline integration tests: definition management, the
//! public submission endpoint, and admin reads.
//!
//! Run with: `cargo test -p makeuslive-api --test forms_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::auth::{bearer, login_admin};
use helpers::fixtures::{form_definition_input, pdf_bytes};
use helpers::{api_path, setup_test_app};

async fn create_form(app: &helpers::TestApp, definition: serde_json::Value) -> serde_json::Value {
    let token = login_admin(app.client()).await;
    let response = app
        .client()
        .post(&api_path("/admin/forms"))
        .add_header("Authorization", bearer(&token))
        .json(&definition)
        .await;
    assert_eq!(response.status_code(), 201, "form creation should succeed");
    response.json::<serde_json::Value>()
}

#[tokio::test]
async fn test_public_form_read() {
    let app = setup_test_app().await;
    create_form(&app, form_definition_input("project-brief", true)).await;

    let response = app.client().get(&api_path("/forms/project-brief")).await;
    assert_eq!(response.status_code(), 200);
    let form = response.json::<serde_json::Value>();
    assert_eq!(form["name"], "Project brief");
    assert_eq!(form["fields"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_unpublished_form_is_invisible() {
    let app = setup_test_app().await;
    create_form(&app, form_definition_input("hidden-form", false)).await;

    let response = app.client().get(&api_path("/forms/hidden-form")).await;
    assert_eq!(response.status_code(), 404);

    let form = MultipartForm::new()
        .add_text("name", "Ada")
        .add_text("email", "ada@example.com");
    let response = app
        .client()
        .post(&api_path("/forms/hidden-form/submissions"))
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_submission_with_checkbox_group_and_file() {
    let app = setup_test_app().await;
    create_form(&app, form_definition_input("project-brief", true)).await;

    let form = MultipartForm::new()
        .add_text("name", "Ada Lovelace")
        .add_text("email", "ada@example.com")
        .add_text("topics", "web")
        .add_text("topics", "motion")
        .add_part(
            "brief",
            Part::bytes(pdf_bytes())
                .file_name("brief.pdf")
                .mime_type("application/pdf"),
        );

    let response = app
        .client()
        .post(&api_path("/forms/project-brief/submissions"))
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), 201);
    let submission = response.json::<serde_json::Value>();
    assert_eq!(submission["payload"]["name"], "Ada Lovelace");
    assert_eq!(
        submission["payload"]["topics"],
        serde_json::json!(["web", "motion"])
    );
    // Response is list-shaped: metadata yes, blob no
    assert_eq!(submission["files"][0]["filename"], "brief.pdf");
    assert!(submission["files"][0].get("data").is_none());
}

#[tokio::test]
async fn test_single_checkbox_value_coerces_to_array() {
    let app = setup_test_app().await;
    create_form(&app, form_definition_input("project-brief", true)).await;

    let form = MultipartForm::new()
        .add_text("name", "Ada")
        .add_text("email", "ada@example.com")
        .add_text("topics", "brand");
    let response = app
        .client()
        .post(&api_path("/forms/project-brief/submissions"))
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), 201);
    assert_eq!(
        response.json::<serde_json::Value>()["payload"]["topics"],
        serde_json::json!(["brand"])
    );
}

#[tokio::test]
async fn test_validation_errors_are_field_level() {
    let app = setup_test_app().await;
    create_form(&app, form_definition_input("project-brief", true)).await;

    let form = MultipartForm::new()
        .add_text("email", "not-an-email")
        .add_text("surprise", "value");
    let response = app
        .client()
        .post(&api_path("/forms/project-brief/submissions"))
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), 400);
    let body = response.json::<serde_json::Value>();
    let codes: Vec<(&str, &str)> = body["field_errors"]
        .as_array()
        .expect("field_errors present")
        .iter()
        .map(|e| (e["field"].as_str().unwrap(), e["code"].as_str().unwrap()))
        .collect();
    assert!(codes.contains(&("name", "required")));
    assert!(codes.contains(&("email", "invalid_email")));
    assert!(codes.contains(&("surprise", "unknown_field")));
}

#[tokio::test]
async fn test_oversized_file_is_a_readable_400() {
    let app = setup_test_app().await;
    // Definition narrows the per-file limit to 1 KiB
    let mut definition = form_definition_input("tight-form", true);
    definition["max_file_size_bytes"] = serde_json::json!(1024);
    create_form(&app, definition).await;

    let form = MultipartForm::new()
        .add_text("name", "Ada")
        .add_text("email", "ada@example.com")
        .add_part(
            "brief",
            Part::bytes(vec![0u8; 2048])
                .file_name("big.pdf")
                .mime_type("application/pdf"),
        );
    let response = app
        .client()
        .post(&api_path("/forms/tight-form/submissions"))
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), 400);
    let body = response.json::<serde_json::Value>();
    assert!(body.get("field_errors").is_none());
    assert!(body["error"].as_str().unwrap().contains("big.pdf"));
}

#[tokio::test]
async fn test_disallowed_content_type_rejected() {
    let app = setup_test_app().await;
    create_form(&app, form_definition_input("project-brief", true)).await;

    let form = MultipartForm::new()
        .add_text("name", "Ada")
        .add_text("email", "ada@example.com")
        .add_part(
            "brief",
            Part::bytes(vec![0u8; 16])
                .file_name("run.exe")
                .mime_type("application/x-msdownload"),
        );
    let response = app
        .client()
        .post(&api_path("/forms/project-brief/submissions"))
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_admin_reads_submissions_with_and_without_blobs() {
    let app = setup_test_app().await;
    create_form(&app, form_definition_input("project-brief", true)).await;

    let form = MultipartForm::new()
        .add_text("name", "Ada")
        .add_text("email", "ada@example.com")
        .add_part(
            "brief",
            Part::bytes(pdf_bytes())
                .file_name("brief.pdf")
                .mime_type("application/pdf"),
        );
    app.client()
        .post(&api_path("/forms/project-brief/submissions"))
        .multipart(form)
        .await;

    let token = login_admin(app.client()).await;
    let listed = app
        .client()
        .get(&api_path("/admin/form-submissions"))
        .add_header("Authorization", bearer(&token))
        .await
        .json::<serde_json::Value>();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert!(listed[0]["files"][0].get("data").is_none());

    let id = listed[0]["id"].as_str().unwrap();
    let detail = app
        .client()
        .get(&api_path(&format!("/admin/form-submissions/{}", id)))
        .add_header("Authorization", bearer(&token))
        .await
        .json::<serde_json::Value>();
    assert!(detail["files"][0]["data"].is_string(), "detail read includes the blob");
}

#[tokio::test]
async fn test_invalid_definition_rejected() {
    let app = setup_test_app().await;
    let token = login_admin(app.client()).await;

    // Choice field without options
    let mut definition = form_definition_input("bad-form", true);
    definition["fields"] = serde_json::json!([
        {"id": "pick", "label": "Pick one", "kind": "select"}
    ]);
    let response = app
        .client()
        .post(&api_path("/admin/forms"))
        .add_header("Authorization", bearer(&token))
        .json(&definition)
        .await;
    assert_eq!(response.status_code(), 400);
}
