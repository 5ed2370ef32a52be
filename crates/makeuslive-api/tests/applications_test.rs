//! Job application integration tests.
//!
//! Run with: `cargo test -p makeuslive-api --test applications_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::auth::{bearer, login_admin};
use helpers::fixtures::{job_input, pdf_bytes};
use helpers::{api_path, setup_test_app};

async fn create_job(app: &helpers::TestApp, slug: &str, open: bool) {
    let token = login_admin(app.client()).await;
    let response = app
        .client()
        .post(&api_path("/admin/jobs"))
        .add_header("Authorization", bearer(&token))
        .json(&job_input(slug, open))
        .await;
    assert_eq!(response.status_code(), 201);
}

fn application_form() -> MultipartForm {
    MultipartForm::new()
        .add_text("name", "Grace Hopper")
        .add_text("email", "grace@example.com")
        .add_text("phone", "+1 555 0100")
        .add_text("cover_letter", "I build compilers.")
        .add_part(
            "resume",
            Part::bytes(pdf_bytes())
                .file_name("grace.pdf")
                .mime_type("application/pdf"),
        )
}

#[tokio::test]
async fn test_apply_to_open_job() {
    let app = setup_test_app().await;
    create_job(&app, "creative-dev", true).await;

    let response = app
        .client()
        .post(&api_path("/jobs/creative-dev/applications"))
        .multipart(application_form())
        .await;
    assert_eq!(response.status_code(), 201);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["applicant_name"], "Grace Hopper");
    assert_eq!(body["resume"]["filename"], "grace.pdf");
    assert!(body["resume"].get("data").is_none(), "no blob echo");
}

#[tokio::test]
async fn test_closed_job_rejects_applications() {
    let app = setup_test_app().await;
    create_job(&app, "closed-role", false).await;

    let response = app
        .client()
        .post(&api_path("/jobs/closed-role/applications"))
        .multipart(application_form())
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_missing_resume_is_a_field_error() {
    let app = setup_test_app().await;
    create_job(&app, "creative-dev", true).await;

    let form = MultipartForm::new()
        .add_text("name", "Grace")
        .add_text("email", "grace@example.com");
    let response = app
        .client()
        .post(&api_path("/jobs/creative-dev/applications"))
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
    assert!(codes.contains(&("resume", "required")));
}

#[tokio::test]
async fn test_resume_content_type_is_enforced() {
    let app = setup_test_app().await;
    create_job(&app, "creative-dev", true).await;

    let form = MultipartForm::new()
        .add_text("name", "Grace")
        .add_text("email", "grace@example.com")
        .add_part(
            "resume",
            Part::bytes(vec![0u8; 32])
                .file_name("resume.png")
                .mime_type("image/png"),
        );
    let response = app
        .client()
        .post(&api_path("/jobs/creative-dev/applications"))
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), 400);
    let body = response.json::<serde_json::Value>();
    assert!(body.get("field_errors").is_none(), "type violation is a plain 400");
}

#[tokio::test]
async fn test_admin_reads_applications() {
    let app = setup_test_app().await;
    create_job(&app, "creative-dev", true).await;

    app.client()
        .post(&api_path("/jobs/creative-dev/applications"))
        .multipart(application_form())
        .await;

    let token = login_admin(app.client()).await;
    let listed = app
        .client()
        .get(&api_path("/admin/applications"))
        .add_header("Authorization", bearer(&token))
        .await
        .json::<serde_json::Value>();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert!(listed[0]["resume"].get("data").is_none());

    let id = listed[0]["id"].as_str().unwrap();
    let detail = app
        .client()
        .get(&api_path(&format!("/admin/applications/{}", id)))
        .add_header("Authorization", bearer(&token))
        .await
        .json::<serde_json::Value>();
    assert!(detail["resume"]["data"].is_string(), "detail includes the resume blob");
}
