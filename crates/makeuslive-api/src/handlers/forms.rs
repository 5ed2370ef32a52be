//! Dynamic form handlers
//!
//! The public surface serves published definitions and accepts multipart
//! submissions; the admin surface manages definitions and reads stored
//! submissions. The form engine owns all validation semantics; this module
//! is transport and persistence.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::auth::AdminContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::services::notify;
use crate::state::AppState;
use crate::utils::multipart::collect_submission;
use crate::utils::pagination::ListQuery;
use makeuslive_core::models::{
    FormDefinitionInput, FormDefinitionResponse, FormSubmissionResponse,
};
use makeuslive_core::validation::validate_slug;
use makeuslive_core::AppError;
use makeuslive_forms::{parse_fields, validate_definition, validate_submission};

/// Serve a published form definition for client-side rendering
#[utoipa::path(
    get,
    path = "/api/v1/forms/{slug}",
    params(("slug" = String, Path, description = "Form slug")),
    responses(
        (status = 200, description = "Form definition", body = FormDefinitionResponse),
        (status = 404, description = "No published form with this slug")
    ),
    tag = "forms"
)]
#[tracing::instrument(skip(state))]
pub async fn get_published_form(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = state
        .db
        .form_definitions
        .get_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))?;
    Ok(Json(FormDefinitionResponse::from(form)))
}

/// Submit a dynamic form
///
/// Multipart body: ordinary fields keyed by field id (checkbox groups
/// repeat the key), file parts under their field id.
#[utoipa::path(
    post,
    path = "/api/v1/forms/{slug}/submissions",
    params(("slug" = String, Path, description = "Form slug")),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Submission stored", body = FormSubmissionResponse),
        (status = 400, description = "Validation failed, field detail included"),
        (status = 404, description = "No published form with this slug"),
        (status = 429, description = "Rate limited"),
        (status = 500, description = "Persistence failure")
    ),
    tag = "forms"
)]
#[tracing::instrument(skip(state, multipart))]
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let definition = state
        .db
        .form_definitions
        .get_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))?;

    // Stored definitions were validated on write; a parse failure here
    // means the document was corrupted out of band.
    let fields = parse_fields(&definition.fields)
        .map_err(|e| AppError::Internal(format!("Stored form definition is invalid: {}", e)))?;

    let raw = collect_submission(multipart).await?;
    let rules = state.intake.rules_for(&definition);
    let validated = validate_submission(&fields, raw, &rules)?;

    let files_value = serde_json::to_value(&validated.files).map_err(AppError::from)?;
    let submission = state
        .db
        .form_submissions
        .create(
            definition.id,
            serde_json::Value::Object(validated.payload),
            files_value,
        )
        .await?;

    tracing::info!(
        submission_id = %submission.id,
        form = %definition.slug,
        files = validated.files.len(),
        "Form submission stored"
    );

    let (subject, body) =
        notify::form_notification(&definition.name, &submission.payload, &validated.files);
    notify::spawn_notification(
        state.email.clone(),
        state.config.notify_emails.clone(),
        subject,
        body,
    );

    // List-shaped response: echoing blobs back to the submitter is waste.
    Ok((
        StatusCode::CREATED,
        Json(submission.into_list_response()),
    ))
}

fn validate_definition_input(input: &FormDefinitionInput) -> Result<(), HttpAppError> {
    validate_slug(&input.slug).map_err(AppError::BadRequest)?;
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("Form name is required".to_string()).into());
    }
    let fields = parse_fields(&input.fields).map_err(AppError::BadRequest)?;
    validate_definition(&fields).map_err(AppError::BadRequest)?;
    if input.max_file_size_bytes.is_some_and(|v| v <= 0)
        || input.max_total_size_bytes.is_some_and(|v| v <= 0)
    {
        return Err(AppError::BadRequest("Size limits must be positive".to_string()).into());
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/forms",
    request_body = FormDefinitionInput,
    responses(
        (status = 201, description = "Form created", body = FormDefinitionResponse),
        (status = 400, description = "Invalid definition"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx, input))]
pub async fn create_form(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    ValidatedJson(input): ValidatedJson<FormDefinitionInput>,
) -> Result<impl IntoResponse, HttpAppError> {
    validate_definition_input(&input)?;
    let form = state.db.form_definitions.create(input).await?;
    tracing::info!(form_id = %form.id, admin = %ctx.email, "Form created");
    Ok((StatusCode::CREATED, Json(FormDefinitionResponse::from(form))))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/forms",
    params(ListQuery),
    responses((status = 200, description = "All forms", body = Vec<FormDefinitionResponse>)),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn list_forms(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (limit, offset) = query.limit_offset();
    let forms = state.db.form_definitions.list(limit, offset).await?;
    let responses: Vec<FormDefinitionResponse> = forms
        .into_iter()
        .map(FormDefinitionResponse::from)
        .collect();
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/forms/{id}",
    params(("id" = Uuid, Path, description = "Form id")),
    responses(
        (status = 200, description = "Form", body = FormDefinitionResponse),
        (status = 404, description = "Form not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn get_form(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = state
        .db
        .form_definitions
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))?;
    Ok(Json(FormDefinitionResponse::from(form)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/forms/{id}",
    params(("id" = Uuid, Path, description = "Form id")),
    request_body = FormDefinitionInput,
    responses(
        (status = 200, description = "Form updated", body = FormDefinitionResponse),
        (status = 404, description = "Form not found"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx, input))]
pub async fn update_form(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<FormDefinitionInput>,
) -> Result<impl IntoResponse, HttpAppError> {
    validate_definition_input(&input)?;
    let form = state.db.form_definitions.update(id, input).await?;
    tracing::info!(form_id = %form.id, admin = %ctx.email, "Form updated");
    Ok(Json(FormDefinitionResponse::from(form)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/forms/{id}",
    params(("id" = Uuid, Path, description = "Form id")),
    responses(
        (status = 204, description = "Form deleted, submissions cascade"),
        (status = 404, description = "Form not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_form(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !state.db.form_definitions.delete(id).await? {
        return Err(AppError::NotFound("Form not found".to_string()).into());
    }
    tracing::info!(form_id = %id, admin = %ctx.email, "Form deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SubmissionListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Narrow to one form
    pub form_id: Option<Uuid>,
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/form-submissions",
    params(SubmissionListQuery),
    responses((status = 200, description = "Submissions, newest first, blobs stripped", body = Vec<FormSubmissionResponse>)),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn list_form_submissions(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
    Query(query): Query<SubmissionListQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let paging = ListQuery {
        limit: query.limit,
        offset: query.offset,
    };
    let (limit, offset) = paging.limit_offset();
    let submissions = state
        .db
        .form_submissions
        .list(query.form_id, limit, offset)
        .await?;
    let responses: Vec<FormSubmissionResponse> = submissions
        .into_iter()
        .map(|s| s.into_list_response())
        .collect();
    Ok(Json(responses))
}

/// Detail read, file blobs included
#[utoipa::path(
    get,
    path = "/api/v1/admin/form-submissions/{id}",
    params(("id" = Uuid, Path, description = "Submission id")),
    responses(
        (status = 200, description = "Submission with file data", body = FormSubmissionResponse),
        (status = 404, description = "Submission not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn get_form_submission(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let submission = state
        .db
        .form_submissions
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;
    Ok(Json(submission.into_detail_response()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/form-submissions/{id}",
    params(("id" = Uuid, Path, description = "Submission id")),
    responses(
        (status = 204, description = "Submission deleted"),
        (status = 404, description = "Submission not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_form_submission(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !state.db.form_submissions.delete(id).await? {
        return Err(AppError::NotFound("Submission not found".to_string()).into());
    }
    tracing::info!(submission_id = %id, admin = %ctx.email, "Form submission deleted");
    Ok(StatusCode::NO_CONTENT)
}
