//! Job application handlers
//!
//! Multipart endpoint: applicant fields plus a single resume file part
//! named `resume`. The resume persists base64-encoded inside the
//! application row.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use base64::Engine as _;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::auth::AdminContext;
use crate::error::HttpAppError;
use crate::services::notify;
use crate::state::AppState;
use crate::utils::multipart::{collect_submission, single_value};
use crate::utils::pagination::ListQuery;
use makeuslive_core::models::{JobApplicationResponse, StoredFile};
use makeuslive_core::validation::{is_valid_email, is_valid_phone};
use makeuslive_core::AppError;
use makeuslive_forms::{sanitize_filename, FieldError};

/// Multipart field name for the resume attachment.
const RESUME_FIELD: &str = "resume";

/// Apply to an open position
#[utoipa::path(
    post,
    path = "/api/v1/jobs/{slug}/applications",
    params(("slug" = String, Path, description = "Job slug")),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Application stored", body = JobApplicationResponse),
        (status = 400, description = "Validation failed, field detail included"),
        (status = 404, description = "No open job with this slug"),
        (status = 429, description = "Rate limited"),
        (status = 500, description = "Persistence failure")
    ),
    tag = "jobs"
)]
#[tracing::instrument(skip(state, multipart))]
pub async fn submit_application(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let job = state
        .db
        .jobs
        .get_open_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    let raw = collect_submission(multipart).await?;

    let mut errors: Vec<FieldError> = Vec::new();

    let name = single_value(&raw, "name").map(str::trim).unwrap_or("");
    if name.is_empty() {
        errors.push(FieldError::new("name", "required", "'Name' is required"));
    }

    let email = single_value(&raw, "email").map(str::trim).unwrap_or("");
    if email.is_empty() {
        errors.push(FieldError::new("email", "required", "'Email' is required"));
    } else if !is_valid_email(email) {
        errors.push(FieldError::new(
            "email",
            "invalid_email",
            "'Email' must be a valid email address",
        ));
    }

    let phone = single_value(&raw, "phone").map(str::trim).filter(|s| !s.is_empty());
    if let Some(p) = phone {
        if !is_valid_phone(p) {
            errors.push(FieldError::new(
                "phone",
                "invalid_phone",
                "'Phone' must be a valid phone number",
            ));
        }
    }

    let cover_letter = single_value(&raw, "cover_letter").map(str::trim).unwrap_or("");

    let resumes: Vec<_> = raw
        .files()
        .iter()
        .filter(|f| f.field == RESUME_FIELD)
        .collect();
    for stray in raw.files().iter().filter(|f| f.field != RESUME_FIELD) {
        errors.push(FieldError::new(
            stray.field.clone(),
            "unknown_field",
            "Only a 'resume' file part is accepted",
        ));
    }
    match resumes.as_slice() {
        [] => errors.push(FieldError::new(
            RESUME_FIELD,
            "required",
            "'Resume' requires a file",
        )),
        [_] => {}
        _ => errors.push(FieldError::new(
            RESUME_FIELD,
            "multiple_values",
            "'Resume' accepts a single file",
        )),
    }

    if !errors.is_empty() {
        return Err(HttpAppError::invalid_fields(errors));
    }
    // Exactly one part left: the cardinality errors above returned already.
    let resume_part = resumes[0];

    // Size and content-type checks: same error class as the dynamic forms.
    let filename = sanitize_filename(&resume_part.filename)?;
    let mut checked_part = resume_part.clone();
    checked_part.filename = filename.clone();
    state
        .intake
        .resume_rules()
        .check(std::slice::from_ref(&checked_part))?;

    let resume = StoredFile {
        filename,
        content_type: resume_part.content_type.clone(),
        size: resume_part.data.len() as i64,
        data: Some(base64::engine::general_purpose::STANDARD.encode(&resume_part.data)),
    };
    let resume_value = serde_json::to_value(&resume).map_err(AppError::from)?;

    let application = state
        .db
        .applications
        .create(job.id, name, email, phone, cover_letter, resume_value)
        .await?;

    tracing::info!(
        application_id = %application.id,
        job = %job.slug,
        "Job application stored"
    );

    let (subject, body) = notify::application_notification(&job.title, &application);
    notify::spawn_notification(
        state.email.clone(),
        state.config.notify_emails.clone(),
        subject,
        body,
    );

    Ok((
        StatusCode::CREATED,
        Json(application.into_list_response()),
    ))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ApplicationListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Narrow to one job
    pub job_id: Option<Uuid>,
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/applications",
    params(ApplicationListQuery),
    responses((status = 200, description = "Applications, newest first, resume blobs stripped", body = Vec<JobApplicationResponse>)),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn list_applications(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let paging = ListQuery {
        limit: query.limit,
        offset: query.offset,
    };
    let (limit, offset) = paging.limit_offset();
    let applications = state
        .db
        .applications
        .list(query.job_id, limit, offset)
        .await?;
    let responses: Vec<JobApplicationResponse> = applications
        .into_iter()
        .map(|a| a.into_list_response())
        .collect();
    Ok(Json(responses))
}

/// Detail read, resume blob included
#[utoipa::path(
    get,
    path = "/api/v1/admin/applications/{id}",
    params(("id" = Uuid, Path, description = "Application id")),
    responses(
        (status = 200, description = "Application with resume data", body = JobApplicationResponse),
        (status = 404, description = "Application not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn get_application(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let application = state
        .db
        .applications
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;
    Ok(Json(application.into_detail_response()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/applications/{id}",
    params(("id" = Uuid, Path, description = "Application id")),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 404, description = "Application not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_application(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !state.db.applications.delete(id).await? {
        return Err(AppError::NotFound("Application not found".to_string()).into());
    }
    tracing::info!(application_id = %id, admin = %ctx.email, "Application deleted");
    Ok(StatusCode::NO_CONTENT)
}
