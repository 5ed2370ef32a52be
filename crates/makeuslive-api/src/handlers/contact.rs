//! Contact form handlers
//!
//! The public endpoint persists first and only then fans out notification
//! email on a spawned task; a failed send never affects the response.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AdminContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::services::notify;
use crate::state::AppState;
use crate::utils::pagination::ListQuery;
use makeuslive_core::models::{ContactSubmissionResponse, CreateContactRequest};
use makeuslive_core::AppError;

/// Submit the contact form
#[utoipa::path(
    post,
    path = "/api/v1/contact",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Submission stored", body = ContactSubmissionResponse),
        (status = 400, description = "Validation failed, field detail included"),
        (status = 429, description = "Rate limited"),
        (status = 500, description = "Persistence failure")
    ),
    tag = "contact"
)]
#[tracing::instrument(skip(state, request))]
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateContactRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate()?;

    let submission = state
        .db
        .contact
        .create(
            request.name.trim(),
            request.email.trim(),
            request.phone.as_deref().map(str::trim).filter(|s| !s.is_empty()),
            request.company.as_deref().map(str::trim).filter(|s| !s.is_empty()),
            request.message.trim(),
        )
        .await?;

    tracing::info!(submission_id = %submission.id, "Contact submission stored");

    let (subject, body) = notify::contact_notification(&submission);
    notify::spawn_notification(
        state.email.clone(),
        state.config.notify_emails.clone(),
        subject,
        body,
    );

    Ok((
        StatusCode::CREATED,
        Json(ContactSubmissionResponse::from(submission)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/contact-submissions",
    params(ListQuery),
    responses((status = 200, description = "Contact submissions, newest first", body = Vec<ContactSubmissionResponse>)),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn list_contact_submissions(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (limit, offset) = query.limit_offset();
    let submissions = state.db.contact.list(limit, offset).await?;
    let responses: Vec<ContactSubmissionResponse> = submissions
        .into_iter()
        .map(ContactSubmissionResponse::from)
        .collect();
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/contact-submissions/{id}",
    params(("id" = Uuid, Path, description = "Submission id")),
    responses(
        (status = 200, description = "Submission", body = ContactSubmissionResponse),
        (status = 404, description = "Submission not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn get_contact_submission(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let submission = state
        .db
        .contact
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;
    Ok(Json(ContactSubmissionResponse::from(submission)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/contact-submissions/{id}",
    params(("id" = Uuid, Path, description = "Submission id")),
    responses(
        (status = 204, description = "Submission deleted"),
        (status = 404, description = "Submission not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_contact_submission(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !state.db.contact.delete(id).await? {
        return Err(AppError::NotFound("Submission not found".to_string()).into());
    }
    tracing::info!(submission_id = %id, admin = %ctx.email, "Contact submission deleted");
    Ok(StatusCode::NO_CONTENT)
}
