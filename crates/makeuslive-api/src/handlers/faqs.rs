//! FAQ handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AdminContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use makeuslive_core::models::{FaqEntryInput, FaqEntryResponse};
use makeuslive_core::AppError;

#[utoipa::path(
    get,
    path = "/api/v1/faqs",
    responses((status = 200, description = "Published FAQ entries", body = Vec<FaqEntryResponse>)),
    tag = "faqs"
)]
#[tracing::instrument(skip(state))]
pub async fn list_published_faqs(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let entries = state.db.faqs.list_published().await?;
    let responses: Vec<FaqEntryResponse> = entries.into_iter().map(FaqEntryResponse::from).collect();
    Ok(Json(responses))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/faqs",
    request_body = FaqEntryInput,
    responses((status = 201, description = "FAQ entry created", body = FaqEntryResponse)),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx, input))]
pub async fn create_faq(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    ValidatedJson(input): ValidatedJson<FaqEntryInput>,
) -> Result<impl IntoResponse, HttpAppError> {
    if input.question.trim().is_empty() || input.answer.trim().is_empty() {
        return Err(AppError::BadRequest("Question and answer are required".to_string()).into());
    }
    let entry = state.db.faqs.create(input).await?;
    tracing::info!(faq_id = %entry.id, admin = %ctx.email, "FAQ entry created");
    Ok((StatusCode::CREATED, Json(FaqEntryResponse::from(entry))))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/faqs",
    responses((status = 200, description = "All FAQ entries", body = Vec<FaqEntryResponse>)),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn list_faqs(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let entries = state.db.faqs.list_all().await?;
    let responses: Vec<FaqEntryResponse> = entries.into_iter().map(FaqEntryResponse::from).collect();
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/faqs/{id}",
    params(("id" = Uuid, Path, description = "FAQ entry id")),
    responses(
        (status = 200, description = "FAQ entry", body = FaqEntryResponse),
        (status = 404, description = "FAQ entry not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn get_faq(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let entry = state
        .db
        .faqs
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("FAQ entry not found".to_string()))?;
    Ok(Json(FaqEntryResponse::from(entry)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/faqs/{id}",
    params(("id" = Uuid, Path, description = "FAQ entry id")),
    request_body = FaqEntryInput,
    responses(
        (status = 200, description = "FAQ entry updated", body = FaqEntryResponse),
        (status = 404, description = "FAQ entry not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx, input))]
pub async fn update_faq(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<FaqEntryInput>,
) -> Result<impl IntoResponse, HttpAppError> {
    let entry = state.db.faqs.update(id, input).await?;
    tracing::info!(faq_id = %entry.id, admin = %ctx.email, "FAQ entry updated");
    Ok(Json(FaqEntryResponse::from(entry)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/faqs/{id}",
    params(("id" = Uuid, Path, description = "FAQ entry id")),
    responses(
        (status = 204, description = "FAQ entry deleted"),
        (status = 404, description = "FAQ entry not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_faq(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !state.db.faqs.delete(id).await? {
        return Err(AppError::NotFound("FAQ entry not found".to_string()).into());
    }
    tracing::info!(faq_id = %id, admin = %ctx.email, "FAQ entry deleted");
    Ok(StatusCode::NO_CONTENT)
}
