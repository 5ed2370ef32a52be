//! Case study handlers

use axum::{
    extract::{Path, Query, State},
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
use crate::state::AppState;
use crate::utils::pagination::ListQuery;
use makeuslive_core::models::{WorkInput, WorkResponse};
use makeuslive_core::validation::validate_slug;
use makeuslive_core::AppError;

#[derive(Debug, Deserialize, IntoParams)]
pub struct WorkListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub tag: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/works",
    params(WorkListQuery),
    responses((status = 200, description = "Published case studies", body = Vec<WorkResponse>)),
    tag = "works"
)]
#[tracing::instrument(skip(state))]
pub async fn list_published_works(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WorkListQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let paging = ListQuery {
        limit: query.limit,
        offset: query.offset,
    };
    let (limit, offset) = paging.limit_offset();
    let works = state
        .db
        .works
        .list_published(limit, offset, query.tag.as_deref())
        .await?;
    let responses: Vec<WorkResponse> = works.into_iter().map(WorkResponse::from).collect();
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/api/v1/works/{slug}",
    params(("slug" = String, Path, description = "Case study slug")),
    responses(
        (status = 200, description = "Case study", body = WorkResponse),
        (status = 404, description = "No published case study with this slug")
    ),
    tag = "works"
)]
#[tracing::instrument(skip(state))]
pub async fn get_published_work(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let work = state
        .db
        .works
        .get_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Case study not found".to_string()))?;
    Ok(Json(WorkResponse::from(work)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/works",
    request_body = WorkInput,
    responses(
        (status = 201, description = "Case study created", body = WorkResponse),
        (status = 409, description = "Slug already in use")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx, input))]
pub async fn create_work(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    ValidatedJson(input): ValidatedJson<WorkInput>,
) -> Result<impl IntoResponse, HttpAppError> {
    validate_slug(&input.slug).map_err(AppError::BadRequest)?;
    let work = state.db.works.create(input).await?;
    tracing::info!(work_id = %work.id, admin = %ctx.email, "Case study created");
    Ok((StatusCode::CREATED, Json(WorkResponse::from(work))))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/works",
    params(ListQuery),
    responses((status = 200, description = "All case studies", body = Vec<WorkResponse>)),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn list_works(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (limit, offset) = query.limit_offset();
    let works = state.db.works.list_all(limit, offset).await?;
    let responses: Vec<WorkResponse> = works.into_iter().map(WorkResponse::from).collect();
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/works/{id}",
    params(("id" = Uuid, Path, description = "Case study id")),
    responses(
        (status = 200, description = "Case study", body = WorkResponse),
        (status = 404, description = "Case study not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn get_work(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let work = state
        .db
        .works
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Case study not found".to_string()))?;
    Ok(Json(WorkResponse::from(work)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/works/{id}",
    params(("id" = Uuid, Path, description = "Case study id")),
    request_body = WorkInput,
    responses(
        (status = 200, description = "Case study updated", body = WorkResponse),
        (status = 404, description = "Case study not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx, input))]
pub async fn update_work(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<WorkInput>,
) -> Result<impl IntoResponse, HttpAppError> {
    validate_slug(&input.slug).map_err(AppError::BadRequest)?;
    let work = state.db.works.update(id, input).await?;
    tracing::info!(work_id = %work.id, admin = %ctx.email, "Case study updated");
    Ok(Json(WorkResponse::from(work)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/works/{id}",
    params(("id" = Uuid, Path, description = "Case study id")),
    responses(
        (status = 204, description = "Case study deleted"),
        (status = 404, description = "Case study not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_work(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !state.db.works.delete(id).await? {
        return Err(AppError::NotFound("Case study not found".to_string()).into());
    }
    tracing::info!(work_id = %id, admin = %ctx.email, "Case study deleted");
    Ok(StatusCode::NO_CONTENT)
}
