//! Career opening handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AdminContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use crate::utils::pagination::ListQuery;
use makeuslive_core::models::{JobInput, JobResponse};
use makeuslive_core::validation::validate_slug;
use makeuslive_core::AppError;

#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    responses((status = 200, description = "Open positions", body = Vec<JobResponse>)),
    tag = "jobs"
)]
#[tracing::instrument(skip(state))]
pub async fn list_open_jobs(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let jobs = state.db.jobs.list_open().await?;
    let responses: Vec<JobResponse> = jobs.into_iter().map(JobResponse::from).collect();
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs/{slug}",
    params(("slug" = String, Path, description = "Job slug")),
    responses(
        (status = 200, description = "Job", body = JobResponse),
        (status = 404, description = "No open job with this slug")
    ),
    tag = "jobs"
)]
#[tracing::instrument(skip(state))]
pub async fn get_open_job(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let job = state
        .db
        .jobs
        .get_open_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/jobs",
    request_body = JobInput,
    responses(
        (status = 201, description = "Job created", body = JobResponse),
        (status = 409, description = "Slug already in use")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx, input))]
pub async fn create_job(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    ValidatedJson(input): ValidatedJson<JobInput>,
) -> Result<impl IntoResponse, HttpAppError> {
    validate_slug(&input.slug).map_err(AppError::BadRequest)?;
    let job = state.db.jobs.create(input).await?;
    tracing::info!(job_id = %job.id, admin = %ctx.email, "Job created");
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/jobs",
    params(ListQuery),
    responses((status = 200, description = "All jobs", body = Vec<JobResponse>)),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (limit, offset) = query.limit_offset();
    let jobs = state.db.jobs.list_all(limit, offset).await?;
    let responses: Vec<JobResponse> = jobs.into_iter().map(JobResponse::from).collect();
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job", body = JobResponse),
        (status = 404, description = "Job not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn get_job(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let job = state
        .db
        .jobs
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job id")),
    request_body = JobInput,
    responses(
        (status = 200, description = "Job updated", body = JobResponse),
        (status = 404, description = "Job not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx, input))]
pub async fn update_job(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<JobInput>,
) -> Result<impl IntoResponse, HttpAppError> {
    validate_slug(&input.slug).map_err(AppError::BadRequest)?;
    let job = state.db.jobs.update(id, input).await?;
    tracing::info!(job_id = %job.id, admin = %ctx.email, "Job updated");
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job id")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 404, description = "Job not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_job(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !state.db.jobs.delete(id).await? {
        return Err(AppError::NotFound("Job not found".to_string()).into());
    }
    tracing::info!(job_id = %id, admin = %ctx.email, "Job deleted");
    Ok(StatusCode::NO_CONTENT)
}
