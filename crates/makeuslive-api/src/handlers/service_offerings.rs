//! Service offering handlers

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
use makeuslive_core::models::{ServiceOfferingInput, ServiceOfferingResponse};
use makeuslive_core::validation::validate_slug;
use makeuslive_core::AppError;

#[utoipa::path(
    get,
    path = "/api/v1/services",
    responses((status = 200, description = "Published services", body = Vec<ServiceOfferingResponse>)),
    tag = "services"
)]
#[tracing::instrument(skip(state))]
pub async fn list_published_services(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let services = state.db.services.list_published().await?;
    let responses: Vec<ServiceOfferingResponse> = services
        .into_iter()
        .map(ServiceOfferingResponse::from)
        .collect();
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/api/v1/services/{slug}",
    params(("slug" = String, Path, description = "Service slug")),
    responses(
        (status = 200, description = "Service", body = ServiceOfferingResponse),
        (status = 404, description = "No published service with this slug")
    ),
    tag = "services"
)]
#[tracing::instrument(skip(state))]
pub async fn get_published_service(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let service = state
        .db
        .services
        .get_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;
    Ok(Json(ServiceOfferingResponse::from(service)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/services",
    request_body = ServiceOfferingInput,
    responses(
        (status = 201, description = "Service created", body = ServiceOfferingResponse),
        (status = 409, description = "Slug already in use")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx, input))]
pub async fn create_service(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    ValidatedJson(input): ValidatedJson<ServiceOfferingInput>,
) -> Result<impl IntoResponse, HttpAppError> {
    validate_slug(&input.slug).map_err(AppError::BadRequest)?;
    let service = state.db.services.create(input).await?;
    tracing::info!(service_id = %service.id, admin = %ctx.email, "Service created");
    Ok((StatusCode::CREATED, Json(ServiceOfferingResponse::from(service))))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/services",
    responses((status = 200, description = "All services", body = Vec<ServiceOfferingResponse>)),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn list_services(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let services = state.db.services.list_all().await?;
    let responses: Vec<ServiceOfferingResponse> = services
        .into_iter()
        .map(ServiceOfferingResponse::from)
        .collect();
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/services/{id}",
    params(("id" = Uuid, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service", body = ServiceOfferingResponse),
        (status = 404, description = "Service not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn get_service(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let service = state
        .db
        .services
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;
    Ok(Json(ServiceOfferingResponse::from(service)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/services/{id}",
    params(("id" = Uuid, Path, description = "Service id")),
    request_body = ServiceOfferingInput,
    responses(
        (status = 200, description = "Service updated", body = ServiceOfferingResponse),
        (status = 404, description = "Service not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx, input))]
pub async fn update_service(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<ServiceOfferingInput>,
) -> Result<impl IntoResponse, HttpAppError> {
    validate_slug(&input.slug).map_err(AppError::BadRequest)?;
    let service = state.db.services.update(id, input).await?;
    tracing::info!(service_id = %service.id, admin = %ctx.email, "Service updated");
    Ok(Json(ServiceOfferingResponse::from(service)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/services/{id}",
    params(("id" = Uuid, Path, description = "Service id")),
    responses(
        (status = 204, description = "Service deleted"),
        (status = 404, description = "Service not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !state.db.services.delete(id).await? {
        return Err(AppError::NotFound("Service not found".to_string()).into());
    }
    tracing::info!(service_id = %id, admin = %ctx.email, "Service deleted");
    Ok(StatusCode::NO_CONTENT)
}
