//! Testimonial handlers

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
use makeuslive_core::models::{TestimonialInput, TestimonialResponse};
use makeuslive_core::AppError;

#[utoipa::path(
    get,
    path = "/api/v1/testimonials",
    responses((status = 200, description = "Published testimonials", body = Vec<TestimonialResponse>)),
    tag = "testimonials"
)]
#[tracing::instrument(skip(state))]
pub async fn list_published_testimonials(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let testimonials = state.db.testimonials.list_published().await?;
    let responses: Vec<TestimonialResponse> = testimonials
        .into_iter()
        .map(TestimonialResponse::from)
        .collect();
    Ok(Json(responses))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/testimonials",
    request_body = TestimonialInput,
    responses((status = 201, description = "Testimonial created", body = TestimonialResponse)),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx, input))]
pub async fn create_testimonial(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    ValidatedJson(input): ValidatedJson<TestimonialInput>,
) -> Result<impl IntoResponse, HttpAppError> {
    if input.author_name.trim().is_empty() || input.quote.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Author name and quote are required".to_string(),
        )
        .into());
    }
    let testimonial = state.db.testimonials.create(input).await?;
    tracing::info!(testimonial_id = %testimonial.id, admin = %ctx.email, "Testimonial created");
    Ok((StatusCode::CREATED, Json(TestimonialResponse::from(testimonial))))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/testimonials",
    responses((status = 200, description = "All testimonials", body = Vec<TestimonialResponse>)),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn list_testimonials(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let testimonials = state.db.testimonials.list_all().await?;
    let responses: Vec<TestimonialResponse> = testimonials
        .into_iter()
        .map(TestimonialResponse::from)
        .collect();
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/testimonials/{id}",
    params(("id" = Uuid, Path, description = "Testimonial id")),
    responses(
        (status = 200, description = "Testimonial", body = TestimonialResponse),
        (status = 404, description = "Testimonial not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn get_testimonial(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let testimonial = state
        .db
        .testimonials
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Testimonial not found".to_string()))?;
    Ok(Json(TestimonialResponse::from(testimonial)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/testimonials/{id}",
    params(("id" = Uuid, Path, description = "Testimonial id")),
    request_body = TestimonialInput,
    responses(
        (status = 200, description = "Testimonial updated", body = TestimonialResponse),
        (status = 404, description = "Testimonial not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx, input))]
pub async fn update_testimonial(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<TestimonialInput>,
) -> Result<impl IntoResponse, HttpAppError> {
    let testimonial = state.db.testimonials.update(id, input).await?;
    tracing::info!(testimonial_id = %testimonial.id, admin = %ctx.email, "Testimonial updated");
    Ok(Json(TestimonialResponse::from(testimonial)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/testimonials/{id}",
    params(("id" = Uuid, Path, description = "Testimonial id")),
    responses(
        (status = 204, description = "Testimonial deleted"),
        (status = 404, description = "Testimonial not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_testimonial(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !state.db.testimonials.delete(id).await? {
        return Err(AppError::NotFound("Testimonial not found".to_string()).into());
    }
    tracing::info!(testimonial_id = %id, admin = %ctx.email, "Testimonial deleted");
    Ok(StatusCode::NO_CONTENT)
}
