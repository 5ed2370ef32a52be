//! Blog post handlers
//!
//! Public reads serve published posts only; the admin surface has full CRUD
//! with full-field replacement on update.

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
use makeuslive_core::models::{PostInput, PostResponse};
use makeuslive_core::validation::validate_slug;
use makeuslive_core::AppError;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PostListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Narrow the list to posts carrying this tag
    pub tag: Option<String>,
}

/// List published posts, newest first
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    params(PostListQuery),
    responses(
        (status = 200, description = "Published posts", body = Vec<PostResponse>)
    ),
    tag = "posts"
)]
#[tracing::instrument(skip(state))]
pub async fn list_published_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PostListQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let paging = ListQuery {
        limit: query.limit,
        offset: query.offset,
    };
    let (limit, offset) = paging.limit_offset();
    let posts = state
        .db
        .posts
        .list_published(limit, offset, query.tag.as_deref())
        .await?;
    let responses: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();
    Ok(Json(responses))
}

/// Get one published post by slug
#[utoipa::path(
    get,
    path = "/api/v1/posts/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post", body = PostResponse),
        (status = 404, description = "No published post with this slug")
    ),
    tag = "posts"
)]
#[tracing::instrument(skip(state))]
pub async fn get_published_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let post = state
        .db
        .posts
        .get_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
    Ok(Json(PostResponse::from(post)))
}

/// Create a post
#[utoipa::path(
    post,
    path = "/api/v1/admin/posts",
    request_body = PostInput,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx, input))]
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    ValidatedJson(input): ValidatedJson<PostInput>,
) -> Result<impl IntoResponse, HttpAppError> {
    validate_slug(&input.slug).map_err(AppError::BadRequest)?;
    let post = state.db.posts.create(input).await?;
    tracing::info!(post_id = %post.id, admin = %ctx.email, "Post created");
    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// List all posts, including unpublished
#[utoipa::path(
    get,
    path = "/api/v1/admin/posts",
    params(ListQuery),
    responses((status = 200, description = "All posts", body = Vec<PostResponse>)),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (limit, offset) = query.limit_offset();
    let posts = state.db.posts.list_all(limit, offset).await?;
    let responses: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();
    Ok(Json(responses))
}

/// Get one post by id
#[utoipa::path(
    get,
    path = "/api/v1/admin/posts/{id}",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post", body = PostResponse),
        (status = 404, description = "Post not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let post = state
        .db
        .posts
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
    Ok(Json(PostResponse::from(post)))
}

/// Replace a post
#[utoipa::path(
    put,
    path = "/api/v1/admin/posts/{id}",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = PostInput,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 404, description = "Post not found"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx, input))]
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<PostInput>,
) -> Result<impl IntoResponse, HttpAppError> {
    validate_slug(&input.slug).map_err(AppError::BadRequest)?;
    let post = state.db.posts.update(id, input).await?;
    tracing::info!(post_id = %post.id, admin = %ctx.email, "Post updated");
    Ok(Json(PostResponse::from(post)))
}

/// Delete a post
#[utoipa::path(
    delete,
    path = "/api/v1/admin/posts/{id}",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 404, description = "Post not found")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !state.db.posts.delete(id).await? {
        return Err(AppError::NotFound("Post not found".to_string()).into());
    }
    tracing::info!(post_id = %id, admin = %ctx.email, "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}
