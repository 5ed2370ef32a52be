//! Admin login and token introspection.

use axum::{
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::auth::jwt;
use crate::auth::models::{AdminContext, LoginRequest, LoginResponse, MeResponse};
use crate::auth::password::verify_password;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use crate::utils::client_ip::extract_client_ip;
use makeuslive_core::AppError;

/// Log in to the admin surface
///
/// Failed attempts count against a per-IP fixed window; once exhausted the
/// endpoint returns 429 until the window resets.
#[utoipa::path(
    post,
    path = "/api/v1/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 429, description = "Too many failed attempts")
    ),
    tag = "admin"
)]
#[tracing::instrument(skip(state, headers, request))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let client_ip = extract_client_ip(&headers);
    if state.login_limiter.is_blocked(&client_ip).await {
        return Err(AppError::TooManyRequests(
            "Too many failed login attempts".to_string(),
        )
        .into());
    }

    // One failure path for unknown email and wrong password: the response
    // must not reveal which accounts exist.
    let authenticated = match state
        .db
        .admin_users
        .get_by_email(request.email.trim())
        .await?
    {
        Some(user) if verify_password(&request.password, &user.password_hash)? => Some(user),
        _ => None,
    };

    let Some(user) = authenticated else {
        state.login_limiter.record_failure(&client_ip).await;
        tracing::warn!(client_ip = %client_ip, "Failed admin login");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()).into());
    };
    let token = jwt::generate_token(
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
        user.id,
        &user.email,
    )?;

    tracing::info!(admin = %user.email, "Admin logged in");
    Ok(Json(LoginResponse {
        token,
        expires_in: state.config.jwt_expiry_hours * 3600,
    }))
}

/// Who am I
#[utoipa::path(
    get,
    path = "/api/v1/admin/me",
    responses(
        (status = 200, description = "Authenticated admin", body = MeResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "admin"
)]
pub async fn me(ctx: AdminContext) -> impl IntoResponse {
    Json(MeResponse {
        admin_id: ctx.admin_id,
        email: ctx.email,
    })
}
