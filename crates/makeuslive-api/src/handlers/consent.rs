//! Consent log handlers
//!
//! Append-only record of visitor cookie-category decisions. The `necessary`
//! category is stored as granted on every event regardless of input.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::auth::AdminContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use crate::utils::pagination::ListQuery;
use makeuslive_core::constants::CONSENT_CATEGORY_NECESSARY;
use makeuslive_core::models::{ConsentEventResponse, RecordConsentRequest};
use makeuslive_core::AppError;

const MAX_CATEGORIES: usize = 20;
const MAX_CATEGORY_NAME_LENGTH: usize = 64;

/// Record a consent decision
#[utoipa::path(
    post,
    path = "/api/v1/consent",
    request_body = RecordConsentRequest,
    responses(
        (status = 201, description = "Consent recorded", body = ConsentEventResponse),
        (status = 400, description = "Invalid category map")
    ),
    tag = "consent"
)]
#[tracing::instrument(skip(state, headers, request))]
pub async fn record_consent(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ValidatedJson(request): ValidatedJson<RecordConsentRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if request.categories.len() > MAX_CATEGORIES {
        return Err(AppError::BadRequest(format!(
            "At most {} consent categories are accepted",
            MAX_CATEGORIES
        ))
        .into());
    }
    for name in request.categories.keys() {
        if name.is_empty() || name.len() > MAX_CATEGORY_NAME_LENGTH {
            return Err(AppError::BadRequest(format!(
                "Invalid consent category name '{}'",
                name
            ))
            .into());
        }
    }

    let mut categories = request.categories;
    categories.insert(CONSENT_CATEGORY_NECESSARY.to_string(), true);
    let categories_value = serde_json::to_value(&categories).map_err(AppError::from)?;

    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.chars().take(512).collect::<String>());

    let event = state
        .db
        .consent
        .create(request.visitor_id, categories_value, user_agent.as_deref())
        .await?;

    tracing::debug!(visitor_id = %event.visitor_id, "Consent recorded");
    Ok((StatusCode::CREATED, Json(ConsentEventResponse::from(event))))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/consent-events",
    params(ListQuery),
    responses((status = 200, description = "Consent events, newest first", body = Vec<ConsentEventResponse>)),
    tag = "admin"
)]
#[tracing::instrument(skip(state, _ctx))]
pub async fn list_consent_events(
    State(state): State<Arc<AppState>>,
    _ctx: AdminContext,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (limit, offset) = query.limit_offset();
    let events = state.db.consent.list(limit, offset).await?;
    let responses: Vec<ConsentEventResponse> = events
        .into_iter()
        .map(ConsentEventResponse::from)
        .collect();
    Ok(Json(responses))
}
