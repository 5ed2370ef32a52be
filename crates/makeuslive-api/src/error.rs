//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`.
//! Use `AppError` (or types that implement `Into<AppError>`) for errors and `?`
//! so they become `HttpAppError` and render consistently (status, body, logging).
//!
//! The submission pipeline extends the shared body with `field_errors`, the
//! per-field detail of a failed validation.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use makeuslive_core::{AppError, ErrorMetadata, LogLevel};
use makeuslive_forms::{FieldError, SubmissionError};
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client (e.g., "Wait 60s and retry")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
    /// Per-field validation errors (submission endpoints only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<FieldErrorBody>>,
}

/// One field-level validation failure, as rendered to the client.
#[derive(Debug, Serialize, ToSchema)]
pub struct FieldErrorBody {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl From<FieldError> for FieldErrorBody {
    fn from(e: FieldError) -> Self {
        FieldErrorBody {
            field: e.field,
            code: e.code.to_string(),
            message: e.message,
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from makeuslive-core)
#[derive(Debug)]
pub struct HttpAppError {
    pub error: AppError,
    pub field_errors: Vec<FieldErrorBody>,
}

impl HttpAppError {
    /// A 400 carrying per-field detail, for the submission pipeline.
    pub fn invalid_fields(errors: Vec<FieldError>) -> Self {
        HttpAppError {
            error: AppError::InvalidInput("Submission failed validation".to_string()),
            field_errors: errors.into_iter().map(FieldErrorBody::from).collect(),
        }
    }
}

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError {
            error: err,
            field_errors: Vec::new(),
        }
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError::from(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

/// Submission pipeline errors: field-level failures carry the full error
/// list; size and content-type violations become a human-readable 400, per
/// the public failure contract.
impl From<SubmissionError> for HttpAppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Invalid(errors) => HttpAppError::invalid_fields(errors),
            other => HttpAppError::from(AppError::BadRequest(other.to_string())),
        }
    }
}

/// Contact form validation failures render as field errors too, so both
/// validation paths share one response shape.
impl From<validator::ValidationErrors> for HttpAppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = Vec::new();
        for (field, errs) in errors.field_errors() {
            for e in errs {
                field_errors.push(FieldErrorBody {
                    field: field.to_string(),
                    code: e.code.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("'{}' is invalid", field)),
                });
            }
        }
        HttpAppError {
            error: AppError::InvalidInput("Submission failed validation".to_string()),
            field_errors,
        }
    }
}

/// Convert JSON body deserialization failures into a 400 with our ErrorResponse format.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError::from(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON) on
/// deserialization failure. Use this instead of `Json<T>` when you want a
/// consistent API error shape for invalid bodies.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.error;
        let is_production = is_production_env();

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let field_errors = if self.field_errors.is_empty() {
            None
        } else {
            Some(self.field_errors)
        };

        // Always hide details in production for security; in non-production,
        // only show details for non-sensitive errors.
        let body = if is_production || app_error.is_sensitive() {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: None,
                error_type: None,
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
                suggested_action: app_error.suggested_action().map(String::from),
                field_errors,
            })
        } else {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: Some(app_error.detailed_message()),
                error_type: Some(app_error.error_type().to_string()),
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
                suggested_action: app_error.suggested_action().map(String::from),
                field_errors,
            })
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use makeuslive_forms::FieldError;

    #[test]
    fn submission_field_errors_are_preserved() {
        let err = SubmissionError::Invalid(vec![
            FieldError::new("email", "invalid_email", "'Email' must be a valid email address"),
            FieldError::new("name", "required", "'Name' is required"),
        ]);
        let http: HttpAppError = err.into();
        assert_eq!(http.error.http_status_code(), 400);
        assert_eq!(http.field_errors.len(), 2);
        assert_eq!(http.field_errors[0].field, "email");
        assert_eq!(http.field_errors[1].code, "required");
    }

    #[test]
    fn size_violations_are_plain_bad_requests() {
        let err = SubmissionError::FileTooLarge {
            filename: "cv.pdf".to_string(),
            size: 100,
            max: 50,
        };
        let http: HttpAppError = err.into();
        assert_eq!(http.error.http_status_code(), 400);
        assert!(http.field_errors.is_empty());
        assert!(http.error.client_message().contains("cv.pdf"));
    }

    /// Verifies the public error response contract: serialized ErrorResponse
    /// has "error", "code", "recoverable", and optionally "field_errors".
    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse {
            error: "Submission failed validation".to_string(),
            details: None,
            error_type: None,
            code: "INVALID_INPUT".to_string(),
            recoverable: false,
            suggested_action: None,
            field_errors: Some(vec![FieldErrorBody {
                field: "email".to_string(),
                code: "invalid_email".to_string(),
                message: "must be a valid email address".to_string(),
            }]),
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json.get("error").and_then(|v| v.as_str()).is_some());
        assert!(json.get("code").and_then(|v| v.as_str()).is_some());
        assert!(json.get("recoverable").and_then(|v| v.as_bool()).is_some());
        assert_eq!(
            json.pointer("/field_errors/0/field").and_then(|v| v.as_str()),
            Some("email")
        );
    }
}
