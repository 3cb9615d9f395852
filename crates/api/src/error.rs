use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use promptlens_core::error::CoreError;
use promptlens_gemini::GeminiError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`GeminiError`] for upstream
/// generation failures, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `promptlens_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An upstream generation failure.
    #[error("Generation error: {0}")]
    Gemini(#[from] GeminiError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The upstream service answered, but with something unusable.
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::InsufficientCredits(msg) => (
                    StatusCode::PAYMENT_REQUIRED,
                    "INSUFFICIENT_CREDITS",
                    msg.clone(),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Upstream generation errors ---
            AppError::Gemini(err) => classify_gemini_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::BadGateway(msg) => {
                tracing::warn!(error = %msg, "Unusable upstream response");
                (StatusCode::BAD_GATEWAY, "BAD_GATEWAY", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Classify an upstream generation failure into an HTTP status, error code,
/// and client-safe message. The raw upstream body is logged, never echoed.
fn classify_gemini_error(err: &GeminiError) -> (StatusCode, &'static str, String) {
    match err {
        GeminiError::Timeout(secs) => (
            StatusCode::REQUEST_TIMEOUT,
            "GENERATION_TIMEOUT",
            format!("Image analysis timed out after {secs} seconds. Please try again."),
        ),
        GeminiError::Quota(detail) => {
            tracing::warn!(detail = %detail, "Upstream quota exceeded");
            (
                StatusCode::TOO_MANY_REQUESTS,
                "QUOTA_EXCEEDED",
                "The analysis service is rate limited right now. Please try again shortly."
                    .to_string(),
            )
        }
        GeminiError::Safety(detail) => {
            tracing::warn!(detail = %detail, "Image blocked by safety filters");
            (
                StatusCode::BAD_REQUEST,
                "CONTENT_BLOCKED",
                "The image was blocked by the content safety filter.".to_string(),
            )
        }
        GeminiError::InvalidArgument(detail) => {
            tracing::warn!(detail = %detail, "Upstream rejected the request as invalid");
            (
                StatusCode::BAD_REQUEST,
                "INVALID_IMAGE",
                "The analysis service rejected the image. Try a different file.".to_string(),
            )
        }
        GeminiError::PermissionDenied(detail) => {
            tracing::error!(detail = %detail, "Upstream rejected our credentials");
            (
                StatusCode::FORBIDDEN,
                "UPSTREAM_PERMISSION_DENIED",
                "The analysis service rejected our credentials.".to_string(),
            )
        }
        GeminiError::ResourceExhausted(detail) => {
            tracing::warn!(detail = %detail, "Upstream capacity exceeded");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "UPSTREAM_EXHAUSTED",
                "The analysis service is overloaded. Please try again later.".to_string(),
            )
        }
        GeminiError::ModelNotFound(detail) => {
            tracing::error!(detail = %detail, "Configured model unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "MODEL_UNAVAILABLE",
                "The analysis model is currently unavailable.".to_string(),
            )
        }
        GeminiError::EmptyResponse => (
            StatusCode::BAD_GATEWAY,
            "EMPTY_RESPONSE",
            "The analysis service returned no usable text.".to_string(),
        ),
        GeminiError::Request(req_err) => {
            tracing::error!(error = %req_err, "Upstream request error");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "Failed to reach the analysis service.".to_string(),
            )
        }
        GeminiError::Api { status, body } => {
            tracing::error!(status = *status, body = %body, "Unclassified upstream API error");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "The analysis service returned an unexpected error.".to_string(),
            )
        }
    }
}
