//! Tests for `AppError` -> HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error code, and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use promptlens_api::error::AppError;
use promptlens_core::error::CoreError;
use promptlens_gemini::GeminiError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Core error mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Prompt",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Prompt with id 42 not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Unsupported image format.".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unauthorized_error_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("no token provided".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn forbidden_error_returns_403() {
    let err = AppError::Core(CoreError::Forbidden("not the owner".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn insufficient_credits_returns_402() {
    let err = AppError::Core(CoreError::InsufficientCredits(
        "Insufficient credits.".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(json["code"], "INSUFFICIENT_CREDITS");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");

    // The response body must NOT contain the original error details.
    let body_text = json.to_string();
    assert!(
        !body_text.contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Upstream generation error mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn gemini_timeout_returns_408() {
    let (status, json) = error_to_response(AppError::Gemini(GeminiError::Timeout(30))).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(json["code"], "GENERATION_TIMEOUT");
}

#[tokio::test]
async fn gemini_quota_returns_429() {
    let (status, json) = error_to_response(AppError::Gemini(GeminiError::Quota("quota exceeded".into()))).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json["code"], "QUOTA_EXCEEDED");
}

#[tokio::test]
async fn gemini_safety_block_returns_400() {
    let (status, json) = error_to_response(AppError::Gemini(GeminiError::Safety("blocked".into()))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "CONTENT_BLOCKED");
}

#[tokio::test]
async fn gemini_invalid_argument_returns_400() {
    let (status, json) =
        error_to_response(AppError::Gemini(GeminiError::InvalidArgument("bad image".into()))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_IMAGE");
}

#[tokio::test]
async fn gemini_permission_denied_returns_403() {
    let (status, json) =
        error_to_response(AppError::Gemini(GeminiError::PermissionDenied("denied".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "UPSTREAM_PERMISSION_DENIED");
}

#[tokio::test]
async fn gemini_resource_exhausted_returns_503() {
    let (status, json) =
        error_to_response(AppError::Gemini(GeminiError::ResourceExhausted("exhausted".into()))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "UPSTREAM_EXHAUSTED");
}

#[tokio::test]
async fn gemini_model_not_found_returns_503() {
    let (status, json) = error_to_response(AppError::Gemini(GeminiError::ModelNotFound("missing model".into()))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "MODEL_UNAVAILABLE");
}

#[tokio::test]
async fn gemini_empty_response_returns_502() {
    let (status, json) = error_to_response(AppError::Gemini(GeminiError::EmptyResponse)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "EMPTY_RESPONSE");
}

#[tokio::test]
async fn gemini_unclassified_api_error_returns_502_without_leaking_body() {
    let err = AppError::Gemini(GeminiError::Api {
        status: 500,
        body: "internal upstream stack trace".to_string(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert!(
        !json.to_string().contains("stack trace"),
        "Upstream body must not be echoed to the client"
    );
}

// ---------------------------------------------------------------------------
// HTTP-specific variants
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

#[tokio::test]
async fn bad_gateway_error_returns_502() {
    let err = AppError::BadGateway("unusable prompt".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "BAD_GATEWAY");
}
