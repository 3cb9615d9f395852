//! HTTP-level integration tests for the generation endpoint.
//!
//! The happy path needs a live upstream and is not covered here. Everything
//! before the upstream call is: authentication, payload validation, the
//! credit reservation, and the refund when the upstream is unreachable.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, post_json_auth, seed_user, token_for};
use sqlx::PgPool;

use promptlens_core::credits::STARTING_CREDITS;
use promptlens_db::repositories::{CreditRepo, GeneratedPromptRepo};

const URI: &str = "/api/v1/generate-prompt";

/// A syntactically valid base64 payload with a data-URL prefix.
fn valid_request() -> serde_json::Value {
    serde_json::json!({
        "image_data": "data:image/png;base64,aGVsbG8gd29ybGQ=",
        "image_type": "image/png",
    })
}

// ---------------------------------------------------------------------------
// Pre-upstream failures
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn generation_requires_authentication(pool: PgPool) {
    let app = common::build_test_app_with_stub_gemini(pool);
    let response = post_json(app, URI, valid_request()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unconfigured_upstream_returns_500(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;
    // No Gemini client at all.
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, URI, &token_for(user.id), valid_request()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unsupported_mime_type_returns_400(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;
    let app = common::build_test_app_with_stub_gemini(pool.clone());

    let body = serde_json::json!({
        "image_data": "aGVsbG8=",
        "image_type": "image/gif",
    });
    let response = post_json_auth(app, URI, &token_for(user.id), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    // Validation failures never touch the balance.
    let credits = CreditRepo::get_or_init(&pool, user.id).await.unwrap();
    assert_eq!(credits.credits, STARTING_CREDITS);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn oversized_image_returns_400(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;
    let app = common::build_test_app_with_stub_gemini(pool);

    // Encoded length well past the 10MiB decoded limit.
    let body = serde_json::json!({
        "image_data": "A".repeat(15_000_000),
        "image_type": "image/png",
    });
    let response = post_json_auth(app, URI, &token_for(user.id), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_base64_returns_400(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;
    let app = common::build_test_app_with_stub_gemini(pool);

    let body = serde_json::json!({
        "image_data": "!!!not base64!!!",
        "image_type": "image/png",
    });
    let response = post_json_auth(app, URI, &token_for(user.id), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_balance_returns_402(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;
    CreditRepo::ensure_row(&pool, user.id).await.unwrap();
    sqlx::query("UPDATE user_credits SET credits = 0 WHERE user_id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app_with_stub_gemini(pool);

    let response = post_json_auth(app, URI, &token_for(user.id), valid_request()).await;
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INSUFFICIENT_CREDITS");
}

// ---------------------------------------------------------------------------
// Upstream failure refunds
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn unreachable_upstream_returns_502_and_refunds(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;
    let app = common::build_test_app_with_stub_gemini(pool.clone());

    let response = post_json_auth(app, URI, &token_for(user.id), valid_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    // The reserved credit came back and no history row was written.
    let credits = CreditRepo::get_or_init(&pool, user.id).await.unwrap();
    assert_eq!(credits.credits, STARTING_CREDITS);
    assert_eq!(credits.total_used, 0);
    assert_eq!(
        GeneratedPromptRepo::count_by_user(&pool, user.id).await.unwrap(),
        0
    );
}
