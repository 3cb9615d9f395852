//! Shared test harness: router construction and HTTP helpers.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use promptlens_api::auth::google::GoogleAuthClient;
use promptlens_api::auth::jwt::{generate_access_token, JwtConfig};
use promptlens_api::config::{GoogleOAuthConfig, ServerConfig};
use promptlens_api::router::build_app_router;
use promptlens_api::state::AppState;
use promptlens_db::models::user::{UpsertGoogleUser, User};
use promptlens_db::repositories::UserRepo;
use promptlens_gemini::GeminiClient;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        google: GoogleOAuthConfig {
            client_id: "test-client-id".to_string(),
            client_secret: "test-client-secret".to_string(),
            redirect_uri: "http://localhost:5173/auth/callback".to_string(),
        },
        gemini_api_key: None,
        gemini_model: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Generation is left unconfigured.
///
/// This reuses the production router construction so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that `main.rs` serves.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app(pool, None)
}

/// Like [`build_test_app`], but with a Gemini client pointed at an
/// unroutable address. Request validation and the credit check run before
/// the upstream call, so their failure paths are testable without a live
/// upstream; anything that does reach the network fails as a 502.
pub fn build_test_app_with_stub_gemini(pool: PgPool) -> Router {
    let gemini = GeminiClient::new("test-key".to_string())
        .with_base_url("http://127.0.0.1:9/v1beta".to_string());
    build_app(pool, Some(Arc::new(gemini)))
}

fn build_app(pool: PgPool, gemini: Option<Arc<GeminiClient>>) -> Router {
    let config = test_config();
    let google_auth = Arc::new(GoogleAuthClient::new(config.google.clone()));

    build_app_router(AppState {
        pool,
        config: Arc::new(config),
        google_auth,
        gemini,
    })
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Create a test user directly in the database.
pub async fn seed_user(pool: &PgPool, sub: &str) -> User {
    UserRepo::upsert_google(
        pool,
        &UpsertGoogleUser {
            google_sub: sub.to_string(),
            email: format!("{sub}@example.com"),
            display_name: sub.to_string(),
            avatar_url: None,
        },
    )
    .await
    .expect("user upsert should succeed")
}

/// Issue a valid access token for a user id, signed with the test secret.
pub fn token_for(user_id: i64) -> String {
    generate_access_token(user_id, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    request_json_auth(app, "POST", uri, token, body).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    request_json_auth(app, "PATCH", uri, token, body).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn request_json_auth(
    app: Router,
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body must be valid JSON")
}
