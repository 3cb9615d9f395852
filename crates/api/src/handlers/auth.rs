//! Handlers for the `/auth` resource (Google sign-in, refresh, me, logout).

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use promptlens_core::error::CoreError;
use promptlens_core::types::DbId;
use promptlens_db::models::user::{UpsertGoogleUser, User};
use promptlens_db::repositories::{CreditRepo, RefreshTokenRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::google::GoogleAuthError;
use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/google`.
#[derive(Debug, Deserialize)]
pub struct GoogleSignInRequest {
    /// Authorization code from the frontend consent flow.
    pub code: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `POST /auth/logout`.
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    /// The refresh token to revoke. When omitted, every session for the
    /// user is revoked.
    pub refresh_token: Option<String>,
}

/// Successful authentication response returned by sign-in and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`] and `/auth/me`.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        UserInfo {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/google
///
/// Exchange a Google authorization code for access + refresh tokens,
/// provisioning the account (and its starting credit grant) on first
/// sign-in.
pub async fn google_sign_in(
    State(state): State<AppState>,
    Json(input): Json<GoogleSignInRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    // 1. Exchange the code for the user's Google profile.
    let profile = state
        .google_auth
        .exchange_code(&input.code)
        .await
        .map_err(|e| match e {
            GoogleAuthError::CodeRejected => {
                AppError::Core(CoreError::Unauthorized("Google sign-in failed".into()))
            }
            GoogleAuthError::Request(err) => {
                tracing::error!(error = %err, "Google OAuth request failed");
                AppError::BadGateway("Failed to reach the sign-in provider".into())
            }
        })?;

    // 2. Upsert the account, refreshing profile fields on every sign-in.
    let display_name = profile
        .name
        .clone()
        .unwrap_or_else(|| profile.email.clone());
    let user = UserRepo::upsert_google(
        &state.pool,
        &UpsertGoogleUser {
            google_sub: profile.id,
            email: profile.email,
            display_name,
            avatar_url: profile.picture,
        },
    )
    .await?;

    // 3. First sign-in creates the balance row with the starting grant.
    CreditRepo::ensure_row(&state.pool, user.id).await?;

    tracing::info!(user_id = user.id, "User signed in via Google");

    // 4. Issue tokens.
    let response = create_auth_response(&state, &user).await?;
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens. The old
/// refresh token is revoked (rotation).
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    // 1. Hash the provided refresh token and find the matching session.
    let token_hash = hash_refresh_token(&input.refresh_token);
    let stored = RefreshTokenRepo::find_valid(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // 2. Revoke the old token (rotation).
    RefreshTokenRepo::delete_by_hash(&state.pool, &token_hash).await?;

    // 3. The user must still exist.
    let user = UserRepo::find_by_id(&state.pool, stored.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(DataResponse { data: response }))
}

/// GET /api/v1/auth/me
///
/// Return the authenticated user's profile.
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserInfo>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    Ok(Json(DataResponse {
        data: UserInfo::from(&user),
    }))
}

/// POST /api/v1/auth/logout
///
/// Revoke the given refresh token, or every session when none is provided.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<LogoutRequest>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    match input.refresh_token {
        Some(token) => {
            let token_hash = hash_refresh_token(&token);
            RefreshTokenRepo::delete_by_hash(&state.pool, &token_hash).await?;
        }
        None => {
            RefreshTokenRepo::delete_for_user(&state.pool, auth.user_id).await?;
        }
    }

    Ok(Json(DataResponse {
        data: serde_json::json!({ "logged_out": true }),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate an access + refresh token pair for the user and persist the
/// refresh token hash.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);
    RefreshTokenRepo::insert(&state.pool, user.id, &refresh_hash, expires_at).await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo::from(user),
    })
}
