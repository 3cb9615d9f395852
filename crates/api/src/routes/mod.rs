//! Route definitions.

pub mod auth;
pub mod credits;
pub mod generate;
pub mod health;
pub mod history;
pub mod prompts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/google                 Google sign-in (public)
/// /auth/refresh                token refresh (public)
/// /auth/me                     current user (requires auth)
/// /auth/logout                 revoke sessions (requires auth)
///
/// /prompts                     list (public), create (requires auth)
/// /prompts/trending            trending listing (public)
/// /prompts/{id}                get (public), update, delete (owner)
/// /prompts/{id}/like           like state (GET), toggle (POST)
///
/// /generate-prompt             image -> prompt generation (requires auth)
/// /user-credits                credit balance (requires auth)
/// /user-prompts                generation history (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/prompts", prompts::router())
        .merge(generate::router())
        .merge(credits::router())
        .merge(history::router())
}
