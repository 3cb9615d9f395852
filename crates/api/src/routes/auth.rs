//! Route definitions for authentication.
//!
//! Mounted at `/auth` in the API route tree.
//!
//! ```text
//! POST /google    google_sign_in
//! POST /refresh   refresh
//! GET  /me        me
//! POST /logout    logout
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/google", post(auth::google_sign_in))
        .route("/refresh", post(auth::refresh))
        .route("/me", get(auth::me))
        .route("/logout", post(auth::logout))
}
