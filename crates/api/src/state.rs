use std::sync::Arc;

use promptlens_gemini::GeminiClient;

use crate::auth::google::GoogleAuthClient;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: promptlens_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Google OAuth client for the sign-in code exchange.
    pub google_auth: Arc<GoogleAuthClient>,
    /// Gemini client, present only when an API key is configured.
    pub gemini: Option<Arc<GeminiClient>>,
}
