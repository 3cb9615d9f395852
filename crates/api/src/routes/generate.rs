//! Route definition for the generation endpoint.

use axum::routing::post;
use axum::Router;

use crate::handlers::generate;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/generate-prompt", post(generate::generate_prompt))
}
