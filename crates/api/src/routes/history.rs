//! Route definition for the generation history endpoint.

use axum::routing::get;
use axum::Router;

use crate::handlers::history;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/user-prompts", get(history::list_history))
}
