//! Route definition for the credit balance endpoint.

use axum::routing::get;
use axum::Router;

use crate::handlers::credits;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/user-credits", get(credits::get_credits))
}
