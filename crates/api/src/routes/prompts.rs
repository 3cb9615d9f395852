//! Route definitions for the prompt gallery.
//!
//! Mounted at `/prompts` in the API route tree.
//!
//! ```text
//! GET    /            list_prompts
//! POST   /            create_prompt
//! GET    /trending    trending_prompts
//! GET    /{id}        get_prompt
//! PATCH  /{id}        update_prompt
//! DELETE /{id}        delete_prompt
//! GET    /{id}/like   get_like_state
//! POST   /{id}/like   toggle_like
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::prompts;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(prompts::list_prompts).post(prompts::create_prompt))
        .route("/trending", get(prompts::trending_prompts))
        .route(
            "/{id}",
            get(prompts::get_prompt)
                .patch(prompts::update_prompt)
                .delete(prompts::delete_prompt),
        )
        .route(
            "/{id}/like",
            get(prompts::get_like_state).post(prompts::toggle_like),
        )
}
