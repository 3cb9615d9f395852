//! Handler for the `/user-prompts` generation history resource.

use axum::extract::{Query, State};
use axum::Json;
use promptlens_core::pagination::{
    clamp_page, clamp_page_size, page_offset, PageMeta, DEFAULT_HISTORY_PAGE_SIZE,
};
use promptlens_db::models::generated_prompt::GeneratedPrompt;
use promptlens_db::repositories::GeneratedPromptRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::PageResponse;
use crate::state::AppState;

/// GET /api/v1/user-prompts
///
/// Paginated list of the caller's generation history, newest first.
pub async fn list_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PageParams>,
) -> AppResult<Json<PageResponse<GeneratedPrompt>>> {
    let page = clamp_page(params.page);
    let limit = clamp_page_size(params.limit, DEFAULT_HISTORY_PAGE_SIZE);

    let items = GeneratedPromptRepo::list_by_user(
        &state.pool,
        auth.user_id,
        limit,
        page_offset(page, limit),
    )
    .await?;
    let total = GeneratedPromptRepo::count_by_user(&state.pool, auth.user_id).await?;

    Ok(Json(PageResponse {
        data: items,
        meta: PageMeta::new(page, limit, total),
    }))
}
