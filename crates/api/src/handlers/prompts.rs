//! Handlers for the `/prompts` resource (gallery CRUD, likes, trending).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use promptlens_core::error::CoreError;
use promptlens_core::image::validate_image_payload;
use promptlens_core::pagination::{
    clamp_page, clamp_page_size, page_offset, PageMeta, DEFAULT_GALLERY_PAGE_SIZE,
};
use promptlens_core::search::build_tsquery;
use promptlens_core::types::DbId;
use promptlens_db::models::prompt::{
    CreatePrompt, LikeState, Prompt, PromptFilter, PromptSort, SortOrder, UpdatePrompt,
};
use promptlens_db::repositories::PromptRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Maximum number of prompts returned by the trending endpoint.
const TRENDING_LIMIT: i64 = 20;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /prompts`.
#[derive(Debug, Default, Deserialize)]
pub struct ListPromptsParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    /// Free-text search over prompt bodies.
    pub search: Option<String>,
    /// Restrict to prompts owned by this user id.
    pub user_id: Option<DbId>,
    /// Explicit visibility filter.
    pub public: Option<bool>,
    #[serde(default, alias = "sort")]
    pub sort_by: PromptSort,
    #[serde(default)]
    pub order: SortOrder,
}

/// Request body for `POST /prompts`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePromptRequest {
    #[validate(length(min = 1, max = 5000, message = "body must be 1-5000 characters"))]
    pub body: String,
    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: Option<String>,
    /// Embedded source image, base64 or data-URL. Requires `image_type`.
    pub image_data: Option<String>,
    pub image_type: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Defaults to public, matching the gallery-first product.
    #[serde(default = "default_true")]
    pub is_public: bool,
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/prompts
///
/// Paginated gallery listing. Anonymous callers see only public prompts;
/// authenticated callers additionally see their own private prompts.
pub async fn list_prompts(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Query(params): Query<ListPromptsParams>,
) -> AppResult<Json<PageResponse<Prompt>>> {
    let page = clamp_page(params.page);
    let limit = clamp_page_size(params.limit, DEFAULT_GALLERY_PAGE_SIZE);

    let filter = PromptFilter {
        category: params.category,
        search: params.search.as_deref().and_then(build_tsquery),
        owner: params.user_id,
        public: params.public,
        viewer: viewer.user_id(),
    };

    let items = PromptRepo::list(
        &state.pool,
        &filter,
        params.sort_by,
        params.order,
        limit,
        page_offset(page, limit),
    )
    .await?;
    let total = PromptRepo::count(&state.pool, &filter).await?;

    Ok(Json(PageResponse {
        data: items,
        meta: PageMeta::new(page, limit, total),
    }))
}

/// GET /api/v1/prompts/trending
///
/// Most-liked public prompts at or above the trending threshold.
pub async fn trending_prompts(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Prompt>>>> {
    let items = PromptRepo::trending(&state.pool, TRENDING_LIMIT).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/prompts
///
/// Submit a prompt to the gallery.
pub async fn create_prompt(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreatePromptRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Prompt>>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    // An embedded image goes through the same checks as an upload for
    // generation: MIME allow-list, base64 shape, size ceiling.
    let image = match (&input.image_data, &input.image_type) {
        (Some(data), Some(mime)) => {
            Some(validate_image_payload(data, mime).map_err(AppError::Core)?)
        }
        (Some(_), None) => {
            return Err(AppError::Core(CoreError::Validation(
                "image_type is required when image_data is provided.".into(),
            )))
        }
        _ => None,
    };

    let body = input.body.trim().to_string();
    let word_count = body.split_whitespace().count() as i32;
    let character_count = body.chars().count() as i32;

    let prompt = PromptRepo::create(
        &state.pool,
        &CreatePrompt {
            user_id: auth.user_id,
            body,
            image_url: input.image_url,
            image_data: image.as_ref().map(|p| p.data.clone()),
            image_type: image.map(|p| p.mime_type),
            category: input.category,
            tags: input.tags,
            is_public: input.is_public,
            is_generated: false,
            word_count: Some(word_count),
            character_count: Some(character_count),
            generated_at: None,
            model: None,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: prompt })))
}

/// GET /api/v1/prompts/{id}
///
/// Fetch a single prompt and count the view. Private prompts are only
/// visible to their owner.
pub async fn get_prompt(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Prompt>>> {
    let prompt = load_visible(&state, id, viewer.user_id()).await?;

    // Owners browsing their own prompts do not inflate the view count.
    if viewer.user_id() != Some(prompt.user_id) {
        PromptRepo::increment_views(&state.pool, id).await?;
    }

    Ok(Json(DataResponse { data: prompt }))
}

/// PATCH /api/v1/prompts/{id}
///
/// Update owner-editable fields (visibility, tags, category).
pub async fn update_prompt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePrompt>,
) -> AppResult<Json<DataResponse<Prompt>>> {
    require_owner(&state, id, auth.user_id).await?;

    let updated = PromptRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/prompts/{id}
///
/// Delete a prompt. Owner only.
pub async fn delete_prompt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_owner(&state, id, auth.user_id).await?;

    let deleted = PromptRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/prompts/{id}/like
///
/// Toggle the caller's like on a prompt. Returns the new like state.
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LikeState>>> {
    // Visibility gate: liking requires being able to see the prompt.
    load_visible(&state, id, Some(auth.user_id)).await?;

    let like_state = PromptRepo::toggle_like(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: like_state }))
}

/// GET /api/v1/prompts/{id}/like
///
/// Return the caller's current like state for a prompt.
pub async fn get_like_state(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LikeState>>> {
    load_visible(&state, id, Some(auth.user_id)).await?;

    let like_state = PromptRepo::like_state(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: like_state }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Prompt",
        id,
    })
}

/// Fetch a prompt, rejecting private prompts for anyone but their owner.
async fn load_visible(
    state: &AppState,
    id: DbId,
    viewer: Option<DbId>,
) -> AppResult<Prompt> {
    let prompt = PromptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if !prompt.is_public && viewer != Some(prompt.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "This prompt is private".into(),
        )));
    }

    Ok(prompt)
}

/// Fetch a prompt and require the caller to be its owner.
async fn require_owner(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Prompt> {
    let prompt = PromptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if prompt.user_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not own this prompt".into(),
        )));
    }

    Ok(prompt)
}
