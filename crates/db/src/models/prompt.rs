//! Prompt models and DTOs.
//!
//! Defines the row struct for the `prompts` table plus the create/update/
//! filter/sort types used by the API layer.

use promptlens_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A prompt row from the `prompts` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Prompt {
    pub id: DbId,
    pub user_id: DbId,
    /// The prompt text itself.
    pub body: String,
    pub image_url: Option<String>,
    /// Base64 source image for generated prompts.
    pub image_data: Option<String>,
    pub image_type: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub likes: i64,
    pub views: i64,
    pub is_public: bool,
    pub is_generated: bool,
    pub is_trending: bool,
    pub word_count: Option<i32>,
    pub character_count: Option<i32>,
    pub generated_at: Option<Timestamp>,
    pub model: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create / update DTOs
// ---------------------------------------------------------------------------

/// Input for inserting a new prompt (manual submission or a persisted
/// generation result).
#[derive(Debug, Clone)]
pub struct CreatePrompt {
    pub user_id: DbId,
    pub body: String,
    pub image_url: Option<String>,
    pub image_data: Option<String>,
    pub image_type: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub is_generated: bool,
    pub word_count: Option<i32>,
    pub character_count: Option<i32>,
    pub generated_at: Option<Timestamp>,
    pub model: Option<String>,
}

/// Owner-editable fields. All optional; only provided fields are updated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePrompt {
    pub is_public: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
}

// ---------------------------------------------------------------------------
// Listing filter and sort
// ---------------------------------------------------------------------------

/// Filter for the gallery listing.
///
/// `viewer` drives visibility scoping: private prompts are only included
/// when they belong to the viewer. An anonymous viewer (None) sees only
/// public prompts.
#[derive(Debug, Clone, Default)]
pub struct PromptFilter {
    pub category: Option<String>,
    /// Free-text search over the prompt body.
    pub search: Option<String>,
    /// Restrict to prompts owned by this user.
    pub owner: Option<DbId>,
    /// Explicit visibility filter (`public=true/false` query parameter).
    pub public: Option<bool>,
    /// The authenticated requester, if any.
    pub viewer: Option<DbId>,
}

/// Sort key for the gallery listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptSort {
    #[default]
    Recent,
    Likes,
    Views,
}

impl PromptSort {
    /// Column backing this sort key.
    pub fn column(self) -> &'static str {
        match self {
            PromptSort::Recent => "created_at",
            PromptSort::Likes => "likes",
            PromptSort::Views => "views",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Like state
// ---------------------------------------------------------------------------

/// Result of a like toggle or like-state query.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LikeState {
    /// Whether the requesting user currently likes the prompt.
    pub liked: bool,
    /// Like count after the operation.
    pub likes: i64,
}
