//! Generation history models.

use promptlens_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `generated_prompts` history table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GeneratedPrompt {
    pub id: DbId,
    pub user_id: DbId,
    /// The cleaned generation result.
    pub body: String,
    pub source_image_url: Option<String>,
    /// Best-guess style label, if any.
    pub style: Option<String>,
    pub category: Option<String>,
    pub credits_used: i32,
    pub created_at: Timestamp,
}

/// Input for recording one successful generation.
#[derive(Debug, Clone)]
pub struct CreateGeneratedPrompt {
    pub user_id: DbId,
    pub body: String,
    pub source_image_url: Option<String>,
    pub style: Option<String>,
    pub category: Option<String>,
    pub credits_used: i32,
}
