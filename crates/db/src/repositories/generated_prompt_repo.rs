//! Repository for the `generated_prompts` history table.

use sqlx::PgPool;

use promptlens_core::types::DbId;

use crate::models::generated_prompt::{CreateGeneratedPrompt, GeneratedPrompt};

/// Column list for generated_prompts queries.
const COLUMNS: &str =
    "id, user_id, body, source_image_url, style, category, credits_used, created_at";

/// Append and read operations for the per-user generation history.
pub struct GeneratedPromptRepo;

impl GeneratedPromptRepo {
    /// Record one successful generation. Returns the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGeneratedPrompt,
    ) -> Result<GeneratedPrompt, sqlx::Error> {
        let query = format!(
            "INSERT INTO generated_prompts
                (user_id, body, source_image_url, style, category, credits_used)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GeneratedPrompt>(&query)
            .bind(input.user_id)
            .bind(&input.body)
            .bind(&input.source_image_url)
            .bind(&input.style)
            .bind(&input.category)
            .bind(input.credits_used)
            .fetch_one(pool)
            .await
    }

    /// List a user's history, newest first, with pagination.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<GeneratedPrompt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM generated_prompts
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, GeneratedPrompt>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count a user's history rows.
    pub async fn count_by_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM generated_prompts WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
