//! Repository for the `prompts` and `prompt_likes` tables.
//!
//! Listing uses `($n IS NULL OR ...)` guards so one statement covers every
//! filter combination. Visibility scoping is always applied: private rows
//! are only returned to their owner.

use sqlx::PgPool;

use promptlens_core::trending::TRENDING_LIKE_THRESHOLD;
use promptlens_core::types::DbId;

use crate::models::prompt::{
    CreatePrompt, LikeState, Prompt, PromptFilter, PromptSort, SortOrder, UpdatePrompt,
};

/// Column list for prompts queries.
const COLUMNS: &str = "id, user_id, body, image_url, image_data, image_type, \
    category, tags, likes, views, is_public, is_generated, is_trending, \
    word_count, character_count, generated_at, model, created_at, updated_at";

/// Shared WHERE clause for the gallery listing and its count query.
///
/// $1 owner, $2 category, $3 tsquery search, $4 explicit public filter,
/// $5 viewer (nullable).
const LIST_FILTER: &str = "($1::BIGINT IS NULL OR user_id = $1)
       AND ($2::TEXT IS NULL OR category = $2)
       AND ($3::TEXT IS NULL
            OR to_tsvector('english', body) @@ to_tsquery('english', $3))
       AND ($4::BOOLEAN IS NULL OR is_public = $4)
       AND (is_public = TRUE OR user_id = $5::BIGINT)";

/// CRUD, listing, and like operations for prompts.
pub struct PromptRepo;

impl PromptRepo {
    /// Insert a new prompt. Returns the created row.
    pub async fn create(pool: &PgPool, input: &CreatePrompt) -> Result<Prompt, sqlx::Error> {
        let query = format!(
            "INSERT INTO prompts
                (user_id, body, image_url, image_data, image_type, category,
                 tags, is_public, is_generated, word_count, character_count,
                 generated_at, model)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(input.user_id)
            .bind(&input.body)
            .bind(&input.image_url)
            .bind(&input.image_data)
            .bind(&input.image_type)
            .bind(&input.category)
            .bind(&input.tags)
            .bind(input.is_public)
            .bind(input.is_generated)
            .bind(input.word_count)
            .bind(input.character_count)
            .bind(input.generated_at)
            .bind(&input.model)
            .fetch_one(pool)
            .await
    }

    /// Find a prompt by primary key, regardless of visibility.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompts WHERE id = $1");
        sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List prompts matching the filter, with pagination and sorting.
    pub async fn list(
        pool: &PgPool,
        filter: &PromptFilter,
        sort: PromptSort,
        order: SortOrder,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Prompt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompts
             WHERE {LIST_FILTER}
             ORDER BY {} {}, id DESC
             LIMIT $6 OFFSET $7",
            sort.column(),
            order.sql(),
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(filter.owner)
            .bind(&filter.category)
            .bind(&filter.search)
            .bind(filter.public)
            .bind(filter.viewer)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count prompts matching the filter (same scoping as `list`).
    pub async fn count(pool: &PgPool, filter: &PromptFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM prompts WHERE {LIST_FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.owner)
            .bind(&filter.category)
            .bind(&filter.search)
            .bind(filter.public)
            .bind(filter.viewer)
            .fetch_one(pool)
            .await
    }

    /// Update owner-editable fields. Only provided fields change.
    /// Returns `None` if the prompt does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePrompt,
    ) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!(
            "UPDATE prompts SET
                is_public  = COALESCE($1, is_public),
                tags       = COALESCE($2, tags),
                category   = COALESCE($3, category),
                updated_at = NOW()
             WHERE id = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(input.is_public)
            .bind(&input.tags)
            .bind(&input.category)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a prompt by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prompts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the view counter. Returns `true` if updated.
    pub async fn increment_views(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE prompts SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Toggle a user's like on a prompt.
    ///
    /// Runs in a transaction: the like-set insert (or delete) and the
    /// denormalized counter move together, and the trending flag is
    /// re-evaluated against the threshold in the same statement. Returns
    /// `None` if the prompt does not exist.
    pub async fn toggle_like(
        pool: &PgPool,
        prompt_id: DbId,
        user_id: DbId,
    ) -> Result<Option<LikeState>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM prompts WHERE id = $1")
                .bind(prompt_id)
                .fetch_one(&mut *tx)
                .await?;
        if exists == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let inserted = sqlx::query(
            "INSERT INTO prompt_likes (prompt_id, user_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(prompt_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        let likes = if inserted {
            sqlx::query_scalar::<_, i64>(
                "UPDATE prompts SET
                    likes       = likes + 1,
                    is_trending = is_trending OR likes + 1 >= $2,
                    updated_at  = NOW()
                 WHERE id = $1
                 RETURNING likes",
            )
            .bind(prompt_id)
            .bind(TRENDING_LIKE_THRESHOLD)
            .fetch_one(&mut *tx)
            .await?
        } else {
            // The counter only moves when this statement actually removed
            // a membership row; a concurrent unlike may have won the race.
            let removed = sqlx::query(
                "DELETE FROM prompt_likes WHERE prompt_id = $1 AND user_id = $2",
            )
            .bind(prompt_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
                > 0;

            if removed {
                sqlx::query_scalar::<_, i64>(
                    "UPDATE prompts SET
                        likes      = GREATEST(likes - 1, 0),
                        updated_at = NOW()
                     WHERE id = $1
                     RETURNING likes",
                )
                .bind(prompt_id)
                .fetch_one(&mut *tx)
                .await?
            } else {
                sqlx::query_scalar::<_, i64>("SELECT likes FROM prompts WHERE id = $1")
                    .bind(prompt_id)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;
        Ok(Some(LikeState {
            liked: inserted,
            likes,
        }))
    }

    /// Read the like state for one user on one prompt.
    pub async fn like_state(
        pool: &PgPool,
        prompt_id: DbId,
        user_id: DbId,
    ) -> Result<Option<LikeState>, sqlx::Error> {
        sqlx::query_as::<_, (i64, bool)>(
            "SELECT p.likes,
                    EXISTS (SELECT 1 FROM prompt_likes pl
                            WHERE pl.prompt_id = p.id AND pl.user_id = $2)
             FROM prompts p WHERE p.id = $1",
        )
        .bind(prompt_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map(|row| row.map(|(likes, liked)| LikeState { liked, likes }))
    }

    /// Public prompts carrying the trending flag, most liked first, capped
    /// at `limit`. The flag is sticky: once set by crossing the like
    /// threshold it survives later unlikes, so this filters on the flag
    /// rather than the current counter.
    pub async fn trending(pool: &PgPool, limit: i64) -> Result<Vec<Prompt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompts
             WHERE is_public = TRUE AND is_trending = TRUE
             ORDER BY likes DESC, created_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
