//! Repository for the `refresh_tokens` table. Callers hash tokens before
//! they reach this layer; raw tokens are never stored.

use sqlx::PgPool;

use promptlens_core::types::{DbId, Timestamp};

use crate::models::refresh_token::RefreshToken;

/// Column list for refresh_tokens queries.
const COLUMNS: &str = "id, user_id, token_hash, expires_at, created_at";

/// Storage for opaque refresh tokens.
pub struct RefreshTokenRepo;

impl RefreshTokenRepo {
    /// Store a token hash for a user.
    pub async fn insert(
        pool: &PgPool,
        user_id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<RefreshToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO refresh_tokens (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefreshToken>(&query)
            .bind(user_id)
            .bind(token_hash)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Look up an unexpired token by hash.
    pub async fn find_valid(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM refresh_tokens
             WHERE token_hash = $1 AND expires_at > NOW()"
        );
        sqlx::query_as::<_, RefreshToken>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Delete a token by hash (rotation or sign-out). Returns `true` if a
    /// row was deleted.
    pub async fn delete_by_hash(pool: &PgPool, token_hash: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE token_hash = $1")
            .bind(token_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke every token for a user. Returns the number of rows deleted.
    pub async fn delete_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
