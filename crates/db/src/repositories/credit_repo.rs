//! Repository for the `user_credits` table.
//!
//! The balance row is created lazily with the starting grant on first
//! access. Spending uses a conditional decrement so two concurrent
//! generations can never overdraw the balance.

use sqlx::PgPool;

use promptlens_core::credits::{GENERATION_COST, STARTING_CREDITS};
use promptlens_core::types::DbId;

use crate::models::credits::UserCredits;

/// Column list for user_credits queries.
const COLUMNS: &str = "user_id, credits, total_used, updated_at";

/// Balance operations for generation credits.
pub struct CreditRepo;

impl CreditRepo {
    /// Create the balance row with the starting grant if it does not exist
    /// yet; a no-op otherwise.
    pub async fn ensure_row(pool: &PgPool, user_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_credits (user_id, credits)
             VALUES ($1, $2)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(STARTING_CREDITS)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Fetch the balance, initializing it with the starting grant on first
    /// access.
    pub async fn get_or_init(pool: &PgPool, user_id: DbId) -> Result<UserCredits, sqlx::Error> {
        Self::ensure_row(pool, user_id).await?;
        let query = format!("SELECT {COLUMNS} FROM user_credits WHERE user_id = $1");
        sqlx::query_as::<_, UserCredits>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Atomically reserve one generation's worth of credits.
    ///
    /// The decrement only applies when the balance covers the cost, so the
    /// check and the spend cannot race. Returns the balance after the
    /// reservation, or `None` if the balance was insufficient.
    pub async fn try_reserve(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserCredits>, sqlx::Error> {
        Self::ensure_row(pool, user_id).await?;
        let query = format!(
            "UPDATE user_credits SET
                credits    = credits - $2,
                total_used = total_used + $2,
                updated_at = NOW()
             WHERE user_id = $1 AND credits >= $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserCredits>(&query)
            .bind(user_id)
            .bind(GENERATION_COST)
            .fetch_optional(pool)
            .await
    }

    /// Return a reserved credit after an upstream failure.
    pub async fn refund(pool: &PgPool, user_id: DbId) -> Result<UserCredits, sqlx::Error> {
        let query = format!(
            "UPDATE user_credits SET
                credits    = credits + $2,
                total_used = GREATEST(total_used - $2, 0),
                updated_at = NOW()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserCredits>(&query)
            .bind(user_id)
            .bind(GENERATION_COST)
            .fetch_one(pool)
            .await
    }
}
