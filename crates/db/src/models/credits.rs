//! Credit balance model.

use promptlens_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_credits` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserCredits {
    pub user_id: DbId,
    /// Remaining balance. Never negative (CHECK constraint).
    pub credits: i32,
    /// Cumulative credits consumed over the account lifetime.
    pub total_used: i32,
    pub updated_at: Timestamp,
}
