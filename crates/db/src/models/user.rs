//! User models.
//!
//! Users are provisioned from the identity provider: there is no local
//! password, only the provider subject plus profile fields refreshed on
//! every sign-in.

use promptlens_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    /// Stable subject identifier issued by the OAuth provider.
    pub google_sub: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Profile fields from the provider, upserted on every sign-in.
#[derive(Debug, Clone)]
pub struct UpsertGoogleUser {
    pub google_sub: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}
