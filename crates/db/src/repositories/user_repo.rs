//! Repository for the `users` table.

use sqlx::PgPool;

use promptlens_core::types::DbId;

use crate::models::user::{UpsertGoogleUser, User};

/// Column list for users queries.
const COLUMNS: &str =
    "id, google_sub, email, display_name, avatar_url, created_at, updated_at";

/// CRUD operations for user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user from Google profile data, or refresh the profile
    /// fields if the subject is already known. Returns the row either way.
    pub async fn upsert_google(
        pool: &PgPool,
        input: &UpsertGoogleUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (google_sub, email, display_name, avatar_url)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (google_sub) DO UPDATE SET
                email        = EXCLUDED.email,
                display_name = EXCLUDED.display_name,
                avatar_url   = EXCLUDED.avatar_url,
                updated_at   = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.google_sub)
            .bind(&input.email)
            .bind(&input.display_name)
            .bind(&input.avatar_url)
            .fetch_one(pool)
            .await
    }

    /// Find a user by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
