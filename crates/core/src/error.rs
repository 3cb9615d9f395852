use crate::types::DbId;

/// Domain-level error taxonomy, mapped to HTTP statuses in the API crate.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Insufficient credits: {0}")]
    InsufficientCredits(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
