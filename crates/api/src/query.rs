//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;

/// Generic page-number pagination parameters (`?page=&limit=`).
///
/// Used by any handler that supports paginated listing. Values are clamped
/// via `clamp_page` / `clamp_page_size` before hitting the repository.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
