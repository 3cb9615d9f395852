//! Offset pagination math shared by the repository and API layers.

use serde::Serialize;

/// Default page size for the public gallery listing.
pub const DEFAULT_GALLERY_PAGE_SIZE: i64 = 12;

/// Default page size for the per-user generation history.
pub const DEFAULT_HISTORY_PAGE_SIZE: i64 = 10;

/// Maximum page size any caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-provided page number to >= 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a user-provided page size to `1..=MAX_PAGE_SIZE`.
pub fn clamp_page_size(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, MAX_PAGE_SIZE)
}

/// Row offset for a 1-based page number.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page - 1) * limit
}

/// Pagination metadata returned alongside every paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub total_pages: i64,
    pub total: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageMeta {
    /// Derive metadata from the requested page, the page size, and the
    /// total row count from the accompanying `COUNT(*)` query.
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + limit - 1) / limit
        };
        Self {
            page,
            total_pages,
            total,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
