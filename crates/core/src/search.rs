//! Full-text search helpers for the gallery listing.
//!
//! Lives in `core` (zero internal deps) so the repository layer can build
//! tsquery strings without pulling in any I/O.

/// Sanitize user input into a list of terms suitable for tsquery construction.
///
/// - Splits on whitespace.
/// - Strips non-alphanumeric characters (except `_`) from each term.
/// - Drops empty terms.
///
/// Returns `None` if the input yields no usable terms.
fn sanitize_terms(query: &str) -> Option<Vec<&str>> {
    let terms: Vec<&str> = query
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '_'))
        .filter(|t| !t.is_empty())
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms)
    }
}

/// Sanitize and convert user input into a PostgreSQL `tsquery` string.
///
/// - Whitespace-separated terms are joined with `&` (AND).
/// - Empty or whitespace-only input returns `None`.
/// - Special characters that could break tsquery parsing are stripped.
pub fn build_tsquery(query: &str) -> Option<String> {
    sanitize_terms(query).map(|terms| terms.join(" & "))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
