//! Trending policy.

/// Like count at which a prompt is flagged as trending.
pub const TRENDING_LIKE_THRESHOLD: i64 = 10;

/// Whether a prompt with the given like count qualifies for the trending flag.
///
/// The flag is sticky: once set it is not cleared when likes drop back
/// below the threshold.
pub fn qualifies_for_trending(likes: i64) -> bool {
    likes >= TRENDING_LIKE_THRESHOLD
}
