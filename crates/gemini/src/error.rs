//! Error taxonomy for the Gemini REST layer.
//!
//! Upstream failures are classified by inspecting the response status and
//! body text for known markers (the API reports its canonical status codes
//! as strings like `RESOURCE_EXHAUSTED` inside the error body). Anything
//! unrecognized falls through to [`GeminiError::Api`].

/// Errors from the Gemini REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// The call exceeded the fixed wall-clock timeout and was abandoned.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Quota or rate limit exceeded.
    #[error("quota exceeded: {0}")]
    Quota(String),

    /// The image was rejected by the model's content-safety filters.
    #[error("content blocked by safety filters: {0}")]
    Safety(String),

    /// The request was malformed or the image could not be parsed upstream.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The credential is not allowed to use this model or endpoint.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Upstream capacity exceeded.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    /// The configured model does not exist or is unavailable.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The response contained no candidate text.
    #[error("empty response from model")]
    EmptyResponse,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Unclassified non-2xx response.
    #[error("Gemini API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Classify a non-2xx response into a [`GeminiError`] variant.
///
/// Body markers take precedence over the bare status code so that a 400
/// carrying a safety block is reported as [`GeminiError::Safety`] rather
/// than a generic invalid argument.
pub fn classify_api_error(status: u16, body: &str) -> GeminiError {
    let lower = body.to_ascii_lowercase();

    if body.contains("RESOURCE_EXHAUSTED") {
        return GeminiError::ResourceExhausted(truncate(body));
    }
    if body.contains("PERMISSION_DENIED") {
        return GeminiError::PermissionDenied(truncate(body));
    }
    if lower.contains("quota") || lower.contains("rate limit") {
        return GeminiError::Quota(truncate(body));
    }
    if lower.contains("safety") || lower.contains("blocked") {
        return GeminiError::Safety(truncate(body));
    }
    if body.contains("NOT_FOUND") || lower.contains("not found") {
        return GeminiError::ModelNotFound(truncate(body));
    }
    if body.contains("INVALID_ARGUMENT") || lower.contains("invalid") {
        return GeminiError::InvalidArgument(truncate(body));
    }

    match status {
        429 => GeminiError::Quota(truncate(body)),
        403 => GeminiError::PermissionDenied(truncate(body)),
        404 => GeminiError::ModelNotFound(truncate(body)),
        _ => GeminiError::Api {
            status,
            body: truncate(body),
        },
    }
}

/// Cap stored body text so error values stay log-friendly.
fn truncate(body: &str) -> String {
    const MAX: usize = 512;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn resource_exhausted_marker_wins_over_status() {
        let err = classify_api_error(429, r#"{"error":{"status":"RESOURCE_EXHAUSTED"}}"#);
        assert_matches!(err, GeminiError::ResourceExhausted(_));
    }

    #[test]
    fn permission_denied_marker() {
        let err = classify_api_error(403, r#"{"error":{"status":"PERMISSION_DENIED"}}"#);
        assert_matches!(err, GeminiError::PermissionDenied(_));
    }

    #[test]
    fn quota_text_classifies_as_quota() {
        let err = classify_api_error(400, "Quota exceeded for requests per minute");
        assert_matches!(err, GeminiError::Quota(_));
    }

    #[test]
    fn safety_block_classifies_as_safety() {
        let err = classify_api_error(400, "response blocked due to SAFETY settings");
        assert_matches!(err, GeminiError::Safety(_));
    }

    #[test]
    fn model_not_found_classifies() {
        let err = classify_api_error(
            404,
            r#"{"error":{"status":"NOT_FOUND","message":"model x not found"}}"#,
        );
        assert_matches!(err, GeminiError::ModelNotFound(_));
    }

    #[test]
    fn invalid_argument_classifies() {
        let err = classify_api_error(
            400,
            r#"{"error":{"status":"INVALID_ARGUMENT","message":"bad image"}}"#,
        );
        assert_matches!(err, GeminiError::InvalidArgument(_));
    }

    #[test]
    fn bare_429_falls_back_to_quota() {
        assert_matches!(classify_api_error(429, ""), GeminiError::Quota(_));
    }

    #[test]
    fn bare_403_falls_back_to_permission_denied() {
        assert_matches!(classify_api_error(403, ""), GeminiError::PermissionDenied(_));
    }

    #[test]
    fn unknown_body_falls_back_to_api_error() {
        let err = classify_api_error(500, "upstream exploded");
        assert_matches!(err, GeminiError::Api { status: 500, .. });
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "y".repeat(5000);
        match classify_api_error(500, &body) {
            GeminiError::Api { body, .. } => assert!(body.len() < 600),
            other => panic!("unexpected classification: {other:?}"),
        }
    }
}
