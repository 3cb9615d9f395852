//! Upload payload validation for the image-to-prompt pipeline.
//!
//! Accepts either a raw base64 string or a full `data:` URL, normalizes it
//! to bare base64, and enforces the MIME allow-list and size ceiling before
//! anything is sent upstream.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::CoreError;

/// MIME types accepted for prompt generation.
pub const ALLOWED_IMAGE_TYPES: &[&str] =
    &["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Hard ceiling on the decoded image size (10 MiB).
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// A validated, normalized image payload ready for the upstream call.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    /// Bare base64 data with any `data:` URL prefix removed.
    pub data: String,
    /// Lowercased MIME type from the allow-list.
    pub mime_type: String,
    /// Decoded size estimated from the encoded length (len * 3 / 4).
    pub estimated_bytes: usize,
}

/// Check a declared MIME type against the allow-list (case-insensitive).
pub fn is_allowed_image_type(mime_type: &str) -> bool {
    let lower = mime_type.to_ascii_lowercase();
    ALLOWED_IMAGE_TYPES.contains(&lower.as_str())
}

/// Strip a `data:<mime>;base64,` prefix if present, returning bare base64.
///
/// Input without a `data:` scheme is returned unchanged.
pub fn strip_data_url_prefix(data: &str) -> &str {
    if !data.starts_with("data:") {
        return data;
    }
    match data.find(";base64,") {
        Some(idx) => &data[idx + ";base64,".len()..],
        None => data,
    }
}

/// Estimate the decoded byte length of a base64 string without decoding.
pub fn estimated_decoded_len(encoded_len: usize) -> usize {
    encoded_len * 3 / 4
}

/// Validate an uploaded image payload.
///
/// Checks, in order:
/// 1. the declared MIME type is on the allow-list,
/// 2. the payload is non-empty after removing any data-URL prefix,
/// 3. the estimated decoded size does not exceed [`MAX_IMAGE_BYTES`]
///    (computed from the encoded length, so oversized uploads are rejected
///    without decoding),
/// 4. the payload is syntactically valid base64 and decodes to at least
///    one byte.
pub fn validate_image_payload(
    image_data: &str,
    image_type: &str,
) -> Result<ImagePayload, CoreError> {
    if !is_allowed_image_type(image_type) {
        return Err(CoreError::Validation(
            "Unsupported image format. Please use JPG, PNG, or WebP.".to_string(),
        ));
    }

    let data = strip_data_url_prefix(image_data.trim());
    if data.is_empty() {
        return Err(CoreError::Validation(
            "Invalid image data provided.".to_string(),
        ));
    }

    let estimated_bytes = estimated_decoded_len(data.len());
    if estimated_bytes > MAX_IMAGE_BYTES {
        return Err(CoreError::Validation(
            "Image too large. Please use an image smaller than 10MB.".to_string(),
        ));
    }

    let decoded = BASE64
        .decode(data)
        .map_err(|_| CoreError::Validation("Invalid image data provided.".to_string()))?;
    if decoded.is_empty() {
        return Err(CoreError::Validation(
            "Invalid image data provided.".to_string(),
        ));
    }

    Ok(ImagePayload {
        data: data.to_string(),
        mime_type: image_type.to_ascii_lowercase(),
        estimated_bytes,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// A 1x1 PNG, base64-encoded. Small but structurally valid base64.
    const TINY_PNG: &str =
        "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

    #[test]
    fn accepts_allowed_types_case_insensitive() {
        assert!(is_allowed_image_type("image/jpeg"));
        assert!(is_allowed_image_type("image/jpg"));
        assert!(is_allowed_image_type("IMAGE/PNG"));
        assert!(is_allowed_image_type("image/WebP"));
    }

    #[test]
    fn rejects_unsupported_types() {
        assert!(!is_allowed_image_type("image/gif"));
        assert!(!is_allowed_image_type("application/pdf"));
        assert!(!is_allowed_image_type(""));
    }

    #[test]
    fn strips_data_url_prefix() {
        assert_eq!(
            strip_data_url_prefix("data:image/png;base64,AAAA"),
            "AAAA"
        );
        assert_eq!(strip_data_url_prefix("AAAA"), "AAAA");
    }

    #[test]
    fn valid_payload_passes() {
        let payload = validate_image_payload(TINY_PNG, "image/png").unwrap();
        assert_eq!(payload.mime_type, "image/png");
        assert!(payload.estimated_bytes > 0);
        assert!(!payload.data.starts_with("data:"));
    }

    #[test]
    fn valid_data_url_passes() {
        let data_url = format!("data:image/png;base64,{TINY_PNG}");
        let payload = validate_image_payload(&data_url, "image/png").unwrap();
        assert_eq!(payload.data, TINY_PNG);
    }

    #[test]
    fn gif_is_rejected() {
        let err = validate_image_payload(TINY_PNG, "image/gif").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn empty_payload_is_rejected() {
        assert!(validate_image_payload("", "image/png").is_err());
        assert!(validate_image_payload("data:image/png;base64,", "image/png").is_err());
    }

    #[test]
    fn malformed_base64_is_rejected() {
        let err = validate_image_payload("not%%base64!!", "image/png").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn oversized_payload_is_rejected_by_length_estimate() {
        // Encoded length just past the ceiling: (MAX * 4 / 3) + 8 chars.
        let oversized = "A".repeat(MAX_IMAGE_BYTES * 4 / 3 + 8);
        let err = validate_image_payload(&oversized, "image/jpeg").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn size_estimate_matches_three_quarters_rule() {
        assert_eq!(estimated_decoded_len(4), 3);
        assert_eq!(estimated_decoded_len(100), 75);
        assert_eq!(estimated_decoded_len(0), 0);
    }
}
