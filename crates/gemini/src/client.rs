//! HTTP client for the Gemini `generateContent` endpoint.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{classify_api_error, GeminiError};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";

/// Base URL of the Generative Language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Wall-clock ceiling on one generation call. The call is abandoned on
/// expiry; the upstream request may still complete server-side but the
/// result is discarded. No retry.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Instructional template sent with every image. Asks the model for a
/// single ready-to-use prompt covering subject, style, lighting, palette,
/// and camera, with no surrounding commentary.
const ANALYSIS_PROMPT: &str = "\
Analyze this image carefully and create a detailed, professional prompt that \
could be used to generate a similar image with an AI image generator such as \
DALL-E, Midjourney, or Stable Diffusion.

Your response should be a single, comprehensive prompt that covers:
1. Main subject and composition
2. Art style and technique
3. Lighting and atmosphere
4. Color palette and mood
5. Quality and technical specifications
6. Camera angle and perspective (if applicable)

Make the prompt detailed but concise, focusing on the visual elements that \
would help recreate the essence and style of this image. The prompt should be \
between 50 and 150 words and ready to use directly in an AI image generator.

Do not include any explanations or additional text - just return the prompt \
itself.";

/// Client for a single Gemini model endpoint.
///
/// Construct once at startup and share via application state; the inner
/// [`reqwest::Client`] pools connections across requests.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

/// Response body of a successful `generateContent` call. Only the fields
/// needed to extract the candidate text are modelled.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a client for the default model and endpoint.
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the model name (e.g. from `GEMINI_MODEL`).
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Override the API base URL. Intended for tests against a local stub.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Override the per-call timeout. Intended for tests.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Model name this client targets.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request a descriptive generation prompt for an inline image.
    ///
    /// Sends one `generateContent` request with the fixed instructional
    /// template plus the base64 image. The whole exchange, sending the
    /// request and reading the response body, is raced against the
    /// configured timeout, so a stalled body stream cannot hold the call
    /// open past the ceiling. Returns the raw candidate text; cleanup and
    /// acceptance bounds are the caller's concern.
    pub async fn describe_image(
        &self,
        base64_data: &str,
        mime_type: &str,
    ) -> Result<String, GeminiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = build_request_body(base64_data, mime_type);

        let exchange = async {
            let response = self
                .http
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<unreadable body>".to_string());
                tracing::warn!(status = status.as_u16(), "Gemini API returned an error");
                return Err(classify_api_error(status.as_u16(), &body));
            }

            let parsed: GenerateContentResponse = response.json().await?;
            extract_candidate_text(parsed).ok_or(GeminiError::EmptyResponse)
        };

        tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| GeminiError::Timeout(self.timeout.as_secs()))?
    }
}

/// Build the `generateContent` JSON body: the instructional template first,
/// then the inline image part.
fn build_request_body(base64_data: &str, mime_type: &str) -> serde_json::Value {
    serde_json::json!({
        "contents": [{
            "role": "user",
            "parts": [
                { "text": ANALYSIS_PROMPT },
                {
                    "inline_data": {
                        "mime_type": mime_type,
                        "data": base64_data,
                    }
                },
            ],
        }],
    })
}

/// Pull the first candidate's first non-empty text part.
fn extract_candidate_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .find_map(|part| part.text)
        .filter(|text| !text.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
