//! Handler for the image-to-prompt generation pipeline.
//!
//! Order of operations matters: the request is validated and a credit
//! reserved *before* the upstream call, and the credit is refunded on any
//! upstream or post-processing failure. The reservation is a conditional
//! decrement in SQL, so concurrent requests cannot overdraw a balance.

use axum::extract::State;
use axum::Json;
use promptlens_core::credits::GENERATION_COST;
use promptlens_core::error::CoreError;
use promptlens_core::image::validate_image_payload;
use promptlens_core::sanitize::sanitize_generated_prompt;
use promptlens_db::models::generated_prompt::CreateGeneratedPrompt;
use promptlens_db::models::prompt::CreatePrompt;
use promptlens_db::repositories::{CreditRepo, GeneratedPromptRepo, PromptRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /generate-prompt`.
#[derive(Debug, Deserialize)]
pub struct GeneratePromptRequest {
    /// Base64 image payload, with or without a `data:` URL prefix.
    pub image_data: String,
    /// Declared MIME type (`image/jpeg`, `image/png`, ...).
    pub image_type: String,
    /// Where the uploaded image is hosted, recorded with the history entry.
    pub image_url: Option<String>,
    pub category: Option<String>,
    /// When set, the result is also published to the gallery.
    #[serde(default)]
    pub save_to_gallery: bool,
}

/// Response body for a successful generation.
#[derive(Debug, Serialize)]
pub struct GeneratePromptResponse {
    pub prompt: String,
    pub metadata: PromptMetadata,
    /// Credit balance after this generation.
    pub credits_remaining: i32,
    /// Gallery prompt id, when `save_to_gallery` was requested.
    pub prompt_id: Option<promptlens_core::types::DbId>,
}

/// Derived metadata accompanying a generated prompt.
#[derive(Debug, Serialize)]
pub struct PromptMetadata {
    pub word_count: usize,
    pub character_count: usize,
    pub generated_at: promptlens_core::types::Timestamp,
    pub model: String,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// POST /api/v1/generate-prompt
///
/// Analyze an uploaded image and return a descriptive generation prompt.
/// Costs one credit.
pub async fn generate_prompt(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<GeneratePromptRequest>,
) -> AppResult<Json<DataResponse<GeneratePromptResponse>>> {
    // 1. The service must be configured at all.
    let gemini = state
        .gemini
        .as_ref()
        .ok_or_else(|| AppError::InternalError("Generation service is not configured".into()))?;

    // 2. Validate the image before touching the balance or the network.
    let payload = validate_image_payload(&input.image_data, &input.image_type)
        .map_err(AppError::Core)?;

    // 3. Reserve the credit.
    let reserved = CreditRepo::try_reserve(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::InsufficientCredits(
                "Insufficient credits. Please purchase more credits to continue.".into(),
            ))
        })?;

    // 4. Call upstream; refund on failure.
    let raw = match gemini.describe_image(&payload.data, &payload.mime_type).await {
        Ok(text) => text,
        Err(err) => {
            refund(&state, auth.user_id).await;
            return Err(err.into());
        }
    };

    // 5. Clean the result and enforce the acceptance bounds. An unusable
    //    result is the upstream's fault, so the credit comes back.
    let sanitized = match sanitize_generated_prompt(&raw) {
        Ok(s) => s,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Generated prompt rejected");
            refund(&state, auth.user_id).await;
            return Err(AppError::BadGateway(
                "The analysis service returned an unusable prompt. Please try again.".into(),
            ));
        }
    };

    // 6. Record the history entry. The credit is already spent; a history
    //    write failure is surfaced but not refunded.
    GeneratedPromptRepo::create(
        &state.pool,
        &CreateGeneratedPrompt {
            user_id: auth.user_id,
            body: sanitized.text.clone(),
            source_image_url: input.image_url.clone(),
            style: None,
            category: input.category.clone(),
            credits_used: GENERATION_COST,
        },
    )
    .await?;

    let generated_at = chrono::Utc::now();

    // 7. Optionally publish to the gallery.
    let prompt_id = if input.save_to_gallery {
        let prompt = PromptRepo::create(
            &state.pool,
            &CreatePrompt {
                user_id: auth.user_id,
                body: sanitized.text.clone(),
                image_url: input.image_url,
                image_data: Some(payload.data),
                image_type: Some(payload.mime_type),
                category: input.category,
                tags: Vec::new(),
                is_public: true,
                is_generated: true,
                word_count: Some(sanitized.word_count as i32),
                character_count: Some(sanitized.character_count as i32),
                generated_at: Some(generated_at),
                model: Some(gemini.model().to_string()),
            },
        )
        .await?;
        Some(prompt.id)
    } else {
        None
    };

    tracing::info!(
        user_id = auth.user_id,
        chars = sanitized.character_count,
        credits_remaining = reserved.credits,
        "Prompt generated"
    );

    Ok(Json(DataResponse {
        data: GeneratePromptResponse {
            prompt: sanitized.text,
            metadata: PromptMetadata {
                word_count: sanitized.word_count,
                character_count: sanitized.character_count,
                generated_at,
                model: gemini.model().to_string(),
            },
            credits_remaining: reserved.credits,
            prompt_id,
        },
    }))
}

/// Best-effort refund after an upstream failure. A refund failure is logged
/// rather than masking the original error.
async fn refund(state: &AppState, user_id: promptlens_core::types::DbId) {
    if let Err(err) = CreditRepo::refund(&state.pool, user_id).await {
        tracing::error!(user_id, error = %err, "Credit refund failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_payload_nests_metadata() {
        let response = GeneratePromptResponse {
            prompt: "a quiet harbor under a violet dusk sky".to_string(),
            metadata: PromptMetadata {
                word_count: 8,
                character_count: 38,
                generated_at: chrono::Utc::now(),
                model: "gemini-2.0-flash-lite".to_string(),
            },
            credits_remaining: 9,
            prompt_id: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["prompt"].is_string());
        assert_eq!(json["metadata"]["word_count"], 8);
        assert_eq!(json["metadata"]["character_count"], 38);
        assert_eq!(json["metadata"]["model"], "gemini-2.0-flash-lite");
        assert!(json["metadata"]["generated_at"].is_string());
        assert_eq!(json["credits_remaining"], 9);
    }
}
