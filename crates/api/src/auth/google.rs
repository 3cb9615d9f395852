//! Google OAuth authorization-code exchange.
//!
//! The frontend completes the consent flow and posts the authorization code
//! here. We exchange the code for tokens, then fetch the user's profile
//! from the userinfo endpoint. ID-token parsing is deliberately avoided:
//! the userinfo response carries the same fields over a TLS channel we
//! already trust.

use serde::Deserialize;

use crate::config::GoogleOAuthConfig;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Errors from the Google OAuth exchange.
#[derive(Debug, thiserror::Error)]
pub enum GoogleAuthError {
    /// Google rejected the authorization code.
    #[error("Google rejected the authorization code")]
    CodeRejected,

    /// Transport-level failure talking to Google.
    #[error("OAuth request error: {0}")]
    Request(#[from] reqwest::Error),
}

/// Profile fields returned by the userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    /// Stable subject identifier for this Google account.
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client for the Google OAuth code exchange and profile fetch.
#[derive(Clone)]
pub struct GoogleAuthClient {
    http: reqwest::Client,
    config: GoogleOAuthConfig,
}

impl GoogleAuthClient {
    pub fn new(config: GoogleOAuthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Exchange an authorization code for the user's Google profile.
    pub async fn exchange_code(&self, code: &str) -> Result<GoogleProfile, GoogleAuthError> {
        let params = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let token_resp = self.http.post(TOKEN_URL).form(&params).send().await?;
        if !token_resp.status().is_success() {
            let status = token_resp.status();
            let body = token_resp.text().await.unwrap_or_default();
            tracing::warn!(%status, body, "Google token exchange failed");
            return Err(GoogleAuthError::CodeRejected);
        }
        let token: TokenResponse = token_resp.json().await?;

        let profile_resp = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await?;
        if !profile_resp.status().is_success() {
            tracing::warn!(status = %profile_resp.status(), "Google userinfo fetch failed");
            return Err(GoogleAuthError::CodeRejected);
        }

        Ok(profile_resp.json().await?)
    }
}
