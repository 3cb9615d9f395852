//! Session tokens for the gallery API.
//!
//! Two token kinds back a session: a short-lived HS256 JWT that rides in the
//! `Authorization` header of every request, and an opaque refresh token the
//! client trades in for a new pair when the JWT expires. The refresh token
//! is random; the database only ever sees its SHA-256 digest, so stored
//! rows cannot be replayed as tokens.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use promptlens_core::types::DbId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Payload of an access token.
///
/// `sub` is the gallery user id; prompt ownership and credit checks key off
/// it. `jti` gives each token a distinct identity in logs.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: DbId,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Issue time, seconds since the Unix epoch.
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    fn new(user_id: DbId, lifetime_mins: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Claims {
            sub: user_id,
            exp: now + lifetime_mins * 60,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Signing secret and token lifetimes, read once at startup.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Read token settings from the environment.
    ///
    /// `JWT_SECRET` is required and must be non-empty. Lifetimes default to
    /// 15 minutes for access tokens (`JWT_ACCESS_EXPIRY_MINS`) and 7 days
    /// for refresh tokens (`JWT_REFRESH_EXPIRY_DAYS`).
    ///
    /// # Panics
    ///
    /// Panics on a missing or empty secret, or an unparseable lifetime.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self {
            secret,
            access_token_expiry_mins: env_i64("JWT_ACCESS_EXPIRY_MINS", 15),
            refresh_token_expiry_days: env_i64("JWT_REFRESH_EXPIRY_DAYS", 7),
        }
    }
}

fn env_i64(name: &str, default: i64) -> i64 {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be an integer, got '{raw}'")),
        Err(_) => default,
    }
}

/// Sign an access token for a user.
pub fn generate_access_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::new(Algorithm::HS256),
        &Claims::new(user_id, config.access_token_expiry_mins),
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check a presented access token's signature and expiry, returning its
/// claims on success.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
}

/// Mint a fresh refresh token as `(plaintext, digest)`.
///
/// The plaintext goes to the client and is never stored; the digest is what
/// `refresh_tokens.token_hash` holds.
pub fn generate_refresh_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let digest = hash_refresh_token(&plaintext);
    (plaintext, digest)
}

/// SHA-256 hex digest of a refresh token, for storage and lookup.
pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
