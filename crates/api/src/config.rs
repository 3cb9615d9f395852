use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development except
/// the secrets (JWT secret, Google OAuth credentials), which must be set.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`).
    ///
    /// Must exceed the upstream generation timeout or the middleware cuts
    /// off generation requests before the upstream client can time out.
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Google OAuth client credentials.
    pub google: GoogleOAuthConfig,
    /// Gemini API key. `None` leaves generation unconfigured; the endpoint
    /// then returns a server error instead of failing at startup.
    pub gemini_api_key: Option<String>,
    /// Gemini model identifier override.
    pub gemini_model: Option<String>,
}

/// Google OAuth client credentials for the authorization-code exchange.
#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Redirect URI registered with Google, echoed in the code exchange.
    pub redirect_uri: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Required | Default                  |
    /// |------------------------|----------|--------------------------|
    /// | `HOST`                 | no       | `0.0.0.0`                |
    /// | `PORT`                 | no       | `3000`                   |
    /// | `CORS_ORIGINS`         | no       | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS` | no       | `60`                     |
    /// | `GOOGLE_CLIENT_ID`     | **yes**  | --                       |
    /// | `GOOGLE_CLIENT_SECRET` | **yes**  | --                       |
    /// | `GOOGLE_REDIRECT_URI`  | no       | `http://localhost:5173/auth/callback` |
    /// | `GEMINI_API_KEY`       | no       | -- (generation disabled) |
    /// | `GEMINI_MODEL`         | no       | client default           |
    ///
    /// JWT variables are documented on [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        let google = GoogleOAuthConfig {
            client_id: std::env::var("GOOGLE_CLIENT_ID")
                .expect("GOOGLE_CLIENT_ID must be set in the environment"),
            client_secret: std::env::var("GOOGLE_CLIENT_SECRET")
                .expect("GOOGLE_CLIENT_SECRET must be set in the environment"),
            redirect_uri: std::env::var("GOOGLE_REDIRECT_URI")
                .unwrap_or_else(|_| "http://localhost:5173/auth/callback".into()),
        };

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());
        let gemini_model = std::env::var("GEMINI_MODEL")
            .ok()
            .filter(|m| !m.is_empty());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            google,
            gemini_api_key,
            gemini_model,
        }
    }
}
