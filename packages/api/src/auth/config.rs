//! OAuth configuration from environment variables.

use std::time::Duration;

use oauth2::{AuthUrl, ClientId, ClientSecret, TokenUrl};

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const GOOGLE_REVOKE_URL: &str = "https://oauth2.googleapis.com/revoke";

const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// OAuth provider configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: ClientId,
    /// Desktop clients may be public; the secret is sent only when set.
    pub client_secret: Option<ClientSecret>,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub userinfo_url: String,
    pub revoke_url: String,
    /// Loopback port for the redirect; 0 picks a free one.
    pub redirect_port: u16,
    /// How long to wait for the user to finish in the browser.
    pub timeout: Duration,
}

impl OAuthConfig {
    /// Create Google OAuth config from environment variables.
    pub fn google() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let client_id =
            std::env::var("GOOGLE_CLIENT_ID").map_err(|_| "GOOGLE_CLIENT_ID not set")?;
        let client_secret = std::env::var("GOOGLE_CLIENT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .map(ClientSecret::new);
        let redirect_port = match std::env::var("AUTH_REDIRECT_PORT") {
            Ok(port) => port
                .parse()
                .map_err(|_| format!("AUTH_REDIRECT_PORT is not a port: {}", port))?,
            Err(_) => 0,
        };
        let timeout_secs = match std::env::var("AUTH_TIMEOUT_SECS") {
            Ok(secs) => secs
                .parse()
                .map_err(|_| format!("AUTH_TIMEOUT_SECS is not a number: {}", secs))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            client_id: ClientId::new(client_id),
            client_secret,
            auth_url: AuthUrl::new(GOOGLE_AUTH_URL.to_string()).map_err(|e| e.to_string())?,
            token_url: TokenUrl::new(GOOGLE_TOKEN_URL.to_string()).map_err(|e| e.to_string())?,
            userinfo_url: GOOGLE_USERINFO_URL.to_string(),
            revoke_url: GOOGLE_REVOKE_URL.to_string(),
            redirect_port,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
