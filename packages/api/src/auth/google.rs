//! # Google sign-in for a native client
//!
//! Implements [`IdentityProvider`] with the OAuth 2.0 Authorization Code flow
//! plus PKCE, the way Google documents it for installed applications.
//!
//! ## Sign-in
//!
//! 1. Bind a [`LoopbackReceiver`] so the redirect URI
//!    (`http://127.0.0.1:<port>/callback`) is known.
//! 2. Build the authorization URL with the `openid`, `email` and `profile`
//!    scopes, a random CSRF state and an S256 PKCE challenge, and open it in the
//!    system browser.
//! 3. Wait (bounded by [`OAuthConfig::timeout`]) for the redirect, validate
//!    the state and extract the code.
//! 4. Exchange code + verifier for tokens, then fetch the profile from the
//!    userinfo endpoint.
//!
//! The access token becomes the bearer credential for the backend. Tokens are
//! not refreshed: when one expires the backend answers non-2xx and the user
//! signs in again.
//!
//! ## Sign-out
//!
//! Revokes the token at Google's revocation endpoint. A non-2xx answer is an
//! [`AuthError::Provider`]; what the caller does with local state is decided by
//! the caller.

use oauth2::basic::BasicClient;
use oauth2::{
    AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, PkceCodeChallenge, RedirectUrl,
    Scope, TokenResponse,
};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use super::callback::LoopbackReceiver;
use super::config::OAuthConfig;
use super::provider::{Identity, IdentityProvider};
use crate::error::AuthError;

/// Google user info from API.
#[derive(Debug, Deserialize)]
struct GoogleUser {
    id: String,
    email: Option<String>,
    name: Option<String>,
}

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Google identity provider.
#[derive(Debug, Clone)]
pub struct GoogleIdentity {
    config: OAuthConfig,
    http: reqwest::Client,
}

impl GoogleIdentity {
    /// Provider configured from the environment.
    pub fn new() -> Result<Self, String> {
        Self::with_config(OAuthConfig::google()?)
    }

    pub fn with_config(config: OAuthConfig) -> Result<Self, String> {
        // Token requests must not follow redirects.
        let http = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| e.to_string())?;
        Ok(Self { config, http })
    }

    fn create_client(&self, redirect_url: RedirectUrl) -> ConfiguredClient {
        let client = BasicClient::new(self.config.client_id.clone())
            .set_auth_uri(self.config.auth_url.clone())
            .set_token_uri(self.config.token_url.clone())
            .set_redirect_uri(redirect_url);
        match &self.config.client_secret {
            Some(secret) => client.set_client_secret(secret.clone()),
            None => client,
        }
    }

    async fn fetch_user(&self, access_token: &str) -> Result<GoogleUser, AuthError> {
        let user = self
            .http
            .get(&self.config.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(user)
    }
}

impl IdentityProvider for GoogleIdentity {
    async fn sign_in(&self) -> Result<Identity, AuthError> {
        let receiver = LoopbackReceiver::bind(self.config.redirect_port).await?;
        let redirect_url = RedirectUrl::new(receiver.redirect_url())
            .map_err(|e| AuthError::Config(e.to_string()))?;
        let client = self.create_client(redirect_url);

        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();
        let (auth_url, csrf_state) = client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        if let Err(e) = open::that(auth_url.as_str()) {
            tracing::error!("Failed to open browser: {}", e);
            tracing::info!("Open this URL to sign in: {}", auth_url);
        }

        let params = tokio::time::timeout(self.config.timeout, receiver.wait())
            .await
            .map_err(|_| AuthError::Cancelled)??;
        let code = params.into_code(csrf_state.secret())?;

        let token = client
            .exchange_code(AuthorizationCode::new(code))
            .set_pkce_verifier(pkce_verifier)
            .request_async(&self.http)
            .await
            .map_err(|e| AuthError::Provider(format!("Token exchange failed: {}", e)))?;

        let access_token = token.access_token().secret().clone();

        let user = self.fetch_user(&access_token).await?;
        tracing::info!("Signed in as {}", user.id);

        Ok(Identity {
            uid: user.id,
            display_name: user.name,
            email: user.email,
            token: access_token,
        })
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .post(&self.config.revoke_url)
            .query(&[("token", token)])
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider(format!(
                "Token revocation failed ({}): {}",
                status, body
            )));
        }

        tracing::info!("Revoked provider token");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;
    use oauth2::{AuthUrl, ClientId, TokenUrl};

    fn config(revoke_url: String) -> OAuthConfig {
        OAuthConfig {
            client_id: ClientId::new("client".to_string()),
            client_secret: None,
            auth_url: AuthUrl::new("https://accounts.example.com/auth".to_string()).unwrap(),
            token_url: TokenUrl::new("https://accounts.example.com/token".to_string()).unwrap(),
            userinfo_url: "https://accounts.example.com/userinfo".to_string(),
            revoke_url,
            redirect_port: 0,
            timeout: Duration::from_secs(5),
        }
    }

    async fn revoke(Query(params): Query<HashMap<String, String>>) -> StatusCode {
        match params.get("token").map(String::as_str) {
            Some("good") => StatusCode::OK,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    async fn spawn_revoke_endpoint() -> String {
        let app = Router::new().route("/revoke", post(revoke));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/revoke", addr)
    }

    #[tokio::test]
    async fn test_sign_out_revokes_token() {
        let provider = GoogleIdentity::with_config(config(spawn_revoke_endpoint().await)).unwrap();
        assert_eq!(provider.sign_out("good").await, Ok(()));
    }

    #[tokio::test]
    async fn test_sign_out_reports_rejected_revocation() {
        let provider = GoogleIdentity::with_config(config(spawn_revoke_endpoint().await)).unwrap();
        match provider.sign_out("stale").await {
            Err(AuthError::Provider(msg)) => assert!(msg.contains("400")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_authorize_url_carries_pkce_and_scopes() {
        let provider = GoogleIdentity::with_config(config(String::new())).unwrap();
        let client = provider.create_client(
            RedirectUrl::new("http://127.0.0.1:4000/callback".to_string()).unwrap(),
        );
        let (challenge, _verifier) = PkceCodeChallenge::new_random_sha256();
        let (url, _state) = client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .set_pkce_challenge(challenge)
            .url();

        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(query.get("client_id").map(String::as_str), Some("client"));
        assert_eq!(query.get("code_challenge_method").map(String::as_str), Some("S256"));
        assert_eq!(
            query.get("redirect_uri").map(String::as_str),
            Some("http://127.0.0.1:4000/callback")
        );
        assert!(query.contains_key("state"));
    }
}
