//! # Loopback redirect receiver
//!
//! Native apps cannot host a popup, so the browser is sent to the provider and
//! the provider redirects back to `http://127.0.0.1:<port>/callback`.
//! [`LoopbackReceiver`] binds that port before the authorization URL is built
//! (so the redirect URI is known), serves exactly one callback, and shuts the
//! server down again.
//!
//! [`CallbackParams::into_code`] turns the query string into either the
//! authorization code or an [`AuthError`]: `error=` (for example
//! `access_denied` when the user closes the consent screen) becomes
//! [`AuthError::Provider`], a foreign `state` becomes
//! [`AuthError::StateMismatch`].

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::error::AuthError;

const DONE_PAGE: &str = "<!DOCTYPE html><html><body style=\"font-family: sans-serif; padding: 2rem;\">\
<p>Sign-in finished. You can close this window and return to the app.</p></body></html>";

/// Query parameters of the provider redirect.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// Validate against the CSRF state we issued and extract the code.
    pub fn into_code(self, expected_state: &str) -> Result<String, AuthError> {
        if let Some(error) = self.error {
            return Err(AuthError::Provider(self.error_description.unwrap_or(error)));
        }
        if self.state.as_deref() != Some(expected_state) {
            return Err(AuthError::StateMismatch);
        }
        self.code
            .filter(|c| !c.is_empty())
            .ok_or(AuthError::MissingCode)
    }
}

type Slot = Arc<Mutex<Option<oneshot::Sender<CallbackParams>>>>;

/// One-shot HTTP listener for the OAuth redirect.
pub struct LoopbackReceiver {
    listener: TcpListener,
    addr: SocketAddr,
}

impl LoopbackReceiver {
    /// Bind `127.0.0.1:<port>`; port 0 picks a free one.
    pub async fn bind(port: u16) -> Result<Self, AuthError> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, port))
            .await
            .map_err(|e| AuthError::Config(format!("Cannot bind redirect port {}: {}", port, e)))?;
        let addr = listener
            .local_addr()
            .map_err(|e| AuthError::Config(e.to_string()))?;
        Ok(Self { listener, addr })
    }

    pub fn redirect_url(&self) -> String {
        format!("http://127.0.0.1:{}/callback", self.addr.port())
    }

    /// Serve until the first `/callback` request arrives and return its query.
    pub async fn wait(self) -> Result<CallbackParams, AuthError> {
        let (tx, rx) = oneshot::channel();
        let slot: Slot = Arc::new(Mutex::new(Some(tx)));
        let app = Router::new()
            .route("/callback", get(receive))
            .with_state(slot);

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let listener = self.listener;
        tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = stop_rx.await;
            });
            if let Err(e) = server.await {
                tracing::error!("Redirect receiver failed: {}", e);
            }
        });

        let params = rx.await.map_err(|_| AuthError::Cancelled);
        let _ = stop_tx.send(());
        params
    }
}

async fn receive(
    State(slot): State<Slot>,
    Query(params): Query<CallbackParams>,
) -> Html<&'static str> {
    let sender = slot.lock().ok().and_then(|mut s| s.take());
    match sender {
        Some(tx) => {
            let _ = tx.send(params);
        }
        None => tracing::warn!("Ignoring repeated OAuth callback"),
    }
    Html(DONE_PAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(code: Option<&str>, state: Option<&str>, error: Option<&str>) -> CallbackParams {
        CallbackParams {
            code: code.map(str::to_string),
            state: state.map(str::to_string),
            error: error.map(str::to_string),
            error_description: None,
        }
    }

    #[test]
    fn test_into_code_accepts_matching_state() {
        let code = params(Some("abc"), Some("s1"), None).into_code("s1");
        assert_eq!(code, Ok("abc".to_string()));
    }

    #[test]
    fn test_into_code_rejects_foreign_state() {
        assert_eq!(
            params(Some("abc"), Some("other"), None).into_code("s1"),
            Err(AuthError::StateMismatch)
        );
        assert_eq!(
            params(Some("abc"), None, None).into_code("s1"),
            Err(AuthError::StateMismatch)
        );
    }

    #[test]
    fn test_into_code_surfaces_provider_error() {
        assert_eq!(
            params(None, Some("s1"), Some("access_denied")).into_code("s1"),
            Err(AuthError::Provider("access_denied".to_string()))
        );

        let mut p = params(None, None, Some("access_denied"));
        p.error_description = Some("The user denied access".to_string());
        assert_eq!(
            p.into_code("s1"),
            Err(AuthError::Provider("The user denied access".to_string()))
        );
    }

    #[test]
    fn test_into_code_requires_code() {
        assert_eq!(
            params(None, Some("s1"), None).into_code("s1"),
            Err(AuthError::MissingCode)
        );
    }

    #[tokio::test]
    async fn test_receiver_returns_first_callback() {
        let receiver = LoopbackReceiver::bind(0).await.unwrap();
        let url = receiver.redirect_url();
        assert!(url.starts_with("http://127.0.0.1:"));
        assert!(url.ends_with("/callback"));

        let waiting = tokio::spawn(receiver.wait());

        let page = reqwest::get(format!("{}?code=abc&state=s1&scope=email", url))
            .await
            .unwrap();
        assert!(page.status().is_success());
        assert!(page.text().await.unwrap().contains("close this window"));

        let received = waiting.await.unwrap().unwrap();
        assert_eq!(received, params(Some("abc"), Some("s1"), None));
    }
}
