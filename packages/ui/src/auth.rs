//! Authentication context, sign-in/out flows and their buttons.

use api::{ApiError, AuthError, IdentityProvider, Session, UserRecordApi};
use dioxus::prelude::*;
use serde_json::json;
use store::{KeyValueStore, TokenSlot};

use crate::services::use_services;

/// Authentication state for the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    /// Message for the login view, e.g. a revoke that failed during sign-out.
    pub notice: Option<String>,
}

/// Get the current authentication state.
/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that holds the authentication state.
/// Starts signed out; a persisted token alone does not restore a session.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let auth_state = use_signal(AuthState::default);
    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// A completed sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct SignInOutcome {
    pub session: Session,
    /// The follow-up `displayName` write; the sign-in stands either way.
    pub profile_write: Result<(), ApiError>,
}

/// Run the provider flow, persist the token and record the display name.
pub async fn sign_in<P, A, S>(
    provider: &P,
    records: &A,
    tokens: &TokenSlot<S>,
) -> Result<SignInOutcome, AuthError>
where
    P: IdentityProvider,
    A: UserRecordApi,
    S: KeyValueStore,
{
    let identity = provider.sign_in().await?;
    tokens.save(&identity.token).await;

    let mut session = Session::from(identity);
    let name = session
        .display_name
        .get_or_insert_with(|| "Anonymous".to_string())
        .clone();
    tracing::info!("Signed in as {}", session.uid);

    let profile_write = match session.credentials() {
        Ok(credentials) => records
            .update_user_data(&credentials, json!({ "displayName": name }))
            .await
            .map(|_| ()),
        Err(e) => Err(e),
    };
    if let Err(e) = &profile_write {
        tracing::error!("Recording display name failed: {}", e);
    }

    Ok(SignInOutcome {
        session,
        profile_write,
    })
}

/// Revoke the session's token and forget it locally.
///
/// The local token is removed whatever the provider answers; its error is
/// returned for display.
pub async fn sign_out<P, S>(
    provider: &P,
    session: Option<&Session>,
    tokens: &TokenSlot<S>,
) -> Result<(), AuthError>
where
    P: IdentityProvider,
    S: KeyValueStore,
{
    let result = match session.and_then(|s| s.token.as_deref()) {
        Some(token) => provider.sign_out(token).await,
        None => Ok(()),
    };
    tokens.clear().await;

    match &result {
        Ok(()) => tracing::info!("Signed out"),
        Err(e) => tracing::error!("Token revocation failed: {}", e),
    }
    result
}

/// Button that runs the Google sign-in flow.
#[component]
pub fn LoginButton(
    on_signed_in: EventHandler<Session>,
    on_error: EventHandler<String>,
    #[props(default = "Login with Google".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let services = use_services();
    let mut auth = use_auth();
    let mut loading = use_signal(|| false);

    let onclick = move |_| {
        let services = services.clone();
        async move {
            loading.set(true);
            auth.write().notice = None;
            match sign_in(&services.identity, &services.records, &services.tokens).await {
                Ok(outcome) => {
                    auth.write().session = Some(outcome.session.clone());
                    match outcome.profile_write {
                        Ok(()) => on_signed_in.call(outcome.session),
                        Err(e) => on_error.call(e.to_string()),
                    }
                }
                Err(e) => {
                    tracing::error!("Sign-in failed: {}", e);
                    on_error.call(e.to_string());
                }
            }
            loading.set(false);
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: loading(),
            onclick: onclick,
            if loading() {
                "Loading..."
            } else {
                "{label}"
            }
        }
    }
}

/// Button to sign out.
#[component]
pub fn LogoutButton(
    on_signed_out: EventHandler<()>,
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let services = use_services();
    let mut auth = use_auth();
    let mut loading = use_signal(|| false);

    let onclick = move |_| {
        let services = services.clone();
        async move {
            loading.set(true);
            let session = auth.peek().session.clone();
            let result = sign_out(&services.identity, session.as_ref(), &services.tokens).await;
            auth.set(AuthState {
                session: None,
                notice: result.err().map(|e| e.to_string()),
            });
            loading.set(false);
            on_signed_out.call(());
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: loading(),
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeProvider, FakeRecords};
    use store::MemoryStore;

    #[tokio::test]
    async fn test_sign_in_persists_token_and_writes_name() {
        let provider = FakeProvider::signing_in_as("u1", Some("Ann"));
        let records = FakeRecords::returning(json!({}));
        let tokens = TokenSlot::new(MemoryStore::new());

        let outcome = sign_in(&provider, &records, &tokens).await.unwrap();

        assert_eq!(outcome.session.uid, "u1");
        assert_eq!(outcome.session.display_name.as_deref(), Some("Ann"));
        assert_eq!(outcome.profile_write, Ok(()));
        assert_eq!(tokens.load().await.as_deref(), Some("token-u1"));

        let updates = records.updates.borrow();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0.user_id(), "u1");
        assert_eq!(updates[0].0.token(), "token-u1");
        assert_eq!(updates[0].1, json!({ "displayName": "Ann" }));
    }

    #[tokio::test]
    async fn test_sign_in_without_name_writes_anonymous() {
        let provider = FakeProvider::signing_in_as("u2", None);
        let records = FakeRecords::returning(json!({}));
        let tokens = TokenSlot::new(MemoryStore::new());

        let outcome = sign_in(&provider, &records, &tokens).await.unwrap();

        assert_eq!(outcome.session.display_name(), "Anonymous");
        assert_eq!(
            records.updates.borrow()[0].1,
            json!({ "displayName": "Anonymous" })
        );
    }

    #[tokio::test]
    async fn test_sign_in_keeps_session_when_write_fails() {
        let provider = FakeProvider::signing_in_as("u1", Some("Ann"));
        let records = FakeRecords::failing(500);
        let tokens = TokenSlot::new(MemoryStore::new());

        let outcome = sign_in(&provider, &records, &tokens).await.unwrap();

        assert_eq!(outcome.session.uid, "u1");
        assert!(matches!(
            outcome.profile_write,
            Err(ApiError::Unauthorized { status: 500, .. })
        ));
        assert_eq!(tokens.load().await.as_deref(), Some("token-u1"));
    }

    #[tokio::test]
    async fn test_cancelled_sign_in_touches_nothing() {
        let mut provider = FakeProvider::signing_in_as("u1", None);
        provider.sign_in_reply = Err(AuthError::Cancelled);
        let records = FakeRecords::returning(json!({}));
        let tokens = TokenSlot::new(MemoryStore::new());

        let err = sign_in(&provider, &records, &tokens).await.unwrap_err();

        assert_eq!(err, AuthError::Cancelled);
        assert_eq!(tokens.load().await, None);
        assert!(records.updates.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_sign_out_revokes_and_clears() {
        let provider = FakeProvider::signing_in_as("u1", None);
        let records = FakeRecords::returning(json!({}));
        let tokens = TokenSlot::new(MemoryStore::new());
        let outcome = sign_in(&provider, &records, &tokens).await.unwrap();

        sign_out(&provider, Some(&outcome.session), &tokens)
            .await
            .unwrap();

        assert_eq!(*provider.revoked.borrow(), vec!["token-u1".to_string()]);
        assert_eq!(tokens.load().await, None);
    }

    #[tokio::test]
    async fn test_sign_out_clears_token_even_when_revoke_fails() {
        let mut provider = FakeProvider::signing_in_as("u1", None);
        provider.sign_out_reply = Err(AuthError::Provider("revoked already".to_string()));
        let tokens = TokenSlot::new(MemoryStore::new());
        tokens.save("token-u1").await;
        let session = Session {
            uid: "u1".to_string(),
            display_name: None,
            email: None,
            token: Some("token-u1".to_string()),
        };

        let err = sign_out(&provider, Some(&session), &tokens)
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::Provider("revoked already".to_string()));
        assert_eq!(tokens.load().await, None);
    }

    #[tokio::test]
    async fn test_sign_out_without_session_only_clears() {
        let provider = FakeProvider::signing_in_as("u1", None);
        let tokens = TokenSlot::new(MemoryStore::new());
        tokens.save("stale").await;

        sign_out(&provider, None, &tokens).await.unwrap();

        assert!(provider.revoked.borrow().is_empty());
        assert_eq!(tokens.load().await, None);
    }
}
