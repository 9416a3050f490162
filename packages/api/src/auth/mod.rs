//! Identity provider adapter.
//!
//! [`IdentityProvider`] is the seam; [`GoogleIdentity`] is the production
//! implementation (OAuth 2.0 authorization code + PKCE, redirected to a
//! [`LoopbackReceiver`] on `127.0.0.1`).

mod callback;
mod config;
mod google;
mod provider;

pub use callback::{CallbackParams, LoopbackReceiver};
pub use config::OAuthConfig;
pub use google::GoogleIdentity;
pub use provider::{Identity, IdentityProvider};
