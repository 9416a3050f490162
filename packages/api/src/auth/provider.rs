//! Identity provider trait and its output.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// What a successful sign-in yields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    /// Bearer credential for backend calls.
    pub token: String,
}

/// External authentication service.
pub trait IdentityProvider {
    /// Run the interactive sign-in flow.
    fn sign_in(&self) -> impl Future<Output = Result<Identity, AuthError>>;

    /// Invalidate the remote session for `token`.
    fn sign_out(&self, token: &str) -> impl Future<Output = Result<(), AuthError>>;
}
