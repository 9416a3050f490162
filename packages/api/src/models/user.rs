//! # Session and credentials for the signed-in user
//!
//! ## [`Session`]
//!
//! The client-side view of whoever is signed in: the provider's user id, the
//! optional display name and email, and the bearer token. It is created from an
//! [`Identity`](crate::auth::Identity) after a successful sign-in and dropped on
//! sign-out. It is always handed to code explicitly; nothing reads it from a
//! global.
//!
//! ## [`Credentials`]
//!
//! The validated pair every backend call needs. Building one fails fast with
//! [`ApiError::InvalidArgument`] when the token or the user id is missing or
//! empty, so no request is ever sent with `Bearer ` and no token, or with an
//! empty path segment.

use serde::{Deserialize, Serialize};

use crate::auth::Identity;
use crate::error::ApiError;

/// The currently authenticated identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub token: Option<String>,
}

impl Session {
    /// Validated credentials for backend calls.
    pub fn credentials(&self) -> Result<Credentials, ApiError> {
        Credentials::new(self.token.as_deref(), Some(&self.uid))
    }

    /// Display name, falling back to email, then to `"Anonymous"`.
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("Anonymous")
    }
}

impl From<Identity> for Session {
    fn from(identity: Identity) -> Self {
        Self {
            uid: identity.uid,
            display_name: identity.display_name,
            email: identity.email,
            token: Some(identity.token),
        }
    }
}

/// Bearer token plus the user id it acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    user_id: String,
}

impl Credentials {
    pub fn new(token: Option<&str>, user_id: Option<&str>) -> Result<Self, ApiError> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or(ApiError::InvalidArgument("missing bearer credential"))?;
        let user_id = user_id
            .filter(|u| !u.trim().is_empty())
            .ok_or(ApiError::InvalidArgument("missing user id"))?;
        // Sent as a path segment as-is, so it is never rewritten.
        if user_id.trim() != user_id {
            return Err(ApiError::InvalidArgument("malformed user id"));
        }

        Ok(Self {
            token: token.to_string(),
            user_id: user_id.to_string(),
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}
