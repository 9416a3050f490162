//! Error types for the backend client and the identity provider.

use thiserror::Error;

/// Failure of a call to the user record backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status. Every non-2xx status
    /// lands here; `status` and `body` are kept but callers only show the message.
    #[error("Unauthorized")]
    Unauthorized { status: u16, body: String },

    /// A request could not be built from the given inputs.
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("Request failed: {0}")]
    Transport(String),

    /// A 2xx response whose body was not the expected JSON.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of an [`ApiError::Unauthorized`] response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Failure of the interactive sign-in or of sign-out.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// The provider reported an error, including the user declining consent.
    #[error("{0}")]
    Provider(String),

    /// The user never completed the flow.
    #[error("Sign-in was cancelled")]
    Cancelled,

    /// The redirect carried a `state` we did not issue.
    #[error("Invalid OAuth state")]
    StateMismatch,

    /// The redirect carried neither a code nor an error.
    #[error("Missing authorization code")]
    MissingCode,

    /// Missing or malformed provider configuration.
    #[error("{0}")]
    Config(String),

    /// Network failure while talking to the provider.
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::Transport(e.to_string())
    }
}
