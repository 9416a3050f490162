//! Backend, identity provider and token storage shared through context.

use api::{GoogleIdentity, UserRecordClient};
use dioxus::prelude::*;
use store::{FileStore, TokenSlot};

/// Everything the views talk to, built once at startup.
#[derive(Clone, Debug)]
pub struct Services {
    pub records: UserRecordClient,
    pub identity: GoogleIdentity,
    pub tokens: TokenSlot<FileStore>,
}

impl Services {
    /// Build from `BACKEND_URL`, `GOOGLE_CLIENT_ID` and friends.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            records: UserRecordClient::from_env()?,
            identity: GoogleIdentity::new()?,
            tokens: make_token_slot(),
        })
    }
}

/// The [`Services`] provided at launch.
pub fn use_services() -> Services {
    use_context::<Services>()
}

/// Token slot under the platform data directory.
pub fn make_token_slot() -> TokenSlot<FileStore> {
    let base = dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("profile");
    TokenSlot::new(FileStore::new(base))
}
