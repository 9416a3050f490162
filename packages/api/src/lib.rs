//! # API crate: backend and identity plumbing for the profile client
//!
//! Everything that talks to the outside world lives here, so the `ui` crate only
//! deals with state and rendering.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Identity provider adapter: Google OAuth 2.0 with PKCE over a loopback redirect, token revocation |
//! | [`client`] | User record client: `fetch_user_data` / `update_user_data` against the backend REST API |
//! | [`config`] | Backend configuration read from the environment (`BACKEND_URL`) |
//! | [`error`] | Error taxonomy shared by the client and the identity adapter |
//! | [`models`] | Session, credentials, user record, field schema and edit buffer |
//!
//! ## Backend endpoints
//!
//! - `GET {BACKEND_URL}/api/fetch-user-data/{userId}`
//! - `PUT {BACKEND_URL}/api/update-user-data` with body `{"userId": .., "data": ..}`
//!
//! Both carry `Authorization: Bearer {token}`. Any non-2xx answer is reported as
//! [`ApiError::Unauthorized`], with the status and body kept for diagnostics.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use auth::{GoogleIdentity, Identity, IdentityProvider};
pub use client::{UserRecordApi, UserRecordClient};
pub use config::{parse_field_schema, BackendConfig};
pub use error::{ApiError, AuthError};
pub use models::{
    parse_date, Credentials, EditBuffer, FieldKind, FieldSchema, FieldSpec, Session, UserRecord,
    GENDER_OPTIONS,
};
