//! Data models shared by the client, the identity adapter and the UI.

mod profile;
mod record;
mod user;

pub use profile::{parse_date, EditBuffer, GENDER_OPTIONS};
pub use record::{FieldKind, FieldSchema, FieldSpec, UserRecord};
pub use user::{Credentials, Session};
