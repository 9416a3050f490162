//! Persistent key-value slots for the profile client.
//!
//! The only slot the app uses is [`TOKEN_KEY`] (`"@token"`), which mirrors the
//! bearer credential of the current session.

pub mod slot;

mod file_store;
mod memory;

pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use slot::{KeyValueStore, TokenSlot, TOKEN_KEY};
