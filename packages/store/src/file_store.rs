//! # Filesystem-backed key-value store
//!
//! [`FileStore`] keeps every slot in one TOML file so the token survives app
//! restarts on desktop.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── storage.toml
//! ```
//!
//! ```toml
//! [slots]
//! "@token" = "ya29...."
//! ```
//!
//! ## Platform data directories
//!
//! Use [`dirs::data_dir()`] to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/profile/` |
//! | Linux | `~/.local/share/profile/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\profile\` |
//!
//! A missing or unparsable file reads as empty. Write failures are logged and
//! otherwise ignored.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::slot::KeyValueStore;

const FILE_NAME: &str = "storage.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SlotFile {
    #[serde(default)]
    slots: BTreeMap<String, String>,
}

/// Filesystem-backed KeyValueStore for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn path(&self) -> PathBuf {
        self.base.join(FILE_NAME)
    }

    fn read(&self) -> SlotFile {
        let Ok(content) = std::fs::read_to_string(self.path()) else {
            return SlotFile::default();
        };
        toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable {}: {}", FILE_NAME, e);
            SlotFile::default()
        })
    }

    fn write(&self, file: &SlotFile) {
        let content = match toml::to_string_pretty(file) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Failed to serialize slots: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            tracing::warn!("Failed to create {}: {}", self.base.display(), e);
            return;
        }
        if let Err(e) = std::fs::write(self.path(), content) {
            tracing::warn!("Failed to write {}: {}", FILE_NAME, e);
        }
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.read().slots.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) {
        let mut file = self.read();
        file.slots.insert(key.to_string(), value.to_string());
        self.write(&file);
    }

    async fn remove(&self, key: &str) {
        let mut file = self.read();
        if file.slots.remove(key).is_some() {
            self.write(&file);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::{TokenSlot, TOKEN_KEY};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "profile_store_test_{}_{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = temp_dir("roundtrip");

        let slot = TokenSlot::new(FileStore::new(dir.clone()));
        slot.save("token-1").await;

        // Re-open from same directory
        let store2 = FileStore::new(dir.clone());
        assert_eq!(store2.get(TOKEN_KEY).await.as_deref(), Some("token-1"));

        let raw = std::fs::read_to_string(dir.join(FILE_NAME)).unwrap();
        assert!(raw.contains("\"@token\""));

        TokenSlot::new(store2).clear().await;
        assert_eq!(FileStore::new(dir.clone()).get(TOKEN_KEY).await, None);

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_empty() {
        let dir = temp_dir("corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(FILE_NAME), "this is [not toml").unwrap();

        let store = FileStore::new(dir.clone());
        assert_eq!(store.get(TOKEN_KEY).await, None);

        // Writing replaces the corrupt file
        store.set(TOKEN_KEY, "fresh").await;
        assert_eq!(store.get(TOKEN_KEY).await.as_deref(), Some("fresh"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_missing_directory_reads_as_empty() {
        let dir = temp_dir("missing");
        let store = FileStore::new(dir.join("nested"));
        assert_eq!(store.get("anything").await, None);
        store.remove("anything").await;
        assert!(!dir.join("nested").exists());
    }
}
