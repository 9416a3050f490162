use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::slot::KeyValueStore;

/// In-memory KeyValueStore for testing.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.slots.lock().unwrap().get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) {
        self.slots
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    async fn remove(&self, key: &str) {
        self.slots.lock().unwrap().remove(key);
    }
}
