use std::collections::HashMap;

use parking_lot::RwLock;

/// In-process key/value store standing in for a networked cache backend.
///
/// Starts instantly, holds everything in memory, and is discarded at process
/// exit. It presents the same read/write surface the datastore collaborators
/// expect, so swapping in a real networked cache requires no code changes
/// elsewhere.
#[derive(Debug, Default)]
pub struct EphemeralCache {
    entries: RwLock<HashMap<String, String>>,
}

impl EphemeralCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().insert(key.into(), value.into());
    }

    /// Remove `key`, returning whether it was present.
    pub fn delete(&self, key: &str) -> bool {
        self.entries.write().remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
