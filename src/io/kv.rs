use std::collections::HashMap;

/// Error type for store writes
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write store: {0}")]
    WriteError(#[from] std::io::Error),
    #[error("store is full")]
    Full,
}

/// A synchronous string-keyed key-value store.
///
/// Values are opaque strings (serialized JSON for collections, bare strings
/// for scalar slots). Reads are infallible by contract: a missing key and an
/// unreadable backend both surface as `None`.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    /// When set, every write fails; used to exercise degraded-storage paths.
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Make all subsequent writes fail with `StoreError::Full`.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Full);
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Full);
        }
        self.entries.remove(key);
        Ok(())
    }
}
