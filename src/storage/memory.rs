//! In-process store

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{KeyValueStore, StorageError};

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, Vec<u8>>,
    reject_writes: bool,
}

/// Map-backed store. Clones share the same underlying map, which lets a test
/// reopen an engine over data written by a previous one.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set`/`remove` fail until switched back
    pub fn reject_writes(&self, reject: bool) -> Result<(), StorageError> {
        self.inner.lock().map_err(|_| StorageError::Poisoned)?.reject_writes = reject;
        Ok(())
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .map(|inner| inner.entries.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let inner = self.inner.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(inner.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().map_err(|_| StorageError::Poisoned)?;
        if inner.reject_writes {
            return Err(StorageError::WriteRejected(key.to_string()));
        }
        inner.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().map_err(|_| StorageError::Poisoned)?;
        if inner.reject_writes {
            return Err(StorageError::WriteRejected(key.to_string()));
        }
        inner.entries.remove(key);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
