//! In-process storage, mostly for tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::KeyValueStore;
use crate::error::{TaskDirError, TaskDirResult};

/// Keeps values in memory. Writes to keys marked with [`fail_writes`]
/// return a write error, which lets callers exercise their failure paths.
///
/// [`fail_writes`]: MemoryStore::fail_writes
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    failing: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value bypassing serialization (e.g. corrupt data).
    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    /// Make every subsequent write to `key` fail.
    pub fn fail_writes(&self, key: &str) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(key.to_string());
        }
    }

    pub fn restore_writes(&self, key: &str) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.remove(key);
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> TaskDirResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| TaskDirError::storage_read(key, e))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> TaskDirResult<()> {
        let failing = self
            .failing
            .lock()
            .map_err(|e| TaskDirError::storage_write(key, e))?
            .contains(key);
        if failing {
            return Err(TaskDirError::storage_write(key, "storage quota exceeded"));
        }

        let mut values = self
            .values
            .lock()
            .map_err(|e| TaskDirError::storage_write(key, e))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
