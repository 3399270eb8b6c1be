// SPDX-License-Identifier: MPL-2.0
//! In-process store, with injectable failures for exercising fallback paths.

use super::KeyValueStore;
use crate::error::StorageError;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    failing_reads: HashSet<String>,
    failing_writes: HashSet<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value, bypassing failure injection.
    #[must_use]
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Makes every read of `key` fail.
    pub fn fail_reads_of(&mut self, key: &str) {
        self.failing_reads.insert(key.to_string());
    }

    /// Makes every write of `key` fail.
    pub fn fail_writes_of(&mut self, key: &str) {
        self.failing_writes.insert(key.to_string());
    }

    /// Clears all injected failures.
    pub fn heal(&mut self) {
        self.failing_reads.clear();
        self.failing_writes.clear();
    }

    /// Raw stored value, bypassing failure injection.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.failing_reads.contains(key) {
            return Err(StorageError::Read {
                key: key.to_string(),
                message: "injected read failure".to_string(),
            });
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing_writes.contains(key) {
            return Err(StorageError::Write {
                key: key.to_string(),
                message: "injected write failure".to_string(),
            });
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
