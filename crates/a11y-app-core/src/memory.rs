// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-process `ConfigStore` for hosts without durable storage (and for tests).

use crate::config::{ConfigError, ConfigStore};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Key/value blobs held in memory, with an optional total byte quota.
///
/// Single-threaded by construction (interior mutability through `RefCell`),
/// matching the widget's one-event-at-a-time model.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    blobs: RefCell<HashMap<String, Vec<u8>>>,
    quota: Option<usize>,
    offline: Cell<bool>,
}

impl MemoryConfigStore {
    /// Empty store with no quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store that rejects writes pushing the total size past `limit` bytes.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::default()
        }
    }

    /// Store pre-seeded with one blob.
    pub fn seeded(key: &str, data: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.blobs.borrow_mut().insert(key.to_owned(), data.into());
        store
    }

    /// Simulate the channel going away (or coming back). While offline every
    /// read and write fails with `Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    /// Raw copy of the blob under `key`, bypassing the offline switch.
    pub fn peek(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.borrow().get(key).cloned()
    }

    fn used_excluding(&self, key: &str) -> usize {
        self.blobs
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        if self.offline.get() {
            return Err(ConfigError::Unavailable("memory store offline".into()));
        }
        self.blobs
            .borrow()
            .get(key)
            .cloned()
            .ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        if self.offline.get() {
            return Err(ConfigError::Unavailable("memory store offline".into()));
        }
        if let Some(limit) = self.quota {
            let needed = self.used_excluding(key) + key.len() + data.len();
            if needed > limit {
                return Err(ConfigError::QuotaExceeded { needed, limit });
            }
        }
        self.blobs.borrow_mut().insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}
