// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persistence port for the overlay: raw blob storage plus a JSON service on top.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Storage key the widget uses for its preference blob.
pub const DEFAULT_STORAGE_KEY: &str = "adaAccessibilitySettings";

/// Storage port for raw config blobs (keyed by logical name).
///
/// Implementations must not block on anything slower than local storage; the
/// widget calls `save_raw` from inside its event handlers.
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist a raw config blob, replacing whatever was stored under `key`.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for &S {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        (**self).load_raw(key)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        (**self).save_raw(key, data)
    }
}

impl<S: ConfigStore + ?Sized> ConfigStore for Box<S> {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        (**self).load_raw(key)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        (**self).save_raw(key, data)
    }
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The backing channel is not reachable (storage disabled, sandboxed frame, ...).
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The write would exceed the channel's capacity.
    #[error("quota exceeded: {needed} bytes needed, limit {limit}")]
    QuotaExceeded {
        /// Bytes the rejected write required.
        needed: usize,
        /// Capacity of the channel in bytes.
        limit: usize,
    },
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Thin service that serializes config values and delegates storage to a `ConfigStore`.
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the inner store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Load and deserialize a config value for `key`. Returns `Ok(None)` if missing.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.store.load_raw(key) {
            Ok(bytes) => {
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    return Ok(None);
                }
                let value = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Serialize and persist a config value for `key`.
    ///
    /// Uses compact JSON: browser storage quotas count characters.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec(value)?;
        self.store.save_raw(key, &data)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::memory::MemoryConfigStore;

    #[test]
    fn missing_and_blank_blobs_load_as_none() {
        let svc = ConfigService::new(MemoryConfigStore::new());
        assert!(svc.load::<serde_json::Value>("absent").unwrap().is_none());

        svc.store().save_raw("blank", b"  \n").unwrap();
        assert!(svc.load::<serde_json::Value>("blank").unwrap().is_none());
    }

    #[test]
    fn malformed_blob_is_a_serde_error() {
        let svc = ConfigService::new(MemoryConfigStore::new());
        svc.store().save_raw("k", b"{not json").unwrap();
        let err = svc.load::<serde_json::Value>("k").unwrap_err();
        assert!(matches!(err, ConfigError::Serde(_)));
    }

    #[test]
    fn save_writes_compact_json() {
        let svc = ConfigService::new(MemoryConfigStore::new());
        svc.save("k", &serde_json::json!({ "a": 1 })).unwrap();
        assert_eq!(svc.store().load_raw("k").unwrap(), br#"{"a":1}"#);
    }
}
