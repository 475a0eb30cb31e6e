// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Authoritative owner of the preference record, written through a `ConfigStore`.

use crate::config::{ConfigError, ConfigService, ConfigStore, DEFAULT_STORAGE_KEY};
use crate::prefs::PreferenceRecord;
use serde_json::Value;
use tracing::{debug, warn};

/// Owns the in-memory preference record and mirrors it into a persistence channel.
///
/// Nothing here fails the caller: unreadable blobs become defaults, failed
/// writes are logged and the in-memory copy stays authoritative for the rest
/// of the session.
pub struct PreferenceStore<S> {
    service: ConfigService<S>,
    key: String,
    record: PreferenceRecord,
    unsynced: bool,
}

impl<S: ConfigStore> PreferenceStore<S> {
    /// Store over `store`, using the default storage key. Starts with the default record.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Store over `store` using a custom storage key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            service: ConfigService::new(store),
            key: key.into(),
            record: PreferenceRecord::default(),
            unsynced: false,
        }
    }

    /// Read the persisted record, merged field by field over defaults.
    ///
    /// While a previous write is still unsynced the channel holds stale data,
    /// so the in-memory record is returned instead.
    pub fn load(&mut self) -> PreferenceRecord {
        if self.unsynced {
            debug!(key = %self.key, "last write failed; serving in-memory preferences");
            return self.record;
        }
        self.record = match self.service.load::<Value>(&self.key) {
            Ok(Some(value)) => PreferenceRecord::merge_json(&value),
            Ok(None) => PreferenceRecord::default(),
            Err(ConfigError::Serde(err)) => {
                debug!(key = %self.key, %err, "stored preferences are malformed; using defaults");
                PreferenceRecord::default()
            }
            Err(err) => {
                warn!(key = %self.key, %err, "could not read preferences; using defaults");
                PreferenceRecord::default()
            }
        };
        self.record
    }

    /// Replace the in-memory record and write it through (best effort).
    pub fn save(&mut self, record: PreferenceRecord) {
        self.record = record;
        match self.service.save(&self.key, &self.record) {
            Ok(()) => self.unsynced = false,
            Err(err) => {
                warn!(key = %self.key, %err, "could not save preferences; keeping them in memory");
                self.unsynced = true;
            }
        }
    }

    /// Apply `f` to a copy of the current record and save the result.
    pub fn update(&mut self, f: impl FnOnce(&mut PreferenceRecord)) -> PreferenceRecord {
        let mut next = self.record;
        f(&mut next);
        self.save(next);
        self.record
    }

    /// Persist and return the all-default record.
    pub fn reset(&mut self) -> PreferenceRecord {
        self.save(PreferenceRecord::default());
        self.record
    }
}

impl<S> PreferenceStore<S> {
    /// Current authoritative record.
    pub fn record(&self) -> &PreferenceRecord {
        &self.record
    }

    /// Whether the last write failed and the channel lags the in-memory record.
    pub fn is_unsynced(&self) -> bool {
        self.unsynced
    }

    /// Storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying channel.
    pub fn channel(&self) -> &S {
        self.service.store()
    }
}
