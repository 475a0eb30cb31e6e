// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `localStorage`-backed persistence channel.

use a11y_app_core::config::{ConfigError, ConfigStore};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, Storage};

/// Config store over the window's `localStorage`.
///
/// Storage can be missing (sandboxed frames, privacy modes); every operation
/// then fails with [`ConfigError::Unavailable`] and the widget keeps working
/// on in-memory state.
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    /// Bind to `window.localStorage`, if the page exposes one.
    pub fn from_window() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            tracing::warn!("localStorage unavailable; preferences will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, ConfigError> {
        self.storage
            .as_ref()
            .ok_or_else(|| ConfigError::Unavailable("localStorage".into()))
    }
}

impl ConfigStore for LocalStorageStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        match self.storage()?.get_item(key) {
            Ok(Some(text)) => Ok(text.into_bytes()),
            Ok(None) => Err(ConfigError::NotFound),
            Err(err) => Err(ConfigError::Unavailable(describe(&err))),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let text = std::str::from_utf8(data).map_err(|e| ConfigError::Other(e.to_string()))?;
        self.storage()?
            .set_item(key, text)
            .map_err(|err| ConfigError::Other(describe(&err)))
    }
}

fn describe(err: &JsValue) -> String {
    if let Some(e) = err.dyn_ref::<DomException>() {
        return format!("{}: {}", e.name(), e.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
