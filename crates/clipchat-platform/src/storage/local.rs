//! `window.localStorage` backend.
//! Persistent across page reloads; synchronous, string-valued, and
//! subject to the browser's per-origin quota.

use clipchat_core::ports::StoragePort;
use clipchat_types::{ChatError, Result};

use crate::js_error;

const PROBE_KEY: &str = "__clipchat_probe__";

pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open `localStorage` and check that it accepts writes.
    /// Private browsing modes can expose a store that throws on `setItem`.
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| ChatError::Storage("No window object".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| js_error("localStorage", e))?
            .ok_or_else(|| ChatError::Storage("localStorage not available".to_string()))?;

        storage
            .set_item(PROBE_KEY, "1")
            .map_err(|e| js_error("localStorage probe", e))?;
        let _ = storage.remove_item(PROBE_KEY);

        Ok(Self { storage })
    }
}

impl StoragePort for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| js_error("getItem", e))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        // QuotaExceededError surfaces here
        self.storage
            .set_item(key, value)
            .map_err(|e| ChatError::Storage(format!("setItem \"{}\" failed: {:?}", key, e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| js_error("removeItem", e))
    }

    fn backend_name(&self) -> &str {
        "localstorage"
    }
}
