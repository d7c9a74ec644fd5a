//! Best-effort JSON persistence on top of `StoragePort`.
//!
//! Storage is never fatal to the in-memory session: read failures and
//! malformed values come back as `None`, write failures are logged and dropped.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::ports::StoragePort;

/// Read and parse `key`. Missing, unreadable, or malformed values yield `None`.
pub fn load_json<T: DeserializeOwned>(storage: &dyn StoragePort, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::error!("Failed to read \"{}\" from {}: {}", key, storage.backend_name(), e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed value under \"{}\": {}", key, e);
            None
        }
    }
}

/// Serialize and write `value` under `key`. Returns whether the write landed.
pub fn save_json<T: Serialize + ?Sized>(storage: &dyn StoragePort, key: &str, value: &T) -> bool {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to serialize \"{}\": {}", key, e);
            return false;
        }
    };

    match storage.set(key, &json) {
        Ok(()) => true,
        Err(e) => {
            log::error!("Failed to write \"{}\" to {}: {}", key, storage.backend_name(), e);
            false
        }
    }
}

/// Remove `key`, logging failures.
pub fn remove_key(storage: &dyn StoragePort, key: &str) -> bool {
    match storage.remove(key) {
        Ok(()) => true,
        Err(e) => {
            log::error!("Failed to remove \"{}\" from {}: {}", key, storage.backend_name(), e);
            false
        }
    }
}
