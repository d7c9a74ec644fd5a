//! Pick the storage backend named by the config.
//!
//! Priority for `Auto`: localStorage → Memory (fallback)

use std::rc::Rc;
use clipchat_core::ports::StoragePort;
use clipchat_types::config::StorageBackendType;
use super::{LocalStorage, MemoryStorage};

/// Open the requested backend. Never fails: an unavailable localStorage
/// degrades to memory so the session keeps working for this page load.
pub fn open_storage(backend: StorageBackendType) -> Rc<dyn StoragePort> {
    match backend {
        StorageBackendType::Memory => {
            log::info!("Storage backend: memory");
            Rc::new(MemoryStorage::new())
        }
        StorageBackendType::Auto | StorageBackendType::LocalStorage => match LocalStorage::open() {
            Ok(local) => {
                log::info!("Storage backend: localStorage");
                Rc::new(local)
            }
            Err(e) => {
                log::warn!("localStorage unavailable ({}), falling back to memory", e);
                Rc::new(MemoryStorage::new())
            }
        },
    }
}
