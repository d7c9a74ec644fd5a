//! Browser adapters for the clipchat-core ports.

pub mod storage;
pub mod timer;
pub mod color_scheme;

pub use color_scheme::MediaQueryColorScheme;
pub use storage::{open_storage, LocalStorage, MemoryStorage};
pub use timer::GlooTimer;

use clipchat_types::ChatError;
use wasm_bindgen::JsValue;

/// Wrap a thrown JS value as a `ChatError::JsInterop`
pub(crate) fn js_error(context: &str, e: JsValue) -> ChatError {
    ChatError::JsInterop(format!("{}: {:?}", context, e))
}
