//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `clipchat-core` (pure Rust).
//! Implementations live in `clipchat-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use clipchat_types::Result;

// ─── Storage Port ────────────────────────────────────────────

/// String-valued key-value storage. Browser `localStorage` is synchronous,
/// so this port is too.
pub trait StoragePort {
    /// Get a value by key
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value
    fn remove(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Timer Port ──────────────────────────────────────────────

#[async_trait(?Send)]
pub trait TimerPort {
    /// Resolve after `ms` milliseconds without blocking the event loop
    async fn sleep(&self, ms: u64);
}

// ─── Color Scheme Port ───────────────────────────────────────

pub trait ColorSchemePort {
    /// Whether the host environment asks for a dark colour scheme
    fn prefers_dark(&self) -> bool;
}
