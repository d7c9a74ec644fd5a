use serde::{Deserialize, Serialize};

use crate::error::ChatError;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatConfig {
    pub typing: TypingDelay,
    /// Fixed delay before replying to a card action
    pub card_action_delay_ms: u64,
    /// Characters of the first user message kept in a derived title
    pub title_max_chars: usize,
    pub storage: StorageConfig,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            typing: TypingDelay::default(),
            card_action_delay_ms: 800,
            title_max_chars: 20,
            storage: StorageConfig::default(),
        }
    }
}

impl ChatConfig {
    pub fn validate(&self) -> Result<(), ChatError> {
        if self.typing.min_ms > self.typing.max_ms {
            return Err(ChatError::Config(format!(
                "typing delay min ({}ms) exceeds max ({}ms)",
                self.typing.min_ms, self.typing.max_ms
            )));
        }
        if self.title_max_chars == 0 {
            return Err(ChatError::Config("title_max_chars must be positive".to_string()));
        }
        Ok(())
    }

    /// Parse a JSON override; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ChatError> {
        let config: ChatConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Simulated "AI is typing" latency window, inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypingDelay {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for TypingDelay {
    fn default() -> Self {
        Self {
            min_ms: 500,
            max_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
    /// Prepended to every storage key
    pub key_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendType::Auto,
            key_prefix: String::new(),
        }
    }
}

impl StorageConfig {
    pub fn keys(&self) -> StorageKeys {
        StorageKeys::with_prefix(&self.key_prefix)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageBackendType {
    /// localStorage when available, memory otherwise
    Auto,
    Memory,
    LocalStorage,
}

/// Fully-qualified storage keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub chat_history: String,
    pub current_chat: String,
    pub user: String,
    pub theme: String,
}

impl StorageKeys {
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            chat_history: format!("{}chat-history", prefix),
            current_chat: format!("{}current-chat", prefix),
            user: format!("{}user", prefix),
            theme: format!("{}theme", prefix),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix("")
    }
}
