use serde::{Deserialize, Serialize};

use crate::ids::{new_conversation_id, now_millis};
use crate::message::Message;

/// Title every conversation starts with, until the first user message renames it
pub const DEFAULT_TITLE: &str = "新对话";

const ELLIPSIS: &str = "...";
const PREVIEW_CHARS: usize = 40;

/// A persisted conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Conversation {
    pub fn new() -> Self {
        let now = now_millis();
        Self {
            id: new_conversation_id(),
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_default_title(&self) -> bool {
        self.title == DEFAULT_TITLE
    }

    /// Replace the message sequence, bump `updated_at`, and derive the title
    /// from the first user message if the conversation still has the default one.
    pub fn replace_messages(&mut self, messages: Vec<Message>, title_max_chars: usize) {
        self.messages = messages;
        self.updated_at = now_millis();

        if self.has_default_title() {
            if let Some(first) = self.messages.iter().find(|m| m.is_user()) {
                self.title = derive_title(&first.text, title_max_chars);
            }
        }
    }

    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            updated_at: self.updated_at,
            message_count: self.messages.len(),
            preview: self
                .messages
                .last()
                .map(|m| m.text.chars().take(PREVIEW_CHARS).collect())
                .unwrap_or_default(),
        }
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Leading `max_chars` characters of `text`, with an ellipsis when truncated
pub fn derive_title(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}{}", head, ELLIPSIS)
    } else {
        head
    }
}

/// Summary of a conversation for the history list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    pub updated_at: i64,
    pub message_count: usize,
    pub preview: String,
}
