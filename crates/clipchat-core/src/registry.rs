//! Conversation registry: every conversation, most recent first, plus the
//! id of the active one.
//!
//! The list is persisted under `chat-history` and the active id under
//! `current-chat`. Both writes are best-effort (see `persist`).

use std::rc::Rc;

use clipchat_types::config::StorageKeys;
use clipchat_types::conversation::{Conversation, ConversationSummary};
use clipchat_types::message::Message;

use crate::persist::{load_json, save_json};
use crate::ports::StoragePort;
use crate::templates::Template;

/// What `init` ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// The previously active conversation was restored
    Resumed(String),
    /// A new conversation was created and seeded with the welcome message
    Created(String),
}

/// Result of deleting the active conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reassigned {
    /// The deleted conversation was not active; nothing else changed
    Unchanged,
    /// The first remaining conversation became active
    Loaded(String),
    /// The registry was empty, so a fresh conversation was created
    Created(String),
}

pub struct ConversationRegistry {
    conversations: Vec<Conversation>,
    active_id: String,
    storage: Rc<dyn StoragePort>,
    keys: StorageKeys,
    title_max_chars: usize,
}

impl ConversationRegistry {
    pub fn new(storage: Rc<dyn StoragePort>, keys: StorageKeys, title_max_chars: usize) -> Self {
        Self {
            conversations: Vec::new(),
            active_id: String::new(),
            storage,
            keys,
            title_max_chars,
        }
    }

    /// Load persisted state, then resume the saved active conversation or
    /// start a new one with the welcome message.
    pub fn init(&mut self) -> InitOutcome {
        self.conversations = load_json(self.storage.as_ref(), &self.keys.chat_history)
            .unwrap_or_default();
        log::info!(
            "Loaded {} conversation(s) from {}",
            self.conversations.len(),
            self.storage.backend_name()
        );

        let saved: Option<String> = load_json(self.storage.as_ref(), &self.keys.current_chat);
        if let Some(id) = saved {
            if self.load_chat(&id).is_some() {
                return InitOutcome::Resumed(id);
            }
            log::warn!("Saved conversation {} no longer exists", id);
        }

        let id = self.create_new_chat().id.clone();
        self.sync_active(&[Template::Welcome.message()]);
        InitOutcome::Created(id)
    }

    /// Prepend an empty conversation and make it active
    pub fn create_new_chat(&mut self) -> &Conversation {
        let conversation = Conversation::new();
        self.active_id = conversation.id.clone();
        self.conversations.insert(0, conversation);

        self.persist_active_id();
        self.persist();
        &self.conversations[0]
    }

    /// Make `id` active. Returns None (and changes nothing) if it is unknown.
    pub fn load_chat(&mut self, id: &str) -> Option<&Conversation> {
        let index = self.index_of(id)?;
        self.active_id = id.to_string();
        self.persist_active_id();
        Some(&self.conversations[index])
    }

    /// Remove `id`. Returns None if it is unknown.
    pub fn delete_chat_history(&mut self, id: &str) -> Option<Reassigned> {
        let index = self.index_of(id)?;
        self.conversations.remove(index);
        self.persist();

        if id != self.active_id {
            return Some(Reassigned::Unchanged);
        }

        match self.conversations.first().map(|c| c.id.clone()) {
            Some(first) => {
                self.load_chat(&first);
                Some(Reassigned::Loaded(first))
            }
            None => {
                let created = self.create_new_chat().id.clone();
                Some(Reassigned::Created(created))
            }
        }
    }

    /// Copy the message store into the active conversation and persist.
    /// Returns the new title when this sync renamed the conversation.
    pub fn sync_active(&mut self, messages: &[Message]) -> Option<String> {
        let title_max_chars = self.title_max_chars;
        let index = self.index_of(&self.active_id)?;
        let conversation = &mut self.conversations[index];

        let had_default = conversation.has_default_title();
        conversation.replace_messages(messages.to_vec(), title_max_chars);
        let renamed = had_default && !conversation.has_default_title();
        let title = conversation.title.clone();

        self.persist();
        renamed.then_some(title)
    }

    /// Append to a conversation other than the active one (a reply that
    /// arrived after the user switched away). Returns false if it is gone.
    pub fn append_to(&mut self, id: &str, message: Message) -> bool {
        let title_max_chars = self.title_max_chars;
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let conversation = &mut self.conversations[index];
        let mut messages = std::mem::take(&mut conversation.messages);
        messages.push(message);
        conversation.replace_messages(messages, title_max_chars);
        self.persist();
        true
    }

    /// Write the whole registry. Failures are logged, never propagated.
    pub fn persist(&self) -> bool {
        save_json(self.storage.as_ref(), &self.keys.chat_history, &self.conversations)
    }

    fn persist_active_id(&self) {
        save_json(self.storage.as_ref(), &self.keys.current_chat, &self.active_id);
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.conversations.iter().position(|c| c.id == id)
    }

    // ─── Accessors ───────────────────────────────────────

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.get(&self.active_id)
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn summaries(&self) -> Vec<ConversationSummary> {
        self.conversations.iter().map(Conversation::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}
