//! Message store: the ordered messages of the active conversation.
//!
//! Append-only except for the explicit delete, truncate (resend), and clear
//! operations. Persistence is the registry's job; the store is plain memory.

use clipchat_types::message::Message;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn to_vec(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.messages.iter().position(|m| m.id == id)
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Remove the message with `id`. Returns it, or None if absent.
    pub fn remove(&mut self, id: &str) -> Option<Message> {
        let index = self.position(id)?;
        Some(self.messages.remove(index))
    }

    /// Drop the message at `index` and everything after it
    pub fn truncate_from(&mut self, index: usize) {
        self.messages.truncate(index);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Swap in another conversation's messages
    pub fn replace(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }
}
