use serde::{Deserialize, Serialize};

use crate::card::CardPayload;
use crate::ids::{new_message_id, now_millis};

/// Who sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
    System,
}

/// Delivery status of a message.
/// The only allowed transitions are Pending → Success and Pending → Error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[serde(alias = "sending")]
    Pending,
    Success,
    Error,
}

/// Visual weight of an action button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonKind {
    Primary,
    Default,
    Danger,
    Link,
}

/// A quick-reply button attached to an AI message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionButton {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ButtonKind,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub disabled: bool,
}

impl ActionButton {
    pub fn new(label: impl Into<String>, kind: ButtonKind, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind,
            action: action.into(),
            icon: None,
            disabled: false,
        }
    }

    pub fn primary(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self::new(label, ButtonKind::Primary, action)
    }

    pub fn default_kind(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self::new(label, ButtonKind::Default, action)
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
    pub status: MessageStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub card: Option<CardPayload>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub actions: Vec<ActionButton>,
}

impl Message {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: new_message_id(),
            sender,
            text: text.into(),
            created_at: now_millis(),
            status: MessageStatus::Success,
            card: None,
            actions: Vec::new(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(Sender::Ai, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Sender::System, text)
    }

    pub fn with_card(mut self, card: CardPayload) -> Self {
        self.card = Some(card);
        self
    }

    pub fn with_actions(mut self, actions: Vec<ActionButton>) -> Self {
        self.actions = actions;
        self
    }

    pub fn pending(mut self) -> Self {
        self.status = MessageStatus::Pending;
        self
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    /// Move a pending message to a final status.
    /// Returns false (and leaves the message untouched) for any other transition.
    pub fn settle(&mut self, status: MessageStatus) -> bool {
        if self.status != MessageStatus::Pending || status == MessageStatus::Pending {
            return false;
        }
        self.status = status;
        true
    }
}
