use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::preference::Theme;

/// Events emitted by the session controller and preference stores.
/// The renderer drains these for reactive updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ChatEvent {
    /// A message was appended to the active conversation
    MessageAppended { conversation_id: String, message: Message },

    /// A single message was removed
    MessageDeleted { conversation_id: String, message_id: String },

    /// Messages from `from_index` onwards were dropped (resend)
    MessagesTruncated { conversation_id: String, from_index: usize },

    /// The active conversation was emptied
    MessagesCleared { conversation_id: String },

    /// The mock AI started "typing"
    TypingStarted,

    /// The mock AI finished "typing"
    TypingStopped,

    /// A conversation became active (created, resumed, or reassigned after delete)
    ConversationActivated { conversation_id: String },

    /// A conversation was removed from the registry
    ConversationDeleted { conversation_id: String },

    /// The title of a conversation changed
    TitleChanged { conversation_id: String, title: String },

    ThemeChanged { theme: Theme },

    /// The signed-in user changed (None after logout)
    UserChanged { username: Option<String> },
}
