//! Session controller: the send → "typing" → reply loop.
//!
//! 1. Append the user's message to the active conversation and persist
//! 2. Flag the mock AI as typing and wait a randomized delay
//! 3. Ask the response matcher for a reply
//! 4. Append the reply, persist, clear the typing flag
//!
//! Sends, resends, and card actions are serialized through an async mutex, so
//! a second send issued while one is waiting on its delay queues behind it
//! and replies always follow the order of the calls.
//!
//! State lives in a `RefCell` that is never borrowed across an `.await`.

use std::cell::RefCell;
use std::rc::Rc;

use futures::lock::Mutex;
use rand::Rng;

use clipchat_types::{
    action::CardAction,
    config::ChatConfig,
    conversation::{Conversation, ConversationSummary},
    event::ChatEvent,
    message::Message,
};

use crate::event_bus::EventBus;
use crate::ports::{StoragePort, TimerPort};
use crate::registry::{ConversationRegistry, InitOutcome, Reassigned};
use crate::responder;
use crate::store::MessageStore;
use crate::templates::{action_description, action_reply};

struct ChatState {
    registry: ConversationRegistry,
    store: MessageStore,
    typing: bool,
}

pub struct ChatSession {
    state: RefCell<ChatState>,
    timer: Rc<dyn TimerPort>,
    event_bus: EventBus,
    config: ChatConfig,
    queue: Mutex<()>,
}

impl ChatSession {
    pub fn new(
        config: ChatConfig,
        storage: Rc<dyn StoragePort>,
        timer: Rc<dyn TimerPort>,
        event_bus: EventBus,
    ) -> Self {
        let registry =
            ConversationRegistry::new(storage, config.storage.keys(), config.title_max_chars);
        Self {
            state: RefCell::new(ChatState {
                registry,
                store: MessageStore::new(),
                typing: false,
            }),
            timer,
            event_bus,
            config,
            queue: Mutex::new(()),
        }
    }

    /// Restore the saved conversation, or start a new one with a welcome message
    pub fn init(&self) -> InitOutcome {
        let (outcome, active_id) = {
            let mut state = self.state.borrow_mut();
            let outcome = state.registry.init();
            let messages = state.registry.active().map(|c| c.messages.clone()).unwrap_or_default();
            state.store.replace(messages);
            (outcome, state.registry.active_id().to_string())
        };
        log::info!("Session initialised: {:?}", outcome);
        self.event_bus.emit(ChatEvent::ConversationActivated {
            conversation_id: active_id,
        });
        outcome
    }

    // ─── Conversation management ─────────────────────────

    pub fn create_new_chat(&self) -> String {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.registry.create_new_chat().id.clone();
            state.store.clear();
            id
        };
        self.event_bus.emit(ChatEvent::ConversationActivated {
            conversation_id: id.clone(),
        });
        id
    }

    /// Switch to `id`. Unknown ids leave the active conversation unchanged.
    pub fn load_chat(&self, id: &str) -> bool {
        let loaded = {
            let mut state = self.state.borrow_mut();
            let messages = state.registry.load_chat(id).map(|c| c.messages.clone());
            match messages {
                Some(messages) => {
                    state.store.replace(messages);
                    true
                }
                None => false,
            }
        };
        if loaded {
            self.event_bus.emit(ChatEvent::ConversationActivated {
                conversation_id: id.to_string(),
            });
        } else {
            log::debug!("load_chat: unknown conversation {}", id);
        }
        loaded
    }

    /// Delete `id`; if it was active, activate the next one (or a new one).
    pub fn delete_chat_history(&self, id: &str) -> bool {
        let reassigned = {
            let mut state = self.state.borrow_mut();
            let reassigned = state.registry.delete_chat_history(id);
            if matches!(reassigned, Some(Reassigned::Loaded(_) | Reassigned::Created(_))) {
                let messages =
                    state.registry.active().map(|c| c.messages.clone()).unwrap_or_default();
                state.store.replace(messages);
            }
            reassigned
        };

        let Some(reassigned) = reassigned else {
            log::debug!("delete_chat_history: unknown conversation {}", id);
            return false;
        };
        self.event_bus.emit(ChatEvent::ConversationDeleted {
            conversation_id: id.to_string(),
        });
        match reassigned {
            Reassigned::Loaded(next) | Reassigned::Created(next) => {
                self.event_bus.emit(ChatEvent::ConversationActivated {
                    conversation_id: next,
                });
            }
            Reassigned::Unchanged => {}
        }
        true
    }

    // ─── Messaging ───────────────────────────────────────

    /// Send `text` and wait for the mock reply. Blank input is ignored.
    pub async fn send_message(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let _turn = self.queue.lock().await;
        self.send_unlocked(text).await;
    }

    /// Drop the user message `id` and everything after it, then send its text again.
    pub async fn resend_message(&self, id: &str) {
        let _turn = self.queue.lock().await;

        let text = {
            let mut state = self.state.borrow_mut();
            let Some(index) = state.store.position(id) else {
                return;
            };
            let message = &state.store.messages()[index];
            if !message.is_user() {
                return;
            }
            let text = message.text.clone();
            state.store.truncate_from(index);
            let messages = state.store.to_vec();
            state.registry.sync_active(&messages);
            self.event_bus.emit(ChatEvent::MessagesTruncated {
                conversation_id: state.registry.active_id().to_string(),
                from_index: index,
            });
            text
        };

        self.send_unlocked(&text).await;
    }

    /// Remove one message. Unknown ids are ignored.
    pub fn delete_message(&self, id: &str) -> bool {
        let mut state = self.state.borrow_mut();
        if state.store.remove(id).is_none() {
            return false;
        }
        let messages = state.store.to_vec();
        state.registry.sync_active(&messages);
        self.event_bus.emit(ChatEvent::MessageDeleted {
            conversation_id: state.registry.active_id().to_string(),
            message_id: id.to_string(),
        });
        true
    }

    /// Empty the active conversation
    pub fn clear_messages(&self) {
        let mut state = self.state.borrow_mut();
        state.store.clear();
        state.registry.sync_active(&[]);
        self.event_bus.emit(ChatEvent::MessagesCleared {
            conversation_id: state.registry.active_id().to_string(),
        });
    }

    /// Record what the user did with a card, then reply after a fixed delay
    pub async fn handle_card_action(&self, message_id: &str, action: CardAction) {
        let _turn = self.queue.lock().await;
        log::debug!("Card action {} on message {}", action.kind(), message_id);

        let conversation_id = self.active_id();
        self.append_to(&conversation_id, Message::system(action_description(&action)));

        self.set_typing(true);
        self.timer.sleep(self.config.card_action_delay_ms).await;
        self.append_to(&conversation_id, Message::ai(action_reply(&action)));
        self.set_typing(false);
    }

    async fn send_unlocked(&self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }

        let conversation_id = self.active_id();
        self.append_to(&conversation_id, Message::user(trimmed));

        self.set_typing(true);
        self.timer.sleep(self.typing_delay_ms()).await;
        self.append_to(&conversation_id, responder::respond(text));
        self.set_typing(false);
    }

    fn typing_delay_ms(&self) -> u64 {
        let window = self.config.typing;
        if window.min_ms >= window.max_ms {
            return window.min_ms;
        }
        rand::thread_rng().gen_range(window.min_ms..=window.max_ms)
    }

    /// Append to `conversation_id`. If the user switched conversations while
    /// the reply was pending, the reply still lands where the send started.
    fn append_to(&self, conversation_id: &str, message: Message) {
        let mut state = self.state.borrow_mut();

        if state.registry.active_id() == conversation_id {
            state.store.append(message.clone());
            let messages = state.store.to_vec();
            if let Some(title) = state.registry.sync_active(&messages) {
                self.event_bus.emit(ChatEvent::TitleChanged {
                    conversation_id: conversation_id.to_string(),
                    title,
                });
            }
            self.event_bus.emit(ChatEvent::MessageAppended {
                conversation_id: conversation_id.to_string(),
                message,
            });
        } else if !state.registry.append_to(conversation_id, message) {
            log::warn!("Dropping reply for deleted conversation {}", conversation_id);
        }
    }

    fn set_typing(&self, typing: bool) {
        self.state.borrow_mut().typing = typing;
        self.event_bus.emit(if typing {
            ChatEvent::TypingStarted
        } else {
            ChatEvent::TypingStopped
        });
    }

    // ─── Accessors ───────────────────────────────────────

    pub fn messages(&self) -> Vec<Message> {
        self.state.borrow().store.to_vec()
    }

    pub fn message_count(&self) -> usize {
        self.state.borrow().store.len()
    }

    pub fn has_messages(&self) -> bool {
        !self.state.borrow().store.is_empty()
    }

    pub fn is_typing(&self) -> bool {
        self.state.borrow().typing
    }

    pub fn active_id(&self) -> String {
        self.state.borrow().registry.active_id().to_string()
    }

    pub fn active_conversation(&self) -> Option<Conversation> {
        self.state.borrow().registry.active().cloned()
    }

    /// Conversation summaries, most recent first
    pub fn histories(&self) -> Vec<ConversationSummary> {
        self.state.borrow().registry.summaries()
    }

    pub fn conversations(&self) -> Vec<Conversation> {
        self.state.borrow().registry.conversations().to_vec()
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }
}
