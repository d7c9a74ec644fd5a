//! Identifier and timestamp helpers.
//!
//! Ids are UUID v4 with a short kind prefix, so they cannot collide within
//! (or across) sessions the way time-plus-random-suffix ids could.

use uuid::Uuid;

pub fn new_message_id() -> String {
    format!("msg-{}", Uuid::new_v4())
}

pub fn new_conversation_id() -> String {
    format!("chat-{}", Uuid::new_v4())
}

pub fn new_user_id() -> String {
    format!("user-{}", Uuid::new_v4())
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
