//! JavaScript-facing facade over the application context.
//!
//! Async operations return Promises that resolve once the mock reply has
//! been appended. The renderer learns about changes by calling
//! `drainEvents()` and re-reading `messages()`/`histories()`.

use std::rc::Rc;

use gloo_utils::format::JsValueSerdeExt;
use js_sys::Promise;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use clipchat_core::context::{AppContext, Ports};
use clipchat_core::registry::InitOutcome;
use clipchat_platform::{open_storage, GlooTimer, MediaQueryColorScheme};
use clipchat_types::action::CardAction;
use clipchat_types::config::ChatConfig;
use clipchat_types::preference::{Theme, UserPatch};
use clipchat_types::ChatError;

use crate::dom;

/// Parse an optional JSON config override. Invalid input keeps the defaults.
pub(crate) fn parse_config(json: Option<&str>) -> ChatConfig {
    let Some(json) = json.filter(|s| !s.trim().is_empty()) else {
        return ChatConfig::default();
    };
    match ChatConfig::from_json(json) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Invalid config ({}), using defaults", e);
            ChatConfig::default()
        }
    }
}

/// Card payload data from JS; `undefined`/`null` mean "no data"
pub(crate) fn card_action(kind: &str, data: Option<Value>) -> CardAction {
    CardAction::from_parts(kind, data.filter(|v| !v.is_null()))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    JsValue::from_serde(value).map_err(|e| js_error(ChatError::from(e)))
}

fn js_error(e: ChatError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct ClipChat {
    ctx: Rc<AppContext>,
}

#[wasm_bindgen]
impl ClipChat {
    /// Build the context. `config` is an optional JSON `ChatConfig` override.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> ClipChat {
        let config = parse_config(config.as_deref());
        let ports = Ports {
            storage: open_storage(config.storage.backend),
            timer: Rc::new(GlooTimer::new()),
            color_scheme: Rc::new(MediaQueryColorScheme::new()),
        };
        ClipChat {
            ctx: Rc::new(AppContext::new(config, ports)),
        }
    }

    /// Restore state. Returns the active conversation id.
    pub fn init(&self) -> String {
        let outcome = self.ctx.init();
        dom::apply_theme(self.ctx.theme.theme());
        match outcome {
            InitOutcome::Resumed(id) | InitOutcome::Created(id) => id,
        }
    }

    // ─── Messaging ───────────────────────────────────────

    #[wasm_bindgen(js_name = sendMessage)]
    pub fn send_message(&self, text: String) -> Promise {
        let ctx = self.ctx.clone();
        future_to_promise(async move {
            ctx.session.send_message(&text).await;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(js_name = resendMessage)]
    pub fn resend_message(&self, message_id: String) -> Promise {
        let ctx = self.ctx.clone();
        future_to_promise(async move {
            ctx.session.resend_message(&message_id).await;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(js_name = handleCardAction)]
    pub fn handle_card_action(&self, message_id: String, kind: String, data: JsValue) -> Promise {
        let data = if data.is_undefined() || data.is_null() {
            None
        } else {
            match data.into_serde::<Value>() {
                Ok(value) => Some(value),
                Err(e) => {
                    log::warn!("Ignoring unreadable {} payload: {}", kind, e);
                    None
                }
            }
        };
        let action = card_action(&kind, data);
        let ctx = self.ctx.clone();
        future_to_promise(async move {
            ctx.session.handle_card_action(&message_id, action).await;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(js_name = deleteMessage)]
    pub fn delete_message(&self, message_id: &str) -> bool {
        self.ctx.session.delete_message(message_id)
    }

    #[wasm_bindgen(js_name = clearMessages)]
    pub fn clear_messages(&self) {
        self.ctx.session.clear_messages();
    }

    pub fn messages(&self) -> Result<JsValue, JsValue> {
        to_js(&self.ctx.session.messages())
    }

    #[wasm_bindgen(js_name = isTyping)]
    pub fn is_typing(&self) -> bool {
        self.ctx.session.is_typing()
    }

    // ─── Conversations ───────────────────────────────────

    #[wasm_bindgen(js_name = createNewChat)]
    pub fn create_new_chat(&self) -> String {
        self.ctx.session.create_new_chat()
    }

    #[wasm_bindgen(js_name = loadChat)]
    pub fn load_chat(&self, id: &str) -> bool {
        self.ctx.session.load_chat(id)
    }

    #[wasm_bindgen(js_name = deleteChatHistory)]
    pub fn delete_chat_history(&self, id: &str) -> bool {
        self.ctx.session.delete_chat_history(id)
    }

    #[wasm_bindgen(js_name = activeId)]
    pub fn active_id(&self) -> String {
        self.ctx.session.active_id()
    }

    pub fn histories(&self) -> Result<JsValue, JsValue> {
        to_js(&self.ctx.session.histories())
    }

    /// Pending events, oldest first
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> Result<JsValue, JsValue> {
        to_js(&self.ctx.event_bus.drain())
    }

    // ─── Theme ───────────────────────────────────────────

    pub fn theme(&self) -> String {
        self.ctx.theme.theme().as_str().to_string()
    }

    #[wasm_bindgen(js_name = setTheme)]
    pub fn set_theme(&self, theme: &str) -> Result<(), JsValue> {
        let theme = Theme::parse(theme)
            .ok_or_else(|| js_error(ChatError::Other(format!("unknown theme \"{}\"", theme))))?;
        self.ctx.theme.set_theme(theme);
        dom::apply_theme(theme);
        Ok(())
    }

    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&self) -> String {
        let theme = self.ctx.theme.toggle_theme();
        dom::apply_theme(theme);
        theme.as_str().to_string()
    }

    #[wasm_bindgen(js_name = isDark)]
    pub fn is_dark(&self) -> bool {
        self.ctx.theme.is_dark()
    }

    // ─── User ────────────────────────────────────────────

    pub fn user(&self) -> Result<JsValue, JsValue> {
        to_js(&self.ctx.user.user())
    }

    #[wasm_bindgen(js_name = userName)]
    pub fn user_name(&self) -> String {
        self.ctx.user.user_name()
    }

    #[wasm_bindgen(js_name = isLoggedIn)]
    pub fn is_logged_in(&self) -> bool {
        self.ctx.user.is_logged_in()
    }

    pub fn login(&self, username: &str) -> bool {
        self.ctx.user.login(username)
    }

    #[wasm_bindgen(js_name = loginAsGuest)]
    pub fn login_as_guest(&self) {
        self.ctx.user.login_as_guest();
    }

    pub fn logout(&self) {
        self.ctx.user.logout();
    }

    /// `patch` is a partial `{username, email, avatar}` object
    #[wasm_bindgen(js_name = updateUser)]
    pub fn update_user(&self, patch: JsValue) -> Result<bool, JsValue> {
        let patch: UserPatch = patch
            .into_serde()
            .map_err(|e| js_error(ChatError::from(e)))?;
        Ok(self.ctx.user.update_user(patch))
    }
}
