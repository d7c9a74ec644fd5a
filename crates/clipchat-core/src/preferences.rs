//! Theme and user preference stores.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use clipchat_types::{
    config::StorageKeys,
    event::ChatEvent,
    ids::new_user_id,
    preference::{Theme, User, UserPatch},
};

use crate::event_bus::EventBus;
use crate::persist::{load_json, remove_key, save_json};
use crate::ports::{ColorSchemePort, StoragePort};

// ─── Theme ───────────────────────────────────────────────────

pub struct ThemeStore {
    theme: Cell<Theme>,
    storage: Rc<dyn StoragePort>,
    color_scheme: Rc<dyn ColorSchemePort>,
    key: String,
    event_bus: EventBus,
}

impl ThemeStore {
    pub fn new(
        storage: Rc<dyn StoragePort>,
        color_scheme: Rc<dyn ColorSchemePort>,
        keys: &StorageKeys,
        event_bus: EventBus,
    ) -> Self {
        Self {
            theme: Cell::new(Theme::Light),
            storage,
            color_scheme,
            key: keys.theme.clone(),
            event_bus,
        }
    }

    /// Use the saved theme, or the system preference on first load
    pub fn init(&self) -> Theme {
        let theme = load_json(self.storage.as_ref(), &self.key).unwrap_or_else(|| {
            if self.color_scheme.prefers_dark() {
                Theme::Dark
            } else {
                Theme::Light
            }
        });
        self.theme.set(theme);
        self.event_bus.emit(ChatEvent::ThemeChanged { theme });
        theme
    }

    pub fn set_theme(&self, theme: Theme) {
        self.theme.set(theme);
        save_json(self.storage.as_ref(), &self.key, &theme);
        self.event_bus.emit(ChatEvent::ThemeChanged { theme });
    }

    pub fn toggle_theme(&self) -> Theme {
        let theme = self.theme.get().toggled();
        self.set_theme(theme);
        theme
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn is_dark(&self) -> bool {
        self.theme.get() == Theme::Dark
    }

    pub fn is_light(&self) -> bool {
        self.theme.get() == Theme::Light
    }
}

// ─── User ────────────────────────────────────────────────────

/// Display name used when nobody is signed in
pub const ANONYMOUS_NAME: &str = "游客";

pub struct UserStore {
    user: RefCell<Option<User>>,
    storage: Rc<dyn StoragePort>,
    key: String,
    event_bus: EventBus,
}

impl UserStore {
    pub fn new(storage: Rc<dyn StoragePort>, keys: &StorageKeys, event_bus: EventBus) -> Self {
        Self {
            user: RefCell::new(None),
            storage,
            key: keys.user.clone(),
            event_bus,
        }
    }

    /// Restore the saved user; on first run sign in as the guest.
    /// A malformed saved value leaves nobody signed in.
    pub fn init(&self) {
        match self.storage.get(&self.key) {
            Ok(None) => self.login_as_guest(),
            Ok(Some(_)) => {
                let user: Option<User> = load_json(self.storage.as_ref(), &self.key);
                if user.is_none() {
                    log::warn!("Saved user is unreadable; staying signed out");
                }
                self.replace(user);
            }
            Err(e) => {
                log::error!("Failed to load user: {}", e);
                self.replace(None);
            }
        }
    }

    pub fn login_as_guest(&self) {
        self.replace(Some(User::guest()));
        self.save();
    }

    /// Demo login: any non-blank username is accepted
    pub fn login(&self, username: &str) -> bool {
        let username = username.trim();
        if username.is_empty() {
            return false;
        }
        self.replace(Some(User::demo(new_user_id(), username)));
        self.save();
        true
    }

    pub fn logout(&self) {
        self.replace(None);
        remove_key(self.storage.as_ref(), &self.key);
    }

    /// Merge `patch` into the signed-in user. No-op when signed out.
    pub fn update_user(&self, patch: UserPatch) -> bool {
        let updated = {
            let mut user = self.user.borrow_mut();
            match user.as_mut() {
                Some(user) => {
                    user.apply(patch);
                    true
                }
                None => false,
            }
        };
        if updated {
            self.save();
            self.emit_changed();
        }
        updated
    }

    pub fn user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.borrow().is_some()
    }

    pub fn user_name(&self) -> String {
        self.user
            .borrow()
            .as_ref()
            .map(|u| u.username.clone())
            .unwrap_or_else(|| ANONYMOUS_NAME.to_string())
    }

    fn replace(&self, user: Option<User>) {
        *self.user.borrow_mut() = user;
        self.emit_changed();
    }

    fn save(&self) {
        if let Some(user) = self.user.borrow().as_ref() {
            save_json(self.storage.as_ref(), &self.key, user);
        }
    }

    fn emit_changed(&self) {
        let username = self.user.borrow().as_ref().map(|u| u.username.clone());
        self.event_bus.emit(ChatEvent::UserChanged { username });
    }
}
