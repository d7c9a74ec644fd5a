//! Application context: built once at startup and handed to whoever needs
//! conversation, theme, or user state.

use std::rc::Rc;

use clipchat_types::config::ChatConfig;

use crate::event_bus::EventBus;
use crate::ports::{ColorSchemePort, StoragePort, TimerPort};
use crate::preferences::{ThemeStore, UserStore};
use crate::registry::InitOutcome;
use crate::session::ChatSession;

/// Platform adapters the context is built from
#[derive(Clone)]
pub struct Ports {
    pub storage: Rc<dyn StoragePort>,
    pub timer: Rc<dyn TimerPort>,
    pub color_scheme: Rc<dyn ColorSchemePort>,
}

pub struct AppContext {
    pub event_bus: EventBus,
    pub session: Rc<ChatSession>,
    pub theme: ThemeStore,
    pub user: UserStore,
}

impl AppContext {
    pub fn new(config: ChatConfig, ports: Ports) -> Self {
        let event_bus = EventBus::new();
        let keys = config.storage.keys();

        let theme = ThemeStore::new(
            ports.storage.clone(),
            ports.color_scheme.clone(),
            &keys,
            event_bus.clone(),
        );
        let user = UserStore::new(ports.storage.clone(), &keys, event_bus.clone());
        let session = Rc::new(ChatSession::new(
            config,
            ports.storage,
            ports.timer,
            event_bus.clone(),
        ));

        Self {
            event_bus,
            session,
            theme,
            user,
        }
    }

    /// Restore theme, user, and conversations from storage
    pub fn init(&self) -> InitOutcome {
        self.theme.init();
        self.user.init();
        self.session.init()
    }
}
