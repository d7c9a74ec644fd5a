//! System colour-scheme preference via `matchMedia`.

use clipchat_core::ports::ColorSchemePort;

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Debug, Default, Clone, Copy)]
pub struct MediaQueryColorScheme;

impl MediaQueryColorScheme {
    pub fn new() -> Self {
        Self
    }
}

impl ColorSchemePort for MediaQueryColorScheme {
    /// False when there is no window or the query is unsupported
    fn prefers_dark(&self) -> bool {
        web_sys::window()
            .and_then(|w| w.match_media(DARK_QUERY).ok().flatten())
            .map(|list| list.matches())
            .unwrap_or(false)
    }
}
