//! Document-level side effects.

use clipchat_types::preference::Theme;

/// Set `data-theme` on the root element so stylesheets can switch palettes
pub fn apply_theme(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        log::debug!("No document; skipping theme apply");
        return;
    };

    if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
        log::warn!("Failed to apply theme: {:?}", e);
    }
}
