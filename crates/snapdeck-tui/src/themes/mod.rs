//! Theme registry
//!
//! Built-in palettes selectable with `[ui] theme = "..."`.

mod dracula;
mod gruvbox;
mod nord;

use tracing::warn;

use crate::theme::Theme;

/// Names accepted by [`load_theme`]
pub const THEME_NAMES: [&str; 4] = ["gruvbox-dark", "gruvbox-light", "nord", "dracula"];

/// Load a theme by name, falling back to Gruvbox Dark
pub fn load_theme(name: &str) -> Theme {
    match name.trim().to_lowercase().as_str() {
        "gruvbox-dark" | "gruvbox" => gruvbox::dark(),
        "gruvbox-light" => gruvbox::light(),
        "nord" => nord::default(),
        "dracula" => dracula::default(),
        other => {
            warn!("Unknown theme '{}', using gruvbox-dark", other);
            gruvbox::dark()
        }
    }
}
