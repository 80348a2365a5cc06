use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::easing::EasingType;
use crate::geometry::{Orientation, Padding};
use crate::gesture::{DEFAULT_INTENT_THRESHOLD, DEFAULT_SWIPE_THRESHOLD};
use crate::pager::PagerConfig;
use crate::style::{
    PagerStyle, SelectorStyle, StyleProperties, DEFAULT_SNAP_DURATION_MS,
    DEFAULT_STEPPER_DURATION_MS, SNAP_DURATION, SNAP_EASING, SNAP_PADDING_BOTTOM,
    SNAP_PADDING_LEFT, SNAP_PADDING_RIGHT, SNAP_PADDING_TOP, STEPPER_DURATION, STEPPER_EASING,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub selector: SelectorConfig,
    #[serde(default)]
    pub deck: DeckConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
    /// Custom style properties layered over the typed sections,
    /// e.g. `"--snap-easing" = "out-back"`
    #[serde(default)]
    pub style: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while something is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Theme name (e.g., "gruvbox-dark", "nord")
    #[serde(default = "default_theme_name")]
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            theme: default_theme_name(),
        }
    }
}

impl UiConfig {
    /// Frame interval while animating
    pub fn animation_tick(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }
}

/// Scroll-snap carousel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingConfig {
    /// "horizontal" or "vertical"
    #[serde(default)]
    pub orientation: Orientation,
    /// Explicit page size; 0 or less uses the container extent
    #[serde(default)]
    pub page_size: f32,
    #[serde(default)]
    pub padding: Padding,
    /// Page transition duration in milliseconds
    #[serde(default = "default_snap_transition")]
    pub transition_ms: u64,
    /// Quiet period before settling after wheel/trackpad scrolling
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Whether pointer and wheel input may move the pages
    #[serde(default = "default_true")]
    pub manual_movement: bool,
    /// Fraction of a page a drag must cover to flip pages (0.0-1.0)
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f32,
    /// Distance before a drag's direction is decided
    #[serde(default = "default_intent_threshold")]
    pub intent_threshold: f32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            page_size: 0.0,
            padding: Padding::default(),
            transition_ms: default_snap_transition(),
            settle_delay_ms: default_settle_delay(),
            easing: EasingType::default(),
            manual_movement: default_true(),
            swipe_threshold: default_swipe_threshold(),
            intent_threshold: default_intent_threshold(),
        }
    }
}

impl PagingConfig {
    pub fn to_pager_config(&self) -> PagerConfig {
        PagerConfig {
            orientation: self.orientation,
            page_size: self.page_size,
            padding: self.padding.clamped(),
            transition_duration: Duration::from_millis(self.transition_ms),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            easing: self.easing,
            swipe_threshold: self.swipe_threshold.clamp(0.0, 1.0),
            intent_threshold: self.intent_threshold.max(0.0),
            manual_movement: self.manual_movement,
        }
    }
}

/// Segmented stepper configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Highlight slide duration in milliseconds
    #[serde(default = "default_stepper_transition")]
    pub transition_ms: u64,
    #[serde(default = "default_stepper_easing")]
    pub easing: EasingType,
    #[serde(default = "default_options")]
    pub options: Vec<String>,
    /// Option selected at startup (no change event is fired for it)
    #[serde(default = "default_selected")]
    pub default_selected: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            transition_ms: default_stepper_transition(),
            easing: default_stepper_easing(),
            options: default_options(),
            default_selected: default_selected(),
        }
    }
}

impl SelectorConfig {
    pub fn to_style(&self) -> SelectorStyle {
        SelectorStyle {
            easing: self.easing,
            transition_duration: Duration::from_millis(self.transition_ms),
        }
    }
}

/// Pages shown by the terminal demo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckConfig {
    #[serde(default = "default_pages")]
    pub pages: Vec<PageContent>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            pages: default_pages(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Keymap configuration (Vim-style key notation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    #[serde(default = "default_key_next_page")]
    pub next_page: String,
    #[serde(default = "default_key_prev_page")]
    pub prev_page: String,
    #[serde(default = "default_key_first_page")]
    pub first_page: String,
    #[serde(default = "default_key_last_page")]
    pub last_page: String,
    #[serde(default = "default_key_next_segment")]
    pub next_segment: String,
    #[serde(default = "default_key_prev_segment")]
    pub prev_segment: String,
    #[serde(default = "default_key_clear_segment")]
    pub clear_segment: String,
    #[serde(default = "default_key_toggle_orientation")]
    pub toggle_orientation: String,
    #[serde(default = "default_key_toggle_manual")]
    pub toggle_manual: String,
    #[serde(default = "default_key_cycle_easing")]
    pub cycle_easing: String,
    #[serde(default = "default_key_reload_deck")]
    pub reload_deck: String,
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            next_page: default_key_next_page(),
            prev_page: default_key_prev_page(),
            first_page: default_key_first_page(),
            last_page: default_key_last_page(),
            next_segment: default_key_next_segment(),
            prev_segment: default_key_prev_segment(),
            clear_segment: default_key_clear_segment(),
            toggle_orientation: default_key_toggle_orientation(),
            toggle_manual: default_key_toggle_manual(),
            cycle_easing: default_key_cycle_easing(),
            reload_deck: default_key_reload_deck(),
            help: default_key_help(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("snapdeck")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

fn default_snap_transition() -> u64 {
    DEFAULT_SNAP_DURATION_MS
}

fn default_settle_delay() -> u64 {
    100
}

fn default_swipe_threshold() -> f32 {
    DEFAULT_SWIPE_THRESHOLD
}

fn default_intent_threshold() -> f32 {
    DEFAULT_INTENT_THRESHOLD
}

fn default_stepper_transition() -> u64 {
    DEFAULT_STEPPER_DURATION_MS
}

fn default_stepper_easing() -> EasingType {
    EasingType::OutCubic
}

fn default_options() -> Vec<String> {
    ["One", "Two", "Three"].map(String::from).to_vec()
}

fn default_selected() -> String {
    "Two".to_string()
}

fn default_pages() -> Vec<PageContent> {
    [
        ("Welcome", "Drag with the mouse, scroll the wheel, or use h/l to page."),
        ("Snapping", "Short drags settle back; drags past 15% of a page flip it."),
        ("Settling", "Wheel scrolling settles on the nearest page after a short pause."),
        ("Stepper", "Use Tab / Shift-Tab to move the segmented selector highlight."),
    ]
    .into_iter()
    .map(|(title, body)| PageContent {
        title: title.to_string(),
        body: body.to_string(),
    })
    .collect()
}

fn default_key_quit() -> String {
    "q".to_string()
}

fn default_key_next_page() -> String {
    "l".to_string()
}

fn default_key_prev_page() -> String {
    "h".to_string()
}

fn default_key_first_page() -> String {
    "g".to_string()
}

fn default_key_last_page() -> String {
    "G".to_string()
}

fn default_key_next_segment() -> String {
    "<Tab>".to_string()
}

fn default_key_prev_segment() -> String {
    "<S-Tab>".to_string()
}

fn default_key_clear_segment() -> String {
    "x".to_string()
}

fn default_key_toggle_orientation() -> String {
    "o".to_string()
}

fn default_key_toggle_manual() -> String {
    "m".to_string()
}

fn default_key_cycle_easing() -> String {
    "e".to_string()
}

fn default_key_reload_deck() -> String {
    "r".to_string()
}

fn default_key_help() -> String {
    "?".to_string()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, defaults when it is missing
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/snapdeck/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("snapdeck")
            .join("config.toml")
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("snapdeck.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Custom style properties from the `[style]` table
    pub fn style_properties(&self) -> StyleProperties {
        self.style.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    /// Pager configuration with `[style]` overrides applied
    pub fn pager_config(&self) -> PagerConfig {
        let mut config = self.paging.to_pager_config();
        let properties = self.style_properties();
        if properties.is_empty() {
            return config;
        }

        let style = PagerStyle::resolve(&properties);
        if properties.get(SNAP_EASING).is_some() {
            config.easing = style.easing;
        }
        if properties.get(SNAP_DURATION).is_some() {
            config.transition_duration = style.transition_duration;
        }

        // Only the sides named in [style] replace [paging].padding
        let padding = &mut config.padding;
        let sides = [
            (SNAP_PADDING_LEFT, style.padding.left, &mut padding.left),
            (SNAP_PADDING_RIGHT, style.padding.right, &mut padding.right),
            (SNAP_PADDING_TOP, style.padding.top, &mut padding.top),
            (SNAP_PADDING_BOTTOM, style.padding.bottom, &mut padding.bottom),
        ];
        for (name, value, side) in sides {
            if properties.get(name).is_some() {
                *side = value;
            }
        }
        config
    }

    /// Selector style with `[style]` overrides applied
    pub fn selector_style(&self) -> SelectorStyle {
        let mut style = self.selector.to_style();
        let properties = self.style_properties();
        let resolved = SelectorStyle::resolve(&properties);
        if properties.get(STEPPER_EASING).is_some() {
            style.easing = resolved.easing;
        }
        if properties.get(STEPPER_DURATION).is_some() {
            style.transition_duration = resolved.transition_duration;
        }
        style
    }
}
