pub mod app;
pub mod event;
pub mod host;
pub mod input;
pub mod keymap;
pub mod theme;
pub mod themes;
pub mod widgets;

pub use app::App;
pub use host::CarouselHost;
pub use theme::Theme;
pub use themes::load_theme;
