use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Semantic colors
    /// Border of the page currently committed as the current page
    pub page_active: Color,
    /// Border of every other page
    pub page_inactive: Color,
    /// Stepper highlight overlay
    pub highlight: Color,
    pub highlight_fg: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Default to Gruvbox Dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            page_active: Color::Rgb(0xd8, 0xa6, 0x57),
            page_inactive: Color::Rgb(0x7c, 0x6f, 0x64),
            highlight: Color::Rgb(0x89, 0xb4, 0x82),
            highlight_fg: Color::Rgb(0x28, 0x28, 0x28),
            error: Color::Rgb(0xea, 0x69, 0x62),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
            info: Color::Rgb(0x7d, 0xae, 0xa3),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
        }
    }
}
