//! Gruvbox Material themes

use ratatui::style::Color;

use crate::theme::Theme;

pub fn dark() -> Theme {
    Theme::default()
}

pub fn light() -> Theme {
    Theme {
        bg0: Color::Rgb(0xfb, 0xf1, 0xc7),
        bg1: Color::Rgb(0xf4, 0xe8, 0xbe),
        bg2: Color::Rgb(0xeb, 0xdb, 0xb2),
        fg0: Color::Rgb(0x65, 0x47, 0x35),
        fg1: Color::Rgb(0x4f, 0x38, 0x29),
        grey0: Color::Rgb(0xa8, 0x99, 0x84),
        grey1: Color::Rgb(0x92, 0x83, 0x74),
        page_active: Color::Rgb(0xb4, 0x71, 0x09),
        page_inactive: Color::Rgb(0xa8, 0x99, 0x84),
        highlight: Color::Rgb(0x4c, 0x7a, 0x5d),
        highlight_fg: Color::Rgb(0xfb, 0xf1, 0xc7),
        error: Color::Rgb(0xc1, 0x4a, 0x4a),
        warning: Color::Rgb(0xc3, 0x5e, 0x0a),
        info: Color::Rgb(0x45, 0x70, 0x7a),
        accent: Color::Rgb(0x4c, 0x7a, 0x5d),
    }
}
