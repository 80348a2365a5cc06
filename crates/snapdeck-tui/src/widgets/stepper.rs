use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;

pub struct StepperWidget;

impl StepperWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let selector = &app.selector;
        let buf = frame.buffer_mut();

        buf.set_style(area, Style::default().bg(theme.bg1).fg(theme.grey1));

        let overlay = selector.overlay();
        if overlay.is_visible() {
            let highlight = overlay_cells(area, overlay.x, overlay.width);
            buf.set_style(highlight, Style::default().bg(theme.highlight));
        }

        let segment = selector.segment_width();
        if segment <= 0.0 {
            return;
        }
        let label_row = area.y + area.height / 2;
        for (index, label) in selector.options().iter().enumerate() {
            let start = (index as f32 * segment).round() as u16;
            let end = ((index + 1) as f32 * segment).round() as u16;
            let span = end.saturating_sub(start);
            let text = truncate_to_width(label, span as usize);
            let x = area.x + start + span.saturating_sub(text.width() as u16) / 2;

            let style = if selector.selected_index() == Some(index) {
                Style::default()
                    .fg(theme.highlight_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg1)
            };
            write_label(buf, area, x, label_row, &text, style);
        }
    }
}

/// Cells covered by the highlight overlay, clipped to the stepper
fn overlay_cells(area: Rect, x: f32, width: f32) -> Rect {
    let start = x.round().max(0.0) as u16;
    let end = (x + width).round().max(0.0) as u16;
    Rect::new(
        area.x.saturating_add(start),
        area.y,
        end.saturating_sub(start),
        area.height,
    )
    .intersection(area)
}

fn write_label(buf: &mut Buffer, area: Rect, x: u16, y: u16, text: &str, style: Style) {
    if y >= area.bottom() || x >= area.right() {
        return;
    }
    let max_width = (area.right() - x) as usize;
    buf.set_stringn(x, y, text, max_width, style);
}

/// Truncate to at most `max_width` columns
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut width = 0;
    text.chars()
        .take_while(|c| {
            width += c.width().unwrap_or(0);
            width <= max_width
        })
        .collect()
}
