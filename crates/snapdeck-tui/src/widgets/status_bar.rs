use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use snapdeck_core::PagerStateKind;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let pager = &app.pager;

        let mode_str = match app.mode {
            Mode::Normal => match pager.state_kind() {
                PagerStateKind::Idle => "IDLE",
                PagerStateKind::Dragging => "DRAG",
                PagerStateKind::Animating => "ANIM",
                PagerStateKind::SettlePending => "SETTLE",
            },
            Mode::Help => "HELP",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | {}", mode_str, msg)
        } else {
            let selection = match app.selector.selected_label() {
                "" => "-",
                label => label,
            };
            format!(
                " {} | {} | {} | {} | {}",
                mode_str,
                page_dots(pager.current_page(), pager.page_count()),
                pager.config().easing,
                selection,
                app.event_log.back().map(String::as_str).unwrap_or("ready"),
            )
        };

        let help_hint = " q:quit h/l:page Tab:stepper ?:help ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Page indicator such as `○●○○`
fn page_dots(current: usize, count: usize) -> String {
    (0..count)
        .map(|index| if index == current { '●' } else { '○' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_dots() {
        assert_eq!(page_dots(1, 4), "○●○○");
        assert_eq!(page_dots(0, 0), "");
    }
}
