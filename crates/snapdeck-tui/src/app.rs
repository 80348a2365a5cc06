use std::collections::VecDeque;
use std::time::Duration;

use crossterm::event::MouseEvent;
use ratatui::layout::Rect;
use snapdeck_core::style::PagerStyle;
use snapdeck_core::{
    AppConfig, EasingType, InputDisposition, PageContent, Pager, PagerEvent, PointerKind,
    SegmentSelector, SelectorEvent,
};
use tracing::{debug, info};

use crate::host::CarouselHost;
use crate::input::{map_mouse_event, Action, MouseInput};
use crate::theme::Theme;

/// Number of notifications kept for the status bar
const EVENT_LOG_LEN: usize = 4;

/// Current UI mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

/// Application state: one carousel, one stepper
pub struct App {
    pub pager: Pager<CarouselHost>,
    pub selector: SegmentSelector,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Recent page/selection notifications, newest last
    pub event_log: VecDeque<String>,
    stepper_area: Rect,
}

impl App {
    pub fn new(config: &AppConfig, theme: Theme) -> Self {
        let host = CarouselHost::new(config.deck.pages.clone());
        let pager = Pager::new(host, config.pager_config());

        let mut selector =
            SegmentSelector::new(Vec::new(), 0.0).with_style(config.selector_style());
        selector.set_options_with_default(
            config.selector.options.clone(),
            &config.selector.default_selected,
        );

        Self {
            pager,
            selector,
            theme,
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            event_log: VecDeque::with_capacity(EVENT_LOG_LEN),
            stepper_area: Rect::default(),
        }
    }

    /// Record where the carousel and stepper were laid out this frame
    pub fn set_viewport(&mut self, carousel: Rect, stepper: Rect) {
        if self.pager.host_mut().set_area(carousel) {
            debug!(width = carousel.width, height = carousel.height, "Carousel resized");
            self.pager.relayout();
        }
        if stepper.width != self.stepper_area.width {
            self.selector.set_width(stepper.width as f32);
        }
        self.stepper_area = stepper;
    }

    pub fn stepper_area(&self) -> Rect {
        self.stepper_area
    }

    /// Replace the deck. The pager keeps its page when it still exists.
    pub fn set_pages(&mut self, pages: Vec<PageContent>) {
        let count = pages.len();
        self.pager.host_mut().set_pages(pages);
        self.pager.pages_changed();
        info!(pages = count, "Deck replaced");
        self.status_message = Some(format!("Loaded {} pages", count));
        self.collect_events();
    }

    /// Whether the run loop should tick at animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.pager.needs_update() || self.selector.is_animating()
    }

    /// Advance animations and pending settles by `dt`
    pub fn tick(&mut self, dt: Duration) {
        self.pager.advance(dt);
        self.selector.advance(dt);
        self.collect_events();
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::NextPage => self.pager.move_next(),
            Action::PrevPage => self.pager.move_previous(),
            Action::FirstPage => self.pager.go_to_page(0, true),
            Action::LastPage => {
                let last = self.pager.page_count().saturating_sub(1);
                self.pager.go_to_page(last, true);
            }
            Action::GoToPage(index) => {
                if index < self.pager.page_count() {
                    self.pager.go_to_page(index, true);
                }
            }
            Action::NextSegment => self.selector.select_next(),
            Action::PrevSegment => self.selector.select_previous(),
            Action::ClearSegment => self.selector.clear_selection(),
            Action::ToggleOrientation => {
                let config = self.pager.config().clone();
                let orientation = config.orientation.toggled();
                self.pager
                    .set_geometry(orientation, config.page_size, config.padding);
                self.status_message = Some(format!("Orientation: {:?}", orientation));
            }
            Action::ToggleManual => {
                let enabled = !self.pager.config().manual_movement;
                self.pager.set_manual_movement(enabled);
                self.status_message = Some(format!(
                    "Manual movement {}",
                    if enabled { "enabled" } else { "disabled" }
                ));
            }
            Action::CycleEasing => {
                let easing = next_easing(self.pager.config().easing);
                let config = self.pager.config();
                let style = PagerStyle {
                    easing,
                    transition_duration: config.transition_duration,
                    padding: config.padding,
                };
                self.pager.apply_style(&style);
                self.status_message = Some(format!("Easing: {}", easing));
            }
            Action::ToggleHelp => {
                self.mode = match self.mode {
                    Mode::Help => Mode::Normal,
                    Mode::Normal => Mode::Help,
                };
            }
            Action::ExitMode => {
                self.mode = Mode::Normal;
                self.status_message = None;
            }
            // Needs the configuration file; the run loop handles it
            Action::ReloadDeck | Action::None => {}
        }
        self.collect_events();
    }

    /// Route a mouse event to the stepper or the carousel
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> InputDisposition {
        let disposition = match map_mouse_event(mouse) {
            Some(MouseInput::Pointer(event)) => {
                if event.kind == PointerKind::Down {
                    if let Some(index) = self.segment_at(mouse.column, mouse.row) {
                        if let Err(err) = self.selector.select(index) {
                            debug!(%err, "Ignoring click on a missing segment");
                        }
                        self.collect_events();
                        return InputDisposition::Consumed;
                    }
                    if !self.pager.host().contains(mouse.column, mouse.row) {
                        return InputDisposition::Ignored;
                    }
                }
                self.pager.handle_pointer(&event)
            }
            Some(MouseInput::Wheel { dx, dy }) => {
                if self.pager.host().contains(mouse.column, mouse.row) {
                    self.pager.wheel(dx, dy)
                } else {
                    InputDisposition::Ignored
                }
            }
            None => InputDisposition::Ignored,
        };
        self.collect_events();
        disposition
    }

    /// Segment under a terminal cell, if the cell is inside the stepper
    pub fn segment_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.stepper_area;
        let inside = column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height);
        let segment = self.selector.segment_width();
        if !inside || segment <= 0.0 {
            return None;
        }
        let index = ((column - area.x) as f32 / segment).floor() as usize;
        Some(index.min(self.selector.options().len().saturating_sub(1)))
    }

    fn collect_events(&mut self) {
        for event in self.pager.drain_events() {
            let PagerEvent::PageChanged(page) = event;
            info!(page, "Page changed");
            self.push_log(format!("page {}", page + 1));
        }
        for event in self.selector.drain_events() {
            let SelectorEvent::SelectionChanged { index, label } = event;
            info!(?index, label = %label, "Selection changed");
            let entry = if index.is_some() {
                format!("selected {}", label)
            } else {
                "selection cleared".to_string()
            };
            self.push_log(entry);
        }
    }

    fn push_log(&mut self, entry: String) {
        if self.event_log.len() == EVENT_LOG_LEN {
            self.event_log.pop_front();
        }
        self.event_log.push_back(entry);
    }
}

/// Next curve in table order, wrapping around
fn next_easing(current: EasingType) -> EasingType {
    let all = EasingType::ALL;
    let position = all.iter().position(|e| *e == current).unwrap_or(0);
    all[(position + 1) % all.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEventKind};
    use snapdeck_core::Orientation;

    const FRAME: Duration = Duration::from_millis(16);

    fn app() -> App {
        let mut app = App::new(&AppConfig::default(), Theme::default());
        app.set_viewport(Rect::new(0, 0, 80, 20), Rect::new(0, 21, 60, 1));
        app
    }

    fn settle(app: &mut App) {
        for _ in 0..200 {
            if !app.needs_fast_update() {
                break;
            }
            app.tick(FRAME);
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_starts_on_first_page_with_default_segment() {
        let app = app();
        assert_eq!(app.pager.current_page(), 0);
        assert_eq!(app.pager.page_count(), 4);
        assert_eq!(app.selector.selected_label(), "Two");
        assert!(app.event_log.is_empty());
    }

    #[test]
    fn test_next_page_animates_and_logs() {
        let mut app = app();
        app.handle_action(Action::NextPage);
        assert!(app.needs_fast_update());
        settle(&mut app);
        assert_eq!(app.pager.current_page(), 1);
        assert_eq!(app.pager.host().offset(), 80.0);
        assert_eq!(app.event_log.back().map(String::as_str), Some("page 2"));
    }

    #[test]
    fn test_go_to_page_out_of_range_is_ignored() {
        let mut app = app();
        app.handle_action(Action::GoToPage(8));
        assert!(!app.needs_fast_update());
        app.handle_action(Action::LastPage);
        settle(&mut app);
        assert_eq!(app.pager.current_page(), 3);
    }

    #[test]
    fn test_mouse_drag_flips_page() {
        let mut app = app();
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 60, 5));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 50, 5));
        let disposition = app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 40, 5));
        assert_eq!(disposition, InputDisposition::Consumed);
        assert_eq!(app.pager.offset(), 20.0);

        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 40, 5));
        settle(&mut app);
        assert_eq!(app.pager.current_page(), 1);
    }

    #[test]
    fn test_mouse_down_outside_carousel_is_ignored() {
        let mut app = app();
        let disposition = app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 70, 21));
        assert_eq!(disposition, InputDisposition::Ignored);
        assert!(!app.pager.is_dragging());
    }

    #[test]
    fn test_click_selects_segment() {
        let mut app = app();
        // 60 cells, 3 segments of 20
        assert_eq!(app.segment_at(45, 21), Some(2));
        assert_eq!(app.segment_at(45, 20), None);

        let disposition = app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 21));
        assert_eq!(disposition, InputDisposition::Consumed);
        assert_eq!(app.selector.selected_index(), Some(0));
        assert_eq!(app.event_log.back().map(String::as_str), Some("selected One"));
    }

    #[test]
    fn test_vertical_wheel_ignored_in_horizontal_mode() {
        let mut app = app();
        let disposition = app.handle_mouse(mouse(MouseEventKind::ScrollDown, 10, 5));
        assert_eq!(disposition, InputDisposition::Ignored);

        let mut shifted = mouse(MouseEventKind::ScrollDown, 10, 5);
        shifted.modifiers = KeyModifiers::SHIFT;
        assert_eq!(app.handle_mouse(shifted), InputDisposition::Consumed);
        assert!(app.pager.has_pending_settle());
        settle(&mut app);
        assert_eq!(app.pager.current_page(), 0);
        assert_eq!(app.pager.offset(), 0.0);
    }

    #[test]
    fn test_toggle_orientation_keeps_page() {
        let mut app = app();
        app.handle_action(Action::GoToPage(2));
        settle(&mut app);
        app.handle_action(Action::ToggleOrientation);
        assert_eq!(app.pager.config().orientation, Orientation::Vertical);
        assert_eq!(app.pager.current_page(), 2);
        assert_eq!(app.pager.offset(), 40.0);
    }

    #[test]
    fn test_toggle_manual_movement() {
        let mut app = app();
        app.handle_action(Action::ToggleManual);
        assert!(!app.pager.config().manual_movement);
        let disposition = app.handle_mouse(mouse(MouseEventKind::ScrollRight, 10, 5));
        assert_eq!(disposition, InputDisposition::ConsumedImmediate);
    }

    #[test]
    fn test_cycle_easing_wraps() {
        let mut app = app();
        app.handle_action(Action::CycleEasing);
        assert_ne!(app.pager.config().easing, EasingType::Linear);
        assert_eq!(next_easing(*EasingType::ALL.last().unwrap()), EasingType::ALL[0]);
    }

    #[test]
    fn test_resize_relayouts_pages() {
        let mut app = app();
        app.handle_action(Action::GoToPage(1));
        settle(&mut app);
        app.set_viewport(Rect::new(0, 0, 100, 20), Rect::new(0, 21, 60, 1));
        assert_eq!(app.pager.page_size(), 100.0);
        assert_eq!(app.pager.offset(), 100.0);
    }

    #[test]
    fn test_set_pages_clamps_current_page() {
        let mut app = app();
        app.handle_action(Action::LastPage);
        settle(&mut app);
        assert_eq!(app.pager.current_page(), 3);
        app.event_log.clear();

        let deck = app.pager.host().pages()[..2].to_vec();
        app.set_pages(deck);
        assert_eq!(app.pager.page_count(), 2);
        assert_eq!(app.pager.current_page(), 1);
        assert_eq!(app.pager.offset(), 80.0);
        assert!(app.pager.host().layout(1).is_some());
        assert_eq!(app.event_log.back().map(String::as_str), Some("page 2"));
        assert_eq!(app.status_message.as_deref(), Some("Loaded 2 pages"));
    }

    #[test]
    fn test_event_log_is_bounded() {
        let mut app = app();
        for _ in 0..6 {
            app.handle_action(Action::NextSegment);
        }
        assert_eq!(app.event_log.len(), EVENT_LOG_LEN);
    }
}
