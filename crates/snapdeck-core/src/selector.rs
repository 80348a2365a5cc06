//! Segmented "stepper" selector
//!
//! One selected index among N fixed, equally wide segments, with a highlight
//! overlay that slides between segments. Only the overlay's horizontal
//! position is animated; its width follows immediately.

use std::mem;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::motion::Tween;
use crate::style::SelectorStyle;

/// Horizontal inset of the highlight, as a fraction of one segment's width
pub const HIGHLIGHT_INSET_FRACTION: f32 = 0.015;

/// Horizontal placement of the highlight overlay in container units.
/// A hidden overlay is all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HighlightRect {
    pub x: f32,
    pub width: f32,
}

impl HighlightRect {
    pub fn is_visible(&self) -> bool {
        self.width > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorEvent {
    /// Selection changed; `(None, "")` for deselection
    SelectionChanged { index: Option<usize>, label: String },
}

#[derive(Debug, Clone)]
pub struct SegmentSelector {
    options: Vec<String>,
    selected: Option<usize>,
    width: f32,
    overlay: HighlightRect,
    tween: Option<Tween>,
    style: SelectorStyle,
    events: Vec<SelectorEvent>,
}

impl SegmentSelector {
    /// Create a selector with nothing selected
    pub fn new(options: Vec<String>, width: f32) -> Self {
        Self {
            options,
            selected: None,
            width: sanitize_width(width),
            overlay: HighlightRect::default(),
            tween: None,
            style: SelectorStyle::default(),
            events: Vec::new(),
        }
    }

    pub fn with_style(mut self, style: SelectorStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the transition style; a running slide keeps its old curve
    pub fn set_style(&mut self, style: SelectorStyle) {
        self.style = style;
    }

    pub fn style(&self) -> &SelectorStyle {
        &self.style
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Label of the selected segment, empty when nothing is selected
    pub fn selected_label(&self) -> &str {
        self.selected
            .and_then(|index| self.options.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn overlay(&self) -> HighlightRect {
        self.overlay
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn drain_events(&mut self) -> Vec<SelectorEvent> {
        mem::take(&mut self.events)
    }

    /// Width of a single segment, 0 while unresolved or empty
    pub fn segment_width(&self) -> f32 {
        if self.options.is_empty() {
            0.0
        } else {
            self.width / self.options.len() as f32
        }
    }

    /// Select a segment (or none), notifying listeners when `notify` is set.
    ///
    /// Fails without touching the selector when `index` is out of range.
    /// Re-selecting the current value is a no-op.
    pub fn set_selected_index(&mut self, index: Option<usize>, notify: bool) -> Result<()> {
        if let Some(index) = index {
            if index >= self.options.len() {
                return Err(Error::SegmentOutOfRange {
                    index,
                    count: self.options.len(),
                });
            }
        }
        self.apply_selection(index, notify);
        Ok(())
    }

    /// Selection change for an index already known to be in range
    fn apply_selection(&mut self, index: Option<usize>, notify: bool) {
        if index == self.selected {
            return;
        }

        debug!(from = ?self.selected, to = ?index, "Segment selection changed");
        self.selected = index;
        if notify {
            self.notify_selection();
        }
        self.move_overlay(true);
    }

    pub fn select(&mut self, index: usize) -> Result<()> {
        self.set_selected_index(Some(index), true)
    }

    pub fn clear_selection(&mut self) {
        self.apply_selection(None, true);
    }

    /// Select the segment whose label is `label`
    pub fn select_label(&mut self, label: &str, notify: bool) -> Result<()> {
        let index = self
            .position_of(label)
            .ok_or_else(|| Error::UnknownSegment(label.to_string()))?;
        self.set_selected_index(Some(index), notify)
    }

    /// Step to the next segment, wrapping around
    pub fn select_next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let next = self.selected.map_or(0, |index| (index + 1) % self.options.len());
        self.apply_selection(Some(next), true);
    }

    /// Step to the previous segment, wrapping around
    pub fn select_previous(&mut self) {
        let count = self.options.len();
        if count == 0 {
            return;
        }
        let previous = self
            .selected
            .map_or(count - 1, |index| (index + count - 1) % count);
        self.apply_selection(Some(previous), true);
    }

    /// Replace the options.
    ///
    /// A previous selection is kept if still in range; an out-of-range one
    /// falls back to the first segment (or none when empty). Listeners are
    /// notified when the selected index or its label changed.
    pub fn set_options(&mut self, options: Vec<String>) {
        let previous_label = self.selected_label().to_string();
        let previous_index = self.selected;
        self.replace_options(options, None);
        if self.selected != previous_index || self.selected_label() != previous_label {
            self.notify_selection();
        }
    }

    /// Replace the options and select `default_selected` without notifying.
    /// Falls back to [`SegmentSelector::set_options`]'s rule when the label
    /// is not among the new options.
    pub fn set_options_with_default(&mut self, options: Vec<String>, default_selected: &str) {
        self.replace_options(options, Some(default_selected));
    }

    /// Container width changed; re-place the overlay without animation
    pub fn set_width(&mut self, width: f32) {
        self.width = sanitize_width(width);
        self.move_overlay(false);
    }

    /// Advance the overlay slide by `dt`
    pub fn advance(&mut self, dt: Duration) {
        if let Some(tween) = self.tween.as_mut() {
            let step = tween.advance(dt);
            self.overlay.x = step.value;
            if step.finished {
                self.tween = None;
            }
        }
    }

    /// Overlay rectangle for a segment, hidden for `None`
    pub fn target_rect(&self, index: Option<usize>) -> HighlightRect {
        match index {
            Some(index) if index < self.options.len() => {
                let segment = self.segment_width();
                let inset = segment * HIGHLIGHT_INSET_FRACTION;
                HighlightRect {
                    x: segment * index as f32 + inset,
                    width: (segment - 2.0 * inset).max(0.0),
                }
            }
            _ => HighlightRect::default(),
        }
    }

    fn replace_options(&mut self, options: Vec<String>, default_selected: Option<&str>) {
        self.options = options;
        let by_label = default_selected.and_then(|label| self.position_of(label));
        self.selected = by_label.or(match self.selected {
            Some(index) if index < self.options.len() => Some(index),
            Some(_) if !self.options.is_empty() => Some(0),
            _ => None,
        });
        debug!(
            count = self.options.len(),
            selected = ?self.selected,
            "Segment options replaced"
        );
        self.move_overlay(false);
    }

    fn position_of(&self, label: &str) -> Option<usize> {
        self.options.iter().position(|option| option == label)
    }

    fn notify_selection(&mut self) {
        let label = self.selected_label().to_string();
        self.events.push(SelectorEvent::SelectionChanged {
            index: self.selected,
            label,
        });
    }

    fn move_overlay(&mut self, animate: bool) {
        let target = self.target_rect(self.selected);
        let was_visible = self.overlay.is_visible();
        self.overlay.width = target.width;

        let duration = self.style.transition_duration;
        if !animate || !was_visible || !target.is_visible() || duration.is_zero() {
            self.tween = None;
            self.overlay.x = target.x;
            return;
        }
        self.tween = Some(Tween::new(self.overlay.x, target.x, duration, self.style.easing));
    }
}

fn sanitize_width(width: f32) -> f32 {
    if width.is_nan() {
        0.0
    } else {
        width.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn selector() -> SegmentSelector {
        SegmentSelector::new(labels(&["One", "Two", "Three"]), 300.0)
    }

    #[test]
    fn test_default_selected_text_without_event() {
        let mut selector = SegmentSelector::new(Vec::new(), 300.0);
        selector.set_options_with_default(labels(&["One", "Two", "Three"]), "Two");
        assert_eq!(selector.selected_index(), Some(1));
        assert_eq!(selector.selected_label(), "Two");
        assert!(selector.drain_events().is_empty());

        let overlay = selector.overlay();
        assert!((overlay.x - 101.5).abs() < 1e-4);
        assert!((overlay.width - 97.0).abs() < 1e-4);
        assert!(!selector.is_animating());
    }

    #[test]
    fn test_select_notifies_and_animates_position() {
        let mut selector = selector();
        selector.select(0).expect("in range");
        assert_eq!(
            selector.drain_events(),
            vec![SelectorEvent::SelectionChanged {
                index: Some(0),
                label: "One".to_string()
            }]
        );
        // First appearance snaps into place
        assert!(!selector.is_animating());

        selector.select(2).expect("in range");
        assert!(selector.is_animating());
        assert!((selector.overlay().width - 97.0).abs() < 1e-4);
        assert!((selector.overlay().x - 1.5).abs() < 1e-4);

        selector.advance(Duration::from_millis(85));
        let x = selector.overlay().x;
        assert!(x > 1.5 && x < 201.5);

        selector.advance(Duration::from_millis(85));
        assert!(!selector.is_animating());
        assert!((selector.overlay().x - 201.5).abs() < 1e-4);
    }

    #[test]
    fn test_reselect_is_noop() {
        let mut selector = selector();
        selector.select(1).expect("in range");
        selector.drain_events();
        selector.select(1).expect("in range");
        assert!(selector.drain_events().is_empty());
        assert!(!selector.is_animating());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut selector = selector();
        selector.select(1).expect("in range");
        let err = selector.select(3).unwrap_err();
        assert!(matches!(err, Error::SegmentOutOfRange { index: 3, count: 3 }));
        assert_eq!(selector.selected_index(), Some(1));
    }

    #[test]
    fn test_deselect_hides_overlay() {
        let mut selector = selector();
        selector.select(2).expect("in range");
        selector.drain_events();
        selector.clear_selection();
        assert_eq!(selector.overlay(), HighlightRect::default());
        assert_eq!(
            selector.drain_events(),
            vec![SelectorEvent::SelectionChanged {
                index: None,
                label: String::new()
            }]
        );
        assert_eq!(selector.selected_label(), "");
    }

    #[test]
    fn test_select_label() {
        let mut selector = selector();
        selector.select_label("Three", false).expect("known label");
        assert_eq!(selector.selected_index(), Some(2));
        assert!(selector.drain_events().is_empty());
        assert!(matches!(
            selector.select_label("Four", true),
            Err(Error::UnknownSegment(_))
        ));
    }

    #[test]
    fn test_set_options_preserves_or_resets() {
        let mut selector = selector();
        selector.select(1).expect("in range");
        selector.drain_events();

        selector.set_options(labels(&["A", "B", "C", "D"]));
        assert_eq!(selector.selected_index(), Some(1));
        // Same index, new label
        assert_eq!(
            selector.drain_events(),
            vec![SelectorEvent::SelectionChanged {
                index: Some(1),
                label: "B".to_string()
            }]
        );

        selector.select(3).expect("in range");
        selector.set_options(labels(&["X", "Y"]));
        assert_eq!(selector.selected_index(), Some(0));

        selector.set_options(Vec::new());
        assert_eq!(selector.selected_index(), None);
        assert!(!selector.overlay().is_visible());
    }

    #[test]
    fn test_unknown_default_falls_back() {
        let mut selector = selector();
        selector.select(2).expect("in range");
        selector.set_options_with_default(labels(&["A", "B"]), "Z");
        assert_eq!(selector.selected_index(), Some(0));
    }

    #[test]
    fn test_width_change_repositions_immediately() {
        let mut selector = selector();
        selector.select(0).expect("in range");
        selector.select(1).expect("in range");
        assert!(selector.is_animating());

        selector.set_width(600.0);
        assert!(!selector.is_animating());
        assert!((selector.overlay().x - 203.0).abs() < 1e-4);
        assert!((selector.overlay().width - 194.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_duration_style_snaps() {
        let style = SelectorStyle {
            transition_duration: Duration::ZERO,
            ..Default::default()
        };
        let mut selector = selector().with_style(style);
        selector.select(0).expect("in range");
        selector.select(2).expect("in range");
        assert!(!selector.is_animating());
        assert!((selector.overlay().x - 201.5).abs() < 1e-4);
    }

    #[test]
    fn test_step_wraps() {
        let mut selector = selector();
        selector.select_next();
        assert_eq!(selector.selected_index(), Some(0));
        selector.select_previous();
        assert_eq!(selector.selected_index(), Some(2));
        selector.select_next();
        assert_eq!(selector.selected_index(), Some(0));
    }

    #[test]
    fn test_step_and_clear_notify_once() {
        let mut selector = selector();
        selector.clear_selection();
        assert!(selector.drain_events().is_empty());

        selector.select_previous();
        selector.clear_selection();
        selector.clear_selection();
        assert_eq!(
            selector.drain_events(),
            vec![
                SelectorEvent::SelectionChanged {
                    index: Some(2),
                    label: "Three".to_string()
                },
                SelectorEvent::SelectionChanged {
                    index: None,
                    label: String::new()
                },
            ]
        );
    }
}
