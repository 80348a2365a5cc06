//! Gesture tracking: pointer sessions, drag-intent disambiguation and wheel
//! classification for a single paging axis.
//!
//! # Model
//!
//! - One live session at a time. A second pointer-down while a session exists
//!   is ignored by the owner.
//! - Intent is decided once. Until then, movement along the paging axis is
//!   compared with movement across it; the first axis to cross the threshold
//!   wins. A session released to the cross axis never moves the pages.
//! - Wheel deltas count only when the paging-axis component is non-zero and at
//!   least as large as the cross component.

use crate::geometry::{Orientation, Point};

/// Default distance (host units) a pointer must travel before intent is decided
pub const DEFAULT_INTENT_THRESHOLD: f32 = 8.0;

/// Default fraction of a page the release displacement must reach to flip pages
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 0.15;

/// Which button produced a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Phase of a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Low-level pointer input delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
    pub button: PointerButton,
    pub pointer_id: u32,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, position: Point, pointer_id: u32) -> Self {
        Self {
            kind,
            position,
            button: PointerButton::Primary,
            pointer_id,
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Down, Point::new(x, y), 0)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Move, Point::new(x, y), 0)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Up, Point::new(x, y), 0)
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_pointer_id(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }
}

/// What the host should do with an input event after the control saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDisposition {
    /// Not handled; keep propagating to other consumers
    Ignored,
    /// Handled; stop propagation to ancestors and siblings
    Consumed,
    /// Handled; also stop delivery to other handlers on the same target
    ConsumedImmediate,
}

impl InputDisposition {
    pub fn is_consumed(self) -> bool {
        !matches!(self, InputDisposition::Ignored)
    }
}

/// Decided (or not yet decided) intent of a pointer session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragIntent {
    Undecided,
    /// Dragging along the paging axis; the session owns the offset
    Paging,
    /// Handed to the cross-axis consumer (e.g. a nested scroll area)
    Released,
}

/// Ephemeral state of one pointer-down .. pointer-up interaction
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    pub pointer_id: u32,
    pub start_position: Point,
    pub start_offset: f32,
    pub start_page: usize,
    intent: DragIntent,
}

impl GestureSession {
    pub fn new(event: &PointerEvent, start_offset: f32, start_page: usize) -> Self {
        Self {
            pointer_id: event.pointer_id,
            start_position: event.position,
            start_offset,
            start_page,
            intent: DragIntent::Undecided,
        }
    }

    #[inline]
    pub fn matches(&self, event: &PointerEvent) -> bool {
        self.pointer_id == event.pointer_id
    }

    pub fn intent(&self) -> DragIntent {
        self.intent
    }

    pub fn is_committed(&self) -> bool {
        self.intent == DragIntent::Paging
    }

    /// Displacement from the session start along the paging axis
    pub fn primary_delta(&self, position: Point, orientation: Orientation) -> f32 {
        orientation.primary(
            position.x - self.start_position.x,
            position.y - self.start_position.y,
        )
    }

    /// Displacement from the session start across the paging axis
    pub fn cross_delta(&self, position: Point, orientation: Orientation) -> f32 {
        orientation.cross(
            position.x - self.start_position.x,
            position.y - self.start_position.y,
        )
    }

    /// Feed a new pointer position and return the (possibly newly decided)
    /// intent. Once decided the intent never changes.
    pub fn update_intent(
        &mut self,
        position: Point,
        orientation: Orientation,
        threshold: f32,
    ) -> DragIntent {
        if self.intent != DragIntent::Undecided {
            return self.intent;
        }

        let primary = self.primary_delta(position, orientation).abs();
        let cross = self.cross_delta(position, orientation).abs();

        if primary >= threshold && primary > cross {
            self.intent = DragIntent::Paging;
        } else if primary.max(cross) >= threshold {
            self.intent = DragIntent::Released;
        }
        self.intent
    }
}

/// Page a committed drag should settle on after release.
///
/// A displacement of at least `threshold_fraction` of a page flips to the
/// neighbouring page in the drag direction; anything shorter settles on the
/// page nearest to the current offset. The result is unclamped.
pub fn release_target(
    displacement: f32,
    start_page: usize,
    offset: f32,
    page_size: f32,
    threshold_fraction: f32,
) -> isize {
    if page_size <= 0.0 {
        return start_page as isize;
    }
    let threshold = page_size * threshold_fraction;
    if displacement <= -threshold {
        start_page as isize + 1
    } else if displacement >= threshold {
        start_page as isize - 1
    } else {
        (offset / page_size).round() as isize
    }
}

/// Whether a wheel/trackpad delta is a gesture along the paging axis
pub fn is_primary_wheel(dx: f32, dy: f32, orientation: Orientation) -> bool {
    let primary = orientation.primary(dx, dy).abs();
    let cross = orientation.cross(dx, dy).abs();
    primary > 0.0 && primary >= cross
}
