//! Paging state machine for a scroll-snap carousel
//!
//! Unifies pointer drags, wheel/trackpad input, scrolling driven by a nested
//! viewport, debounced settling and interruptible eased transitions into one
//! "current page" model.
//!
//! # State
//!
//! The machine is always in exactly one state:
//!
//! - `Idle` - resting, nothing scheduled
//! - `Dragging` - a pointer session is live (committed or not)
//! - `Animating` - one transition towards a target page is running
//! - `SettlePending` - one debounced settle is waiting to fire
//!
//! Every operation that starts new work replaces the state, which drops
//! (cancels) whatever was running. There can never be two transitions, two
//! pending settles, or a transition and a settle alive at once, and a replaced
//! transition never completes.
//!
//! # Invariants
//!
//! 1. `0 <= offset <= (page_count - 1) * page_size`
//! 2. `current_page < page_count`, or `0` when there are no pages
//! 3. `PageChanged` fires only when the committed index actually changes
//! 4. With an unresolved page size, index bookkeeping still happens but no
//!    offset is written to the host

use std::mem;
use std::time::Duration;

use tracing::{debug, trace};

use crate::easing::EasingType;
use crate::geometry::{
    resolved_extent, Extent, Orientation, PageLayout, Padding, PagingAxis, Size,
};
use crate::gesture::{
    is_primary_wheel, release_target, DragIntent, GestureSession, InputDisposition,
    PointerButton, PointerEvent, PointerKind, DEFAULT_INTENT_THRESHOLD,
    DEFAULT_SWIPE_THRESHOLD,
};
use crate::motion::timing::approx_eq;
use crate::motion::{DelayedTask, Tween};
use crate::style::PagerStyle;

/// Default length of a page transition
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(320);

/// Default quiet period before settling after external scrolling
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Host scene-graph surface the pager reads geometry from and writes to.
///
/// The pager is the only writer of the scroll offset and of the child page
/// layouts while it is attached.
pub trait PageHost {
    /// Resolved container extents; NaN or non-positive before first layout
    fn container_size(&self) -> Size;

    /// Number of child pages, in order
    fn page_count(&self) -> usize;

    /// Write extents and margins onto child page `index`
    fn apply_page_layout(&mut self, index: usize, layout: &PageLayout);

    /// Write the paging-axis component of the nested viewport's offset.
    /// The cross-axis component must be left untouched.
    fn set_scroll_offset(&mut self, orientation: Orientation, offset: f32);
}

/// Behaviour and geometry configuration for a [`Pager`]
#[derive(Debug, Clone, PartialEq)]
pub struct PagerConfig {
    pub orientation: Orientation,
    /// Explicit page size; `<= 0` uses the container's primary extent
    pub page_size: f32,
    pub padding: Padding,
    pub transition_duration: Duration,
    pub settle_delay: Duration,
    pub easing: EasingType,
    /// Fraction of a page a release must travel to flip pages
    pub swipe_threshold: f32,
    /// Distance before a drag's intent is decided
    pub intent_threshold: f32,
    /// Whether pointer and wheel input may move the pages
    pub manual_movement: bool,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            page_size: 0.0,
            padding: Padding::default(),
            transition_duration: DEFAULT_TRANSITION,
            settle_delay: DEFAULT_SETTLE_DELAY,
            easing: EasingType::Linear,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            intent_threshold: DEFAULT_INTENT_THRESHOLD,
            manual_movement: true,
        }
    }
}

/// Notifications for listeners, drained with [`Pager::drain_events`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerEvent {
    PageChanged(usize),
}

/// Running transition towards `page`
#[derive(Debug, Clone, PartialEq)]
struct Transition {
    tween: Tween,
    page: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum PagerState {
    Idle,
    Dragging(GestureSession),
    Animating(Transition),
    SettlePending(DelayedTask),
}

/// Observable summary of the machine's state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerStateKind {
    Idle,
    Dragging,
    Animating,
    SettlePending,
}

impl PagerState {
    fn kind(&self) -> PagerStateKind {
        match self {
            PagerState::Idle => PagerStateKind::Idle,
            PagerState::Dragging(_) => PagerStateKind::Dragging,
            PagerState::Animating(_) => PagerStateKind::Animating,
            PagerState::SettlePending(_) => PagerStateKind::SettlePending,
        }
    }
}

/// What `advance` decided while the state was borrowed
enum Tick {
    None,
    Moved(f32),
    Finished(f32, usize),
    Settle,
}

/// Scroll-snap paging state machine
#[derive(Debug)]
pub struct Pager<H: PageHost> {
    host: H,
    config: PagerConfig,
    state: PagerState,
    /// Resolved page stride; 0 while unresolved
    page_size: f32,
    page_count: usize,
    current_page: usize,
    offset: f32,
    events: Vec<PagerEvent>,
}

impl<H: PageHost> Pager<H> {
    /// Attach to a host, lay out its pages and rest on page 0
    pub fn new(host: H, mut config: PagerConfig) -> Self {
        config.padding = config.padding.clamped();
        let mut pager = Self {
            host,
            config,
            state: PagerState::Idle,
            page_size: 0.0,
            page_count: 0,
            current_page: 0,
            offset: 0.0,
            events: Vec::new(),
        };
        pager.refresh_layout();
        pager.snap_to(0);
        pager
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    #[inline]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    #[inline]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Resolved page stride, 0 while geometry is unresolved
    #[inline]
    pub fn page_size(&self) -> f32 {
        self.page_size
    }

    pub fn max_offset(&self) -> f32 {
        if self.page_count == 0 || self.page_size <= 0.0 {
            0.0
        } else {
            (self.page_count - 1) as f32 * self.page_size
        }
    }

    pub fn state_kind(&self) -> PagerStateKind {
        self.state.kind()
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, PagerState::Animating(_))
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, PagerState::Dragging(_))
    }

    pub fn has_pending_settle(&self) -> bool {
        matches!(self.state, PagerState::SettlePending(_))
    }

    /// Page the active transition is heading to, if any
    pub fn transition_target(&self) -> Option<usize> {
        match &self.state {
            PagerState::Animating(transition) => Some(transition.page),
            _ => None,
        }
    }

    /// Whether the host needs to keep calling `advance` at frame rate
    pub fn needs_update(&self) -> bool {
        matches!(
            self.state,
            PagerState::Animating(_) | PagerState::SettlePending(_)
        )
    }

    /// Take all notifications emitted since the last call
    pub fn drain_events(&mut self) -> Vec<PagerEvent> {
        mem::take(&mut self.events)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Navigate to `index`, clamped to the available pages.
    ///
    /// Cancels any running transition, pending settle and pointer session.
    /// Without animation (or with an unresolved page size, or a zero
    /// transition duration) the page is committed at once; otherwise a
    /// transition is started and the page is committed when it completes.
    pub fn go_to_page(&mut self, index: usize, animate: bool) {
        if self.page_count == 0 {
            self.cancel_pending();
            self.offset = 0.0;
            self.commit_page(0);
            return;
        }

        let page = index.min(self.page_count - 1);
        if animate && self.transition_target() == Some(page) {
            trace!(page, "Transition already heading to page");
            return;
        }

        self.cancel_pending();
        let target = page as f32 * self.page_size;

        let immediate = !animate
            || self.page_size <= 0.0
            || self.config.transition_duration.is_zero()
            || approx_eq(self.offset, target);
        if immediate {
            self.write_offset(target);
            self.commit_page(page);
            return;
        }

        debug!(
            from = self.offset,
            to = target,
            page,
            duration_ms = self.config.transition_duration.as_millis() as u64,
            "Starting page transition"
        );
        self.state = PagerState::Animating(Transition {
            tween: Tween::new(
                self.offset,
                target,
                self.config.transition_duration,
                self.config.easing,
            ),
            page,
        });
    }

    pub fn move_next(&mut self) {
        self.go_to_page(self.current_page.saturating_add(1), true);
    }

    pub fn move_previous(&mut self) {
        self.go_to_page(self.current_page.saturating_sub(1), true);
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Dispatch a pointer event by phase
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> InputDisposition {
        match event.kind {
            PointerKind::Down => self.pointer_down(event),
            PointerKind::Move => self.pointer_move(event),
            PointerKind::Up => self.pointer_up(event),
            PointerKind::Cancel => self.pointer_cancel(event),
        }
    }

    /// Open a gesture session. Ignored when manual movement is disabled, for
    /// non-primary buttons, or while another session is live.
    pub fn pointer_down(&mut self, event: &PointerEvent) -> InputDisposition {
        if !self.config.manual_movement
            || event.button != PointerButton::Primary
            || self.is_dragging()
        {
            return InputDisposition::Ignored;
        }

        self.cancel_pending();
        debug!(
            pointer_id = event.pointer_id,
            offset = self.offset,
            page = self.current_page,
            "Gesture session opened"
        );
        self.state =
            PagerState::Dragging(GestureSession::new(event, self.offset, self.current_page));
        InputDisposition::Ignored
    }

    /// Track a move of the session's pointer. Returns `Consumed` only once
    /// the session has committed to paging.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> InputDisposition {
        let orientation = self.config.orientation;
        let threshold = self.config.intent_threshold;

        let target = match &mut self.state {
            PagerState::Dragging(session) if session.matches(event) => {
                let before = session.intent();
                let intent = session.update_intent(event.position, orientation, threshold);
                if intent != before {
                    debug!(?intent, pointer_id = event.pointer_id, "Drag intent decided");
                }
                match intent {
                    DragIntent::Paging => {
                        session.start_offset - session.primary_delta(event.position, orientation)
                    }
                    DragIntent::Undecided | DragIntent::Released => {
                        return InputDisposition::Ignored
                    }
                }
            }
            _ => return InputDisposition::Ignored,
        };

        self.write_offset(target);
        InputDisposition::Consumed
    }

    pub fn pointer_up(&mut self, event: &PointerEvent) -> InputDisposition {
        self.end_session(event)
    }

    pub fn pointer_cancel(&mut self, event: &PointerEvent) -> InputDisposition {
        self.end_session(event)
    }

    fn end_session(&mut self, event: &PointerEvent) -> InputDisposition {
        let session = match &self.state {
            PagerState::Dragging(session) if session.matches(event) => session.clone(),
            _ => return InputDisposition::Ignored,
        };
        self.state = PagerState::Idle;

        if !session.is_committed() {
            debug!(intent = ?session.intent(), "Gesture session ended without paging");
            // A session that interrupted a transition or settle may have left
            // the offset between pages.
            if !self.is_aligned() {
                self.go_to_page(self.nearest_page(), true);
            }
            return InputDisposition::Ignored;
        }

        let displacement = session.primary_delta(event.position, self.config.orientation);
        let target = release_target(
            displacement,
            session.start_page,
            self.offset,
            self.page_size,
            self.config.swipe_threshold,
        );
        let target = self.clamp_page(target);
        debug!(
            displacement,
            start_page = session.start_page,
            target,
            "Drag released"
        );
        self.go_to_page(target, true);
        InputDisposition::Consumed
    }

    // ------------------------------------------------------------------
    // Wheel and external scrolling
    // ------------------------------------------------------------------

    /// Handle a wheel/trackpad delta.
    ///
    /// With manual movement disabled the event is swallowed immediately so the
    /// nested viewport does not scroll either. Deltas that are not along the
    /// paging axis are left for the cross-axis consumer.
    pub fn wheel(&mut self, dx: f32, dy: f32) -> InputDisposition {
        if !self.config.manual_movement {
            return InputDisposition::ConsumedImmediate;
        }
        let orientation = self.config.orientation;
        if !is_primary_wheel(dx, dy, orientation) || self.is_dragging() {
            return InputDisposition::Ignored;
        }

        let delta = orientation.primary(dx, dy);
        self.cancel_pending();
        self.write_offset(self.offset + delta);
        self.schedule_settle();
        InputDisposition::Consumed
    }

    /// Record an offset the nested viewport reached on its own (for example
    /// by a drag released to it). Ignored while the pager itself is driving
    /// the offset.
    pub fn sync_external_offset(&mut self, offset: f32) {
        match &self.state {
            PagerState::Animating(_) => {}
            PagerState::Dragging(session) if session.is_committed() => {}
            _ => {
                self.offset = if offset.is_nan() {
                    0.0
                } else {
                    offset.clamp(0.0, self.max_offset())
                };
            }
        }
    }

    /// External scrolling went quiet; settle on the nearest page after the
    /// debounce delay. A later call replaces the pending settle.
    pub fn notify_external_scroll_settled(&mut self) {
        if !self.config.manual_movement {
            return;
        }
        if self.is_dragging() {
            trace!("Settle request ignored during live gesture");
            return;
        }
        self.schedule_settle();
    }

    fn schedule_settle(&mut self) {
        let previous = mem::replace(
            &mut self.state,
            PagerState::SettlePending(DelayedTask::new(self.config.settle_delay)),
        );
        trace!(
            replaced = ?previous.kind(),
            delay_ms = self.config.settle_delay.as_millis() as u64,
            "Settle scheduled"
        );
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Advance the running transition or pending settle by `dt`
    pub fn advance(&mut self, dt: Duration) {
        let tick = match &mut self.state {
            PagerState::Animating(transition) => {
                let step = transition.tween.advance(dt);
                if step.finished {
                    Tick::Finished(step.value, transition.page)
                } else {
                    Tick::Moved(step.value)
                }
            }
            PagerState::SettlePending(task) => {
                if task.advance(dt) {
                    Tick::Settle
                } else {
                    Tick::None
                }
            }
            PagerState::Idle | PagerState::Dragging(_) => Tick::None,
        };

        match tick {
            Tick::None => {}
            Tick::Moved(offset) => self.write_offset(offset),
            Tick::Finished(offset, page) => {
                self.state = PagerState::Idle;
                self.write_offset(offset);
                self.commit_page(page);
                debug!(page, "Page transition complete");
            }
            Tick::Settle => {
                self.state = PagerState::Idle;
                let page = self.nearest_page();
                debug!(offset = self.offset, page, "Settling on nearest page");
                self.go_to_page(page, true);
            }
        }
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// Replace orientation, explicit page size and padding, re-apply child
    /// layout and re-snap without animation.
    ///
    /// An orientation change discards in-flight work and rests on the current
    /// page; otherwise the pager rests where in-flight work was heading.
    pub fn set_geometry(&mut self, orientation: Orientation, page_size: f32, padding: Padding) {
        let resting = if orientation != self.config.orientation {
            debug!(?orientation, "Orientation changed, discarding in-flight gesture state");
            self.current_page
        } else {
            self.resting_page()
        };

        self.config.orientation = orientation;
        self.config.page_size = if page_size.is_nan() { 0.0 } else { page_size };
        self.config.padding = padding.clamped();

        self.state = PagerState::Idle;
        self.refresh_layout();
        self.snap_to(resting);
    }

    /// The host's container geometry changed
    pub fn relayout(&mut self) {
        let resting = self.resting_page();
        self.state = PagerState::Idle;
        self.refresh_layout();
        self.snap_to(resting);
    }

    /// The host's page collection changed. The current page is clamped to the
    /// new count and every page gets its layout again.
    pub fn pages_changed(&mut self) {
        let previous = self.page_count;
        let resting = self.resting_page();
        self.state = PagerState::Idle;
        self.refresh_layout();
        if previous != self.page_count {
            debug!(from = previous, to = self.page_count, "Page count changed");
        }
        self.snap_to(resting);
    }

    /// Apply style-resolved configuration
    pub fn apply_style(&mut self, style: &PagerStyle) {
        self.config.easing = style.easing;
        self.config.transition_duration = style.transition_duration;
        if style.padding != self.config.padding {
            self.set_geometry(self.config.orientation, self.config.page_size, style.padding);
        }
    }

    /// Enable or disable pointer/wheel movement. Disabling ends a live
    /// gesture and settles on the nearest page.
    pub fn set_manual_movement(&mut self, enabled: bool) {
        self.config.manual_movement = enabled;
        if !enabled && self.is_dragging() {
            self.state = PagerState::Idle;
            self.go_to_page(self.nearest_page(), true);
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn refresh_layout(&mut self) {
        let orientation = self.config.orientation;
        let container = self.host.container_size();
        self.page_count = self.host.page_count();

        let explicit = resolved_extent(self.config.page_size);
        self.page_size = if explicit > 0.0 {
            explicit
        } else {
            resolved_extent(container.primary(orientation))
        };

        let padding = self.config.padding;
        let primary = if self.page_size > 0.0 {
            Extent::Points((self.page_size - padding.along(orientation, PagingAxis::Primary)).max(0.0))
        } else {
            Extent::Full
        };
        let cross_extent = resolved_extent(container.cross(orientation));
        let cross = if cross_extent > 0.0 {
            Extent::Points((cross_extent - padding.along(orientation, PagingAxis::Secondary)).max(0.0))
        } else {
            Extent::Full
        };
        let (width, height) = match orientation {
            Orientation::Horizontal => (primary, cross),
            Orientation::Vertical => (cross, primary),
        };
        let layout = PageLayout {
            width,
            height,
            margin: padding,
        };

        for index in 0..self.page_count {
            self.host.apply_page_layout(index, &layout);
        }
        debug!(
            page_size = self.page_size,
            page_count = self.page_count,
            ?orientation,
            "Page layout refreshed"
        );
    }

    /// Page in-flight work would have come to rest on
    fn resting_page(&self) -> usize {
        match &self.state {
            PagerState::Animating(transition) => transition.page,
            PagerState::SettlePending(_) => self.nearest_page(),
            PagerState::Idle | PagerState::Dragging(_) => self.current_page,
        }
    }

    fn nearest_page(&self) -> usize {
        if self.page_size <= 0.0 {
            return self.clamp_page(self.current_page as isize);
        }
        self.clamp_page((self.offset / self.page_size).round() as isize)
    }

    fn clamp_page(&self, page: isize) -> usize {
        if self.page_count == 0 {
            return 0;
        }
        page.clamp(0, self.page_count as isize - 1) as usize
    }

    fn is_aligned(&self) -> bool {
        self.page_size <= 0.0
            || approx_eq(self.offset, self.current_page as f32 * self.page_size)
    }

    /// Cancel whatever is running. Safe to call in any state.
    fn cancel_pending(&mut self) {
        let previous = mem::replace(&mut self.state, PagerState::Idle);
        if previous != PagerState::Idle {
            trace!(canceled = ?previous.kind(), "Canceled in-flight work");
        }
    }

    fn snap_to(&mut self, page: usize) {
        let page = if self.page_count == 0 {
            0
        } else {
            page.min(self.page_count - 1)
        };
        self.write_offset(page as f32 * self.page_size);
        self.commit_page(page);
    }

    fn write_offset(&mut self, offset: f32) {
        let offset = if offset.is_nan() {
            0.0
        } else {
            offset.clamp(0.0, self.max_offset())
        };
        self.offset = offset;
        if self.page_size > 0.0 {
            trace!(offset, "Scroll offset");
            self.host.set_scroll_offset(self.config.orientation, offset);
        }
    }

    fn commit_page(&mut self, page: usize) {
        if page != self.current_page {
            debug!(from = self.current_page, to = page, "Page changed");
            self.current_page = page;
            self.events.push(PagerEvent::PageChanged(page));
        }
    }
}
