#![forbid(unsafe_code)]

//! Touch-driven scroll controller with rubber-band bounds and flings.
//!
//! [`ScrollController`] owns a single scroll offset along one axis and moves
//! it in response to [`TouchEvent`]s and host ticks.
//!
//! # State Machine
//!
//! ```text
//! Idle --down--> Dragging --up/cancel--> Settling --finished--> Idle
//!                   ^                        |
//!                   +--------down------------+
//! ```
//!
//! - **Dragging**: moves scroll the offset once the pointer has travelled
//!   past the touch slop. Outside `[0, max]` movement is divided by the
//!   resistance factor.
//! - **Settling**: on release, an out-of-bounds offset returns to the
//!   nearest bound over a fixed duration; otherwise the release velocity
//!   starts a fling bounded by `[0, max + fling_slack]`. A fling that stops
//!   inside the slack chains into a return.
//!
//! Only the pointer that started the gesture moves the offset; samples from
//! other pointers are dropped until it is released. Content shifts reported
//! through [`ScrollController::compensate`] translate a running settle
//! instead of ending it, so a new down is the only way to stop one.
//!
//! # Invariants
//!
//! 1. A settle that started from a release ends inside `[0, max]`.
//! 2. A down event stops any settle before anything else changes.
//! 3. Every offset change is reported through
//!    [`Host::on_scroll_changed`](scatter_core::host::Host::on_scroll_changed)
//!    with the previous offset.
//!
//! # Nested containers
//!
//! With an ancestor scrolling on the other axis, the controller keeps the
//! gesture while movement along its own axis (plus slop) exceeds movement
//! across it. With a same-axis ancestor, it lets go only when already at the
//! extremum in the direction of travel.

use std::time::Duration;

use scatter_core::animation::Scroller;
use scatter_core::event::{TouchEvent, TouchKind};
use scatter_core::geometry::Orientation;
use scatter_core::host::{Edge, ScrollHost};
use scatter_core::velocity::VelocityTracker;
use scatter_core::{debug, trace};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds and physics for scroll gestures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Distance (px) the pointer must travel before a drag scrolls (default: 8).
    pub touch_slop: f32,
    /// Release velocity cap in px/s (default: 8000).
    pub max_fling_velocity: f32,
    /// Velocity time unit (default: 1 s, i.e. px/s).
    pub velocity_units: Duration,
    /// Age of the oldest sample used for velocity (default: 100 ms).
    pub velocity_horizon: Duration,
    /// Divisor applied to drags outside the bounds (default: 2.5).
    pub resistance: f32,
    /// Duration of returns and smooth scrolls (default: 300 ms).
    pub settle_duration: Duration,
    /// How far (px) a fling may run past the end bound (default: 100).
    pub fling_slack: i32,
    /// Fling friction coefficient (default: 0.015).
    pub fling_friction: f32,
    /// Screen density used to convert friction to px/s² (default: 160).
    pub pixels_per_inch: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            max_fling_velocity: 8000.0,
            velocity_units: Duration::from_secs(1),
            velocity_horizon: Duration::from_millis(100),
            resistance: 2.5,
            settle_duration: Duration::from_millis(300),
            fling_slack: 100,
            fling_friction: scatter_core::animation::scroller::DEFAULT_FRICTION,
            pixels_per_inch: scatter_core::animation::scroller::DEFAULT_PPI,
        }
    }
}

impl ScrollConfig {
    /// Set the touch slop (builder pattern).
    #[must_use]
    pub fn with_touch_slop(mut self, slop: f32) -> Self {
        self.touch_slop = slop.max(0.0);
        self
    }

    /// Set the settle duration (builder pattern).
    #[must_use]
    pub fn with_settle_duration(mut self, duration: Duration) -> Self {
        self.settle_duration = duration;
        self
    }

    /// Set the fling friction (builder pattern).
    #[must_use]
    pub fn with_fling_friction(mut self, friction: f32) -> Self {
        self.fling_friction = friction;
        self
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ScrollPhase {
    #[default]
    Idle,
    Dragging,
    Settling,
}

impl ScrollPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Settling => "settling",
        }
    }
}

/// What the current settle is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettleKind {
    Return,
    Fling,
    Smooth,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Single-axis scroll state machine.
#[derive(Debug, Clone)]
pub struct ScrollController {
    config: ScrollConfig,
    orientation: Orientation,
    parent: Option<Orientation>,
    phase: ScrollPhase,
    settle: SettleKind,
    offset: i32,
    tracker: VelocityTracker,
    scroller: Scroller,
    down: (f32, f32),
    last: (f32, f32),
    pointer: Option<u32>,
}

impl Default for ScrollController {
    fn default() -> Self {
        Self::new(ScrollConfig::default(), Orientation::default())
    }
}

impl ScrollController {
    /// Create an idle controller at offset 0.
    #[must_use]
    pub fn new(config: ScrollConfig, orientation: Orientation) -> Self {
        let tracker = VelocityTracker::new(config.velocity_horizon);
        let scroller = Scroller::with_friction(config.fling_friction, config.pixels_per_inch);
        Self {
            config,
            orientation,
            parent: None,
            phase: ScrollPhase::Idle,
            settle: SettleKind::Return,
            offset: 0,
            tracker,
            scroller,
            down: (0.0, 0.0),
            last: (0.0, 0.0),
            pointer: None,
        }
    }

    /// Current scroll offset.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Scroll axis.
    #[inline]
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Switch the scroll axis. Stops any motion and rewinds to offset 0
    /// without notifying the host.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation == orientation {
            return;
        }
        self.orientation = orientation;
        self.reset();
    }

    /// Declare the axis of an enclosing scroll container (`None` when there
    /// is none or it does not scroll).
    pub fn set_parent_orientation(&mut self, parent: Option<Orientation>) {
        self.parent = parent;
    }

    /// Whether the enclosing container scrolls along the same axis.
    #[must_use]
    pub fn same_axis_parent(&self) -> bool {
        self.parent == Some(self.orientation)
    }

    /// Largest in-bounds offset for `host`.
    #[must_use]
    pub fn max_offset(host: &dyn ScrollHost) -> i32 {
        (host.content_extent() - host.viewport_extent()).max(0)
    }

    /// Stop, go idle and jump to offset 0 silently.
    pub fn reset(&mut self) {
        self.scroller.force_finished();
        self.tracker.clear();
        self.pointer = None;
        self.phase = ScrollPhase::Idle;
        self.offset = 0;
    }

    // -- Touch input --------------------------------------------------------

    /// Intercept hook for events headed to children.
    ///
    /// Records the down position and claims the stream on the first move.
    pub fn on_intercept(&mut self, event: &TouchEvent) -> bool {
        match event.kind {
            TouchKind::Down => {
                self.down = (event.x, event.y);
                self.last = self.down;
                self.pointer = Some(event.pointer_id);
                false
            }
            TouchKind::Move => self.owns(event),
            TouchKind::Up | TouchKind::Cancel => {
                self.pointer = None;
                false
            }
        }
    }

    /// Whether `event` comes from the pointer driving the gesture. A down
    /// from another pointer is accepted once no drag is running.
    fn owns(&self, event: &TouchEvent) -> bool {
        match self.pointer {
            Some(id) if id != event.pointer_id => {
                event.kind == TouchKind::Down && self.phase != ScrollPhase::Dragging
            }
            _ => true,
        }
    }

    /// Feed a touch event. Always consumes it.
    pub fn on_touch(&mut self, event: &TouchEvent, host: &mut dyn ScrollHost) -> bool {
        if !self.owns(event) {
            trace!(message = "scroll.foreign_pointer", pointer = event.pointer_id);
            return true;
        }
        self.tracker.add(event);
        match event.kind {
            TouchKind::Down => {
                self.begin_drag(host);
                self.down = (event.x, event.y);
                self.last = self.down;
            }
            TouchKind::Move => {
                if self.phase != ScrollPhase::Dragging {
                    // Stream claimed through on_intercept: the down went
                    // elsewhere, so start from here.
                    self.begin_drag(host);
                    self.last = (event.x, event.y);
                }
                self.drag_to(event, host);
            }
            TouchKind::Up | TouchKind::Cancel => {
                if self.phase == ScrollPhase::Dragging {
                    self.release(host);
                }
            }
        }
        self.pointer = if event.kind.is_release() {
            None
        } else {
            Some(event.pointer_id)
        };
        true
    }

    fn begin_drag(&mut self, host: &mut dyn ScrollHost) {
        if !self.scroller.is_finished() {
            self.scroller.force_finished();
        }
        self.set_phase(ScrollPhase::Dragging);
        host.request_disallow_intercept(true);
    }

    fn drag_to(&mut self, event: &TouchEvent, host: &mut dyn ScrollHost) {
        let o = self.orientation;
        let main = o.main_of(event.x, event.y);
        let cross = o.cross_of(event.x, event.y);
        let last_main = o.main_of(self.last.0, self.last.1);
        let down_main = o.main_of(self.down.0, self.down.1);
        let down_cross = o.cross_of(self.down.0, self.down.1);

        let max = Self::max_offset(host);
        let raw = main - last_main;
        let delta = if self.offset < 0 || self.offset > max {
            (raw / self.config.resistance.max(1.0)) as i32
        } else {
            raw as i32
        };

        let keep = if self.same_axis_parent() {
            if last_main >= down_main {
                self.offset > 0
            } else {
                self.offset < max
            }
        } else {
            (main - down_main).abs() + self.config.touch_slop > (cross - down_cross).abs()
                && host.content_extent() > host.viewport_extent()
        };
        host.request_disallow_intercept(keep);

        if (down_main - main).abs() > self.config.touch_slop {
            self.apply(self.offset - delta, host);
        }
        self.last = (event.x, event.y);
    }

    fn release(&mut self, host: &mut dyn ScrollHost) {
        let velocity = self
            .tracker
            .compute(self.config.velocity_units, self.config.max_fling_velocity);
        let velocity = self.orientation.main_of(velocity.x, velocity.y);
        self.tracker.clear();

        let max = Self::max_offset(host);
        if !self.start_return(max, host) {
            self.scroller
                .fling(self.offset, -velocity, 0, max + self.config.fling_slack);
            self.settle = SettleKind::Fling;
            debug!(
                message = "scroll.settle",
                kind = "fling",
                from = self.offset,
                velocity,
                to = self.scroller.final_position()
            );
        }
        self.set_phase(ScrollPhase::Settling);
        host.request_tick();
    }

    /// Start a return to the nearest bound if the offset is outside
    /// `[0, max]`. Returns whether one started.
    fn start_return(&mut self, max: i32, host: &mut dyn ScrollHost) -> bool {
        let (target, edge) = if self.offset < 0 {
            (0, Edge::Start)
        } else if self.offset > max {
            (max, Edge::End)
        } else {
            return false;
        };
        self.scroller
            .start_scroll(self.offset, target - self.offset, self.config.settle_duration);
        self.settle = SettleKind::Return;
        debug!(message = "scroll.settle", kind = "return", from = self.offset, to = target);
        host.on_edge_reached(edge);
        true
    }

    // -- Ticks --------------------------------------------------------------

    /// Advance a settle by `dt`. Returns whether another tick is needed.
    pub fn on_tick(&mut self, dt: Duration, host: &mut dyn ScrollHost) -> bool {
        if self.phase != ScrollPhase::Settling {
            return false;
        }
        self.scroller.compute_offset(dt);
        self.apply(self.scroller.current(), host);

        if !self.scroller.is_finished() {
            host.request_tick();
            return true;
        }

        // Release-started settles must end in bounds, even when the content
        // changed underneath them.
        let max = Self::max_offset(host);
        if self.settle != SettleKind::Smooth && self.start_return(max, host) {
            host.request_tick();
            return true;
        }
        self.set_phase(ScrollPhase::Idle);
        false
    }

    // -- Programmatic scrolling ---------------------------------------------

    /// Jump to `offset`, stopping any settle.
    pub fn scroll_to(&mut self, offset: i32, host: &mut dyn ScrollHost) {
        self.stop_settle();
        self.apply(offset, host);
    }

    /// Jump by `delta`, stopping any settle.
    pub fn scroll_by(&mut self, delta: i32, host: &mut dyn ScrollHost) {
        self.scroll_to(self.offset.saturating_add(delta), host);
    }

    /// Animate by `delta` over the settle duration.
    pub fn smooth_scroll_by(&mut self, delta: i32, host: &mut dyn ScrollHost) {
        self.scroller
            .start_scroll(self.offset, delta, self.config.settle_duration);
        self.settle = SettleKind::Smooth;
        trace!(message = "scroll.settle", kind = "smooth", from = self.offset, delta);
        self.set_phase(ScrollPhase::Settling);
        host.request_tick();
    }

    /// Shift the offset by `delta` to follow content that moved under the
    /// viewport. A running settle is translated by the same amount and keeps
    /// going; a drag continues from the shifted offset.
    pub fn compensate(&mut self, delta: i32, host: &mut dyn ScrollHost) {
        if delta == 0 {
            return;
        }
        if self.phase == ScrollPhase::Settling {
            self.scroller.offset_by(delta);
        }
        self.apply(self.offset.saturating_add(delta), host);
    }

    fn stop_settle(&mut self) {
        self.scroller.force_finished();
        if self.phase == ScrollPhase::Settling {
            self.set_phase(ScrollPhase::Idle);
        }
    }

    fn apply(&mut self, offset: i32, host: &mut dyn ScrollHost) {
        if offset == self.offset {
            return;
        }
        let old = self.offset;
        self.offset = offset;
        host.on_scroll_changed(offset, old);
    }

    fn set_phase(&mut self, phase: ScrollPhase) {
        if self.phase == phase {
            return;
        }
        debug!(
            message = "scroll.phase",
            from = self.phase.as_str(),
            to = phase.as_str(),
            offset = self.offset
        );
        self.phase = phase;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use scatter_core::host::Host;
    use web_time::Instant;

    const FRAME: Duration = Duration::from_millis(16);

    #[derive(Debug, Default)]
    struct Recorder {
        viewport: i32,
        content: i32,
        ticks: usize,
        disallow: Vec<bool>,
        changes: Vec<(i32, i32)>,
        edges: Vec<Edge>,
    }

    impl Recorder {
        fn new(viewport: i32, content: i32) -> Self {
            Self {
                viewport,
                content,
                ..Self::default()
            }
        }
    }

    impl Host for Recorder {
        fn request_tick(&mut self) {
            self.ticks += 1;
        }

        fn request_disallow_intercept(&mut self, disallow: bool) {
            self.disallow.push(disallow);
        }

        fn on_scroll_changed(&mut self, offset: i32, old: i32) {
            self.changes.push((offset, old));
        }

        fn on_edge_reached(&mut self, edge: Edge) {
            self.edges.push(edge);
        }
    }

    impl ScrollHost for Recorder {
        fn viewport_extent(&self) -> i32 {
            self.viewport
        }

        fn content_extent(&self) -> i32 {
            self.content
        }
    }

    fn at(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    fn settle(c: &mut ScrollController, host: &mut Recorder) -> usize {
        for n in 0..1000 {
            if !c.on_tick(FRAME, host) {
                return n;
            }
        }
        panic!("settle did not finish");
    }

    fn controller() -> ScrollController {
        ScrollController::new(ScrollConfig::default(), Orientation::Horizontal)
    }

    #[test]
    fn drag_scrolls_opposite_to_pointer() {
        let t = Instant::now();
        let mut host = Recorder::new(500, 2000);
        let mut c = controller();
        c.on_touch(&TouchEvent::down(300.0, 0.0, t), &mut host);
        assert_eq!(c.phase(), ScrollPhase::Dragging);
        c.on_touch(&TouchEvent::moved(280.0, 0.0, at(t, 10)), &mut host);
        c.on_touch(&TouchEvent::moved(250.0, 0.0, at(t, 20)), &mut host);
        assert_eq!(c.offset(), 50);
        assert_eq!(host.changes, vec![(20, 0), (50, 20)]);
        assert_eq!(host.disallow.first(), Some(&true));
    }

    #[test]
    fn movement_inside_slop_is_ignored() {
        let t = Instant::now();
        let mut host = Recorder::new(500, 2000);
        let mut c = controller();
        c.on_touch(&TouchEvent::down(300.0, 0.0, t), &mut host);
        c.on_touch(&TouchEvent::moved(295.0, 0.0, at(t, 10)), &mut host);
        assert_eq!(c.offset(), 0);
        c.on_touch(&TouchEvent::moved(290.0, 0.0, at(t, 20)), &mut host);
        assert_eq!(c.offset(), 5);
    }

    #[test]
    fn overscroll_is_resisted_and_returns_to_start() {
        let t = Instant::now();
        let mut host = Recorder::new(500, 2000);
        let mut c = controller();
        c.on_touch(&TouchEvent::down(100.0, 0.0, t), &mut host);
        c.on_touch(&TouchEvent::moved(120.0, 0.0, at(t, 10)), &mut host);
        assert_eq!(c.offset(), -20);
        c.on_touch(&TouchEvent::moved(145.0, 0.0, at(t, 20)), &mut host);
        assert_eq!(c.offset(), -30);

        c.on_touch(&TouchEvent::up(145.0, 0.0, at(t, 30)), &mut host);
        assert_eq!(c.phase(), ScrollPhase::Settling);
        assert_eq!(host.edges, vec![Edge::Start]);
        let frames = settle(&mut c, &mut host);
        assert!(frames <= 20, "took {frames} frames");
        assert_eq!(c.offset(), 0);
        assert_eq!(c.phase(), ScrollPhase::Idle);
    }

    #[test]
    fn release_past_end_returns_to_max() {
        let t = Instant::now();
        let mut host = Recorder::new(500, 2000);
        let mut c = controller();
        c.scroll_to(1490, &mut host);
        c.on_touch(&TouchEvent::down(300.0, 0.0, t), &mut host);
        c.on_touch(&TouchEvent::moved(200.0, 0.0, at(t, 10)), &mut host);
        assert_eq!(c.offset(), 1590);
        c.on_touch(&TouchEvent::cancel(200.0, 0.0, at(t, 20)), &mut host);
        assert_eq!(host.edges, vec![Edge::End]);
        settle(&mut c, &mut host);
        assert_eq!(c.offset(), 1500);
    }

    #[test]
    fn fling_past_end_chains_into_return() {
        let t = Instant::now();
        let mut host = Recorder::new(500, 2000);
        let mut c = controller();
        c.on_touch(&TouchEvent::down(400.0, 0.0, t), &mut host);
        c.on_touch(&TouchEvent::moved(350.0, 0.0, at(t, 10)), &mut host);
        c.on_touch(&TouchEvent::moved(300.0, 0.0, at(t, 20)), &mut host);
        c.on_touch(&TouchEvent::moved(250.0, 0.0, at(t, 30)), &mut host);
        assert_eq!(c.offset(), 150);
        c.on_touch(&TouchEvent::up(250.0, 0.0, at(t, 30)), &mut host);
        assert!(host.edges.is_empty());

        settle(&mut c, &mut host);
        assert_eq!(host.edges, vec![Edge::End]);
        assert_eq!(c.offset(), 1500);
        let peak = host.changes.iter().map(|&(o, _)| o).max().unwrap();
        assert_eq!(peak, 1600);
    }

    #[test]
    fn slow_release_in_bounds_stays_put() {
        let t = Instant::now();
        let mut host = Recorder::new(500, 2000);
        let mut c = controller();
        c.on_touch(&TouchEvent::down(300.0, 0.0, t), &mut host);
        c.on_touch(&TouchEvent::moved(200.0, 0.0, at(t, 10)), &mut host);
        // Hold still long enough for the older samples to age out.
        c.on_touch(&TouchEvent::moved(200.0, 0.0, at(t, 300)), &mut host);
        c.on_touch(&TouchEvent::up(200.0, 0.0, at(t, 400)), &mut host);
        assert_eq!(settle(&mut c, &mut host), 0);
        assert_eq!(c.offset(), 100);
        assert!(host.edges.is_empty());
    }

    #[test]
    fn down_stops_a_settle() {
        let t = Instant::now();
        let mut host = Recorder::new(500, 2000);
        let mut c = controller();
        c.smooth_scroll_by(1000, &mut host);
        for _ in 0..5 {
            c.on_tick(FRAME, &mut host);
        }
        let frozen = c.offset();
        assert!(frozen > 0 && frozen < 1000);

        c.on_touch(&TouchEvent::down(10.0, 10.0, at(t, 100)), &mut host);
        assert_eq!(c.phase(), ScrollPhase::Dragging);
        assert!(!c.on_tick(FRAME, &mut host));
        assert_eq!(c.offset(), frozen);
    }

    #[test]
    fn smooth_scroll_lands_exactly() {
        let mut host = Recorder::new(500, 2000);
        let mut c = controller();
        c.smooth_scroll_by(300, &mut host);
        assert_eq!(c.phase(), ScrollPhase::Settling);
        let frames = settle(&mut c, &mut host);
        assert_eq!(frames, 18);
        assert_eq!(c.offset(), 300);
        assert_eq!(c.phase(), ScrollPhase::Idle);
    }

    #[test]
    fn intercept_claims_moves() {
        let t = Instant::now();
        let mut c = controller();
        assert!(!c.on_intercept(&TouchEvent::down(50.0, 50.0, t)));
        assert!(c.on_intercept(&TouchEvent::moved(60.0, 50.0, t)));
        assert!(!c.on_intercept(&TouchEvent::up(60.0, 50.0, t)));
    }

    #[test]
    fn intercepted_stream_starts_dragging_on_move() {
        let t = Instant::now();
        let mut host = Recorder::new(500, 2000);
        let mut c = controller();
        c.on_intercept(&TouchEvent::down(300.0, 0.0, t));
        c.on_touch(&TouchEvent::moved(280.0, 0.0, at(t, 10)), &mut host);
        assert_eq!(c.phase(), ScrollPhase::Dragging);
        assert_eq!(c.offset(), 0);
        c.on_touch(&TouchEvent::moved(260.0, 0.0, at(t, 20)), &mut host);
        assert_eq!(c.offset(), 20);
    }

    #[test]
    fn cross_axis_parent_gets_orthogonal_drags() {
        let t = Instant::now();
        let mut host = Recorder::new(500, 2000);
        let mut c = controller();
        c.set_parent_orientation(Some(Orientation::Vertical));
        c.on_touch(&TouchEvent::down(100.0, 100.0, t), &mut host);
        c.on_touch(&TouchEvent::moved(102.0, 160.0, at(t, 10)), &mut host);
        assert_eq!(host.disallow.last(), Some(&false));
        c.on_touch(&TouchEvent::moved(160.0, 102.0, at(t, 20)), &mut host);
        assert_eq!(host.disallow.last(), Some(&true));
    }

    #[test]
    fn nothing_to_scroll_yields_to_parent() {
        let t = Instant::now();
        let mut host = Recorder::new(500, 400);
        let mut c = controller();
        c.on_touch(&TouchEvent::down(100.0, 100.0, t), &mut host);
        c.on_touch(&TouchEvent::moved(160.0, 100.0, at(t, 10)), &mut host);
        assert_eq!(host.disallow.last(), Some(&false));
    }

    #[test]
    fn same_axis_parent_takes_over_at_extremum() {
        let t = Instant::now();
        let mut host = Recorder::new(500, 2000);
        let mut c = controller();
        c.set_parent_orientation(Some(Orientation::Horizontal));
        assert!(c.same_axis_parent());

        // At offset 0 dragging toward the start: the parent may scroll.
        c.on_touch(&TouchEvent::down(100.0, 0.0, t), &mut host);
        c.on_touch(&TouchEvent::moved(130.0, 0.0, at(t, 10)), &mut host);
        assert_eq!(host.disallow.last(), Some(&false));
        c.on_touch(&TouchEvent::up(130.0, 0.0, at(t, 20)), &mut host);
        settle(&mut c, &mut host);

        // Mid-range dragging toward the end: keep the gesture.
        c.scroll_to(500, &mut host);
        c.on_touch(&TouchEvent::down(300.0, 0.0, at(t, 500)), &mut host);
        c.on_touch(&TouchEvent::moved(250.0, 0.0, at(t, 510)), &mut host);
        assert_eq!(host.disallow.last(), Some(&true));
    }

    #[test]
    fn vertical_uses_y() {
        let t = Instant::now();
        let mut host = Recorder::new(500, 2000);
        let mut c = ScrollController::new(ScrollConfig::default(), Orientation::Vertical);
        c.on_touch(&TouchEvent::down(0.0, 300.0, t), &mut host);
        c.on_touch(&TouchEvent::moved(90.0, 260.0, at(t, 10)), &mut host);
        assert_eq!(c.offset(), 40);
    }

    #[test]
    fn compensate_translates_a_running_settle() {
        let mut host = Recorder::new(500, 2000);
        let mut c = controller();
        c.smooth_scroll_by(400, &mut host);
        c.on_tick(FRAME, &mut host);
        let before = c.offset();
        c.compensate(120, &mut host);
        assert_eq!(c.offset(), before + 120);
        assert_eq!(c.phase(), ScrollPhase::Settling);
        settle(&mut c, &mut host);
        assert_eq!(c.offset(), 520);
    }

    #[test]
    fn return_shifted_past_new_end_returns_again() {
        let t = Instant::now();
        // Content shorter than the viewport: max is 0.
        let mut host = Recorder::new(500, 400);
        let mut c = controller();
        c.on_touch(&TouchEvent::down(100.0, 0.0, t), &mut host);
        c.on_touch(&TouchEvent::moved(300.0, 0.0, at(t, 10)), &mut host);
        assert_eq!(c.offset(), -200);
        c.on_touch(&TouchEvent::up(300.0, 0.0, at(t, 20)), &mut host);
        assert_eq!(host.edges, vec![Edge::Start]);
        c.on_tick(FRAME, &mut host);

        // 250 px added at the head: the return target moves to 250 but the
        // new end is 150.
        host.content = 650;
        c.compensate(250, &mut host);
        assert_eq!(c.phase(), ScrollPhase::Settling);
        settle(&mut c, &mut host);
        assert_eq!(c.offset(), 150);
        assert_eq!(c.phase(), ScrollPhase::Idle);
        assert_eq!(host.edges, vec![Edge::Start, Edge::End]);
    }

    #[test]
    fn second_pointer_does_not_drag() {
        let t = Instant::now();
        let mut host = Recorder::new(500, 2000);
        let mut c = controller();
        c.on_touch(&TouchEvent::down(300.0, 0.0, t), &mut host);
        let other = TouchEvent {
            pointer_id: 1,
            ..TouchEvent::moved(0.0, 0.0, at(t, 10))
        };
        c.on_touch(&other, &mut host);
        assert_eq!(c.offset(), 0);
        c.on_touch(&TouchEvent::moved(250.0, 0.0, at(t, 20)), &mut host);
        assert_eq!(c.offset(), 50);

        // Lifting the second pointer does not end the drag.
        let other_up = TouchEvent {
            pointer_id: 1,
            ..TouchEvent::up(0.0, 0.0, at(t, 30))
        };
        c.on_touch(&other_up, &mut host);
        assert_eq!(c.phase(), ScrollPhase::Dragging);
        assert!(!c.on_intercept(&other));
    }

    #[test]
    fn scroll_to_reports_old_offset() {
        let mut host = Recorder::new(500, 2000);
        let mut c = controller();
        c.scroll_to(100, &mut host);
        c.scroll_by(-40, &mut host);
        c.scroll_to(60, &mut host);
        assert_eq!(host.changes, vec![(100, 0), (60, 100)]);
    }

    #[test]
    fn config_partial_json() {
        let config: ScrollConfig =
            serde_json::from_str(r#"{"touch_slop": 4.0, "fling_slack": 0}"#).unwrap();
        assert_eq!(config.fling_slack, 0);
        assert!((config.touch_slop - 4.0).abs() < f32::EPSILON);
        assert_eq!(config.settle_duration, Duration::from_millis(300));
    }
}
