#![forbid(unsafe_code)]

//! Scroll offset animator: fixed-duration scrolls and decelerating flings.
//!
//! A [`Scroller`] only computes offsets; whoever owns the scroll position
//! reads [`Scroller::current`] after each tick and applies it.
//!
//! # Modes
//!
//! - **Scroll**: moves from `start` by `delta` over a fixed duration along
//!   an easing curve. Used for rubber-band returns and programmatic smooth
//!   scrolls.
//! - **Fling**: starts at `start` with an initial velocity and decelerates
//!   at a constant rate derived from the friction coefficient, clamped to
//!   `[min, max]`.
//!
//! # Invariants
//!
//! 1. Once complete, `current() == final_position()`.
//! 2. A fling's offset never leaves `[min, max]`.
//! 3. A scroll with zero duration completes on the first tick.
//! 4. `reset()` rewinds to the start of the current motion.
//!
//! # Failure Modes
//!
//! - Zero velocity fling: completes immediately at `start` clamped to the
//!   bounds.
//! - `min > max`: the bounds are swapped rather than panicking in `clamp`.

use std::time::Duration;

use super::{Animation, viscous_fluid};

/// Standard gravity, m/s².
const GRAVITY_EARTH: f32 = 9.806_65;

/// Inches per meter.
const INCHES_PER_METER: f32 = 39.37;

/// Empirical tuning factor applied to the physical deceleration.
const PHYSICAL_TUNING: f32 = 0.84;

/// Default friction coefficient for flings.
pub const DEFAULT_FRICTION: f32 = 0.015;

/// Default screen density, pixels per inch.
pub const DEFAULT_PPI: f32 = 160.0;

/// Deceleration in px/s² for a friction coefficient at a screen density.
#[must_use]
pub fn deceleration(friction: f32, pixels_per_inch: f32) -> f32 {
    (GRAVITY_EARTH * INCHES_PER_METER * pixels_per_inch * PHYSICAL_TUNING * friction).max(1.0)
}

/// What the scroller is currently animating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollerMode {
    /// Nothing started yet.
    Idle,
    /// Fixed-duration eased scroll.
    Scroll,
    /// Decelerating fling.
    Fling,
}

/// Offset animator for scroll surfaces.
#[derive(Debug, Clone)]
pub struct Scroller {
    mode: ScrollerMode,
    start: i32,
    current: i32,
    final_pos: i32,
    duration: Duration,
    elapsed: Duration,
    finished: bool,
    // Fling state.
    velocity: f32,
    min: i32,
    max: i32,
    deceleration: f32,
}

impl Default for Scroller {
    fn default() -> Self {
        Self::new(deceleration(DEFAULT_FRICTION, DEFAULT_PPI))
    }
}

impl Scroller {
    /// Create an idle scroller that decelerates flings at `deceleration`
    /// px/s².
    #[must_use]
    pub fn new(deceleration: f32) -> Self {
        Self {
            mode: ScrollerMode::Idle,
            start: 0,
            current: 0,
            final_pos: 0,
            duration: Duration::ZERO,
            elapsed: Duration::ZERO,
            finished: true,
            velocity: 0.0,
            min: i32::MIN,
            max: i32::MAX,
            deceleration: deceleration.abs().max(1.0),
        }
    }

    /// Create a scroller from a friction coefficient and screen density.
    #[must_use]
    pub fn with_friction(friction: f32, pixels_per_inch: f32) -> Self {
        Self::new(deceleration(friction, pixels_per_inch))
    }

    /// Start a fixed-duration scroll from `start` by `delta`.
    pub fn start_scroll(&mut self, start: i32, delta: i32, duration: Duration) {
        self.mode = ScrollerMode::Scroll;
        self.start = start;
        self.current = start;
        self.final_pos = start.saturating_add(delta);
        self.duration = duration;
        self.elapsed = Duration::ZERO;
        self.finished = false;
        self.velocity = 0.0;
    }

    /// Start a fling from `start` with `velocity` px/s, bounded to
    /// `[min, max]`.
    pub fn fling(&mut self, start: i32, velocity: f32, min: i32, max: i32) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        let speed = velocity.abs();
        let secs = speed / self.deceleration;
        let distance = velocity.signum() * speed * speed / (2.0 * self.deceleration);

        self.mode = ScrollerMode::Fling;
        self.start = start;
        self.current = start.clamp(min, max);
        self.min = min;
        self.max = max;
        self.velocity = if speed > 0.0 { velocity } else { 0.0 };
        self.duration = Duration::try_from_secs_f32(secs).unwrap_or(Duration::MAX);
        self.final_pos = (start as f32 + distance).round().clamp(min as f32, max as f32) as i32;
        self.elapsed = Duration::ZERO;
        self.finished = false;
    }

    /// Translate the running motion by `delta` without changing its timing.
    ///
    /// Start, current and final positions move together; a fling's bounds
    /// move with them.
    pub fn offset_by(&mut self, delta: i32) {
        self.start = self.start.saturating_add(delta);
        self.current = self.current.saturating_add(delta);
        self.final_pos = self.final_pos.saturating_add(delta);
        if self.mode == ScrollerMode::Fling {
            self.min = self.min.saturating_add(delta);
            self.max = self.max.saturating_add(delta);
        }
    }

    /// Stop where the animation currently is.
    pub fn force_finished(&mut self) {
        self.final_pos = self.current;
        self.finished = true;
    }

    /// Current offset.
    #[inline]
    #[must_use]
    pub fn current(&self) -> i32 {
        self.current
    }

    /// Offset the animation will end at.
    #[inline]
    #[must_use]
    pub fn final_position(&self) -> i32 {
        self.final_pos
    }

    /// Offset the animation started from.
    #[inline]
    #[must_use]
    pub fn start(&self) -> i32 {
        self.start
    }

    /// Whether the animation has ended (or never started).
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Total duration of the current motion.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Current motion kind.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> ScrollerMode {
        self.mode
    }

    /// Advance by `dt`. Returns `true` while the animation is running.
    pub fn compute_offset(&mut self, dt: Duration) -> bool {
        if self.finished {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.duration {
            self.current = self.final_pos;
            self.finished = true;
            return true;
        }

        match self.mode {
            ScrollerMode::Idle => {
                self.finished = true;
            }
            ScrollerMode::Scroll => {
                let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
                let eased = viscous_fluid(t);
                let delta = (self.final_pos - self.start) as f32;
                self.current = self.start + (delta * eased).round() as i32;
            }
            ScrollerMode::Fling => {
                let t = self.elapsed.as_secs_f32();
                let speed = self.velocity.abs();
                let travelled = speed * t - 0.5 * self.deceleration * t * t;
                let pos = self.start as f32 + self.velocity.signum() * travelled;
                self.current = pos.round().clamp(self.min as f32, self.max as f32) as i32;
                if self.current == self.final_pos && (self.current == self.min || self.current == self.max)
                {
                    // Pinned at a bound: nothing left to animate.
                    self.finished = true;
                }
            }
        }
        true
    }
}

impl Animation for Scroller {
    fn tick(&mut self, dt: Duration) {
        self.compute_offset(dt);
    }

    fn is_complete(&self) -> bool {
        self.finished
    }

    fn value(&self) -> f32 {
        if self.finished || self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        if self.mode == ScrollerMode::Idle {
            return;
        }
        self.elapsed = Duration::ZERO;
        self.current = if self.mode == ScrollerMode::Fling {
            self.start.clamp(self.min, self.max)
        } else {
            self.start
        };
        self.finished = false;
    }
}
