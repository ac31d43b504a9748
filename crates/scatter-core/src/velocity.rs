#![forbid(unsafe_code)]

//! Pointer velocity estimation.
//!
//! [`VelocityTracker`] keeps a short history of touch samples and fits a
//! least-squares line through the ones that fall inside the sample horizon.
//! The slope of that line is the release velocity used to start a fling.
//!
//! # Invariants
//!
//! 1. A `Down` sample clears the history before it is recorded, so velocity
//!    never leaks between gestures.
//! 2. Only the pointer that went down (or, for a stream that began without a
//!    down, the first pointer seen) contributes samples.
//! 3. Fewer than two samples in the horizon yields zero velocity.
//! 4. Each component of the result is clamped to `[-max, max]`.
//!
//! # Failure Modes
//!
//! - Samples with identical timestamps: the fit degenerates and the
//!   component is reported as zero rather than infinite.

use std::collections::VecDeque;
use std::time::Duration;

use web_time::Instant;

use crate::event::{TouchEvent, TouchKind};

/// Maximum number of retained samples.
const HISTORY_LEN: usize = 20;

/// Default sample horizon: samples older than this (relative to the newest)
/// are ignored.
pub const DEFAULT_HORIZON: Duration = Duration::from_millis(100);

/// A 2-D velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    /// Zero velocity.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    x: f32,
    y: f32,
    time: Instant,
}

/// Tracks recent pointer samples for release-velocity computation.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    samples: VecDeque<Sample>,
    horizon: Duration,
    pointer: Option<u32>,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HORIZON)
    }
}

impl VelocityTracker {
    /// Create a tracker using samples no older than `horizon`.
    #[must_use]
    pub fn new(horizon: Duration) -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_LEN),
            horizon,
            pointer: None,
        }
    }

    /// Record a touch sample from the tracked pointer.
    pub fn add(&mut self, event: &TouchEvent) {
        if event.kind == TouchKind::Down {
            self.samples.clear();
            self.pointer = Some(event.pointer_id);
        }
        match self.pointer {
            Some(id) if id != event.pointer_id => return,
            Some(_) => {}
            None => self.pointer = Some(event.pointer_id),
        }
        if self.samples.len() == HISTORY_LEN {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample {
            x: event.x,
            y: event.y,
            time: event.time,
        });
    }

    /// Forget all samples and the tracked pointer.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.pointer = None;
    }

    /// Number of retained samples.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples are retained.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Velocity expressed in pixels per `units` (1 s gives px/s), with each
    /// component clamped to `[-max, max]`.
    #[must_use]
    pub fn compute(&self, units: Duration, max: f32) -> Velocity {
        let Some(newest) = self.samples.back() else {
            return Velocity::ZERO;
        };

        // (seconds before newest, x, y), newest last.
        let window: Vec<(f32, f32, f32)> = self
            .samples
            .iter()
            .filter(|s| newest.time.saturating_duration_since(s.time) <= self.horizon)
            .map(|s| {
                let age = newest.time.saturating_duration_since(s.time).as_secs_f32();
                (-age, s.x, s.y)
            })
            .collect();

        if window.len() < 2 {
            return Velocity::ZERO;
        }

        let scale = units.as_secs_f32();
        let max = max.abs();
        Velocity {
            x: (slope(window.iter().map(|&(t, x, _)| (t, x))) * scale).clamp(-max, max),
            y: (slope(window.iter().map(|&(t, _, y)| (t, y))) * scale).clamp(-max, max),
        }
    }
}

/// Least-squares slope of `(t, p)` points. Zero when `t` has no spread.
fn slope(points: impl Iterator<Item = (f32, f32)> + Clone) -> f32 {
    let n = points.clone().count() as f32;
    let (sum_t, sum_p) = points
        .clone()
        .fold((0.0f32, 0.0f32), |(st, sp), (t, p)| (st + t, sp + p));
    let (mean_t, mean_p) = (sum_t / n, sum_p / n);

    let (num, den) = points.fold((0.0f32, 0.0f32), |(num, den), (t, p)| {
        let dt = t - mean_t;
        (num + dt * (p - mean_p), den + dt * dt)
    });

    if den <= f32::EPSILON { 0.0 } else { num / den }
}
