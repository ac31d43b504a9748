#![forbid(unsafe_code)]

//! Tick-driven animations.
//!
//! An [`Animation`] advances only when the host calls [`Animation::tick`]
//! with the elapsed frame time. Nothing here sleeps or spawns: a multi-frame
//! animation is a value that is ticked until [`Animation::is_complete`].

use std::time::Duration;

pub mod scroller;

pub use scroller::{Scroller, ScrollerMode};

/// A time-driven animation.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation reached its end state.
    fn is_complete(&self) -> bool;

    /// Normalized progress in `[0.0, 1.0]`.
    fn value(&self) -> f32;

    /// Rewind to the initial state.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

const VISCOUS_FLUID_SCALE: f32 = 8.0;

fn viscous_fluid_raw(t: f32) -> f32 {
    let x = t * VISCOUS_FLUID_SCALE;
    if x < 1.0 {
        x - (1.0 - (-x).exp())
    } else {
        // 1/e: value of the first segment at x == 1.
        let start = 0.367_879_44;
        start + (1.0 - (1.0 - x).exp()) * (1.0 - start)
    }
}

/// Viscous-fluid easing: accelerates briefly, then decays exponentially.
///
/// Normalized so that `viscous_fluid(1.0) == 1.0`.
#[inline]
pub fn viscous_fluid(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t >= 1.0 {
        return 1.0;
    }
    (viscous_fluid_raw(t) / viscous_fluid_raw(1.0)).min(1.0)
}
