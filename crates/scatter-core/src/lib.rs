// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: geometry, touch input, velocity tracking, and scroll animation.
//!
//! # Role in Scatter
//! `scatter-core` holds the pieces both halves of Scatter share. The
//! placement engine (`scatter-layout`) uses its geometry and orientation
//! helpers; the scroll controller (`scatter-widgets`) uses its touch events,
//! velocity tracker, and [`Scroller`](animation::Scroller).
//!
//! # Primary responsibilities
//! - **Geometry**: signed [`Rect`](geometry::Rect), [`Size`](geometry::Size),
//!   [`Sides`](geometry::Sides), and main/cross axis mapping through
//!   [`Orientation`](geometry::Orientation).
//! - **Input**: [`TouchEvent`](event::TouchEvent) and
//!   [`VelocityTracker`](velocity::VelocityTracker).
//! - **Animation**: the tick-driven [`Animation`](animation::Animation)
//!   trait and the fling/return [`Scroller`](animation::Scroller).
//! - **Host contract**: [`Host`](host::Host) and
//!   [`ScrollHost`](host::ScrollHost) callbacks.

pub mod animation;
pub mod error;
pub mod event;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod velocity;

pub use error::{Error, Result};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
