#![forbid(unsafe_code)]

//! Touch input events.
//!
//! Hosts translate their native pointer events into [`TouchEvent`]s.
//! Consumers follow the pointer that went down first and drop samples from
//! any other `pointer_id` until it is released. Coordinates are in the
//! scroll surface's own (unscrolled) coordinate space.

use web_time::Instant;

/// Phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchKind {
    /// Primary pointer went down.
    Down,
    /// Pointer moved while down.
    Move,
    /// Pointer lifted.
    Up,
    /// Gesture was taken away (e.g. by an ancestor).
    Cancel,
}

impl TouchKind {
    /// Whether this kind ends the gesture.
    #[inline]
    pub const fn is_release(self) -> bool {
        matches!(self, Self::Up | Self::Cancel)
    }
}

/// A single touch sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub kind: TouchKind,
    pub x: f32,
    pub y: f32,
    /// Pointer identifier reported by the host.
    pub pointer_id: u32,
    /// When the sample was taken.
    pub time: Instant,
}

impl TouchEvent {
    /// Create an event for pointer 0.
    #[must_use]
    pub fn new(kind: TouchKind, x: f32, y: f32, time: Instant) -> Self {
        Self {
            kind,
            x,
            y,
            pointer_id: 0,
            time,
        }
    }

    /// Pointer down at `(x, y)`.
    #[must_use]
    pub fn down(x: f32, y: f32, time: Instant) -> Self {
        Self::new(TouchKind::Down, x, y, time)
    }

    /// Pointer moved to `(x, y)`.
    #[must_use]
    pub fn moved(x: f32, y: f32, time: Instant) -> Self {
        Self::new(TouchKind::Move, x, y, time)
    }

    /// Pointer lifted at `(x, y)`.
    #[must_use]
    pub fn up(x: f32, y: f32, time: Instant) -> Self {
        Self::new(TouchKind::Up, x, y, time)
    }

    /// Gesture cancelled at `(x, y)`.
    #[must_use]
    pub fn cancel(x: f32, y: f32, time: Instant) -> Self {
        Self::new(TouchKind::Cancel, x, y, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind() {
        let now = Instant::now();
        assert_eq!(TouchEvent::down(1.0, 2.0, now).kind, TouchKind::Down);
        assert_eq!(TouchEvent::moved(1.0, 2.0, now).kind, TouchKind::Move);
        assert_eq!(TouchEvent::up(1.0, 2.0, now).kind, TouchKind::Up);
        assert_eq!(TouchEvent::cancel(1.0, 2.0, now).kind, TouchKind::Cancel);
    }

    #[test]
    fn release_kinds() {
        assert!(TouchKind::Up.is_release());
        assert!(TouchKind::Cancel.is_release());
        assert!(!TouchKind::Down.is_release());
        assert!(!TouchKind::Move.is_release());
    }
}
