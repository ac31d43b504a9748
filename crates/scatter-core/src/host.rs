#![forbid(unsafe_code)]

//! Callbacks the host container provides.
//!
//! Scatter never holds a reference to its host. Every entry point that may
//! need to call back takes the host as an argument, so the engine and the
//! controller stay free of back-references.

/// One end of the scrollable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Offset 0.
    Start,
    /// Offset `content - viewport`.
    End,
}

/// Host services shared by every Scatter surface.
///
/// All methods default to no-ops so hosts only implement what they use.
pub trait Host {
    /// Schedule a measure/layout pass.
    fn request_layout(&mut self) {}

    /// Schedule the next animation tick (redraw/invalidate next frame).
    fn request_tick(&mut self) {}

    /// Ask the enclosing container to stop (`true`) or resume (`false`)
    /// intercepting the current touch stream.
    fn request_disallow_intercept(&mut self, _disallow: bool) {}

    /// The scroll offset changed from `old` to `offset`.
    fn on_scroll_changed(&mut self, _offset: i32, _old: i32) {}

    /// A rubber-band return toward `edge` started.
    fn on_edge_reached(&mut self, _edge: Edge) {}
}

/// Extents a scroll controller reads from its host.
pub trait ScrollHost: Host {
    /// Visible extent along the scroll axis.
    fn viewport_extent(&self) -> i32;

    /// Full content extent along the scroll axis.
    fn content_extent(&self) -> i32;
}

/// A host that ignores every callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHost;

impl Host for NoopHost {}
