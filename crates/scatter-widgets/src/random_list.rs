#![forbid(unsafe_code)]

//! A scrollable list of randomly scattered items.
//!
//! [`RandomList`] composes a [`PlacementEngine`] (where items go) with a
//! [`ScrollController`] (which part of the content is visible). The host
//! owns the surface and forwards measure, layout, touch, and tick calls;
//! every call that may need a callback takes the host as an argument.
//!
//! Coordinates: item bounds live in content space, starting at `(0, 0)`.
//! [`RandomList::visible`] maps them into viewport space for painting.

use std::time::Duration;

use scatter_core::error::{Error, Result};
use scatter_core::event::TouchEvent;
use scatter_core::geometry::{Orientation, Rect, Sides, Size};
use scatter_core::host::{Edge, Host, ScrollHost};
use scatter_layout::{
    Growth, ItemSource, LayoutOutcome, PlacedItem, PlacementConfig, PlacementEngine,
};

use crate::scroll::{ScrollConfig, ScrollController, ScrollPhase};

/// Adapts a plain [`Host`] into a [`ScrollHost`] with the list's extents.
struct Bridge<'a> {
    host: &'a mut dyn Host,
    viewport: i32,
    content: i32,
}

impl Host for Bridge<'_> {
    fn request_layout(&mut self) {
        self.host.request_layout();
    }

    fn request_tick(&mut self) {
        self.host.request_tick();
    }

    fn request_disallow_intercept(&mut self, disallow: bool) {
        self.host.request_disallow_intercept(disallow);
    }

    fn on_scroll_changed(&mut self, offset: i32, old: i32) {
        self.host.on_scroll_changed(offset, old);
    }

    fn on_edge_reached(&mut self, edge: Edge) {
        self.host.on_edge_reached(edge);
    }
}

impl ScrollHost for Bridge<'_> {
    fn viewport_extent(&self) -> i32 {
        self.viewport
    }

    fn content_extent(&self) -> i32 {
        self.content
    }
}

/// Scrollable, randomly scattered item list.
pub struct RandomList<T> {
    engine: PlacementEngine<T>,
    controller: ScrollController,
    viewport: Rect,
    content: Size,
}

impl<T> std::fmt::Debug for RandomList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomList")
            .field("engine", &self.engine)
            .field("controller", &self.controller)
            .field("viewport", &self.viewport)
            .field("content", &self.content)
            .finish()
    }
}

impl<T> Default for RandomList<T> {
    fn default() -> Self {
        Self::new(PlacementConfig::default(), ScrollConfig::default())
    }
}

impl<T> RandomList<T> {
    #[must_use]
    pub fn new(placement: PlacementConfig, scroll: ScrollConfig) -> Self {
        let orientation = placement.orientation;
        Self {
            engine: PlacementEngine::new(placement),
            controller: ScrollController::new(scroll, orientation),
            viewport: Rect::default(),
            content: Size::ZERO,
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[must_use]
    pub fn engine(&self) -> &PlacementEngine<T> {
        &self.engine
    }

    #[must_use]
    pub fn controller(&self) -> &ScrollController {
        &self.controller
    }

    /// Current scroll offset along the scroll axis.
    #[must_use]
    pub fn offset(&self) -> i32 {
        self.controller.offset()
    }

    #[must_use]
    pub fn phase(&self) -> ScrollPhase {
        self.controller.phase()
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.engine.orientation()
    }

    /// Viewport given to the last [`layout`](Self::layout) call.
    #[must_use]
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Content size from the last layout pass.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content
    }

    /// Placed items that intersect the viewport, with their bounds in
    /// viewport coordinates.
    pub fn visible(&self) -> impl Iterator<Item = (&PlacedItem<T>, Rect)> + '_ {
        let o = self.orientation();
        let offset = self.offset();
        let viewport = self.viewport;
        self.engine.fixed().filter_map(move |placed| {
            let bounds = placed.bounds()?;
            let screen = o
                .shift(bounds, -offset)
                .translate(viewport.x, viewport.y);
            screen.intersection_opt(&viewport).map(|_| (placed, screen))
        })
    }

    // -- Configuration ------------------------------------------------------

    /// Install the item source and regenerate every item.
    pub fn set_source(&mut self, source: Box<dyn ItemSource<Item = T>>, host: &mut dyn Host) {
        self.engine.set_source(source);
        host.request_layout();
    }

    /// The source count changed: generate the new items and keep the
    /// viewport anchored on the content that was already visible.
    pub fn notify_data_changed(&mut self, host: &mut dyn Host) -> LayoutOutcome {
        let outcome = self.engine.regenerate();
        self.after_engine_pass(outcome, host);
        host.request_layout();
        outcome
    }

    /// Drop every item and regenerate from scratch.
    pub fn refresh(&mut self, host: &mut dyn Host) -> LayoutOutcome {
        let outcome = self.engine.refresh();
        self.after_engine_pass(outcome, host);
        host.request_layout();
        outcome
    }

    /// Switch the scroll axis; items are re-placed on the next layout.
    pub fn set_orientation(&mut self, orientation: Orientation, host: &mut dyn Host) {
        if self.orientation() == orientation {
            return;
        }
        self.engine.set_orientation(orientation);
        self.controller.set_orientation(orientation);
        self.content = Size::ZERO;
        host.request_layout();
    }

    pub fn set_growth(&mut self, growth: Growth) {
        self.engine.set_growth(growth);
    }

    pub fn set_lane_count(&mut self, lanes: usize, host: &mut dyn Host) -> Result<()> {
        self.engine.set_lane_count(lanes)?;
        host.request_layout();
        Ok(())
    }

    pub fn set_padding(&mut self, padding: Sides, host: &mut dyn Host) {
        self.engine.set_padding(padding);
        host.request_layout();
    }

    /// Axis of an enclosing scroll container, for gesture arbitration.
    pub fn set_parent_orientation(&mut self, parent: Option<Orientation>) {
        self.controller.set_parent_orientation(parent);
    }

    // -- Measure / layout ---------------------------------------------------

    /// Content size the list wants for a viewport of `available`.
    #[must_use]
    pub fn measure(&self, available: Size) -> Size {
        self.engine.measure(available)
    }

    /// Lay the content out for `viewport`.
    pub fn layout(&mut self, viewport: Rect, host: &mut dyn Host) -> LayoutOutcome {
        self.viewport = viewport;
        let content = self.engine.measure(viewport.size());
        let outcome = self.engine.layout(Rect::from_size(content));
        self.after_engine_pass(outcome, host);
        outcome
    }

    fn after_engine_pass(&mut self, outcome: LayoutOutcome, host: &mut dyn Host) {
        if let Some(bounds) = self.engine.bounds() {
            self.content = bounds.size();
        }
        let mut bridge = self.bridge(host);
        self.controller.compensate(outcome.head_shift, &mut bridge);
        self.refresh_edge_scale();
    }

    // -- Input --------------------------------------------------------------

    pub fn on_intercept(&mut self, event: &TouchEvent) -> bool {
        self.controller.on_intercept(event)
    }

    pub fn on_touch(&mut self, event: &TouchEvent, host: &mut dyn Host) -> bool {
        let before = self.offset();
        let mut bridge = self.bridge(host);
        let handled = self.controller.on_touch(event, &mut bridge);
        if self.offset() != before {
            self.refresh_edge_scale();
        }
        handled
    }

    /// Advance a running settle. Returns whether another tick is needed.
    pub fn on_tick(&mut self, dt: Duration, host: &mut dyn Host) -> bool {
        let before = self.offset();
        let mut bridge = self.bridge(host);
        let running = self.controller.on_tick(dt, &mut bridge);
        if self.offset() != before {
            self.refresh_edge_scale();
        }
        running
    }

    // -- Scrolling ----------------------------------------------------------

    pub fn scroll_to(&mut self, offset: i32, host: &mut dyn Host) {
        let mut bridge = self.bridge(host);
        self.controller.scroll_to(offset, &mut bridge);
        self.refresh_edge_scale();
    }

    /// Scroll so item `index` starts at the viewport's leading edge (as far
    /// as the content allows).
    ///
    /// Pending items are not scrolled to.
    pub fn set_current_item(&mut self, index: usize, smooth: bool, host: &mut dyn Host) -> Result<()> {
        let count = self.engine.items().len();
        let placed = self
            .engine
            .items()
            .get(index)
            .ok_or_else(|| Error::out_of_range(index, count))?;
        let Some(bounds) = placed.bounds() else {
            return Ok(());
        };

        let max = (self.content_extent() - self.viewport_extent()).max(0);
        let target = self.orientation().main_start(&bounds).clamp(0, max);
        let mut bridge = self.bridge(host);
        if smooth {
            let delta = target - self.controller.offset();
            self.controller.smooth_scroll_by(delta, &mut bridge);
        } else {
            self.controller.scroll_to(target, &mut bridge);
            self.refresh_edge_scale();
        }
        Ok(())
    }

    // -- Internals ----------------------------------------------------------

    fn viewport_extent(&self) -> i32 {
        self.orientation().main(self.viewport.size())
    }

    fn content_extent(&self) -> i32 {
        self.orientation().main(self.content)
    }

    fn bridge<'a>(&self, host: &'a mut dyn Host) -> Bridge<'a> {
        Bridge {
            host,
            viewport: self.viewport_extent(),
            content: self.content_extent(),
        }
    }

    fn refresh_edge_scale(&mut self) {
        let offset = self.controller.offset();
        let extent = self.viewport_extent();
        self.engine.apply_edge_scale(offset, extent);
    }
}
