#![forbid(unsafe_code)]

//! Area-density placement engine.
//!
//! [`PlacementEngine`] turns a sequence of fixed-size items into randomly
//! scattered, non-colliding-per-cell positions:
//!
//! 1. The item count sizes a [`DensityGrid`] of `lanes x depth` cells.
//! 2. Each new item takes the next free cell in fill order (from the head
//!    when appending, from the tail when prepending).
//! 3. Its position is the cell origin plus a uniform random jitter, clamped
//!    to the content box.
//! 4. Once placed, an item's bounds never change, except for the uniform
//!    scroll-axis translation applied when rows are inserted at the head.
//!
//! # Usage
//!
//! ```ignore
//! let mut engine = PlacementEngine::new(PlacementConfig::default().with_seed(7));
//! engine.set_source(Box::new(my_source));
//! let size = engine.measure(Size::new(800, 0));
//! engine.layout(Rect::from_size(size));
//! for item in engine.fixed() {
//!     draw(item.item(), item.bounds().unwrap());
//! }
//! ```
//!
//! # Invariants
//!
//! 1. Every placed item incremented exactly one grid cell, and no cell
//!    holds more than [`CELL_CAPACITY`] items.
//! 2. Grid depth never shrinks within a session.
//! 3. Appending never changes the bounds of placed items.
//! 4. Prepending translates placed items by exactly the change in content
//!    extent along the scroll axis; cross-axis coordinates are unchanged.
//! 5. The number of items generated equals the source count after a
//!    regeneration (items are never evicted).
//!
//! # Failure Modes
//!
//! - No source: every operation is a no-op.
//! - Cell smaller than the item: the jitter range is clamped to one unit,
//!   so the item sits at the cell origin (or is pulled back from the content
//!   edge).
//! - No free cell, or every strict attempt overlaps: the item stays pending
//!   and is retried on the next layout pass.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use scatter_core::error::{Error, Result};
use scatter_core::geometry::{Orientation, Rect, Sides, Size};
use scatter_core::{debug, trace};

use crate::config::{Growth, PlacementConfig};
use crate::grid::{CELL_CAPACITY, Cell, DensityGrid};
use crate::pool::RecyclePool;
use crate::source::ItemSource;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Unused cells at each end of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FreeSlots {
    /// Unused cells before the first placed item.
    pub start: usize,
    /// Unused cells after the last placed item.
    pub end: usize,
}

/// An item held by the engine, placed or waiting for a layout pass.
#[derive(Debug, Clone)]
pub struct PlacedItem<T> {
    index: usize,
    item: T,
    size: Size,
    bounds: Option<Rect>,
    cell: Option<Cell>,
    scale: f32,
}

impl<T> PlacedItem<T> {
    fn pending(index: usize, item: T, size: Size) -> Self {
        Self {
            index,
            item,
            size,
            bounds: None,
            cell: None,
            scale: 1.0,
        }
    }

    fn unplace(&mut self) {
        self.bounds = None;
        self.cell = None;
        self.scale = 1.0;
    }

    /// Source index the item was generated for.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The item instance.
    #[inline]
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Mutable access to the item instance.
    #[inline]
    pub fn item_mut(&mut self) -> &mut T {
        &mut self.item
    }

    /// Declared size.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Committed bounds, `None` while pending.
    #[inline]
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Grid cell the item occupies, `None` while pending.
    #[inline]
    pub fn cell(&self) -> Option<Cell> {
        self.cell
    }

    /// Edge-scale factor (1.0 when fully visible).
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Whether the item has committed bounds.
    #[inline]
    pub fn is_placed(&self) -> bool {
        self.bounds.is_some()
    }
}

/// Result of a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutOutcome {
    /// Items placed during this pass.
    pub placed: usize,
    /// Items still pending after this pass.
    pub deferred: usize,
    /// Scroll-axis translation applied to previously placed items.
    pub head_shift: i32,
    /// Outer size the pass laid out into.
    pub size: Size,
}

// ---------------------------------------------------------------------------
// Cell geometry
// ---------------------------------------------------------------------------

/// Cell-to-rectangle mapping for one layout pass.
struct CellGeometry {
    orientation: Orientation,
    content: Rect,
    cell_main: f32,
    cell_cross: f32,
}

impl CellGeometry {
    fn new(orientation: Orientation, content: Rect, lanes: usize, depth: usize) -> Self {
        let size = content.size();
        Self {
            orientation,
            content,
            cell_main: orientation.main(size) as f32 / depth.max(1) as f32,
            cell_cross: orientation.cross(size) as f32 / lanes.max(1) as f32,
        }
    }

    /// Random rectangle for an item of `size` inside `cell`.
    ///
    /// Jitter is drawn cross axis first, then main axis, in both
    /// orientations, so swapping the orientation transposes the result.
    fn place(&self, cell: Cell, size: Size, rng: &mut SmallRng) -> Rect {
        let o = self.orientation;
        let item_main = o.main(size);
        let item_cross = o.cross(size);

        let cross_jitter = (self.cell_cross as i32 - item_cross).max(1);
        let main_jitter = (self.cell_main as i32 - item_main).max(1);
        let cross_roll = rng.random_range(0..cross_jitter);
        let main_roll = rng.random_range(0..main_jitter);

        let cross_start = o.cross_start(&self.content);
        let main_start = o.main_start(&self.content);
        let cross_end = cross_start + o.cross(self.content.size());
        let main_end = main_start + o.main(self.content.size());

        let cross = (cross_start
            + (self.cell_cross * cell.lane as f32 + cross_roll as f32) as i32)
            .min(cross_end - item_cross);
        let main = (main_start + (self.cell_main * cell.row as f32 + main_roll as f32) as i32)
            .min(main_end - item_main);

        o.rect(main, cross, item_main, item_cross)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Randomized, grid-balanced placement of a growing item sequence.
pub struct PlacementEngine<T> {
    config: PlacementConfig,
    source: Option<Box<dyn ItemSource<Item = T>>>,
    grid: DensityGrid,
    free: FreeSlots,
    /// Arena in generation order.
    items: Vec<PlacedItem<T>>,
    pool: RecyclePool<T>,
    rng: SmallRng,
    /// Outer bounds of the last layout pass.
    bounds: Option<Rect>,
    /// Content extent along the scroll axis at the last layout pass.
    last_main_extent: Option<i32>,
    /// Rows inserted at the head since the last layout pass.
    head_rows_pending: usize,
}

impl<T> std::fmt::Debug for PlacementEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacementEngine")
            .field("lanes", &self.grid.lanes())
            .field("depth", &self.grid.depth())
            .field("items", &self.items.len())
            .field("fixed", &self.fixed_count())
            .field("free", &self.free)
            .field("pooled", &self.pool.len())
            .finish_non_exhaustive()
    }
}

impl<T> PlacementEngine<T> {
    /// Create an engine with no source.
    #[must_use]
    pub fn new(config: PlacementConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let pool = match config.max_recycled {
            Some(cap) => RecyclePool::with_cap(cap),
            None => RecyclePool::new(),
        };
        Self {
            grid: DensityGrid::new(config.lanes.max(1), 0),
            config,
            source: None,
            free: FreeSlots::default(),
            items: Vec::new(),
            pool,
            rng,
            bounds: None,
            last_main_extent: None,
            head_rows_pending: 0,
        }
    }

    // -- Configuration ------------------------------------------------------

    /// Install the item source and regenerate everything from it.
    pub fn set_source(&mut self, source: Box<dyn ItemSource<Item = T>>) -> LayoutOutcome {
        self.source = Some(source);
        self.refresh()
    }

    /// Whether a source is installed.
    #[must_use]
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Change the number of lanes.
    ///
    /// Rejects zero. The same lane count only re-checks depth; a different
    /// one rebuilds the grid at the new width and re-places every item.
    pub fn set_lane_count(&mut self, lanes: usize) -> Result<()> {
        if lanes < 1 {
            return Err(Error::invalid_lanes(lanes));
        }
        self.config.lanes = lanes;
        if lanes == self.grid.lanes() {
            self.update_depth(self.items.len());
            return Ok(());
        }

        debug!(
            message = "placement.lanes",
            from = self.grid.lanes(),
            to = lanes,
            items = self.items.len()
        );
        self.grid = DensityGrid::new(lanes, 0);
        self.free = FreeSlots::default();
        self.update_depth(self.items.len());
        self.redistribute();
        Ok(())
    }

    /// Choose where new items join the sequence.
    pub fn set_growth(&mut self, growth: Growth) {
        self.config.growth = growth;
    }

    /// Switch the scroll axis.
    ///
    /// Every item is un-placed; positions are rolled again on the next
    /// [`layout`](Self::layout) call with bounds for the new axis.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.config.orientation == orientation {
            return;
        }
        self.config.orientation = orientation;
        self.unplace_all();
        self.bounds = None;
        self.last_main_extent = None;
    }

    /// Reseed the jitter generator.
    pub fn set_seed(&mut self, seed: u64) {
        self.config.seed = Some(seed);
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// Enable or disable strict (overlap-free) placement.
    pub fn set_strict(&mut self, strict: bool) {
        self.config.strict = strict;
    }

    /// Padding between layout bounds and the content box.
    pub fn set_padding(&mut self, padding: Sides) {
        self.config.padding = padding;
    }

    // -- Regeneration -------------------------------------------------------

    /// Generate the items the source added since the last pass, then lay
    /// them out if the engine has been laid out before.
    ///
    /// A source that shrank cannot be handled incrementally and triggers a
    /// full [`refresh`](Self::refresh).
    pub fn regenerate(&mut self) -> LayoutOutcome {
        let Some(source) = self.source.as_mut() else {
            return LayoutOutcome::default();
        };
        let count = source.count();
        let generated = self.items.len();
        if count < generated {
            debug!(message = "placement.shrink", count, generated);
            return self.refresh();
        }

        self.update_depth(count);

        // Re-borrow: update_depth needed all of self.
        let Some(source) = self.source.as_mut() else {
            return LayoutOutcome::default();
        };
        for index in generated..count {
            let mut candidate = self.pool.pop();
            let item = source.content(index, &mut candidate);
            self.pool.push(candidate);
            let size = source.declared_size(&item);
            self.items.push(PlacedItem::pending(index, item, size));
        }
        trace!(
            message = "placement.generate",
            generated = count - generated,
            pooled = self.pool.len()
        );

        self.relayout()
    }

    /// Detach every item into the recycle pool and zero the grid.
    ///
    /// The grid keeps its depth.
    pub fn reset(&mut self) {
        // Reverse so the first item is popped first on regeneration.
        for placed in self.items.drain(..).rev() {
            self.pool.push(Some(placed.item));
        }
        self.grid.clear();
        self.free = FreeSlots::default();
        self.last_main_extent = None;
        self.head_rows_pending = 0;
    }

    /// Reset, then regenerate every index from the source.
    pub fn refresh(&mut self) -> LayoutOutcome {
        self.reset();
        self.regenerate()
    }

    /// Roll new positions for every held item without consulting the
    /// source.
    pub fn redistribute(&mut self) -> LayoutOutcome {
        self.unplace_all();
        self.last_main_extent = None;
        self.relayout()
    }

    fn unplace_all(&mut self) {
        self.grid.clear();
        self.head_rows_pending = 0;
        for placed in &mut self.items {
            placed.unplace();
        }
    }

    /// Grow the grid for `count` items and recompute the free counter at the
    /// active growth edge.
    fn update_depth(&mut self, count: usize) {
        let lanes = self.grid.lanes();
        let at_tail = self.config.growth.at_tail();
        let opposite = if at_tail { self.free.start } else { self.free.end };

        let needed = (count + opposite).div_ceil(lanes);
        let added = self.grid.grow_to(needed, at_tail);
        if added > 0 {
            debug!(
                message = "placement.extend",
                rows = added,
                at_tail,
                depth = self.grid.depth()
            );
            if !at_tail {
                self.head_rows_pending += added;
                for placed in &mut self.items {
                    if let Some(cell) = placed.cell.as_mut() {
                        cell.row += added;
                    }
                }
            }
        }

        let active = self.grid.cell_count().saturating_sub(count + opposite);
        if at_tail {
            self.free.end = active;
        } else {
            self.free.start = active;
        }
    }

    // -- Measure / layout ---------------------------------------------------

    /// Desired outer size: the cross axis fills `available`; the scroll axis
    /// gets `depth * largest item * measure_factor`, plus padding.
    #[must_use]
    pub fn measure(&self, available: Size) -> Size {
        let o = self.config.orientation;
        let cross = o.cross(available);
        let padding = o.main(Size::new(
            self.config.padding.horizontal_sum(),
            self.config.padding.vertical_sum(),
        ));
        let largest = self.items.iter().map(|p| o.main(p.size)).max().unwrap_or(0);
        if largest == 0 {
            return o.size(0, cross);
        }
        let main = (self.grid.depth() as f32 * largest as f32 * self.config.measure_factor) as i32;
        o.size(main + padding, cross)
    }

    /// Place every pending item inside `bounds` (outer box; padding is
    /// subtracted here).
    pub fn layout(&mut self, bounds: Rect) -> LayoutOutcome {
        let o = self.config.orientation;
        let content = bounds.inner(self.config.padding);
        let main_extent = o.main(content.size());
        self.bounds = Some(bounds);

        let mut outcome = LayoutOutcome {
            size: bounds.size(),
            ..LayoutOutcome::default()
        };

        if let Some(last) = self.last_main_extent.filter(|_| self.head_rows_pending > 0) {
            let delta = main_extent - last;
            if delta != 0 {
                for placed in &mut self.items {
                    if let Some(rect) = placed.bounds {
                        placed.bounds = Some(o.shift(rect, delta));
                    }
                }
                outcome.head_shift = delta;
            }
        }
        self.head_rows_pending = 0;
        self.last_main_extent = Some(main_extent);

        if self.items.is_empty() {
            return outcome;
        }

        let geometry = CellGeometry::new(o, content, self.grid.lanes(), self.grid.depth());
        let from_head = self.config.growth.at_tail();
        let skip = if from_head { self.free.start } else { self.free.end };

        for i in 0..self.items.len() {
            if self.items[i].bounds.is_some() {
                continue;
            }
            let Some(cell) = self.grid.first_available_cell(CELL_CAPACITY, from_head, skip) else {
                outcome.deferred += 1;
                continue;
            };
            let size = self.items[i].size;
            let Some(rect) = self.roll(&geometry, cell, size) else {
                outcome.deferred += 1;
                continue;
            };

            self.grid.increment(cell);
            let placed = &mut self.items[i];
            placed.bounds = Some(rect);
            placed.cell = Some(cell);
            outcome.placed += 1;
        }

        debug!(
            message = "placement.layout",
            placed = outcome.placed,
            deferred = outcome.deferred,
            head_shift = outcome.head_shift,
            depth = self.grid.depth(),
            lanes = self.grid.lanes()
        );
        outcome
    }

    /// Lay out again into the last bounds, resized to the measured extent.
    fn relayout(&mut self) -> LayoutOutcome {
        let Some(bounds) = self.bounds else {
            return LayoutOutcome {
                deferred: self.pending_count(),
                ..LayoutOutcome::default()
            };
        };
        let size = self.measure(bounds.size());
        self.layout(Rect::new(bounds.x, bounds.y, size.width, size.height))
    }

    /// Candidate rectangle for `cell`, honoring strict mode.
    fn roll(&mut self, geometry: &CellGeometry, cell: Cell, size: Size) -> Option<Rect> {
        if !self.config.strict {
            return Some(geometry.place(cell, size, &mut self.rng));
        }
        let margin = self.config.overlap_margin;
        for _ in 0..self.config.strict_attempts.max(1) {
            let rect = geometry.place(cell, size, &mut self.rng);
            if !self.overlaps_placed(&rect, margin) {
                return Some(rect);
            }
        }
        debug!(message = "placement.strict_defer", row = cell.row, lane = cell.lane);
        None
    }

    /// Whether `rect` (grown by `margin`) touches any placed item.
    #[must_use]
    pub fn overlaps_placed(&self, rect: &Rect, margin: i32) -> bool {
        self.items
            .iter()
            .filter_map(|p| p.bounds)
            .any(|b| b.overlaps_with_margin(rect, margin))
    }

    // -- Edge scale ---------------------------------------------------------

    /// Shrink items that stick out of the visible window
    /// `[view_start, view_start + view_extent)` along the scroll axis.
    ///
    /// The scale is `1 - out / extent`, floored at the configured minimum,
    /// where `out` is how far the item crosses the window edge.
    pub fn apply_edge_scale(&mut self, view_start: i32, view_extent: i32) {
        let o = self.config.orientation;
        let floor = self.config.min_edge_scale.clamp(0.0, 1.0);
        for placed in &mut self.items {
            let Some(rect) = placed.bounds else {
                continue;
            };
            let extent = o.main(rect.size());
            if extent <= 0 {
                placed.scale = 1.0;
                continue;
            }
            let pos = o.main_start(&rect) - view_start;
            let mut out = 0;
            if pos < 0 {
                out = -pos;
            }
            if pos + extent > view_extent {
                out = pos + extent - view_extent;
            }
            placed.scale = (1.0 - out as f32 / extent as f32).max(floor);
        }
    }

    // -- Queries ------------------------------------------------------------

    /// Every held item in generation order.
    #[must_use]
    pub fn items(&self) -> &[PlacedItem<T>] {
        &self.items
    }

    /// Items with committed bounds.
    pub fn fixed(&self) -> impl Iterator<Item = &PlacedItem<T>> {
        self.items.iter().filter(|p| p.is_placed())
    }

    /// Number of items with committed bounds.
    #[must_use]
    pub fn fixed_count(&self) -> usize {
        self.items.iter().filter(|p| p.is_placed()).count()
    }

    /// Number of items waiting for a layout pass.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.items.len() - self.fixed_count()
    }

    /// Item generated for source index `index`.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&PlacedItem<T>> {
        self.items.iter().find(|p| p.index == index)
    }

    /// The density grid.
    #[must_use]
    pub fn grid(&self) -> &DensityGrid {
        &self.grid
    }

    /// Free cells at each end of the grid.
    #[must_use]
    pub fn free_slots(&self) -> FreeSlots {
        self.free
    }

    /// Number of pooled items.
    #[must_use]
    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    /// Current depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.grid.depth()
    }

    /// Current lane count.
    #[must_use]
    pub fn lanes(&self) -> usize {
        self.grid.lanes()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Scroll axis.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    /// Growth direction.
    #[must_use]
    pub fn growth(&self) -> Growth {
        self.config.growth
    }

    /// Outer bounds of the last layout pass.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Whether at least one layout pass ran.
    #[must_use]
    pub fn has_layout(&self) -> bool {
        self.last_main_extent.is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
