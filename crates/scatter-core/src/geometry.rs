#![forbid(unsafe_code)]

//! Geometric primitives and axis helpers.
//!
//! Coordinates are signed: prepending content translates existing items
//! along the scroll axis, and scroll offsets may overshoot below zero while
//! the rubber band is stretched.
//!
//! [`Orientation`] names the scroll axis. Everything that is orientation
//! aware is written against a *main* axis (the scroll axis) and a *cross*
//! axis (the lanes), and converted back to `x`/`y` at the edges. Swapping
//! orientation therefore transposes every result exactly.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Swap width and height.
    #[inline]
    #[must_use]
    pub const fn transpose(self) -> Self {
        Self::new(self.height, self.width)
    }

    /// Check if either dimension is non-positive.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// A rectangle for item bounds, content boxes, and viewports.
///
/// Origin at top-left; `right()` and `bottom()` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Create a rectangle from its four edges.
    #[inline]
    pub const fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Width and height as a [`Size`].
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Move the rectangle by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Mirror the rectangle across the main diagonal.
    #[inline]
    #[must_use]
    pub const fn transpose(self) -> Self {
        Self::new(self.y, self.x, self.height, self.width)
    }

    /// Create a new rectangle inside the current one with the given margin.
    pub fn inner(&self, margin: Sides) -> Rect {
        Rect {
            x: self.x + margin.left,
            y: self.y + margin.top,
            width: (self.width - margin.horizontal_sum()).max(0),
            height: (self.height - margin.vertical_sum()).max(0),
        }
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::from_edges(x, y, right, bottom))
        } else {
            None
        }
    }

    /// Whether the two rectangles, each grown by `margin` on every side,
    /// share at least one point.
    ///
    /// Edges count as touching, so two rectangles closer than `2 * margin`
    /// are reported as overlapping.
    pub fn overlaps_with_margin(&self, other: &Rect, margin: i32) -> bool {
        let left = (self.x - margin).max(other.x - margin);
        let top = (self.y - margin).max(other.y - margin);
        let right = (self.right() + margin).min(other.right() + margin);
        let bottom = (self.bottom() + margin).min(other.bottom() + margin);
        right >= left && bottom >= top
    }
}

/// Sides for padding/margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Sides {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Sides {
    /// Create new sides with equal values.
    pub const fn all(val: i32) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Create new sides with specific values.
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub const fn horizontal_sum(&self) -> i32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub const fn vertical_sum(&self) -> i32 {
        self.top + self.bottom
    }
}

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// The scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Content scrolls left/right; lanes are stacked vertically.
    #[default]
    Horizontal,
    /// Content scrolls up/down; lanes are laid side by side.
    Vertical,
}

impl Orientation {
    /// Extent of `size` along the scroll axis.
    #[inline]
    pub const fn main(self, size: Size) -> i32 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Extent of `size` across the scroll axis.
    #[inline]
    pub const fn cross(self, size: Size) -> i32 {
        match self {
            Self::Horizontal => size.height,
            Self::Vertical => size.width,
        }
    }

    /// Build a size from main/cross extents.
    #[inline]
    pub const fn size(self, main: i32, cross: i32) -> Size {
        match self {
            Self::Horizontal => Size::new(main, cross),
            Self::Vertical => Size::new(cross, main),
        }
    }

    /// Pick the scroll-axis component of an `(x, y)` pair.
    #[inline]
    pub fn main_of<T>(self, x: T, y: T) -> T {
        match self {
            Self::Horizontal => x,
            Self::Vertical => y,
        }
    }

    /// Pick the cross-axis component of an `(x, y)` pair.
    #[inline]
    pub fn cross_of<T>(self, x: T, y: T) -> T {
        match self {
            Self::Horizontal => y,
            Self::Vertical => x,
        }
    }

    /// Start coordinate of `rect` along the scroll axis.
    #[inline]
    pub const fn main_start(self, rect: &Rect) -> i32 {
        match self {
            Self::Horizontal => rect.x,
            Self::Vertical => rect.y,
        }
    }

    /// Start coordinate of `rect` across the scroll axis.
    #[inline]
    pub const fn cross_start(self, rect: &Rect) -> i32 {
        match self {
            Self::Horizontal => rect.y,
            Self::Vertical => rect.x,
        }
    }

    /// Build a rectangle from main/cross origin and extents.
    #[inline]
    pub const fn rect(self, main: i32, cross: i32, main_extent: i32, cross_extent: i32) -> Rect {
        match self {
            Self::Horizontal => Rect::new(main, cross, main_extent, cross_extent),
            Self::Vertical => Rect::new(cross, main, cross_extent, main_extent),
        }
    }

    /// Translate `rect` along the scroll axis.
    #[inline]
    #[must_use]
    pub const fn shift(self, rect: Rect, delta: i32) -> Rect {
        match self {
            Self::Horizontal => rect.translate(delta, 0),
            Self::Vertical => rect.translate(0, delta),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
