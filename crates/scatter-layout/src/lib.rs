#![forbid(unsafe_code)]

//! Randomized area-density placement.
//!
//! Items are spread across a `lanes x depth` grid; each lands at a random
//! offset inside the least recently filled cell, and keeps its position as
//! the sequence grows at either end.

pub mod config;
pub mod engine;
pub mod grid;
pub mod pool;
pub mod source;

pub use config::{DEFAULT_LANES, Growth, PlacementConfig};
pub use engine::{FreeSlots, LayoutOutcome, PlacedItem, PlacementEngine};
pub use grid::{CELL_CAPACITY, Cell, DensityGrid};
pub use pool::RecyclePool;
pub use scatter_core::geometry::{Orientation, Rect, Sides, Size};
pub use source::ItemSource;
