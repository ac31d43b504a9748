#![forbid(unsafe_code)]

//! Scroll surfaces for Scatter.
//!
//! - [`ScrollController`]: touch-driven offset with rubber-band bounds,
//!   flings, and nested-container arbitration.
//! - [`RandomList`]: a [`PlacementEngine`](scatter_layout::PlacementEngine)
//!   inside a scroll controller, with prepend anchoring and edge scaling.

pub mod random_list;
pub mod scroll;

pub use random_list::RandomList;
pub use scroll::{ScrollConfig, ScrollController, ScrollPhase};
