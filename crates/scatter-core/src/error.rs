#![forbid(unsafe_code)]

//! Error type shared by the Scatter crates.
//!
//! Placement and scrolling never fail: degenerate input is clamped and
//! unplaceable items are deferred. Only setters and explicit item jumps
//! reject their arguments.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("lane count must be at least 1 (got {lanes})")]
    InvalidLaneCount { lanes: usize },

    #[error("item {index} is out of range (count={count})")]
    ItemOutOfRange { index: usize, count: usize },
}

impl Error {
    #[must_use]
    pub fn invalid_lanes(lanes: usize) -> Self {
        Self::InvalidLaneCount { lanes }
    }

    #[must_use]
    pub fn out_of_range(index: usize, count: usize) -> Self {
        Self::ItemOutOfRange { index, count }
    }
}
