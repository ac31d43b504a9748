#![forbid(unsafe_code)]

//! Placement configuration.

use scatter_core::geometry::{Orientation, Sides};
use serde::{Deserialize, Serialize};

/// Lane count used when nothing else is configured.
pub const DEFAULT_LANES: usize = 4;

/// Which end of the sequence new items join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Growth {
    /// New items go past the tail; existing items never move.
    #[default]
    AppendAtEnd,
    /// New items go before the head; existing items shift along the scroll
    /// axis and the viewport is compensated.
    PrependAtStart,
}

impl Growth {
    /// Whether the grid grows at its tail.
    #[inline]
    pub const fn at_tail(self) -> bool {
        matches!(self, Self::AppendAtEnd)
    }
}

/// Tuning knobs for the placement engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Number of lanes across the scroll axis.
    pub lanes: usize,
    /// Scroll axis.
    pub orientation: Orientation,
    /// Growth direction for incremental regeneration.
    pub growth: Growth,
    /// Padding between the layout bounds and the content box.
    pub padding: Sides,
    /// Seed for the jitter generator; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Reject candidate positions that overlap an already placed item.
    pub strict: bool,
    /// Jitter re-rolls per item before a strict placement is deferred.
    pub strict_attempts: u32,
    /// Gap enforced around items by the strict overlap test.
    pub overlap_margin: i32,
    /// Scroll-axis extent per row, as a multiple of the largest item.
    pub measure_factor: f32,
    /// Lower bound for the edge-scale effect.
    pub min_edge_scale: f32,
    /// Cap on pooled items (`None` = unbounded).
    pub max_recycled: Option<usize>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            lanes: DEFAULT_LANES,
            orientation: Orientation::Horizontal,
            growth: Growth::AppendAtEnd,
            padding: Sides::default(),
            seed: None,
            strict: false,
            strict_attempts: 8,
            overlap_margin: 2,
            measure_factor: 1.2,
            min_edge_scale: 0.5,
            max_recycled: None,
        }
    }
}

impl PlacementConfig {
    /// Set the lane count (builder pattern). Zero is clamped to one.
    #[must_use]
    pub fn with_lanes(mut self, lanes: usize) -> Self {
        self.lanes = lanes.max(1);
        self
    }

    /// Set the scroll axis (builder pattern).
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the growth direction (builder pattern).
    #[must_use]
    pub fn with_growth(mut self, growth: Growth) -> Self {
        self.growth = growth;
        self
    }

    /// Set the padding (builder pattern).
    #[must_use]
    pub fn with_padding(mut self, padding: Sides) -> Self {
        self.padding = padding;
        self
    }

    /// Seed the jitter generator (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable strict (overlap-free) placement (builder pattern).
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_widget() {
        let config = PlacementConfig::default();
        assert_eq!(config.lanes, 4);
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert!(!config.strict);
        assert!((config.measure_factor - 1.2).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_lanes_clamped_by_builder() {
        assert_eq!(PlacementConfig::default().with_lanes(0).lanes, 1);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: PlacementConfig =
            serde_json::from_str(r#"{"lanes": 6, "growth": "prepend_at_start"}"#).unwrap();
        assert_eq!(config.lanes, 6);
        assert_eq!(config.growth, Growth::PrependAtStart);
        assert_eq!(config.strict_attempts, 8);
    }

    #[test]
    fn json_roundtrip() {
        let config = PlacementConfig::default()
            .with_seed(7)
            .with_orientation(Orientation::Vertical)
            .with_padding(Sides::all(3));
        let json = serde_json::to_string(&config).unwrap();
        let back: PlacementConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn growth_direction() {
        assert!(Growth::AppendAtEnd.at_tail());
        assert!(!Growth::PrependAtStart.at_tail());
    }
}
