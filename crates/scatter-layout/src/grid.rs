#![forbid(unsafe_code)]

//! Area-density grid.
//!
//! [`DensityGrid`] counts how many items occupy each cell of a
//! `lanes x depth` matrix. Lanes run across the scroll axis; rows (depth)
//! run along it, row 0 at the head of the content.
//!
//! Cells are scanned in fill order: all lanes of a row before the next row,
//! so scan index `i` maps to `row = i / lanes`, `lane = i % lanes`.
//!
//! # Invariants
//!
//! 1. Depth never shrinks: [`extend`](DensityGrid::extend) ignores
//!    non-positive requests.
//! 2. Extension preserves every existing `(lane, row)` count; rows inserted
//!    at the head shift the originals by the number of inserted rows.
//! 3. [`clear`](DensityGrid::clear) zeroes counts without changing shape.
//!
//! # Failure Modes
//!
//! - Zero lanes: clamped to one lane.
//! - No cell below capacity: [`first_available_cell`] returns `None`; the
//!   caller defers the item.
//!
//! [`first_available_cell`]: DensityGrid::first_available_cell

use std::fmt;

/// Items a single cell may hold.
pub const CELL_CAPACITY: u32 = 1;

/// A grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Depth index along the scroll axis (0 = head).
    pub row: usize,
    /// Lane index across the scroll axis.
    pub lane: usize,
}

impl Cell {
    #[inline]
    pub const fn new(row: usize, lane: usize) -> Self {
        Self { row, lane }
    }
}

/// Occupancy counters for a lane-partitioned grid.
#[derive(Clone, PartialEq, Eq)]
pub struct DensityGrid {
    lanes: usize,
    depth: usize,
    /// Row-major: `counts[row * lanes + lane]`.
    counts: Vec<u32>,
}

impl DensityGrid {
    /// Create an empty grid.
    #[must_use]
    pub fn new(lanes: usize, depth: usize) -> Self {
        let lanes = lanes.max(1);
        Self {
            lanes,
            depth,
            counts: vec![0; lanes * depth],
        }
    }

    /// Number of lanes.
    #[inline]
    #[must_use]
    pub fn lanes(&self) -> usize {
        self.lanes
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.counts.len()
    }

    /// Cell at scan index `index`.
    #[inline]
    #[must_use]
    pub fn cell_at(&self, index: usize) -> Cell {
        Cell::new(index / self.lanes, index % self.lanes)
    }

    /// Scan index of `cell`.
    #[inline]
    #[must_use]
    pub fn index_of(&self, cell: Cell) -> usize {
        cell.row * self.lanes + cell.lane
    }

    /// Count at `cell`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<u32> {
        if cell.lane >= self.lanes || cell.row >= self.depth {
            return None;
        }
        Some(self.counts[self.index_of(cell)])
    }

    /// Add `by_rows` zero rows at the tail (`at_tail`) or head.
    ///
    /// Non-positive requests are ignored: the grid only grows.
    pub fn extend(&mut self, by_rows: isize, at_tail: bool) {
        if by_rows <= 0 {
            return;
        }
        let added = by_rows.unsigned_abs();
        let new_depth = self.depth + added;
        let mut counts = vec![0; self.lanes * new_depth];
        let offset = if at_tail { 0 } else { added * self.lanes };
        counts[offset..offset + self.counts.len()].copy_from_slice(&self.counts);
        self.counts = counts;
        self.depth = new_depth;
    }

    /// Grow to at least `depth` rows, adding them at the tail or head.
    /// Returns the number of rows added.
    pub fn grow_to(&mut self, depth: usize, at_tail: bool) -> usize {
        let added = depth.saturating_sub(self.depth);
        self.extend(added as isize, at_tail);
        added
    }

    /// Find the `(skip + 1)`-th cell whose count is below `capacity`.
    ///
    /// Scans in fill order from the head, or in reverse fill order from the
    /// tail when `from_head` is false. `skip` reserves the free cells that
    /// belong to the scan's starting edge.
    #[must_use]
    pub fn first_available_cell(&self, capacity: u32, from_head: bool, skip: usize) -> Option<Cell> {
        let mut seen = 0usize;
        let n = self.counts.len();
        for step in 0..n {
            let index = if from_head { step } else { n - 1 - step };
            if self.counts[index] < capacity {
                if seen == skip {
                    return Some(self.cell_at(index));
                }
                seen += 1;
            }
        }
        None
    }

    /// Increase the count at `cell` by one.
    ///
    /// The caller must have checked the cell against its capacity.
    pub fn increment(&mut self, cell: Cell) {
        debug_assert!(cell.lane < self.lanes && cell.row < self.depth);
        let index = self.index_of(cell);
        self.counts[index] += 1;
    }

    /// Zero every count without changing the shape.
    pub fn clear(&mut self) {
        self.counts.fill(0);
    }

    /// Sum of all counts.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    /// Highest count of any cell.
    #[must_use]
    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Iterate `(cell, count)` in fill order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &count)| (self.cell_at(i), count))
    }

    /// Counts of one row, lane order.
    #[must_use]
    pub fn row(&self, row: usize) -> &[u32] {
        let start = (row * self.lanes).min(self.counts.len());
        let end = (start + self.lanes).min(self.counts.len());
        &self.counts[start..end]
    }
}

impl fmt::Debug for DensityGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DensityGrid {}x{}", self.lanes, self.depth)?;
        for row in 0..self.depth {
            writeln!(f, "  {:?}", self.row(row))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(lanes: usize, depth: usize, cells: &[(usize, usize)]) -> DensityGrid {
        let mut grid = DensityGrid::new(lanes, depth);
        for &(row, lane) in cells {
            grid.increment(Cell::new(row, lane));
        }
        grid
    }

    #[test]
    fn new_grid_is_empty() {
        let grid = DensityGrid::new(4, 3);
        assert_eq!(grid.cell_count(), 12);
        assert_eq!(grid.occupied(), 0);
        assert_eq!(grid.max_count(), 0);
    }

    #[test]
    fn zero_lanes_clamped() {
        let grid = DensityGrid::new(0, 2);
        assert_eq!(grid.lanes(), 1);
        assert_eq!(grid.cell_count(), 2);
    }

    #[test]
    fn scan_index_is_row_major() {
        let grid = DensityGrid::new(4, 3);
        assert_eq!(grid.cell_at(9), Cell::new(2, 1));
        assert_eq!(grid.index_of(Cell::new(2, 1)), 9);
    }

    #[test]
    fn extend_by_zero_is_identity() {
        let mut grid = filled(3, 2, &[(0, 1), (1, 2)]);
        let before = grid.clone();
        grid.extend(0, true);
        grid.extend(-4, false);
        assert_eq!(grid, before);
    }

    #[test]
    fn extend_tail_preserves_counts() {
        let mut grid = filled(2, 2, &[(0, 0), (1, 1)]);
        grid.extend(2, true);
        assert_eq!(grid.depth(), 4);
        assert_eq!(grid.get(Cell::new(0, 0)), Some(1));
        assert_eq!(grid.get(Cell::new(1, 1)), Some(1));
        assert_eq!(grid.row(2), &[0, 0]);
        assert_eq!(grid.row(3), &[0, 0]);
    }

    #[test]
    fn extend_head_shifts_counts() {
        let mut grid = filled(2, 2, &[(0, 0), (1, 1)]);
        grid.extend(3, false);
        assert_eq!(grid.depth(), 5);
        for row in 0..3 {
            assert_eq!(grid.row(row), &[0, 0]);
        }
        assert_eq!(grid.get(Cell::new(3, 0)), Some(1));
        assert_eq!(grid.get(Cell::new(4, 1)), Some(1));
        assert_eq!(grid.occupied(), 2);
    }

    #[test]
    fn grow_to_never_shrinks() {
        let mut grid = DensityGrid::new(2, 5);
        assert_eq!(grid.grow_to(3, true), 0);
        assert_eq!(grid.depth(), 5);
        assert_eq!(grid.grow_to(7, false), 2);
        assert_eq!(grid.depth(), 7);
    }

    #[test]
    fn first_available_from_head() {
        let grid = filled(2, 2, &[(0, 0)]);
        assert_eq!(grid.first_available_cell(1, true, 0), Some(Cell::new(0, 1)));
        assert_eq!(grid.first_available_cell(1, true, 1), Some(Cell::new(1, 0)));
    }

    #[test]
    fn first_available_from_tail() {
        let grid = filled(2, 2, &[(1, 1)]);
        assert_eq!(grid.first_available_cell(1, false, 0), Some(Cell::new(1, 0)));
        assert_eq!(grid.first_available_cell(1, false, 2), Some(Cell::new(0, 0)));
    }

    #[test]
    fn first_available_none_when_full() {
        let grid = filled(2, 1, &[(0, 0), (0, 1)]);
        assert_eq!(grid.first_available_cell(1, true, 0), None);
        assert_eq!(grid.first_available_cell(2, true, 0), Some(Cell::new(0, 0)));
    }

    #[test]
    fn skip_past_all_free_cells_is_none() {
        let grid = DensityGrid::new(2, 1);
        assert_eq!(grid.first_available_cell(1, true, 2), None);
    }

    #[test]
    fn clear_keeps_shape() {
        let mut grid = filled(3, 3, &[(0, 0), (2, 2)]);
        grid.clear();
        assert_eq!(grid.depth(), 3);
        assert_eq!(grid.occupied(), 0);
    }

    #[test]
    fn get_outside_is_none() {
        let grid = DensityGrid::new(2, 2);
        assert_eq!(grid.get(Cell::new(2, 0)), None);
        assert_eq!(grid.get(Cell::new(0, 2)), None);
    }

    #[test]
    fn debug_lists_rows() {
        let grid = filled(2, 2, &[(1, 0)]);
        let dbg = format!("{grid:?}");
        assert!(dbg.contains("DensityGrid 2x2"));
        assert!(dbg.contains("[1, 0]"));
    }
}
