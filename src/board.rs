//! A complete placement: the cells occupied by every ship of the inventory.

use crate::bitset::{BitSet, BitSetError};
use crate::ship::Segment;

/// One legal layout of the whole inventory.
///
/// Equality compares the segments as well as the cells, so two boards that
/// cover the same cells with ships laid in a different order are distinct.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: BitSet,
    segments: Vec<Segment>,
}

impl Board {
    /// An empty board for a grid of `cells` cells.
    pub fn empty(cells: usize) -> Self {
        Board {
            cells: BitSet::new(cells),
            segments: Vec::new(),
        }
    }

    /// Returns a copy of this board with `segment` added. Overlap is the
    /// caller's check; a cell off the grid is an error.
    pub(crate) fn with_segment(&self, segment: Segment, width: usize) -> Result<Self, BitSetError> {
        let mut next = self.clone();
        for cell in segment.cells(width) {
            next.cells.set(cell)?;
        }
        next.segments.push(segment);
        Ok(next)
    }

    /// Build a board from explicit segments, rejecting out-of-bounds or
    /// overlapping ones. Useful for a hidden board chosen by hand.
    pub fn from_segments(
        width: usize,
        height: usize,
        segments: impl IntoIterator<Item = Segment>,
    ) -> Option<Self> {
        let mut board = Board::empty(width * height);
        for segment in segments {
            if !segment.in_bounds(width, height) || segment.overlaps(&board.cells, width) {
                return None;
            }
            board = board.with_segment(segment, width).ok()?;
        }
        Some(board)
    }

    /// True if a ship occupies `cell`.
    #[inline]
    pub fn contains(&self, cell: usize) -> bool {
        self.cells.contains(cell)
    }

    /// Occupancy bitset over the grid.
    pub fn cells(&self) -> &BitSet {
        &self.cells
    }

    /// Occupied cells in ascending order.
    pub fn occupied(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.ones()
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.count_ones()
    }

    /// Ship segments in inventory order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of grid cells this board was built for.
    pub fn grid_cells(&self) -> usize {
        self.cells.len()
    }
}
