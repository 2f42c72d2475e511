//! Ship segments: one ship of a given length laid at a root cell.

use core::fmt;
use serde::Serialize;

use crate::bitset::BitSet;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Cells run left to right along the root's row.
    Horizontal,
    /// Cells run top to bottom down the root's column.
    Vertical,
}

impl Orientation {
    /// Enumeration order: horizontal first.
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// Scalar step between consecutive cells on a grid of `width` columns.
    #[inline]
    pub fn stride(self, width: usize) -> usize {
        match self {
            Orientation::Horizontal => 1,
            Orientation::Vertical => width,
        }
    }
}

/// A ship placed at `root` (the top/left cell) with `orientation`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Segment {
    root: usize,
    length: usize,
    orientation: Orientation,
}

impl Segment {
    pub const fn new(root: usize, length: usize, orientation: Orientation) -> Self {
        Self {
            root,
            length,
            orientation,
        }
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Scalar cells covered by the segment, root first.
    pub fn cells(&self, width: usize) -> impl Iterator<Item = usize> {
        let step = self.orientation.stride(width);
        let root = self.root;
        (0..self.length).map(move |i| root + i * step)
    }

    /// Last cell of the segment.
    #[inline]
    pub fn tail(&self, width: usize) -> usize {
        self.root + (self.length - 1) * self.orientation.stride(width)
    }

    /// True when every cell lies on a `width`x`height` grid and a horizontal
    /// segment does not wrap onto the next row.
    pub fn in_bounds(&self, width: usize, height: usize) -> bool {
        if self.length == 0 {
            return false;
        }
        let cells = width * height;
        let tail = self.tail(width);
        if self.root >= cells || tail >= cells {
            return false;
        }
        match self.orientation {
            Orientation::Horizontal => self.root / width == tail / width,
            Orientation::Vertical => tail / width <= height - 1,
        }
    }

    /// True when the segment would share a cell with `occupied`.
    pub fn overlaps(&self, occupied: &BitSet, width: usize) -> bool {
        self.cells(width).any(|c| occupied.contains(c))
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Segment {{ root: {}, length: {}, orientation: {:?} }}",
            self.root, self.length, self.orientation
        )
    }
}
