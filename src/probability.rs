//! Per-cell hit percentages derived from a belief set.

use serde::Serialize;

use crate::bitset::BitSet;
use crate::common::EngineError;

/// Percentage in `[0, 100]` for every cell of the grid, in scalar order.
///
/// Maps computed from a belief set also keep the raw counts behind each
/// percentage, so callers can rank cells exactly instead of through float
/// rounding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityMap {
    width: usize,
    values: Vec<f64>,
    #[serde(skip)]
    counts: Option<Counts>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Counts {
    hits: Vec<usize>,
    total: usize,
}

impl ProbabilityMap {
    /// `p(c) = 100 * |index[c] ∩ beliefs| / |beliefs|` for every cell `c`.
    ///
    /// An empty belief set means the hidden board was ruled out, which is
    /// reported as [`EngineError::EmptyBeliefs`].
    pub fn compute(
        width: usize,
        index: &[BitSet],
        beliefs: &BitSet,
    ) -> Result<Self, EngineError> {
        // This loop dominates experiment time without the miss cache.
        let hits = index
            .iter()
            .map(|posting| posting.intersection_count(beliefs))
            .collect();
        Self::from_counts(width, hits, beliefs.count_ones())
    }

    /// Builds a map from per-cell board counts out of `total` boards.
    pub fn from_counts(width: usize, hits: Vec<usize>, total: usize) -> Result<Self, EngineError> {
        if total == 0 {
            return Err(EngineError::EmptyBeliefs);
        }
        let values = hits
            .iter()
            .map(|&k| 100.0 * k.min(total) as f64 / total as f64)
            .collect();
        Ok(Self {
            width,
            values,
            counts: Some(Counts { hits, total }),
        })
    }

    /// Builds a map from raw percentages. Values are clamped to `[0, 100]`.
    pub fn from_values(width: usize, values: Vec<f64>) -> Self {
        let values = values.into_iter().map(|v| v.clamp(0.0, 100.0)).collect();
        Self {
            width,
            values,
            counts: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Percentage at `cell`, `None` outside the grid.
    pub fn get(&self, cell: usize) -> Option<f64> {
        self.values.get(cell).copied()
    }

    /// Boards occupying `cell` and the belief count they were taken from.
    /// `None` for maps built from raw percentages.
    pub fn count(&self, cell: usize) -> Option<(usize, usize)> {
        let counts = self.counts.as_ref()?;
        Some((*counts.hits.get(cell)?, counts.total))
    }

    /// `(cell, percentage)` pairs in ascending cell order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().copied().enumerate()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// True when no cell is strictly between 0 and 100.
    pub fn is_determined(&self) -> bool {
        self.values.iter().all(|&p| !is_uncertain(p))
    }
}

/// Strictly between 0 and 100.
#[inline]
pub(crate) fn is_uncertain(p: f64) -> bool {
    p > 0.0 && p < 100.0
}
