//! Common types: guess outcomes and the error enums of the crate.

use serde::Serialize;
use thiserror::Error;

use crate::bitset::BitSetError;

/// Result of a guess attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuessResult {
    /// Guess landed on a ship cell.
    Hit,
    /// Guess landed on open water.
    Miss,
}

impl GuessResult {
    pub fn is_hit(self) -> bool {
        matches!(self, GuessResult::Hit)
    }
}

impl From<bool> for GuessResult {
    fn from(hit: bool) -> Self {
        if hit {
            GuessResult::Hit
        } else {
            GuessResult::Miss
        }
    }
}

/// Errors raised while building a board space or parsing its configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Width or height is zero.
    #[error("grid must be at least 1x1, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// A ship in the inventory has length zero.
    #[error("ship #{index} has length 0")]
    InvalidShipLength { index: usize },
    /// A ship cannot be placed in either orientation.
    #[error("ship of length {length} does not fit a {width}x{height} grid")]
    ShipTooLong {
        length: usize,
        width: usize,
        height: usize,
    },
    /// The ships fit one at a time but never all together.
    #[error("no legal placement of ships {ships:?} on a {width}x{height} grid")]
    NoPlacements {
        width: usize,
        height: usize,
        ships: Vec<usize>,
    },
    /// Enumeration exceeded the configured board limit.
    #[error("candidate space exceeds the limit of {limit} boards")]
    TooManyBoards { limit: usize },
    /// Strategy identifier outside the known table.
    #[error("unknown strategy id {0}")]
    UnknownStrategy(u8),
    /// Strategy name that matches no known strategy.
    #[error("unknown strategy name {0:?}")]
    UnknownStrategyName(String),
    /// Benchmark coverage must be a percentage in 1..=100.
    #[error("coverage must be within 1..=100, got {0}")]
    InvalidCoverage(u8),
    /// Underlying bitset error.
    #[error("bitset error: {0}")]
    BitSet(#[from] BitSetError),
}

/// Errors raised by a running game.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Guess outside the grid.
    #[error("cell {cell} is outside the {cells}-cell grid")]
    OutOfBounds { cell: usize, cells: usize },
    /// Guess was already made at this cell.
    #[error("cell {0} was already guessed")]
    AlreadyGuessed(usize),
    /// The hidden board does not belong to this grid and inventory.
    #[error("hidden board occupies {found} cells of a {cells}-cell grid, expected {expected} occupied")]
    TruthMismatch {
        expected: usize,
        found: usize,
        cells: usize,
    },
    /// No board with this ID in the candidate space.
    #[error("no board with id {0}")]
    UnknownBoard(usize),
    /// Every candidate was ruled out, so the hidden board was not among them.
    #[error("belief set is empty; the hidden board is inconsistent with the candidate space")]
    EmptyBeliefs,
    /// Every cell has been guessed but the game is not won.
    #[error("no unguessed cell left to select")]
    NoGuessAvailable,
    /// Underlying bitset error.
    #[error("bitset error: {0}")]
    BitSet(#[from] BitSetError),
}
