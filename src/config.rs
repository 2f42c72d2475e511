use serde::{Deserialize, Serialize};

use crate::common::ConfigError;

pub const DEFAULT_WIDTH: usize = 5;
pub const DEFAULT_HEIGHT: usize = 5;
pub const DEFAULT_SHIPS: [usize; 3] = [2, 3, 4];

/// The full-size game. Enumerating it is far beyond what fits in memory;
/// kept for reference and for `--board-limit` experiments.
pub const CLASSIC_SIZE: usize = 10;
pub const CLASSIC_SHIPS: [usize; 5] = [2, 3, 3, 4, 5];

/// Grids with a side above this trigger a size warning during generation.
pub const LARGE_GRID_SIDE: usize = 8;

/// How probability maps are shared between games through the miss cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum CachePolicy {
    /// Always compute maps from the belief set.
    Disabled,
    /// Key all-miss maps by guess count alone. Games that missed on
    /// different cells share one entry, so later games read an approximate
    /// map seeded by whichever game got there first.
    MissCount,
    /// Key all-miss maps by the exact set of missed cells.
    #[default]
    MissSet,
}

/// Construction parameters of a board space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceConfig {
    pub width: usize,
    pub height: usize,
    pub ships: Vec<usize>,
    #[serde(default)]
    pub cache: CachePolicy,
    /// Abort enumeration once a generation grows past this many boards.
    #[serde(default)]
    pub board_limit: Option<usize>,
}

impl SpaceConfig {
    pub fn new(width: usize, height: usize, ships: impl Into<Vec<usize>>) -> Self {
        Self {
            width,
            height,
            ships: ships.into(),
            cache: CachePolicy::default(),
            board_limit: None,
        }
    }

    /// The 10x10 grid with the standard five ships.
    pub fn classic() -> Self {
        Self::new(CLASSIC_SIZE, CLASSIC_SIZE, CLASSIC_SHIPS)
    }

    pub fn with_cache(mut self, cache: CachePolicy) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_board_limit(mut self, limit: usize) -> Self {
        self.board_limit = Some(limit);
        self
    }

    /// Number of grid cells.
    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    /// Sum of ship lengths; a won game has hit exactly this many cells.
    pub fn total_ship_cells(&self) -> usize {
        self.ships.iter().sum()
    }

    /// Check dimensions and that every ship fits the grid on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        for (index, &length) in self.ships.iter().enumerate() {
            if length == 0 {
                return Err(ConfigError::InvalidShipLength { index });
            }
            if length > self.width && length > self.height {
                return Err(ConfigError::ShipTooLong {
                    length,
                    width: self.width,
                    height: self.height,
                });
            }
        }
        Ok(())
    }
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_SHIPS)
    }
}
