//! The candidate space: every legal layout of an inventory on a grid, with
//! an inverted index from cell to the boards covering it.

use log::{debug, info, warn};
use rand::Rng;

use crate::bitset::BitSet;
use crate::board::Board;
use crate::cache::MissCache;
use crate::common::ConfigError;
use crate::config::{SpaceConfig, LARGE_GRID_SIDE};
use crate::ship::{Orientation, Segment};

/// Every complete placement of an inventory, built once and shared
/// read-only by all games played against it.
///
/// Board IDs are positions in [`BoardSpace::boards`]. Enumeration order is
/// fixed (ships in inventory order, roots ascending, horizontal before
/// vertical) so IDs are stable between runs.
#[derive(Debug)]
pub struct BoardSpace {
    config: SpaceConfig,
    boards: Vec<Board>,
    index: Vec<BitSet>,
    cache: MissCache,
}

impl BoardSpace {
    /// Enumerate all boards for `config` and build the inverted index.
    pub fn new(config: SpaceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (width, height) = (config.width, config.height);
        if width > LARGE_GRID_SIDE || height > LARGE_GRID_SIDE {
            let bound = (config.cells() as f64).powi(config.ships.len() as i32);
            warn!(
                "large grid {}x{}: generation may take a while, upper bound roughly {:.0} boards",
                width, height, bound
            );
        }

        let boards = enumerate(&config)?;
        if boards.is_empty() {
            return Err(ConfigError::NoPlacements {
                width,
                height,
                ships: config.ships.clone(),
            });
        }
        let index = build_index(config.cells(), &boards)?;
        info!(
            "{} boards for {}x{} grid with ships {:?}",
            boards.len(),
            width,
            height,
            config.ships
        );
        Ok(Self {
            config,
            boards,
            index,
            cache: MissCache::new(),
        })
    }

    pub fn config(&self) -> &SpaceConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn height(&self) -> usize {
        self.config.height
    }

    /// Number of grid cells.
    pub fn cells(&self) -> usize {
        self.config.cells()
    }

    pub fn ships(&self) -> &[usize] {
        &self.config.ships
    }

    pub fn total_ship_cells(&self) -> usize {
        self.config.total_ship_cells()
    }

    /// All boards in canonical order.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, id: usize) -> Option<&Board> {
        self.boards.get(id)
    }

    /// Number of boards in the space.
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Always false for a constructed space; construction rejects empty ones.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// IDs of the boards occupying `cell`. Panics if `cell` is outside the
    /// grid; see [`BoardSpace::try_cell_index`].
    pub fn cell_index(&self, cell: usize) -> &BitSet {
        &self.index[cell]
    }

    pub fn try_cell_index(&self, cell: usize) -> Option<&BitSet> {
        self.index.get(cell)
    }

    /// The whole inverted index, one posting per cell.
    pub fn index(&self) -> &[BitSet] {
        &self.index
    }

    /// Uniformly drawn board ID.
    pub fn random_board_id<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.random_range(0..self.boards.len())
    }

    /// Uniformly drawn board.
    pub fn random_board<R: Rng + ?Sized>(&self, rng: &mut R) -> &Board {
        &self.boards[self.random_board_id(rng)]
    }

    /// Probability maps shared by games against this space.
    pub fn miss_cache(&self) -> &MissCache {
        &self.cache
    }
}

/// Grow one generation of partial boards per ship, leaves first.
fn enumerate(config: &SpaceConfig) -> Result<Vec<Board>, ConfigError> {
    let (width, height) = (config.width, config.height);
    let cells = config.cells();
    let mut generation = vec![Board::empty(cells)];

    for (i, &length) in config.ships.iter().enumerate() {
        let mut next = Vec::new();
        for partial in &generation {
            for root in 0..cells {
                for orientation in Orientation::ALL {
                    let segment = Segment::new(root, length, orientation);
                    if !segment.in_bounds(width, height)
                        || segment.overlaps(partial.cells(), width)
                    {
                        continue;
                    }
                    next.push(partial.with_segment(segment, width)?);
                }
            }
            if let Some(limit) = config.board_limit {
                if next.len() > limit {
                    return Err(ConfigError::TooManyBoards { limit });
                }
            }
        }
        debug!("ship #{} (length {}): {} partial boards", i, length, next.len());
        generation = next;
        if generation.is_empty() {
            break;
        }
    }
    Ok(generation)
}

fn build_index(cells: usize, boards: &[Board]) -> Result<Vec<BitSet>, ConfigError> {
    let mut index = vec![BitSet::new(boards.len()); cells];
    for (id, board) in boards.iter().enumerate() {
        for cell in board.occupied() {
            index[cell].set(id)?;
        }
    }
    Ok(index)
}
