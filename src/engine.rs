//! One guessing game against a hidden board, narrowing a belief over the
//! candidate space after every guess.

use std::sync::Arc;

use log::trace;
use rand::Rng;

use crate::bitset::BitSet;
use crate::board::Board;
use crate::cache::MissKey;
use crate::common::{EngineError, GuessResult};
use crate::probability::ProbabilityMap;
use crate::space::BoardSpace;
use crate::strategy::Strategy;

/// Chronological record of guesses and their outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    entries: Vec<(usize, GuessResult)>,
    guessed: BitSet,
    misses: BitSet,
    hits: usize,
}

impl Trace {
    fn new(cells: usize) -> Self {
        Self {
            entries: Vec::new(),
            guessed: BitSet::new(cells),
            misses: BitSet::new(cells),
            hits: 0,
        }
    }

    fn record(&mut self, cell: usize, result: GuessResult) -> Result<(), EngineError> {
        self.guessed.set(cell)?;
        match result {
            GuessResult::Hit => self.hits += 1,
            GuessResult::Miss => self.misses.set(cell)?,
        }
        self.entries.push((cell, result));
        Ok(())
    }

    /// True if `cell` has been guessed.
    #[inline]
    pub fn contains(&self, cell: usize) -> bool {
        self.guessed.contains(cell)
    }

    /// Outcome recorded for `cell`, if guessed.
    pub fn result(&self, cell: usize) -> Option<GuessResult> {
        if !self.contains(cell) {
            return None;
        }
        Some(GuessResult::from(!self.misses.contains(cell)))
    }

    /// Guesses in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = (usize, GuessResult)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Cells guessed so far, as a bitset over the grid.
    pub fn guessed(&self) -> &BitSet {
        &self.guessed
    }

    /// Missed cells, as a bitset over the grid.
    pub fn misses(&self) -> &BitSet {
        &self.misses
    }
}

/// Belief state of one game.
///
/// Starts believing every board of the space, then keeps only the boards
/// consistent with each hit or miss. The probability map is recomputed
/// after every guess unless the strategy opts out of tracking.
#[derive(Debug, Clone)]
pub struct BeliefEngine<'s> {
    space: &'s BoardSpace,
    truth: Board,
    strategy: Strategy,
    trace: Trace,
    beliefs: BitSet,
    probabilities: Arc<ProbabilityMap>,
}

impl<'s> BeliefEngine<'s> {
    /// Start a game against `truth`, which must be a layout of the space's
    /// inventory on the space's grid.
    pub fn new(space: &'s BoardSpace, truth: Board, strategy: Strategy) -> Result<Self, EngineError> {
        let expected = space.total_ship_cells();
        let found = truth.occupied_count();
        if truth.grid_cells() != space.cells() || found != expected {
            return Err(EngineError::TruthMismatch {
                expected,
                found,
                cells: truth.grid_cells(),
            });
        }
        let trace = Trace::new(space.cells());
        let beliefs = BitSet::full(space.len());
        // The opening map is the empty all-miss prefix, so it goes through
        // the cache like any other.
        let probabilities = lookup_map(space, strategy, &trace, &beliefs)?;
        Ok(Self {
            space,
            truth,
            strategy,
            trace,
            beliefs,
            probabilities,
        })
    }

    /// Start a game against board `id` of the space.
    pub fn for_board(space: &'s BoardSpace, id: usize, strategy: Strategy) -> Result<Self, EngineError> {
        let truth = space.board(id).ok_or(EngineError::UnknownBoard(id))?.clone();
        Self::new(space, truth, strategy)
    }

    /// Guess `cell`, narrow the beliefs and refresh the probability map.
    ///
    /// Nothing changes when an error is returned.
    pub fn guess(&mut self, cell: usize) -> Result<GuessResult, EngineError> {
        if cell >= self.space.cells() {
            return Err(EngineError::OutOfBounds {
                cell,
                cells: self.space.cells(),
            });
        }
        if self.trace.contains(cell) {
            return Err(EngineError::AlreadyGuessed(cell));
        }
        let result = GuessResult::from(self.truth.contains(cell));
        let mut trace = self.trace.clone();
        trace.record(cell, result)?;

        if self.strategy.tracks_beliefs() {
            let mut beliefs = self.beliefs.clone();
            let posting = self.space.cell_index(cell);
            match result {
                GuessResult::Hit => beliefs &= posting,
                GuessResult::Miss => beliefs -= posting,
            }
            self.probabilities = lookup_map(self.space, self.strategy, &trace, &beliefs)?;
            self.beliefs = beliefs;
        }
        self.trace = trace;
        trace!("guess #{} at {}: {:?}", self.trace.len(), cell, result);
        Ok(result)
    }

    /// Next guess according to the strategy, falling back to the first
    /// unguessed cell. `None` once every cell has been guessed.
    pub fn select_guess<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        self.strategy
            .select(&self.probabilities, &self.trace, rng)
            .or_else(|| (0..self.space.cells()).find(|&c| !self.trace.contains(c)))
    }

    /// Guess until won; returns the number of guesses taken.
    pub fn autoplay<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, EngineError> {
        while !self.is_won() {
            let cell = self.select_guess(rng).ok_or(EngineError::NoGuessAvailable)?;
            self.guess(cell)?;
        }
        Ok(self.guess_count())
    }

    /// No cell's occupancy is still uncertain.
    pub fn is_deduction_win(&self) -> bool {
        self.probabilities.is_determined()
    }

    /// Every ship cell has been hit.
    pub fn is_exhaustion_win(&self) -> bool {
        self.trace.hits() == self.space.total_ship_cells()
    }

    pub fn is_won(&self) -> bool {
        self.is_deduction_win() || self.is_exhaustion_win()
    }

    /// Current probability map. Stale for [`Strategy::RandomUntracked`],
    /// which never refreshes it.
    pub fn probability_map(&self) -> &ProbabilityMap {
        &self.probabilities
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn guess_count(&self) -> usize {
        self.trace.len()
    }

    pub fn hits(&self) -> usize {
        self.trace.hits()
    }

    /// IDs of the boards still consistent with the trace.
    pub fn beliefs(&self) -> &BitSet {
        &self.beliefs
    }

    pub fn belief_count(&self) -> usize {
        self.beliefs.count_ones()
    }

    pub fn contains_belief(&self, id: usize) -> bool {
        self.beliefs.contains(id)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn space(&self) -> &'s BoardSpace {
        self.space
    }

    pub fn truth(&self) -> &Board {
        &self.truth
    }
}

/// Cache key for an all-miss trace, `None` once anything was hit or when
/// the strategy or policy skips the cache.
fn miss_key(space: &BoardSpace, strategy: Strategy, trace: &Trace) -> Option<MissKey> {
    if !strategy.uses_miss_cache() || trace.hits() > 0 {
        return None;
    }
    MissKey::for_policy(space.config().cache, trace.misses())
}

/// Probability map for `beliefs`, served from the space's miss cache when
/// the trace has an all-miss key.
fn lookup_map(
    space: &BoardSpace,
    strategy: Strategy,
    trace: &Trace,
    beliefs: &BitSet,
) -> Result<Arc<ProbabilityMap>, EngineError> {
    let key = miss_key(space, strategy, trace);
    let cache = space.miss_cache();
    if let Some(map) = key.as_ref().and_then(|k| cache.get(k)) {
        return Ok(map);
    }
    let map = Arc::new(ProbabilityMap::compute(space.width(), space.index(), beliefs)?);
    Ok(match key {
        Some(key) => cache.insert(key, map),
        None => map,
    })
}
