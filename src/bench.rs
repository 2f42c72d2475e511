//! Experiment driver: autoplay a strategy over many hidden boards of one
//! space and aggregate the guess counts.

use std::time::Instant;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::CacheStats;
use crate::common::{ConfigError, EngineError};
use crate::config::SpaceConfig;
use crate::engine::BeliefEngine;
use crate::space::BoardSpace;
use crate::strategy::Strategy;

/// Errors from a benchmark run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BenchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A game failed; carries the hidden board's ID.
    #[error("game on board {board_id} failed: {source}")]
    Game {
        board_id: usize,
        #[source]
        source: EngineError,
    },
}

/// Parameters of one experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    pub strategy: Strategy,
    /// Percentage of the candidate space to play, 1..=100. Boards are taken
    /// with a stride of `100 / coverage`.
    pub coverage: u8,
    /// Draw each hidden board at random instead of walking the space.
    pub randomise: bool,
    /// Base seed; game `i` uses `seed + i`.
    pub seed: u64,
    /// Play games on the rayon pool.
    pub parallel: bool,
    /// Log every game's score at `info` level.
    pub verbose: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            coverage: 100,
            randomise: false,
            seed: 0,
            parallel: true,
            verbose: false,
        }
    }
}

impl BenchConfig {
    /// Stride between tested boards.
    pub fn stride(&self) -> Result<usize, ConfigError> {
        if self.coverage == 0 || self.coverage > 100 {
            return Err(ConfigError::InvalidCoverage(self.coverage));
        }
        Ok(100 / self.coverage as usize)
    }
}

/// Guesses taken on one hidden board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    pub board_id: usize,
    pub guesses: usize,
}

/// Aggregated results of an experiment.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub space: SpaceConfig,
    pub strategy: Strategy,
    pub boards_total: usize,
    pub boards_tested: usize,
    pub mean_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    pub elapsed_ms: u128,
    pub cache: CacheStats,
    #[serde(skip)]
    pub outcomes: Vec<GameOutcome>,
}

fn play_one(
    space: &BoardSpace,
    config: &BenchConfig,
    sample: usize,
) -> Result<GameOutcome, BenchError> {
    let mut rng = SmallRng::seed_from_u64(config.seed.wrapping_add(sample as u64));
    let board_id = if config.randomise {
        space.random_board_id(&mut rng)
    } else {
        sample
    };
    let guesses = BeliefEngine::for_board(space, board_id, config.strategy)
        .and_then(|mut engine| engine.autoplay(&mut rng))
        .map_err(|source| BenchError::Game { board_id, source })?;
    if config.verbose {
        info!("board {:>8}: {:>3} guesses", board_id, guesses);
    } else {
        debug!("board {:>8}: {:>3} guesses", board_id, guesses);
    }
    Ok(GameOutcome { board_id, guesses })
}

/// Play the configured strategy against a sample of the space's boards.
pub fn run_bench(space: &BoardSpace, config: &BenchConfig) -> Result<BenchReport, BenchError> {
    let stride = config.stride()?;
    let samples: Vec<usize> = (0..space.len()).step_by(stride).collect();
    info!(
        "{} boards generated, {} to test with strategy {}",
        space.len(),
        samples.len(),
        config.strategy
    );

    let started = Instant::now();
    let outcomes: Vec<GameOutcome> = if config.parallel {
        samples
            .par_iter()
            .map(|&i| play_one(space, config, i))
            .collect::<Result<_, _>>()?
    } else {
        samples
            .iter()
            .map(|&i| play_one(space, config, i))
            .collect::<Result<_, _>>()?
    };
    let elapsed_ms = started.elapsed().as_millis();

    let total: usize = outcomes.iter().map(|o| o.guesses).sum();
    let mean_guesses = if outcomes.is_empty() {
        0.0
    } else {
        total as f64 / outcomes.len() as f64
    };
    let report = BenchReport {
        space: space.config().clone(),
        strategy: config.strategy,
        boards_total: space.len(),
        boards_tested: outcomes.len(),
        mean_guesses,
        min_guesses: outcomes.iter().map(|o| o.guesses).min().unwrap_or(0),
        max_guesses: outcomes.iter().map(|o| o.guesses).max().unwrap_or(0),
        elapsed_ms,
        cache: space.miss_cache().stats(),
        outcomes,
    };
    info!(
        "mean number of guesses: {:.2} (max {})",
        report.mean_guesses, report.max_guesses
    );
    Ok(report)
}
