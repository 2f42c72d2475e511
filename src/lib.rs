//! Exhaustive battleship solver.
//!
//! [`BoardSpace`] enumerates every legal layout of a ship inventory on a
//! grid and indexes them by cell. A [`BeliefEngine`] plays one game against
//! a hidden layout, keeping the set of layouts still consistent with its
//! hits and misses and deriving a per-cell hit probability from it. The
//! [`Strategy`] decides where to guess next.

mod bench;
mod bitset;
mod board;
mod cache;
mod common;
mod config;
mod engine;
mod logging;
mod probability;
mod ship;
mod space;
mod strategy;
pub mod ui;

pub use bench::{run_bench, BenchConfig, BenchError, BenchReport, GameOutcome};
pub use bitset::{BitSet, BitSetError, Ones};
pub use board::Board;
pub use cache::{CacheStats, MissCache, MissKey};
pub use common::*;
pub use config::*;
pub use engine::{BeliefEngine, Trace};
pub use logging::{init_logging, LOG_ENV};
pub use probability::ProbabilityMap;
pub use ship::{Orientation, Segment};
pub use space::BoardSpace;
pub use strategy::Strategy;
