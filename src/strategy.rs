//! Guess-selection policies.

use core::fmt;
use core::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::common::ConfigError;
use crate::engine::Trace;
use crate::probability::{is_uncertain, ProbabilityMap};

/// How the next guess is chosen. Discriminants are the stable numeric ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Strategy {
    /// Cell whose hit probability is nearest 50%.
    #[default]
    Median = 0,
    /// Most likely cell that is not already certain.
    Maximum = 1,
    /// Uniformly random unguessed cell, beliefs still tracked.
    RandomTracked = 2,
    /// Uniformly random unguessed cell, no belief tracking at all.
    RandomUntracked = 3,
    /// Least likely cell that is not already ruled out.
    Minimum = 4,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Median,
        Strategy::Maximum,
        Strategy::RandomTracked,
        Strategy::RandomUntracked,
        Strategy::Minimum,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Median => "median",
            Strategy::Maximum => "maximum",
            Strategy::RandomTracked => "random-tracked",
            Strategy::RandomUntracked => "random-untracked",
            Strategy::Minimum => "minimum",
        }
    }

    /// Whether guesses narrow the belief set and refresh the probability map.
    pub fn tracks_beliefs(self) -> bool {
        !matches!(self, Strategy::RandomUntracked)
    }

    /// Whether all-miss maps are shared through the miss cache. The random
    /// strategies never read the map to pick a cell, so they skip it.
    pub fn uses_miss_cache(self) -> bool {
        matches!(self, Strategy::Median | Strategy::Maximum | Strategy::Minimum)
    }

    /// Pick the next cell. Returns `None` only when the policy finds no
    /// candidate among unguessed cells.
    pub fn select<R: Rng + ?Sized>(
        self,
        map: &ProbabilityMap,
        trace: &Trace,
        rng: &mut R,
    ) -> Option<usize> {
        let open = map.iter().filter(|&(cell, _)| !trace.contains(cell));
        match self {
            // Distance to 50% compared as |2k - n| on the raw counts, so
            // cells at k and n - k tie exactly.
            Strategy::Median => first_min_by(
                open.filter(|&(_, p)| is_uncertain(p)),
                |(cell, p)| match map.count(cell) {
                    Some((k, n)) => (2 * k).abs_diff(n) as f64,
                    None => (p - 50.0).abs(),
                },
            ),
            Strategy::Maximum => first_min_by(open.filter(|&(_, p)| p < 100.0), |(_, p)| -p),
            Strategy::Minimum => first_min_by(open.filter(|&(_, p)| is_uncertain(p)), |(_, p)| p),
            Strategy::RandomTracked | Strategy::RandomUntracked => {
                let cells: Vec<usize> = open.map(|(cell, _)| cell).collect();
                if cells.is_empty() {
                    None
                } else {
                    Some(cells[rng.random_range(0..cells.len())])
                }
            }
        }
    }
}

// Lowest score wins; ties keep the earliest cell.
fn first_min_by<I, F>(candidates: I, score: F) -> Option<usize>
where
    I: Iterator<Item = (usize, f64)>,
    F: Fn((usize, f64)) -> f64,
{
    let mut best: Option<(usize, f64)> = None;
    for (cell, p) in candidates {
        let q = score((cell, p));
        match best {
            Some((_, bq)) if q >= bq => {}
            _ => best = Some((cell, q)),
        }
    }
    best.map(|(cell, _)| cell)
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Strategy {
    type Error = ConfigError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Strategy::ALL
            .into_iter()
            .find(|s| s.id() == id)
            .ok_or(ConfigError::UnknownStrategy(id))
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    /// Accepts the kebab-case names, the short labels used in experiment
    /// reports (`pmed`, `pmax`, `pmin`, `rand`, `randfast`) and numeric ids.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "median" | "pmed" => Ok(Strategy::Median),
            "maximum" | "pmax" => Ok(Strategy::Maximum),
            "minimum" | "pmin" => Ok(Strategy::Minimum),
            "random-tracked" | "random" | "rand" => Ok(Strategy::RandomTracked),
            "random-untracked" | "randfast" => Ok(Strategy::RandomUntracked),
            other => match other.parse::<u8>() {
                Ok(id) => Strategy::try_from(id),
                Err(_) => Err(ConfigError::UnknownStrategyName(s.to_string())),
            },
        }
    }
}
