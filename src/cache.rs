//! Probability maps shared across games that have only missed so far.
//!
//! Opening guesses are almost always misses and computing a map over the
//! full candidate space is the most expensive step of a game, so the first
//! game to reach an all-miss state stores its map and later games reuse it.
//! The table is owned by the board space and read concurrently by every
//! engine borrowing it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use crate::bitset::BitSet;
use crate::config::CachePolicy;
use crate::probability::ProbabilityMap;

/// Identifies an all-miss prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MissKey {
    /// Only the number of misses; see [`CachePolicy::MissCount`].
    Count(usize),
    /// The exact set of missed cells.
    Cells(BitSet),
}

impl MissKey {
    /// Key for a trace with no hits under `policy`, `None` when disabled.
    pub fn for_policy(policy: CachePolicy, misses: &BitSet) -> Option<Self> {
        match policy {
            CachePolicy::Disabled => None,
            CachePolicy::MissCount => Some(MissKey::Count(misses.count_ones())),
            CachePolicy::MissSet => Some(MissKey::Cells(misses.clone())),
        }
    }
}

/// Lookup counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: usize,
    pub misses: usize,
}

/// Memo table from all-miss prefixes to probability maps.
///
/// Concurrent writers racing on the same key store equal values, so the
/// first insert wins and later ones are dropped.
#[derive(Debug, Default)]
pub struct MissCache {
    maps: RwLock<HashMap<MissKey, Arc<ProbabilityMap>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl MissCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &MissKey) -> Option<Arc<ProbabilityMap>> {
        let found = self
            .maps
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned();
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Store `map` under `key` unless an entry already exists. Returns the
    /// map now cached for the key.
    pub fn insert(&self, key: MissKey, map: Arc<ProbabilityMap>) -> Arc<ProbabilityMap> {
        let mut maps = self.maps.write().unwrap_or_else(PoisonError::into_inner);
        maps.entry(key).or_insert(map).clone()
    }

    pub fn len(&self) -> usize {
        self.maps
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        self.maps
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
