//! # Transposition Table
//!
//! Maps position hashes to alpha-beta results so repeated positions are not
//! searched twice.
//!
//! ## Replacement Policy
//!
//! - **New hash**: always inserted; the table may grow past its nominal budget
//! - **Existing hash**: overwritten only by an entry of greater-or-equal depth
//!
//! There is no bucket scheme and no collision verification; a 64-bit Zobrist
//! key makes false hits rare enough to accept.
//!
//! Backed by `DashMap` with atomic hit/miss counters, so a table can be shared
//! by reference across many searches (the MCTS endgame solver keeps one warm
//! for every rollout of a call).

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Which side of the true value a stored score bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// Score is the exact minimax value.
    Exact,
    /// Search failed high: true value ≥ score.
    Lower,
    /// Search failed low: true value ≤ score.
    Upper,
}

/// Stored search result for one position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry<M> {
    pub score: i64,
    /// Remaining depth the score was searched to.
    pub depth: u32,
    pub bound: Bound,
    pub best_move: Option<M>,
}

/// Upper bound on entries reserved up front, whatever the byte budget.
const MAX_PREALLOCATED: usize = 1 << 16;

/// Hash-keyed table of [`TTEntry`] values.
pub struct TranspositionTable<M> {
    table: DashMap<u64, TTEntry<M>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<M: Copy> TranspositionTable<M> {
    /// Empty table with no reservation.
    pub fn new() -> Self {
        Self {
            table: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Empty table with capacity reserved for roughly `size_bytes` of entries.
    pub fn with_size_bytes(size_bytes: usize) -> Self {
        let per_entry = std::mem::size_of::<(u64, TTEntry<M>)>().max(1);
        let capacity = (size_bytes / per_entry).min(MAX_PREALLOCATED);
        Self {
            table: DashMap::with_capacity(capacity),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Insert, or replace an existing entry if `entry` is at least as deep.
    pub fn store(&self, hash: u64, entry: TTEntry<M>) {
        self.table
            .entry(hash)
            .and_modify(|existing| {
                if entry.depth >= existing.depth {
                    *existing = entry;
                }
            })
            .or_insert(entry);
    }

    /// Exact lookup. Counts a hit or a miss.
    pub fn probe(&self, hash: u64) -> Option<TTEntry<M>> {
        match self.table.get(&hash) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(*entry)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Drop all entries and reset the counters.
    pub fn clear(&self) {
        self.table.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

impl<M: Copy> Default for TranspositionTable<M> {
    fn default() -> Self {
        Self::new()
    }
}
