//! Per-pool bag state: which fingerprints the current bag has delivered.
//!
//! The registry is a plain synchronous map owned by one controller. Pools
//! are created lazily on first touch, seeded with a size hint when the
//! configuration carries one for that key.

use std::collections::{HashMap, HashSet};

use crate::fingerprint::Fingerprint;
use crate::model::{BagProgress, PoolKey};

/// Mutable record for one pool's current bag.
#[derive(Debug, Default)]
pub struct PoolState {
    seen: HashSet<Fingerprint>,
    known_size: Option<usize>,
}

impl PoolState {
    /// Distinct fingerprints delivered in the current bag.
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Size hint this pool was seeded with, if any.
    pub fn known_size(&self) -> Option<usize> {
        self.known_size
    }
}

/// Maps pool keys to their bag state, creating entries lazily.
#[derive(Debug, Default)]
pub struct PoolRegistry {
    pools: HashMap<PoolKey, PoolState>,
    hints: HashMap<PoolKey, usize>,
}

impl PoolRegistry {
    pub fn new(hints: HashMap<PoolKey, usize>) -> Self {
        Self {
            pools: HashMap::new(),
            hints,
        }
    }

    fn get_or_create(&mut self, key: &PoolKey) -> &mut PoolState {
        if !self.pools.contains_key(key) {
            let known_size = self.hints.get(key).copied();
            self.pools.insert(
                key.clone(),
                PoolState {
                    seen: HashSet::new(),
                    known_size,
                },
            );
        }
        // entry exists after the insert above
        self.pools.get_mut(key).unwrap()
    }

    /// Whether the current bag has already delivered this fingerprint.
    pub fn is_seen(&self, key: &PoolKey, fingerprint: &Fingerprint) -> bool {
        self.pools
            .get(key)
            .is_some_and(|state| state.seen.contains(fingerprint))
    }

    /// Record a delivered fingerprint. Idempotent; returns false when the
    /// fingerprint was already present.
    pub fn mark_seen(&mut self, key: &PoolKey, fingerprint: Fingerprint) -> bool {
        self.get_or_create(key).seen.insert(fingerprint)
    }

    /// Start a new bag: clear `seen`, keep the size hint.
    pub fn reset(&mut self, key: &PoolKey) {
        self.get_or_create(key).seen.clear();
    }

    /// True iff the pool has a size hint and the current bag has reached it.
    ///
    /// Uses `>=` so an understated hint still triggers a reset.
    pub fn is_exhausted(&self, key: &PoolKey) -> bool {
        let progress = self.progress(key);
        matches!(progress.known_size, Some(size) if progress.seen >= size)
    }

    /// Snapshot of one pool's bag progress.
    pub fn progress(&self, key: &PoolKey) -> BagProgress {
        match self.pools.get(key) {
            Some(state) => BagProgress {
                seen: state.seen_count(),
                known_size: state.known_size(),
            },
            None => BagProgress {
                seen: 0,
                known_size: self.hints.get(key).copied(),
            },
        }
    }
}
