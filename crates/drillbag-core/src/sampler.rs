//! The sampling controller: bounded fetch-and-check-novelty cycles.
//!
//! The remote generator picks uniformly within a pool and remembers nothing
//! about this client, so small pools repeat quickly. The controller filters
//! fetches through the pool registry and delivers only stems the current bag
//! has not shown yet, resetting the bag when it runs out of novel material.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::SampleError;
use crate::fingerprint::Fingerprint;
use crate::gate::RequestGate;
use crate::model::{BagProgress, Delivered, PoolKey};
use crate::registry::PoolRegistry;
use crate::traits::{ItemConsumer, ItemSource};

/// Default fetch attempts per bag cycle.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Bag cycles per call: the current bag, then one retry against a fresh bag.
const SAMPLE_CYCLES: u32 = 2;

/// Configuration for the sampling controller.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Fetch attempts per bag cycle before the bag counts as exhausted.
    pub max_attempts: u32,
    /// Advisory pool sizes. A bag that reaches its hint resets proactively
    /// instead of burning attempts on guaranteed duplicates. Hints may be
    /// partial, absent, or wrong without breaking correctness.
    pub pool_size_hints: HashMap<PoolKey, usize>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            pool_size_hints: HashMap::new(),
        }
    }
}

/// Delivers a non-repeating item sequence per pool.
///
/// One controller owns its registry and gate outright, so independent
/// sessions (or tests) can run side by side without cross-contamination.
/// The registry lock is internal and never held across an await.
pub struct SamplingController {
    source: Arc<dyn ItemSource>,
    registry: Mutex<PoolRegistry>,
    gate: RequestGate,
    config: SamplerConfig,
    session_id: Uuid,
}

impl SamplingController {
    pub fn new(source: Arc<dyn ItemSource>, config: SamplerConfig) -> Self {
        Self {
            source,
            registry: Mutex::new(PoolRegistry::new(config.pool_size_hints.clone())),
            gate: RequestGate::new(),
            config,
            session_id: Uuid::new_v4(),
        }
    }

    /// Identifier of this sampling session, used in log spans.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Name of the underlying item source.
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Whether a sampling cycle is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    /// Bag progress snapshot for one pool.
    pub fn progress(&self, key: &PoolKey) -> BagProgress {
        self.registry.lock().unwrap().progress(key)
    }

    /// Fetch the next fresh item for a pool.
    ///
    /// Runs up to two bag cycles. The first works against the current bag,
    /// resetting it up front if a size hint says it is already complete. If
    /// `max_attempts` fetches all come back as duplicates, the bag is reset
    /// and a second cycle gets the same budget; within one call an item
    /// rejected in the first cycle stays rejected in the second, so a caller
    /// never sees the stem it was just refused. Source failures propagate
    /// immediately without consuming any of the budget.
    #[instrument(skip(self, key), fields(session = %self.session_id, pool = %key))]
    pub async fn sample(&self, key: &PoolKey) -> Result<Delivered, SampleError> {
        let _token = self.gate.try_acquire().ok_or(SampleError::Busy)?;

        let mut rejected: HashSet<Fingerprint> = HashSet::new();
        let mut attempts: u32 = 0;
        let mut new_bag = false;

        for cycle in 0..SAMPLE_CYCLES {
            {
                let mut registry = self.registry.lock().unwrap();
                if cycle == 0 {
                    if registry.is_exhausted(key) {
                        info!("bag complete, starting a new bag");
                        registry.reset(key);
                        new_bag = true;
                    }
                } else {
                    info!(attempts, "budget spent on duplicates, resetting bag");
                    registry.reset(key);
                    new_bag = true;
                }
            }

            for _ in 0..self.config.max_attempts {
                let item = self.source.generate(key).await?;
                attempts += 1;
                let fingerprint = Fingerprint::of_stem(&item.stem);

                let mut registry = self.registry.lock().unwrap();
                if registry.is_seen(key, &fingerprint) || rejected.contains(&fingerprint) {
                    drop(registry);
                    debug!(attempts, %fingerprint, "duplicate stem, retrying");
                    rejected.insert(fingerprint);
                    continue;
                }
                registry.mark_seen(key, fingerprint.clone());
                let seen_count = registry.progress(key).seen;
                drop(registry);

                debug!(attempts, seen_count, "item accepted");
                return Ok(Delivered {
                    item,
                    fingerprint,
                    pool: key.clone(),
                    new_bag,
                    duplicates_skipped: attempts - 1,
                    seen_count,
                });
            }
            warn!(cycle, attempts, "cycle exhausted without a fresh item");
        }

        Err(SampleError::RetriesExhausted { attempts })
    }

    /// Trigger a sample and dispatch the outcome to a consumer.
    ///
    /// `Busy` is handed back without notifying the consumer: a rejected
    /// double-trigger is the caller's event, not a sampling failure.
    pub async fn request_next(
        &self,
        key: &PoolKey,
        consumer: &dyn ItemConsumer,
    ) -> Result<Delivered, SampleError> {
        match self.sample(key).await {
            Ok(delivered) => {
                consumer.on_item_ready(&delivered);
                Ok(delivered)
            }
            Err(SampleError::Busy) => Err(SampleError::Busy),
            Err(e) => {
                consumer.on_sampling_error(&e);
                Err(e)
            }
        }
    }
}
