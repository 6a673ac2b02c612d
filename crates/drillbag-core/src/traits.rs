//! Trait seams between the sampler and the outside world.
//!
//! `ItemSource` is implemented by the `drillbag-client` crate (HTTP and mock
//! sources); `ItemConsumer` is implemented by whatever embeds the sampler
//! (the CLI's console consumer, a UI adapter).

use async_trait::async_trait;

use crate::error::{SampleError, SourceError};
use crate::model::{Delivered, Item, PoolKey};

/// A remote (or scripted) generator of practice items.
///
/// The service has no memory of prior calls: any request may return any item
/// from the pool, including one this client has already delivered. Novelty
/// filtering is entirely the sampler's job.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Short source name for logs (e.g. "remote", "mock").
    fn name(&self) -> &str;

    /// Generate one item for the given pool.
    ///
    /// The error is typed rather than `anyhow` because the sampler routes on
    /// it: source failures propagate immediately without consuming retry
    /// budget, unlike duplicates.
    async fn generate(&self, pool: &PoolKey) -> Result<Item, SourceError>;
}

/// Receives sampling outcomes. Never calls back into the sampler except by
/// triggering new requests.
pub trait ItemConsumer: Send + Sync {
    /// A fresh item was accepted for delivery.
    fn on_item_ready(&self, delivered: &Delivered);

    /// Sampling failed; `Busy` is not reported here (the caller sees it
    /// directly and decides whether the double-trigger matters).
    fn on_sampling_error(&self, error: &SampleError);
}

/// Consumer that discards everything.
pub struct NoopConsumer;

impl ItemConsumer for NoopConsumer {
    fn on_item_ready(&self, _: &Delivered) {}
    fn on_sampling_error(&self, _: &SampleError) {}
}
