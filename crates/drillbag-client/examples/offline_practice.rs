//! Offline practice example — minimal programmatic usage of drillbag.
//!
//! Runs a short no-repeat session against the built-in mock item bank,
//! no network or configuration required.
//!
//! ```bash
//! cargo run --example offline_practice
//! ```

use std::sync::Arc;

use drillbag_client::MockItemSource;
use drillbag_core::model::{Delivered, Difficulty, PoolKey};
use drillbag_core::sampler::{SamplerConfig, SamplingController};
use drillbag_core::traits::ItemConsumer;

struct ConsoleConsumer;

impl ItemConsumer for ConsoleConsumer {
    fn on_item_ready(&self, delivered: &Delivered) {
        println!("\n[{}] {}", delivered.seen_count, delivered.item.stem);
        for choice in &delivered.item.choices {
            println!("  ({}) {}", choice.id, choice.text);
        }
    }

    fn on_sampling_error(&self, error: &drillbag_core::error::SampleError) {
        eprintln!("sampling failed: {error}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let source = Arc::new(MockItemSource::demo());
    let pool = PoolKey::new("algebra.mixed", Difficulty::Easy);

    // Hint the bank size so the bag resets cleanly once every item has run
    let mut config = SamplerConfig::default();
    config.pool_size_hints.insert(pool.clone(), 6);

    let controller = SamplingController::new(source, config);
    let consumer = ConsoleConsumer;

    println!("drillbag offline practice — pool {pool}");
    for _ in 0..8 {
        let delivered = controller.request_next(&pool, &consumer).await?;
        if delivered.new_bag {
            println!("  (bank exhausted, starting over)");
        }
    }

    let progress = controller.progress(&pool);
    match progress.known_size {
        Some(size) => println!(
            "\nSession done: {} of {size} items in the current bag.",
            progress.seen
        ),
        None => println!("\nSession done: {} items in the current bag.", progress.seen),
    }

    Ok(())
}
