//! The `drillbag practice` command.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::Table;

use drillbag_client::config::load_config_from;
use drillbag_client::{create_source, MockItemSource};
use drillbag_core::error::SampleError;
use drillbag_core::model::{Delivered, PoolKey};
use drillbag_core::sampler::SamplingController;
use drillbag_core::traits::{ItemConsumer, ItemSource};

use crate::session::{PoolSummary, SessionReport};

/// Prints items to the console as they are accepted.
struct ConsoleConsumer {
    show_answers: bool,
}

impl ItemConsumer for ConsoleConsumer {
    fn on_item_ready(&self, delivered: &Delivered) {
        if delivered.new_bag {
            println!("\n-- pool exhausted, starting a new bag --");
        }
        println!("\n[{}] {}", delivered.seen_count, delivered.item.stem);
        for choice in &delivered.item.choices {
            println!("  ({}) {}", choice.id, choice.text);
        }
        if self.show_answers {
            println!("  answer: ({})", delivered.item.solution_choice_id);
            if let Some(explanation) = &delivered.item.explanation {
                println!("  why: {explanation}");
            }
        }
    }

    fn on_sampling_error(&self, error: &SampleError) {
        eprintln!("  sampling failed: {error}");
    }
}

pub async fn execute(
    pool: String,
    count: u32,
    quiz: bool,
    show_answers: bool,
    mock: bool,
    report_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let key: PoolKey = pool.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    anyhow::ensure!(count >= 1, "count must be at least 1");

    let config = load_config_from(config_path.as_deref())?;
    let source: Arc<dyn ItemSource> = if mock {
        Arc::new(MockItemSource::demo())
    } else {
        create_source(&config.source)
    };

    let controller = SamplingController::new(source, config.sampler_config());
    let consumer = ConsoleConsumer { show_answers };

    let started_at = Utc::now();
    tracing::info!(session = %controller.session_id(), pool = %key, "practice session started");
    println!(
        "Sampling {} item(s) from {} via {}",
        count,
        key,
        controller.source_name()
    );

    let mut summary = PoolSummary {
        pool: key.clone(),
        delivered: 0,
        duplicates_skipped: 0,
        new_bags: 0,
        answered: 0,
        correct: 0,
    };
    let mut errors = Vec::new();

    for _ in 0..count {
        match controller.request_next(&key, &consumer).await {
            Ok(delivered) => {
                summary.delivered += 1;
                summary.duplicates_skipped += delivered.duplicates_skipped;
                if delivered.new_bag {
                    summary.new_bags += 1;
                }
                if quiz {
                    if let Some(answer) = read_answer()? {
                        summary.answered += 1;
                        if answer == delivered.item.solution_choice_id {
                            summary.correct += 1;
                            println!("  correct!");
                        } else {
                            println!(
                                "  not quite, the answer was ({})",
                                delivered.item.solution_choice_id
                            );
                        }
                        if let Some(explanation) = &delivered.item.explanation {
                            println!("  why: {explanation}");
                        }
                    }
                }
            }
            Err(e) => {
                // Consumer already reported it; stop the session here
                errors.push(e.to_string());
                break;
            }
        }
    }

    print_summary(&summary, quiz);

    if let Some(path) = report_path {
        let report = SessionReport {
            session_id: controller.session_id(),
            started_at,
            finished_at: Utc::now(),
            source: controller.source_name().to_string(),
            pools: vec![summary],
            errors,
        };
        report.save_json(&path)?;
        println!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn read_answer() -> Result<Option<String>> {
    print!("Your answer (a-d, enter to skip): ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("failed to read answer")?;
    let answer = line.trim().to_lowercase();
    Ok(if answer.is_empty() { None } else { Some(answer) })
}

fn print_summary(summary: &PoolSummary, quiz: bool) {
    let mut table = Table::new();
    table.set_header(vec!["Pool", "Delivered", "Duplicates skipped", "New bags"]);
    table.add_row(vec![
        summary.pool.to_string(),
        summary.delivered.to_string(),
        summary.duplicates_skipped.to_string(),
        summary.new_bags.to_string(),
    ]);
    println!("\nSession summary:\n{table}");

    if quiz && summary.answered > 0 {
        println!("Score: {}/{} correct", summary.correct, summary.answered);
    }
}
