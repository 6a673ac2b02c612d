//! The `drillbag pools` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use drillbag_client::config::load_config_from;
use drillbag_client::SourceConfig;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    match &config.source {
        SourceConfig::Remote { base_url, .. } => println!("Source: remote ({base_url})"),
        SourceConfig::Mock => println!("Source: mock (built-in bank)"),
    }
    println!(
        "Max attempts per bag cycle: {}",
        config.sampler.max_attempts
    );

    if config.pool_hints.is_empty() {
        println!("\nNo pool-size hints configured; every pool resets reactively.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Pool", "Size hint"]);
    for hint in &config.pool_hints {
        table.add_row(vec![hint.key().to_string(), hint.size.to_string()]);
    }
    println!("\nConfigured pool-size hints:\n{table}");

    Ok(())
}
