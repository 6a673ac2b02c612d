//! The `drillbag check` command.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;

use drillbag_client::config::load_config_from;
use drillbag_client::{create_source, SourceConfig};
use drillbag_core::error::SourceError;
use drillbag_core::model::PoolKey;

pub async fn execute(config_path: Option<PathBuf>, probe: Option<String>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let mut warnings = Vec::new();

    if let SourceConfig::Remote {
        base_url,
        api_key: None,
        ..
    } = &config.source
    {
        warnings.push(format!("remote source {base_url} has no api_key configured"));
    }

    if config.sampler.max_attempts == 0 {
        warnings.push("max_attempts is 0; every sample call will fail".to_string());
    }

    let mut seen_hints = HashSet::new();
    for hint in &config.pool_hints {
        if hint.size == 0 {
            warnings.push(format!(
                "pool {} has a zero-size hint; its bag resets on every call",
                hint.key()
            ));
        }
        if !seen_hints.insert(hint.key()) {
            warnings.push(format!(
                "duplicate hint for pool {}; the last one wins",
                hint.key()
            ));
        }
    }

    for w in &warnings {
        println!("  WARNING: {w}");
    }
    if warnings.is_empty() {
        println!("Configuration OK.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    if let Some(pool) = probe {
        let key: PoolKey = pool.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        let source = create_source(&config.source);
        println!("Probing {} for {key}...", source.name());

        match source.generate(&key).await {
            Ok(item) => {
                println!("Probe OK: \"{}\" ({} choices)", item.stem, item.choices.len());
            }
            Err(SourceError::Transport(message)) => {
                println!("Probe failed (transport): {message}");
                anyhow::bail!("item service unreachable");
            }
            Err(SourceError::Protocol { status, message }) => {
                println!("Probe failed (protocol, HTTP {status}): {message}");
                anyhow::bail!("item service returned an error");
            }
        }
    }

    Ok(())
}
