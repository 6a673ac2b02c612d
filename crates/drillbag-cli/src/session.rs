//! Session reports with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use drillbag_core::model::PoolKey;

/// Record of one practice session, written with `--report`.
///
/// This is consumer-side bookkeeping for the learner; sampler state itself
/// is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Sampling session identifier.
    pub session_id: Uuid,
    /// When the session started.
    pub started_at: DateTime<Utc>,
    /// When the session finished.
    pub finished_at: DateTime<Utc>,
    /// Item source the session ran against.
    pub source: String,
    /// Per-pool tallies.
    pub pools: Vec<PoolSummary>,
    /// Errors encountered, in order.
    pub errors: Vec<String>,
}

/// Tallies for one pool within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSummary {
    pub pool: PoolKey,
    /// Items delivered.
    pub delivered: u32,
    /// Duplicate fetches discarded before acceptance.
    pub duplicates_skipped: u32,
    /// Deliveries that started a fresh bag.
    pub new_bags: u32,
    /// Quiz answers given.
    pub answered: u32,
    /// Quiz answers that were correct.
    pub correct: u32,
}

impl SessionReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}
