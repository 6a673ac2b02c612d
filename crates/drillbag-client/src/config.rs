//! Configuration loading and the item-source factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use drillbag_core::model::{Difficulty, PoolKey};
use drillbag_core::sampler::{SamplerConfig, DEFAULT_MAX_ATTEMPTS};
use drillbag_core::traits::ItemSource;

use crate::http::HttpItemSource;
use crate::mock::MockItemSource;

fn default_timeout_secs() -> u64 {
    30
}

/// Which item source to run against.
///
/// Note: Custom Debug impl masks the API key to prevent accidental exposure
/// in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    Remote {
        base_url: String,
        #[serde(default)]
        api_key: Option<String>,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    Mock,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Mock
    }
}

impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceConfig::Remote {
                api_key,
                base_url,
                timeout_secs,
            } => f
                .debug_struct("Remote")
                .field("base_url", base_url)
                .field("api_key", &api_key.as_ref().map(|_| "***"))
                .field("timeout_secs", timeout_secs)
                .finish(),
            SourceConfig::Mock => f.debug_struct("Mock").finish(),
        }
    }
}

/// Sampler settings block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplerSettings {
    /// Fetch attempts per bag cycle.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// One advisory pool-size hint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolHint {
    /// Skill identifier, e.g. `"quad.graph.vertex"`.
    pub skill: String,
    /// Difficulty band.
    pub difficulty: Difficulty,
    /// Claimed number of distinct items in the pool. Advisory only: the
    /// sampler uses it to reset bags early, never as an authoritative count.
    pub size: usize,
}

impl PoolHint {
    pub fn key(&self) -> PoolKey {
        PoolKey::new(self.skill.clone(), self.difficulty)
    }
}

/// Top-level drillbag configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DrillbagConfig {
    /// Item source to use. Defaults to the built-in mock so the tool works
    /// offline out of the box.
    #[serde(default)]
    pub source: SourceConfig,
    /// Sampler settings.
    #[serde(default)]
    pub sampler: SamplerSettings,
    /// Advisory pool sizes, may be partial or absent.
    #[serde(default)]
    pub pool_hints: Vec<PoolHint>,
}

impl DrillbagConfig {
    /// Build the core sampler configuration from this config.
    pub fn sampler_config(&self) -> SamplerConfig {
        let pool_size_hints: HashMap<PoolKey, usize> = self
            .pool_hints
            .iter()
            .map(|hint| (hint.key(), hint.size))
            .collect();
        SamplerConfig {
            max_attempts: self.sampler.max_attempts,
            pool_size_hints,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_source_config(config: &SourceConfig) -> SourceConfig {
    match config {
        SourceConfig::Remote {
            base_url,
            api_key,
            timeout_secs,
        } => {
            // An api_key that resolves to nothing counts as absent
            let api_key = api_key
                .as_ref()
                .map(|k| resolve_env_vars(k))
                .filter(|k| !k.is_empty());
            SourceConfig::Remote {
                base_url: resolve_env_vars(base_url),
                api_key,
                timeout_secs: *timeout_secs,
            }
        }
        SourceConfig::Mock => SourceConfig::Mock,
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `drillbag.toml` in the current directory
/// 2. `~/.config/drillbag/config.toml`
///
/// Environment variable override: `DRILLBAG_API_KEY` replaces the remote
/// source's key.
pub fn load_config() -> Result<DrillbagConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<DrillbagConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("drillbag.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<DrillbagConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => DrillbagConfig::default(),
    };

    // Apply env var override
    if let Ok(key) = std::env::var("DRILLBAG_API_KEY") {
        if let SourceConfig::Remote { api_key, .. } = &mut config.source {
            *api_key = Some(key);
        }
    }

    config.source = resolve_source_config(&config.source);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("drillbag"))
}

/// Create an item source from its configuration.
pub fn create_source(config: &SourceConfig) -> Arc<dyn ItemSource> {
    match config {
        SourceConfig::Remote {
            base_url,
            api_key,
            timeout_secs,
        } => Arc::new(HttpItemSource::with_timeout(
            base_url,
            api_key.clone(),
            *timeout_secs,
        )),
        SourceConfig::Mock => Arc::new(MockItemSource::demo()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_DRILLBAG_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_DRILLBAG_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_DRILLBAG_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_DRILLBAG_TEST_VAR");
    }

    #[test]
    fn default_config_runs_offline() {
        let config = DrillbagConfig::default();
        assert!(matches!(config.source, SourceConfig::Mock));
        assert_eq!(config.sampler.max_attempts, 10);
        assert!(config.pool_hints.is_empty());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[source]
type = "remote"
base_url = "https://items.example.com"
api_key = "sk-test"
timeout_secs = 10

[sampler]
max_attempts = 5

[[pool_hints]]
skill = "quad.graph.vertex"
difficulty = "easy"
size = 12

[[pool_hints]]
skill = "lin.solve"
difficulty = "hard"
size = 30
"#;
        let config: DrillbagConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.source,
            SourceConfig::Remote { ref base_url, timeout_secs: 10, .. }
                if base_url == "https://items.example.com"
        ));
        assert_eq!(config.sampler.max_attempts, 5);
        assert_eq!(config.pool_hints.len(), 2);

        let sampler_config = config.sampler_config();
        assert_eq!(sampler_config.max_attempts, 5);
        assert_eq!(
            sampler_config
                .pool_size_hints
                .get(&PoolKey::new("quad.graph.vertex", Difficulty::Easy)),
            Some(&12)
        );
        assert_eq!(
            sampler_config
                .pool_size_hints
                .get(&PoolKey::new("lin.solve", Difficulty::Hard)),
            Some(&30)
        );
    }

    #[test]
    fn mock_source_parses_from_type_tag() {
        let config: DrillbagConfig = toml::from_str("[source]\ntype = \"mock\"\n").unwrap();
        assert!(matches!(config.source, SourceConfig::Mock));
    }

    #[test]
    fn debug_masks_the_api_key() {
        let config = SourceConfig::Remote {
            base_url: "https://items.example.com".into(),
            api_key: Some("sk-very-secret".into()),
            timeout_secs: 30,
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn empty_resolved_key_counts_as_absent() {
        let config = SourceConfig::Remote {
            base_url: "https://items.example.com".into(),
            api_key: Some("${_DRILLBAG_UNSET_VAR}".into()),
            timeout_secs: 30,
        };
        let resolved = resolve_source_config(&config);
        assert!(matches!(
            resolved,
            SourceConfig::Remote { api_key: None, .. }
        ));
    }

    #[test]
    fn load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[source]\ntype = \"mock\"\n\n[sampler]\nmax_attempts = 7\n"
        )
        .unwrap();

        let config = load_config_from(Some(file.path())).unwrap();
        assert_eq!(config.sampler.max_attempts, 7);
        assert!(matches!(config.source, SourceConfig::Mock));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/drillbag.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn create_source_dispatches_on_type() {
        let mock = create_source(&SourceConfig::Mock);
        assert_eq!(mock.name(), "mock");

        let remote = create_source(&SourceConfig::Remote {
            base_url: "https://items.example.com".into(),
            api_key: None,
            timeout_secs: 30,
        });
        assert_eq!(remote.name(), "remote");
    }
}
