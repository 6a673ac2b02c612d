//! HTTP item source backed by the remote generation service.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use drillbag_core::error::SourceError;
use drillbag_core::model::{Difficulty, Item, PoolKey};
use drillbag_core::traits::ItemSource;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the item-generation endpoint.
///
/// The service draws uniformly within a pool on every call and keeps no
/// per-client state; duplicate filtering happens upstream in the sampler.
pub struct HttpItemSource {
    base_url: String,
    api_key: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpItemSource {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self::with_timeout(base_url, api_key, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, api_key: Option<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout_secs,
            client,
        }
    }
}

#[derive(Serialize)]
struct GenerateItemRequest {
    skill_id: String,
    difficulty: Difficulty,
}

#[derive(Deserialize)]
struct ServiceError {
    error: ServiceErrorBody,
}

#[derive(Deserialize)]
struct ServiceErrorBody {
    message: String,
}

#[async_trait]
impl ItemSource for HttpItemSource {
    fn name(&self) -> &str {
        "remote"
    }

    #[instrument(skip(self, pool), fields(pool = %pool))]
    async fn generate(&self, pool: &PoolKey) -> Result<Item, SourceError> {
        let body = GenerateItemRequest {
            skill_id: pool.skill_id.clone(),
            difficulty: pool.difficulty,
        };

        let mut request = self
            .client
            .post(format!("{}/v1/items/generate", self.base_url))
            .header("content-type", "application/json")
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Transport(format!(
                    "request timed out after {}s",
                    self.timeout_secs
                ))
            } else {
                SourceError::Transport(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ServiceError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(SourceError::Protocol { status, message });
        }

        let item: Item = response.json().await.map_err(|e| SourceError::Protocol {
            status: 0,
            message: format!("failed to parse response: {e}"),
        })?;

        item.validate()
            .map_err(|message| SourceError::Protocol { status, message })?;

        Ok(item)
    }
}
