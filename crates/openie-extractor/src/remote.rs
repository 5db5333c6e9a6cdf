//! Remote extraction engine
//!
//! Forwards text to an external OpenIE service over HTTP and decodes the
//! reply. The service is expected to accept `{"text": "..."}` as a JSON POST
//! body and answer with the same wire array this server emits.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;

use openie_core::{EngineConfig, Extraction, ExtractionEngine, OpenIeError, Result, WireExtraction};

#[derive(Debug, Serialize)]
struct RemoteRequest<'a> {
    text: &'a str,
}

/// HTTP client for a hosted extraction service
pub struct RemoteEngine {
    client: Client,
    url: String,
}

impl RemoteEngine {
    /// Create a new remote engine
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OpenIeError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Create from config
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        if config.remote_url.trim().is_empty() {
            return Err(OpenIeError::ConfigError(
                "Remote engine URL required".to_string(),
            ));
        }
        Self::new(&config.remote_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl ExtractionEngine for RemoteEngine {
    async fn extract(&self, text: &str) -> Result<Vec<Extraction>> {
        let response = self
            .client
            .post(&self.url)
            .json(&RemoteRequest { text })
            .send()
            .await
            .map_err(|e| OpenIeError::Engine(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OpenIeError::Engine(format!(
                "Remote engine error ({status}): {body}"
            )));
        }

        let records: Vec<WireExtraction> = response
            .json()
            .await
            .map_err(|e| OpenIeError::Engine(format!("Failed to parse response: {e}")))?;

        tracing::debug!(url = %self.url, count = records.len(), "Remote extraction completed");

        Ok(records.into_iter().map(Extraction::from).collect())
    }

    fn name(&self) -> &str {
        "remote"
    }
}
