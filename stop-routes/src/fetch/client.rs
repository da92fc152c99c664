//! Transit-patterns API client.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::LineId;

use super::error::FetchError;
use super::runner::PatternSource;

/// Default base URL for the transit-patterns API.
const DEFAULT_BASE_URL: &str = "https://api.511.org/transit/patterns";

/// Configuration for fetching pattern documents.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// API key sent as the `api_key` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Agency operator id
    pub operator_id: String,
    /// Directory pattern files are written to
    pub output_dir: PathBuf,
    /// Pause between consecutive requests
    pub delay: Duration,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FetchConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            operator_id: "SF".to_string(),
            output_dir: PathBuf::from("routes"),
            delay: Duration::from_secs(60),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_operator(mut self, operator_id: impl Into<String>) -> Self {
        self.operator_id = operator_id.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// HTTP client for the transit-patterns API.
#[derive(Debug, Clone)]
pub struct PatternsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    operator_id: String,
}

impl PatternsClient {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        if config.api_key.trim().is_empty() {
            return Err(FetchError::Config("API key is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            operator_id: config.operator_id.clone(),
        })
    }

    /// Fetch the raw pattern document for one line.
    pub async fn fetch_pattern(&self, line: &LineId) -> Result<Vec<u8>, FetchError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("operator_id", self.operator_id.as_str()),
                ("line_id", line.as_str()),
            ])
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FetchError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl PatternSource for PatternsClient {
    async fn fetch(&self, line: &LineId) -> Result<Vec<u8>, FetchError> {
        self.fetch_pattern(line).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = FetchConfig::new("test-api-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.operator_id, "SF");
        assert_eq!(config.output_dir, PathBuf::from("routes"));
        assert_eq!(config.delay, Duration::from_secs(60));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builders() {
        let config = FetchConfig::new("key")
            .with_base_url("http://localhost:8080")
            .with_operator("AC")
            .with_output_dir("/tmp/patterns")
            .with_delay(Duration::ZERO);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.operator_id, "AC");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/patterns"));
        assert_eq!(config.delay, Duration::ZERO);
    }

    #[test]
    fn empty_key_rejected() {
        let result = PatternsClient::new(&FetchConfig::new("  "));
        assert!(matches!(result, Err(FetchError::Config(_))));
    }
}
