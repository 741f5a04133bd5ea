use std::env;
use std::time::Duration;

use anyhow::Context;

/// Runtime configuration for the storefront client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend API, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout applied to the underlying HTTP client.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Construct config with a 30 second request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            base_url,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Adjust the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = env::var("API_BASE_URL").context("API_BASE_URL must be set")?;
        let mut config = Self::new(base_url);
        if let Ok(value) = env::var("API_TIMEOUT_SECONDS") {
            if let Ok(secs) = value.parse::<u64>() {
                config = config.with_timeout(Duration::from_secs(secs));
            }
        }
        Ok(config)
    }
}
