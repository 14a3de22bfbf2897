//! Client configuration.

use anyhow::{Context, Result};

/// Base URL of the MBTA v2 realtime API.
pub const DEFAULT_BASE_URL: &str = "http://realtime.mbta.com/developer/api/v2";

/// Immutable settings for an [`MbtaClient`](crate::client::MbtaClient).
///
/// `base_url` only needs overriding when pointing the client at a mock
/// server; it must not carry a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MbtaConfig {
    pub api_key: String,
    pub base_url: String,
}

impl MbtaConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Reads `MBTA_API_KEY` (required) and `MBTA_BASE_URL` (optional).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("MBTA_API_KEY").context("MBTA_API_KEY must be set")?;
        let config = Self::new(api_key);

        Ok(match std::env::var("MBTA_BASE_URL") {
            Ok(base_url) if !base_url.is_empty() => config.with_base_url(base_url),
            _ => config,
        })
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}
