//! Startup configuration and dependency wiring.

mod dependencies;

pub use dependencies::Dependencies;

use std::env;
use std::time::Duration;

use index_pruner_repository::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use index_pruner_repository::SearchClientConfig;
use tracing::warn;
use url::Url;

use crate::errors::ConfigError;

/// Region used for signing and credential resolution.
pub const REGION_VAR: &str = "AWS_REGION";

/// Base URL of the cluster.
pub const BASE_URL_VAR: &str = "ELASTICSEARCH_URL";

/// Optional per-request timeout in seconds.
pub const REQUEST_TIMEOUT_VAR: &str = "ELASTICSEARCH_REQUEST_TIMEOUT_SECS";

/// Configuration read once at startup.
#[derive(Debug, Clone)]
pub struct PrunerConfig {
    pub region: String,
    pub base_url: Url,
    pub request_timeout: Duration,
}

/// Look up a variable in the process environment.
pub fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

impl PrunerConfig {
    /// Build the configuration from a variable lookup.
    ///
    /// The region is checked before the URL. Empty values count as missing.
    ///
    /// # Environment Variables
    ///
    /// - `AWS_REGION`: region identifier (required)
    /// - `ELASTICSEARCH_URL`: cluster base URL (required)
    /// - `ELASTICSEARCH_REQUEST_TIMEOUT_SECS`: per-request timeout (default: 30)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let region = present(REGION_VAR).ok_or(ConfigError::MissingRegion)?;
        let raw_url = present(BASE_URL_VAR).ok_or(ConfigError::MissingBaseUrl)?;
        let base_url = Url::parse(raw_url.trim())
            .map_err(|e| ConfigError::InvalidBaseUrl(format!("{}: {}", raw_url, e)))?;
        if base_url.host_str().is_none() {
            return Err(ConfigError::InvalidBaseUrl(format!("{}: missing host", raw_url)));
        }

        let request_timeout_secs = match present(REQUEST_TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warn!(
                        value = %raw,
                        default_secs = DEFAULT_REQUEST_TIMEOUT_SECS,
                        "Invalid ELASTICSEARCH_REQUEST_TIMEOUT_SECS, using default"
                    );
                    DEFAULT_REQUEST_TIMEOUT_SECS
                }
            },
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            region: region.trim().to_string(),
            base_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    /// Client settings derived from this configuration.
    pub fn search_client_config(&self) -> SearchClientConfig {
        SearchClientConfig::new(self.base_url.clone(), self.region.clone())
            .with_request_timeout(self.request_timeout)
    }
}
