//! Configuration types for the SignedSearchClient.

use std::time::Duration;

use url::Url;

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the signed search client.
#[derive(Debug, Clone)]
pub struct SearchClientConfig {
    /// Base URL of the cluster (e.g. `https://search-logs.eu-west-1.es.amazonaws.com`).
    pub base_url: Url,
    /// Region used in the signing scope.
    pub region: String,
    /// Timeout applied to each HTTP request.
    pub request_timeout: Duration,
}

impl SearchClientConfig {
    /// Create a config with the default request timeout.
    pub fn new(base_url: Url, region: impl Into<String>) -> Self {
        Self {
            base_url,
            region: region.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the per-request timeout.
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}
