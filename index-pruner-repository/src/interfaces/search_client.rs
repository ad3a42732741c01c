//! Search client trait definition.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::errors::SearchClientError;

/// Issues authenticated requests against the cluster.
///
/// Every call is signed immediately before it is sent. Failures are returned
/// as-is and never retried.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Send `method path` with an optional JSON body and return the parsed response.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `path` - Path relative to the base URL, e.g. `/_cluster/state/metadata`
    /// * `body` - Optional JSON request body
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The response body parsed as JSON
    /// * `Err(SearchClientError)` - Credential, transport, API or decode failure
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, SearchClientError>;
}
