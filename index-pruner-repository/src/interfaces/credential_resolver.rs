//! Credential resolver trait definition.

use async_trait::async_trait;
use index_pruner_shared::Credentials;

use crate::errors::SearchClientError;

/// Obtains the credentials used to sign requests.
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    /// Resolve credentials once for the run.
    ///
    /// Returns `SearchClientError::CredentialError` when no source yields credentials.
    async fn resolve(&self) -> Result<Credentials, SearchClientError>;
}
