//! Dependency initialization and wiring for the index pruner.

use std::sync::Arc;

use index_pruner_repository::{
    AwsCredentialResolver, CredentialResolver, SearchClient, SignedSearchClient,
};
use tracing::info;

use crate::config::PrunerConfig;
use crate::errors::PruneError;
use crate::pruner::IndexPruner;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured pruner ready to run.
    pub pruner: IndexPruner,
}

impl Dependencies {
    /// Resolve credentials from the default provider chain and build the pruner.
    pub async fn new(config: &PrunerConfig) -> Result<Self, PruneError> {
        let resolver = AwsCredentialResolver::new(config.region.clone());
        Self::with_resolver(config, &resolver).await
    }

    /// Build the pruner with credentials from `resolver`.
    ///
    /// Credentials are resolved exactly once and shared read-only with the client.
    pub async fn with_resolver(
        config: &PrunerConfig,
        resolver: &dyn CredentialResolver,
    ) -> Result<Self, PruneError> {
        let credentials = resolver.resolve().await?;
        info!("Credentials resolved");

        let client: Arc<dyn SearchClient> = Arc::new(SignedSearchClient::new(
            config.search_client_config(),
            Arc::new(credentials),
        )?);

        Ok(Self {
            pruner: IndexPruner::new(client),
        })
    }
}
