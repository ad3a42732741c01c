//! Error types for the index pruner.

use index_pruner_repository::SearchClientError;
use index_pruner_shared::DeletionOutcome;
use thiserror::Error;

/// Missing or unusable startup configuration.
///
/// Raised before any network activity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The region is not set.
    #[error("AWS_REGION not set")]
    MissingRegion,

    /// The cluster URL is not set.
    #[error("ELASTICSEARCH_URL not set")]
    MissingBaseUrl,

    /// The cluster URL could not be parsed.
    #[error("ELASTICSEARCH_URL is not a valid URL: {0}")]
    InvalidBaseUrl(String),
}

/// Errors that end a pruning run.
#[derive(Error, Debug)]
pub enum PruneError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Credential resolution or the metadata fetch failed; nothing was deleted.
    #[error(transparent)]
    Search(#[from] SearchClientError),

    /// A delete call failed and the remaining indices were skipped.
    ///
    /// `completed` holds every index processed so far, ending with the failed one.
    #[error("Failed to delete index '{index_name}': {source}")]
    DeletionFailed {
        index_name: String,
        completed: Vec<DeletionOutcome>,
        #[source]
        source: SearchClientError,
    },
}

