//! # Index Pruner
//!
//! Deletes every index except the reserved one (`.kibana`) from an
//! Elasticsearch cluster hosted on AWS, signing each request with SigV4.
//!
//! ## Flow
//!
//! 1. **Config**: read the region and cluster URL; stop with status 1 or 2 if missing
//! 2. **Dependencies**: resolve credentials once and build the signed client
//! 3. **Pruner**: fetch cluster metadata, filter, delete indices one at a time
//! 4. **Exit**: map the outcome to the process exit status
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`pruner`]: The fetch/filter/delete workflow
//! - [`errors`]: Error types for the pruner

pub mod config;
pub mod errors;
pub mod pruner;

pub use config::{Dependencies, PrunerConfig};
pub use errors::{ConfigError, PruneError};
pub use pruner::IndexPruner;

use std::future::Future;

use index_pruner_shared::{DeletionStatus, IndexFilter};
use tracing::{error, info};

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every targeted index was processed without a failed deletion.
    Success,
    /// `AWS_REGION` is missing.
    MissingRegion,
    /// `ELASTICSEARCH_URL` is missing or invalid.
    MissingBaseUrl,
    /// Credential resolution, the metadata fetch, or a deletion failed.
    RunFailed,
}

impl ExitStatus {
    /// Numeric process exit code.
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::MissingRegion => 1,
            Self::MissingBaseUrl => 2,
            Self::RunFailed => 100,
        }
    }
}

impl From<&ConfigError> for ExitStatus {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::MissingRegion => Self::MissingRegion,
            ConfigError::MissingBaseUrl | ConfigError::InvalidBaseUrl(_) => Self::MissingBaseUrl,
        }
    }
}

impl From<&PruneError> for ExitStatus {
    fn from(err: &PruneError) -> Self {
        match err {
            PruneError::Config(e) => e.into(),
            PruneError::Search(_) | PruneError::DeletionFailed { .. } => Self::RunFailed,
        }
    }
}

/// Run the pruner once and report the exit status.
///
/// Configuration is validated before `build` is called, so a missing setting
/// never leads to network activity. `build` resolves credentials and wires
/// the pruner.
pub async fn run<L, B, Fut>(lookup: L, build: B) -> ExitStatus
where
    L: Fn(&str) -> Option<String>,
    B: FnOnce(PrunerConfig) -> Fut,
    Fut: Future<Output = Result<IndexPruner, PruneError>>,
{
    let config = match PrunerConfig::from_lookup(lookup) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitStatus::from(&e);
        }
    };

    info!(
        url = %config.base_url,
        region = %config.region,
        "Starting index pruner"
    );

    let pruner = match build(config).await {
        Ok(pruner) => pruner,
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return ExitStatus::from(&e);
        }
    };

    match pruner.prune(&IndexFilter::default()).await {
        Ok(outcomes) => {
            let not_acknowledged = outcomes
                .iter()
                .filter(|o| o.status == DeletionStatus::NotAcknowledged)
                .count();
            info!(
                deleted = outcomes.len(),
                not_acknowledged = not_acknowledged,
                "Index pruning completed"
            );
            ExitStatus::Success
        }
        Err(e) => {
            error!(error = %e, "Index pruning failed");
            ExitStatus::from(&e)
        }
    }
}
