//! Index pruner: fetch cluster metadata, select indices, delete them one by one.

use std::sync::Arc;

use index_pruner_repository::{Method, SearchClient, SearchClientError};
use index_pruner_shared::{ClusterMetadata, DeletionOutcome, IndexFilter, RESERVED_INDEX};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::errors::PruneError;

/// Path of the cluster metadata endpoint.
pub const CLUSTER_METADATA_PATH: &str = "/_cluster/state/metadata";

/// Deletes the indices selected by a filter.
///
/// A run goes Fetch → Filter → DeleteLoop → Done. Deletions are awaited one
/// after another and never overlap. The first failed deletion ends the run.
pub struct IndexPruner {
    client: Arc<dyn SearchClient>,
}

impl IndexPruner {
    /// Create a pruner on top of `client`.
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self { client }
    }

    /// Delete every index accepted by `filter`, in cluster order.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<DeletionOutcome>)` - One outcome per targeted index; empty when nothing matched
    /// * `Err(PruneError::Search)` - The metadata fetch failed; nothing was deleted
    /// * `Err(PruneError::DeletionFailed)` - A delete call failed; later indices were not attempted
    #[instrument(skip(self, filter))]
    pub async fn prune(&self, filter: &IndexFilter) -> Result<Vec<DeletionOutcome>, PruneError> {
        let metadata = self.fetch_metadata().await?;
        let targets = select_targets(&metadata, filter);

        info!(
            total_indices = metadata.indices.len(),
            targeted_indices = targets.len(),
            "Selected indices for deletion"
        );

        let mut completed = Vec::with_capacity(targets.len());
        for index_name in targets {
            match self.delete_index(&index_name).await {
                Ok(outcome) => completed.push(outcome),
                Err(e) => {
                    error!(index = %index_name, error = %e, "Failed to delete index");
                    completed.push(DeletionOutcome::failed(index_name.clone(), e.to_string()));
                    return Err(PruneError::DeletionFailed {
                        index_name,
                        completed,
                        source: e,
                    });
                }
            }
        }

        Ok(completed)
    }

    async fn fetch_metadata(&self) -> Result<ClusterMetadata, PruneError> {
        let body = self
            .client
            .call(Method::GET, CLUSTER_METADATA_PATH, None)
            .await?;

        ClusterMetadata::from_cluster_state(body).map_err(|e| {
            PruneError::Search(SearchClientError::decode(format!(
                "Unexpected cluster state response: {}",
                e
            )))
        })
    }

    async fn delete_index(&self, index_name: &str) -> Result<DeletionOutcome, SearchClientError> {
        info!(index = %index_name, "Deleting index");

        let response = self
            .client
            .call(Method::DELETE, &format!("/{}", index_name), None)
            .await?;

        if is_acknowledged(&response) {
            info!(index = %index_name, "Elasticsearch acknowledged the request to delete index");
            Ok(DeletionOutcome::acknowledged(index_name))
        } else {
            warn!(index = %index_name, "Elasticsearch has not acknowledged the request to delete index");
            Ok(DeletionOutcome::not_acknowledged(index_name))
        }
    }
}

/// Names of the indices to delete, in the order the cluster listed them.
///
/// The reserved index is dropped whatever the filter says.
pub fn select_targets(metadata: &ClusterMetadata, filter: &IndexFilter) -> Vec<String> {
    metadata
        .index_names()
        .filter(|name| *name != RESERVED_INDEX && filter.matches(name))
        .map(str::to_string)
        .collect()
}

fn is_acknowledged(response: &Value) -> bool {
    response
        .get("acknowledged")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}
