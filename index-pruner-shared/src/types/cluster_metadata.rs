//! Snapshot of the cluster metadata returned by `GET /_cluster/state/metadata`.

use serde::Deserialize;
use serde_json::{Map, Value};

/// The index section of the cluster state.
///
/// Only the key set matters; the per-index blobs are kept opaque. Keys keep
/// the order in which the cluster returned them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClusterMetadata {
    /// Index name to index metadata.
    pub indices: Map<String, Value>,
}

/// Accepted response bodies.
///
/// A cluster answers with the indices nested under `metadata`; the flat form
/// is what a proxy or a trimmed response returns.
#[derive(Deserialize)]
#[serde(untagged)]
enum ClusterStateBody {
    Nested { metadata: ClusterMetadata },
    Flat(ClusterMetadata),
}

impl ClusterMetadata {
    /// Build the snapshot from a cluster state response body.
    ///
    /// # Returns
    ///
    /// * `Ok(ClusterMetadata)` - If the body carries an `indices` object
    /// * `Err(serde_json::Error)` - If neither `metadata.indices` nor `indices` is present
    pub fn from_cluster_state(body: Value) -> Result<Self, serde_json::Error> {
        match serde_json::from_value(body)? {
            ClusterStateBody::Nested { metadata } => Ok(metadata),
            ClusterStateBody::Flat(metadata) => Ok(metadata),
        }
    }

    /// Index names in response order.
    pub fn index_names(&self) -> impl Iterator<Item = &str> {
        self.indices.keys().map(String::as_str)
    }
}
