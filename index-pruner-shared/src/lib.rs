//! # Index Pruner Shared
//!
//! This crate defines the data structures shared across the index pruner
//! crates: credentials, the cluster metadata snapshot, per-index deletion
//! outcomes and the index filter.

pub mod types;

pub use types::cluster_metadata::ClusterMetadata;
pub use types::credentials::Credentials;
pub use types::deletion_outcome::{DeletionOutcome, DeletionStatus};
pub use types::index_filter::{IndexFilter, RESERVED_INDEX};
