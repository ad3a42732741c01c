//! Error types for the index pruner repository.
//!
//! This module provides a unified error type for all calls against the cluster.

mod search_client_error;

pub use search_client_error::SearchClientError;
