pub mod cluster_metadata;
pub mod credentials;
pub mod deletion_outcome;
pub mod index_filter;
