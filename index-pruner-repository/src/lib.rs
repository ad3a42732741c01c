//! # Index Pruner Repository
//!
//! This crate provides the traits and implementations the pruner uses to reach
//! the cluster: SigV4 request signing, a signed Elasticsearch HTTP client,
//! ambient credential resolution and a clock seam for deterministic signing
//! in tests.

pub mod aws;
pub mod config;
pub mod elasticsearch;
pub mod errors;
pub mod interfaces;
pub mod sigv4;
pub mod types;
pub mod utils;

pub use aws::{AwsCredentialResolver, StaticCredentialResolver};
pub use config::SearchClientConfig;
pub use elasticsearch::SignedSearchClient;
pub use errors::SearchClientError;
pub use interfaces::{Clock, CredentialResolver, SearchClient, SystemClock};
pub use reqwest::Method;
pub use sigv4::RequestSigner;
pub use types::{SignedHeaders, SignedRequest, SigningRequest};
