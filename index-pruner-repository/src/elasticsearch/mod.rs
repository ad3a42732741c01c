//! Elasticsearch implementation of the search client.
//!
//! This module provides [`SignedSearchClient`], which signs every request
//! with SigV4 before sending it over HTTPS.

mod client;

pub use client::SignedSearchClient;
