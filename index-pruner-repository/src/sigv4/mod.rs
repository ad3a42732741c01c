//! AWS Signature Version 4 request signing.
//!
//! A thin wrapper over `aws-sigv4` that signs with the timestamp it is given
//! and returns a fresh header map per request.

mod signer;

pub use signer::{RequestSigner, SERVICE};
