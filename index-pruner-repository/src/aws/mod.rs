//! Credential resolution.
//!
//! [`AwsCredentialResolver`] walks the standard provider chain; the static
//! resolver hands out fixed credentials for tests and local runs.

mod credentials;

pub use credentials::{AwsCredentialResolver, StaticCredentialResolver};
