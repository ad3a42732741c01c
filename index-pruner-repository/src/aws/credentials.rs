//! Credential resolvers.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::ProvideCredentials;
use index_pruner_shared::Credentials;
use tracing::debug;

use crate::errors::SearchClientError;
use crate::interfaces::CredentialResolver;

/// Resolves credentials from the default AWS provider chain.
///
/// The chain checks environment variables, the shared config and credentials
/// files, web identity, then container and instance metadata endpoints.
#[derive(Debug, Clone)]
pub struct AwsCredentialResolver {
    region: String,
}

impl AwsCredentialResolver {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }
}

#[async_trait]
impl CredentialResolver for AwsCredentialResolver {
    async fn resolve(&self) -> Result<Credentials, SearchClientError> {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .load()
            .await;

        let provider = config
            .credentials_provider()
            .ok_or_else(|| SearchClientError::credential("No credentials provider available"))?;

        let resolved = provider
            .provide_credentials()
            .await
            .map_err(|e| SearchClientError::credential(e.to_string()))?;

        let credentials = Credentials::new(
            resolved.access_key_id(),
            resolved.secret_access_key(),
            resolved.session_token().map(str::to_string),
        );

        if !credentials.is_complete() {
            return Err(SearchClientError::credential(
                "Resolved credentials are missing the access key id or secret",
            ));
        }

        debug!(
            region = %self.region,
            temporary = credentials.session_token.is_some(),
            "Resolved credentials"
        );

        Ok(credentials)
    }
}

/// Hands out a fixed set of credentials.
#[derive(Debug, Clone)]
pub struct StaticCredentialResolver {
    credentials: Credentials,
}

impl StaticCredentialResolver {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialResolver for StaticCredentialResolver {
    async fn resolve(&self) -> Result<Credentials, SearchClientError> {
        if !self.credentials.is_complete() {
            return Err(SearchClientError::credential(
                "Static credentials are missing the access key id or secret",
            ));
        }
        Ok(self.credentials.clone())
    }
}
