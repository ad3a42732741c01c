//! SigV4 signer for the search service.

use std::time::SystemTime;

use aws_credential_types::Credentials as AwsCredentials;
use aws_sigv4::http_request::{sign, SignableBody, SignableRequest, SigningSettings};
use aws_sigv4::sign::v4;
use chrono::{DateTime, Utc};
use index_pruner_shared::Credentials;

use crate::errors::SearchClientError;
use crate::types::{SignedHeaders, SigningRequest};

/// Service identifier the search service expects in the credential scope.
pub const SERVICE: &str = "es";

/// Name reported as the provider of the credentials handed to the signer.
const PROVIDER_NAME: &str = "index-pruner";

/// Computes SigV4 headers for requests to the search service.
///
/// # Example
///
/// ```ignore
/// let signer = RequestSigner::new("eu-west-1");
/// let request = SigningRequest {
///     method: "GET",
///     path: "/_cluster/state/metadata",
///     query: None,
///     host: "search-logs.eu-west-1.es.amazonaws.com",
///     body: None,
/// };
/// let headers = signer.sign(&request, &credentials, Utc::now())?;
/// assert!(headers.contains_key("authorization"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestSigner {
    region: String,
    service: String,
}

impl RequestSigner {
    /// Create a signer for the search service in `region`.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            service: SERVICE.to_string(),
        }
    }

    /// Sign `request` at `timestamp`.
    ///
    /// Returns a new header map containing `host`, `x-amz-date`,
    /// `x-amz-security-token` (temporary credentials only), `content-type`
    /// (requests with a body only) and `authorization`.
    ///
    /// # Returns
    ///
    /// * `Ok(SignedHeaders)` - Headers to send with the request
    /// * `Err(SearchClientError::CredentialError)` - If the access key id or secret is missing,
    ///   or the request cannot be signed
    pub fn sign(
        &self,
        request: &SigningRequest<'_>,
        credentials: &Credentials,
        timestamp: DateTime<Utc>,
    ) -> Result<SignedHeaders, SearchClientError> {
        if !credentials.is_complete() {
            return Err(SearchClientError::credential(
                "access key id and secret access key are required to sign requests",
            ));
        }

        let mut headers = SignedHeaders::new();
        headers.insert("host".to_string(), request.host.trim().to_string());
        if request.body.is_some() {
            headers.insert("content-type".to_string(), "application/json".to_string());
        }

        let identity = AwsCredentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            credentials
                .session_token
                .clone()
                .filter(|token| !token.is_empty()),
            None,
            PROVIDER_NAME,
        )
        .into();

        let signing_params = v4::SigningParams::builder()
            .identity(&identity)
            .region(&self.region)
            .name(&self.service)
            .time(SystemTime::from(timestamp))
            .settings(SigningSettings::default())
            .build()
            .map_err(|e| SearchClientError::credential(format!("Invalid signing parameters: {}", e)))?
            .into();

        let uri = match request.query.filter(|query| !query.is_empty()) {
            Some(query) => format!("https://{}{}?{}", request.host.trim(), request.path, query),
            None => format!("https://{}{}", request.host.trim(), request.path),
        };

        let signable = SignableRequest::new(
            request.method,
            &uri,
            headers.iter().map(|(name, value)| (name.as_str(), value.as_str())),
            SignableBody::Bytes(request.body.unwrap_or_default()),
        )
        .map_err(|e| SearchClientError::credential(format!("Request cannot be signed: {}", e)))?;

        let (instructions, _signature) = sign(signable, &signing_params)
            .map_err(|e| SearchClientError::credential(format!("Signing failed: {}", e)))?
            .into_parts();

        for (name, value) in instructions.headers() {
            headers.insert(name.to_ascii_lowercase(), value.to_string());
        }

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const EXAMPLE_SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    fn example_credentials() -> Credentials {
        Credentials::new("AKIDEXAMPLE", EXAMPLE_SECRET, None)
    }

    fn get_request<'a>(path: &'a str, host: &'a str) -> SigningRequest<'a> {
        SigningRequest {
            method: "GET",
            path,
            query: None,
            host,
            body: None,
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap()
    }

    #[test]
    fn test_get_vanilla_signature() {
        let signer = RequestSigner {
            region: "us-east-1".to_string(),
            service: "service".to_string(),
        };
        let request = get_request("/", "example.amazonaws.com");

        let headers = signer
            .sign(&request, &example_credentials(), fixed_time())
            .unwrap();

        assert_eq!(
            headers.get("authorization").unwrap(),
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/service/aws4_request, \
             SignedHeaders=host;x-amz-date, \
             Signature=5fa00fa31553b73ebf1942676e86291e8372ff2a2260956d9b8aae1d763fbf31"
        );
        assert_eq!(headers.get("x-amz-date").unwrap(), "20150830T123600Z");
        assert_eq!(headers.get("host").unwrap(), "example.amazonaws.com");
    }

    #[test]
    fn test_scope_uses_es_service_and_region() {
        let signer = RequestSigner::new("eu-west-1");
        let request = get_request("/_cluster/state/metadata", "search.example.com");

        let headers = signer
            .sign(&request, &example_credentials(), fixed_time())
            .unwrap();

        let authorization = headers.get("authorization").unwrap();
        assert!(authorization
            .starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/eu-west-1/es/aws4_request"));
        assert!(authorization.contains("SignedHeaders=host;x-amz-date,"));
        let signature = authorization.rsplit("Signature=").next().unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_session_token_is_signed() {
        let signer = RequestSigner::new("eu-west-1");
        let creds = Credentials::new("AKIDEXAMPLE", EXAMPLE_SECRET, Some("session".to_string()));
        let request = get_request("/", "search.example.com");

        let headers = signer.sign(&request, &creds, fixed_time()).unwrap();

        assert_eq!(headers.get("x-amz-security-token").unwrap(), "session");
        assert!(headers
            .get("authorization")
            .unwrap()
            .contains("x-amz-security-token"));
    }

    #[test]
    fn test_body_adds_content_type() {
        let signer = RequestSigner::new("eu-west-1");
        let request = SigningRequest {
            method: "POST",
            path: "/logs/_search",
            query: None,
            host: "search.example.com",
            body: Some(b"{}".as_slice()),
        };

        let headers = signer
            .sign(&request, &example_credentials(), fixed_time())
            .unwrap();

        assert_eq!(headers.get("content-type").unwrap(), "application/json");
        assert!(headers
            .get("authorization")
            .unwrap()
            .contains("SignedHeaders=content-type;host;x-amz-date,"));
    }

    #[test]
    fn test_signature_depends_on_timestamp_and_path() {
        let signer = RequestSigner::new("eu-west-1");
        let creds = example_credentials();

        let a = signer
            .sign(&get_request("/logs-a", "h"), &creds, fixed_time())
            .unwrap();
        let again = signer
            .sign(&get_request("/logs-a", "h"), &creds, fixed_time())
            .unwrap();
        let later = signer
            .sign(
                &get_request("/logs-a", "h"),
                &creds,
                fixed_time() + chrono::Duration::seconds(1),
            )
            .unwrap();
        let other_path = signer
            .sign(&get_request("/logs-b", "h"), &creds, fixed_time())
            .unwrap();

        assert_eq!(a, again);
        assert_ne!(a.get("authorization"), later.get("authorization"));
        assert_ne!(a.get("authorization"), other_path.get("authorization"));
    }

    #[test]
    fn test_missing_credentials_fail() {
        let signer = RequestSigner::new("eu-west-1");
        let request = get_request("/", "h");

        let result = signer.sign(&request, &Credentials::new("", EXAMPLE_SECRET, None), fixed_time());
        assert!(matches!(result, Err(SearchClientError::CredentialError(_))));

        let result = signer.sign(&request, &Credentials::new("AKID", "", None), fixed_time());
        assert!(matches!(result, Err(SearchClientError::CredentialError(_))));
    }
}
