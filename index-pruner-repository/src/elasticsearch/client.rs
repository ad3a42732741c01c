//! Signed Elasticsearch client.

use std::sync::Arc;

use async_trait::async_trait;
use index_pruner_shared::Credentials;
use reqwest::{Client as ReqwestClient, Method};
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

use crate::config::SearchClientConfig;
use crate::errors::SearchClientError;
use crate::interfaces::{Clock, SearchClient, SystemClock};
use crate::sigv4::RequestSigner;
use crate::types::{SignedRequest, SigningRequest};
use crate::utils::host_header;

/// Search client that signs each request with SigV4.
///
/// Requests are signed right before they are sent, with the clock read at
/// that moment, so no signature is ever reused.
///
/// # Example
///
/// ```ignore
/// use index_pruner_repository::{SearchClient, SearchClientConfig, SignedSearchClient};
///
/// let config = SearchClientConfig::new(Url::parse("https://search-logs.eu-west-1.es.amazonaws.com")?, "eu-west-1");
/// let client = SignedSearchClient::new(config, Arc::new(credentials))?;
/// let state = client.call(Method::GET, "/_cluster/state/metadata", None).await?;
/// ```
pub struct SignedSearchClient {
    http: ReqwestClient,
    base_url: Url,
    host: String,
    signer: RequestSigner,
    credentials: Arc<Credentials>,
    clock: Arc<dyn Clock>,
}

impl SignedSearchClient {
    /// Create a client that signs with the wall clock.
    pub fn new(
        config: SearchClientConfig,
        credentials: Arc<Credentials>,
    ) -> Result<Self, SearchClientError> {
        Self::with_clock(config, credentials, Arc::new(SystemClock))
    }

    /// Create a client with an explicit clock.
    ///
    /// # Returns
    ///
    /// * `Ok(SignedSearchClient)` - A new client
    /// * `Err(SearchClientError::InvalidUrl)` - If the base URL has no host
    /// * `Err(SearchClientError::TransportError)` - If the HTTP client cannot be built
    pub fn with_clock(
        config: SearchClientConfig,
        credentials: Arc<Credentials>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SearchClientError> {
        let host = host_header(&config.base_url).ok_or_else(|| {
            SearchClientError::invalid_url(format!("Base URL has no host: {}", config.base_url))
        })?;

        let http = ReqwestClient::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SearchClientError::transport(e.to_string()))?;

        info!(
            url = %config.base_url,
            region = %config.region,
            timeout_secs = config.request_timeout.as_secs(),
            "Created signed search client"
        );

        Ok(Self {
            http,
            base_url: config.base_url,
            host,
            signer: RequestSigner::new(config.region),
            credentials,
            clock,
        })
    }

    /// Join the base URL and `path`.
    ///
    /// A trailing `/` on the base URL is dropped and a leading `/` on the
    /// path is added if missing.
    pub fn resolve_url(&self, path: &str) -> Result<Url, SearchClientError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let joined = if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        };

        Url::parse(&joined)
            .map_err(|e| SearchClientError::invalid_url(format!("Invalid request URL '{}': {}", joined, e)))
    }

    /// Build and sign a request without sending it.
    pub fn prepare(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<SignedRequest, SearchClientError> {
        let url = self.resolve_url(path)?;
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| SearchClientError::decode(format!("Failed to encode request body: {}", e)))?;

        let signing_request = SigningRequest {
            method: method.as_str(),
            path: url.path(),
            query: url.query(),
            host: &self.host,
            body: body.as_deref(),
        };
        let headers = self
            .signer
            .sign(&signing_request, &self.credentials, self.clock.now())?;

        Ok(SignedRequest {
            method,
            url,
            headers,
            body,
        })
    }

    async fn send(&self, request: SignedRequest) -> Result<Value, SearchClientError> {
        debug!(method = %request.method, url = %request.url, "Sending signed request");

        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                SearchClientError::transport(format!("Request timed out: {}", e))
            } else {
                SearchClientError::transport(e.to_string())
            }
        })?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            error!(
                method = %request.method,
                url = %request.url,
                status = %status,
                body = %body,
                "Request failed"
            );
            return Err(SearchClientError::api(status.as_u16(), body));
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            SearchClientError::decode(format!(
                "Invalid JSON from {} {}: {}",
                request.method, request.url, e
            ))
        })
    }
}

#[async_trait]
impl SearchClient for SignedSearchClient {
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, SearchClientError> {
        let request = self.prepare(method, path, body)?;
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Clock that advances one second on every read.
    struct SteppingClock {
        next: Mutex<DateTime<Utc>>,
    }

    impl SteppingClock {
        fn new() -> Self {
            Self {
                next: Mutex::new(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let mut next = self.next.lock().unwrap();
            let now = *next;
            *next = now + chrono::Duration::seconds(1);
            now
        }
    }

    fn test_credentials() -> Arc<Credentials> {
        Arc::new(Credentials::new("AKIDEXAMPLE", "secret", None))
    }

    fn test_client(base_url: &str) -> SignedSearchClient {
        let config = SearchClientConfig::new(Url::parse(base_url).unwrap(), "eu-west-1")
            .with_request_timeout(Duration::from_millis(500));
        SignedSearchClient::with_clock(config, test_credentials(), Arc::new(SteppingClock::new()))
            .unwrap()
    }

    /// Accept one connection, return a canned response, and hand back the raw request.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}", addr), handle)
    }

    #[test]
    fn test_resolve_url() {
        let client = test_client("https://search.example.com/");
        assert_eq!(
            client.resolve_url("/_cluster/state/metadata").unwrap().as_str(),
            "https://search.example.com/_cluster/state/metadata"
        );
        assert_eq!(
            client.resolve_url("logs-a").unwrap().as_str(),
            "https://search.example.com/logs-a"
        );

        let client = test_client("https://proxy.example.com/es/");
        assert_eq!(
            client.resolve_url("/logs-a").unwrap().as_str(),
            "https://proxy.example.com/es/logs-a"
        );
    }

    #[test]
    fn test_base_url_without_host_is_invalid_url() {
        let config = SearchClientConfig::new(Url::parse("mailto:someone@example.com").unwrap(), "eu-west-1");

        let result = SignedSearchClient::with_clock(config, test_credentials(), Arc::new(SteppingClock::new()));

        match result {
            Err(SearchClientError::InvalidUrl(message)) => assert!(message.contains("mailto:someone@example.com")),
            Err(other) => panic!("Expected InvalidUrl, got {:?}", other),
            Ok(_) => panic!("Expected InvalidUrl, got a client"),
        }
    }

    #[test]
    fn test_prepare_signs_each_call_afresh() {
        let client = test_client("https://search.example.com");

        let first = client.prepare(Method::DELETE, "/logs-a", None).unwrap();
        let second = client.prepare(Method::DELETE, "/logs-a", None).unwrap();

        assert_eq!(first.headers.get("host").unwrap(), "search.example.com");
        assert_eq!(first.headers.get("x-amz-date").unwrap(), "20240102T030405Z");
        assert_eq!(second.headers.get("x-amz-date").unwrap(), "20240102T030406Z");
        assert_ne!(
            first.headers.get("authorization"),
            second.headers.get("authorization")
        );
        assert!(first.body.is_none());
    }

    #[tokio::test]
    async fn test_call_returns_parsed_json_and_sends_signature() {
        let (url, server) = serve_once("200 OK", r#"{"acknowledged":true}"#).await;
        let client = test_client(&url);

        let response = client.call(Method::DELETE, "/logs-a", None).await.unwrap();
        let raw_request = server.await.unwrap().to_lowercase();

        assert_eq!(response["acknowledged"], Value::Bool(true));
        assert!(raw_request.starts_with("delete /logs-a http/1.1"));
        assert!(raw_request.contains("x-amz-date: 20240102t030405z"));
        assert!(raw_request.contains("authorization: aws4-hmac-sha256 credential=akidexample/20240102/eu-west-1/es/aws4_request"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let (url, server) =
            serve_once("404 Not Found", r#"{"error":"index_not_found_exception"}"#).await;
        let client = test_client(&url);

        let result = client.call(Method::DELETE, "/missing", None).await;
        server.await.unwrap();

        match result {
            Err(SearchClientError::ApiError { status, body }) => {
                assert_eq!(status, 404);
                assert!(body.contains("index_not_found_exception"));
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let (url, server) = serve_once("200 OK", "not json").await;
        let client = test_client(&url);

        let result = client.call(Method::GET, "/_cluster/state/metadata", None).await;
        server.await.unwrap();

        assert!(matches!(result, Err(SearchClientError::DecodeError(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = test_client(&format!("http://{}", addr));

        let result = client.call(Method::GET, "/_cluster/state/metadata", None).await;

        assert!(matches!(result, Err(SearchClientError::TransportError(_))));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(3)).await;
            drop(socket);
        });
        let client = test_client(&format!("http://{}", addr));

        let result = client.call(Method::DELETE, "/logs-a", None).await;
        server.abort();

        assert!(matches!(result, Err(SearchClientError::TransportError(_))));
    }
}
