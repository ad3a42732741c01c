//! Request types passed between the client and the signer.

use std::collections::BTreeMap;

use reqwest::Method;
use url::Url;

/// Header name to value, lowercase names, sorted.
///
/// Built fresh for every request and never shared between requests.
pub type SignedHeaders = BTreeMap<String, String>;

/// The parts of a request that the signature covers.
#[derive(Debug, Clone, Copy)]
pub struct SigningRequest<'a> {
    /// HTTP method, e.g. `GET`.
    pub method: &'a str,
    /// Path as sent on the wire.
    pub path: &'a str,
    /// Raw query string without the leading `?`.
    pub query: Option<&'a str>,
    /// Value of the `host` header.
    pub host: &'a str,
    /// Request body, absent for the pruner's GET and DELETE calls.
    pub body: Option<&'a [u8]>,
}

/// A request that has been signed and is ready to send.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: SignedHeaders,
    pub body: Option<Vec<u8>>,
}
