//! Helpers for building signed requests.

use url::Url;

/// Value of the `host` header for `url`.
///
/// The port is only included when the URL names a non-default one.
pub fn host_header(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
