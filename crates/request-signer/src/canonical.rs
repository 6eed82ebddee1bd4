//! Canonical request construction.
//!
//! The canonical request is a single space-separated line:
//!
//! ```text
//! METHOD [HOST] PATH [QUERY]
//! ```
//!
//! The method is uppercased. The host appears only when the host is signed and
//! the query only when it is non-empty. Path and query are taken verbatim from
//! the URL: no percent-decoding, no dot-segment removal and no trailing-slash
//! normalization. Signer and verifier must therefore agree on the exact URL
//! string.

use http::uri::Authority;

use crate::error::{SignerError, SignerResult};

/// Separator between canonical request components.
const SPACE: char = ' ';

/// Schemes accepted in signed URLs.
const SUPPORTED_SCHEMES: &[&str] = &["http", "https"];

/// The components of an absolute URL that take part in signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint<'a> {
    /// URL scheme as written (`http` or `https`, any case).
    pub scheme: &'a str,
    /// Host without userinfo or port.
    pub host: &'a str,
    /// Raw path, possibly empty.
    pub path: &'a str,
    /// Raw query without the leading `?`, possibly empty.
    pub query: &'a str,
}

/// Split an absolute URL into the components used for signing.
///
/// The fragment, userinfo and port are discarded.
///
/// # Errors
///
/// Returns [`SignerError::MalformedUrl`] when the scheme is missing or not
/// `http`/`https`, or when the host is missing or invalid.
///
/// # Examples
///
/// ```
/// use request_signer::canonical::parse_endpoint;
///
/// let endpoint = parse_endpoint("https://api.com:8443/search?q=1#top").unwrap();
/// assert_eq!(endpoint.host, "api.com");
/// assert_eq!(endpoint.path, "/search");
/// assert_eq!(endpoint.query, "q=1");
///
/// assert!(parse_endpoint("api.com").is_err());
/// ```
pub fn parse_endpoint(url: &str) -> SignerResult<Endpoint<'_>> {
    let (scheme, rest) = url
        .split_once("://")
        .ok_or_else(|| SignerError::MalformedUrl(format!("no protocol: {url}")))?;

    if !SUPPORTED_SCHEMES
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(scheme))
    {
        return Err(SignerError::MalformedUrl(format!("unknown protocol: {scheme}")));
    }

    // Drop the fragment before looking for the query.
    let rest = rest.split_once('#').map_or(rest, |(before, _)| before);
    let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));
    let (authority, path) = rest
        .find('/')
        .map_or((rest, ""), |idx| rest.split_at(idx));

    if authority.is_empty() {
        return Err(SignerError::MalformedUrl(format!("missing host: {url}")));
    }
    let host = parse_host(authority)
        .ok_or_else(|| SignerError::MalformedUrl(format!("invalid host: {authority}")))?;

    Ok(Endpoint {
        scheme,
        host,
        path,
        query,
    })
}

/// Extract the host from an authority (`[userinfo@]host[:port]`).
fn parse_host(authority: &str) -> Option<&str> {
    let parsed: Authority = authority.parse().ok()?;
    let host_len = parsed.host().len();
    if host_len == 0 {
        return None;
    }
    // Slice the original input so the returned host borrows from the URL.
    let start = authority.rfind('@').map_or(0, |idx| idx + 1);
    authority.get(start..start + host_len)
}

/// Build the canonical request for `method` and `url`.
///
/// # Errors
///
/// Returns [`SignerError::MalformedUrl`] if the URL cannot be parsed.
///
/// # Examples
///
/// ```
/// use request_signer::canonical::build_canonical_request;
///
/// let url = "https://api.com/search?product_id=prd1&customer_id=c1";
/// assert_eq!(
///     build_canonical_request("get", url, true).unwrap(),
///     "GET api.com /search product_id=prd1&customer_id=c1"
/// );
/// assert_eq!(
///     build_canonical_request("GET", url, false).unwrap(),
///     "GET /search product_id=prd1&customer_id=c1"
/// );
/// ```
pub fn build_canonical_request(method: &str, url: &str, signed_host: bool) -> SignerResult<String> {
    let endpoint = parse_endpoint(url)?;
    Ok(format_canonical_request(
        method,
        signed_host.then_some(endpoint.host),
        endpoint.path,
        endpoint.query,
    ))
}

/// Build the canonical request for a received HTTP request.
///
/// The host comes from the `Host` header, falling back to the URI authority.
/// Path and query come from the request target as received.
///
/// # Errors
///
/// Returns [`SignerError::MalformedUrl`] if the host is signed but absent or
/// invalid.
pub fn canonical_request_for_parts(
    parts: &http::request::Parts,
    signed_host: bool,
) -> SignerResult<String> {
    let host = if signed_host {
        Some(request_host(parts)?)
    } else {
        None
    };
    let query = parts.uri.query().unwrap_or("");

    Ok(format_canonical_request(
        parts.method.as_str(),
        host,
        parts.uri.path(),
        query,
    ))
}

/// Resolve the host of a received request.
fn request_host(parts: &http::request::Parts) -> SignerResult<&str> {
    if let Some(value) = parts.headers.get(http::header::HOST) {
        let authority = value
            .to_str()
            .map_err(|_| SignerError::MalformedUrl("non-ASCII Host header".to_owned()))?;
        return parse_host(authority)
            .ok_or_else(|| SignerError::MalformedUrl(format!("invalid host: {authority}")));
    }
    parts
        .uri
        .host()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| SignerError::MalformedUrl("missing host".to_owned()))
}

/// Join the canonical request components.
#[must_use]
pub fn format_canonical_request(
    method: &str,
    host: Option<&str>,
    path: &str,
    query: &str,
) -> String {
    let mut canonical = method.to_uppercase();
    if let Some(host) = host {
        canonical.push(SPACE);
        canonical.push_str(host);
    }
    canonical.push(SPACE);
    canonical.push_str(path);
    if !query.is_empty() {
        canonical.push(SPACE);
        canonical.push_str(query);
    }
    canonical
}
