//! Authentication schema: the signed claim and its `Authorization` header form.
//!
//! Header format, fields in fixed order:
//!
//! ```text
//! <AUTH_TYPE> ApiKey=<key>,ApiVersion=<version>,SignedHost=<true|false>,Timestamp=<millis>,Signature=<sig>
//! ```
//!
//! No escaping is applied, so API keys and versions must not contain `,` or `=`.

use std::fmt;

use http::HeaderValue;

use crate::credentials::SigningCredentials;
use crate::error::{SignerError, SignerResult};

const API_KEY: &str = "ApiKey";
const API_VERSION: &str = "ApiVersion";
const SIGNED_HOST: &str = "SignedHost";
const TIMESTAMP: &str = "Timestamp";
const SIGNATURE: &str = "Signature";

/// The result of signing a request.
///
/// Values are only produced by the signer. Fields are read-only, so the
/// cached header always matches them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationSchema {
    authentication_type: String,
    api_key: String,
    api_version: String,
    signed_host: bool,
    timestamp: i64,
    signature: String,
    authorization_header: String,
}

impl AuthenticationSchema {
    pub(crate) fn new(credentials: &SigningCredentials, timestamp: i64, signature: String) -> Self {
        let authorization_header = format_authorization_header(
            credentials.authentication_type(),
            credentials.api_key(),
            credentials.api_version(),
            credentials.signed_host(),
            timestamp,
            &signature,
        );
        Self {
            authentication_type: credentials.authentication_type().to_owned(),
            api_key: credentials.api_key().to_owned(),
            api_version: credentials.api_version().to_owned(),
            signed_host: credentials.signed_host(),
            timestamp,
            signature,
            authorization_header,
        }
    }

    /// Authentication type (header scheme name).
    #[must_use]
    pub fn authentication_type(&self) -> &str {
        &self.authentication_type
    }

    /// Public API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// API version the signature is scoped to.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Whether the host was signed.
    #[must_use]
    pub fn signed_host(&self) -> bool {
        self.signed_host
    }

    /// Signing time in epoch milliseconds.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Unpadded URL-safe Base64 signature.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Complete `Authorization` header value.
    #[must_use]
    pub fn authorization_header(&self) -> &str {
        &self.authorization_header
    }

    /// The header value as an [`http::HeaderValue`].
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::InvalidHeaderValue`] if a field contains bytes
    /// not allowed in a header (for example a newline in the API key).
    pub fn to_header_value(&self) -> SignerResult<HeaderValue> {
        HeaderValue::from_str(&self.authorization_header)
            .map_err(|e| SignerError::InvalidHeaderValue(e.to_string()))
    }
}

impl fmt::Display for AuthenticationSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.authorization_header)
    }
}

/// Serialize the signed fields into the header form.
#[must_use]
pub fn format_authorization_header(
    authentication_type: &str,
    api_key: &str,
    api_version: &str,
    signed_host: bool,
    timestamp: i64,
    signature: &str,
) -> String {
    format!(
        "{authentication_type} {API_KEY}={api_key},{API_VERSION}={api_version},\
         {SIGNED_HOST}={signed_host},{TIMESTAMP}={timestamp},{SIGNATURE}={signature}"
    )
}

/// Components of a received `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAuthorization {
    /// Authentication type (scheme name).
    pub authentication_type: String,
    /// Claimed API key.
    pub api_key: String,
    /// Claimed API version.
    pub api_version: String,
    /// Whether the host was signed.
    pub signed_host: bool,
    /// Claimed signing time in epoch milliseconds.
    pub timestamp: i64,
    /// Provided signature.
    pub signature: String,
}

impl ParsedAuthorization {
    /// Parse a header value. Fields must appear in the fixed order.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::InvalidAuthHeader`] if the scheme is missing, a
    /// field is missing, out of order or empty, or a value fails to parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use request_signer::schema::ParsedAuthorization;
    ///
    /// let parsed = ParsedAuthorization::parse(
    ///     "REQUEST-SIGNATURE ApiKey=k,ApiVersion=v1,SignedHost=false,Timestamp=42,Signature=abc",
    /// )
    /// .unwrap();
    /// assert_eq!(parsed.api_key, "k");
    /// assert!(!parsed.signed_host);
    /// assert_eq!(parsed.timestamp, 42);
    /// ```
    pub fn parse(header: &str) -> SignerResult<Self> {
        let (authentication_type, rest) =
            header.split_once(' ').ok_or(SignerError::InvalidAuthHeader)?;
        if authentication_type.is_empty() {
            return Err(SignerError::InvalidAuthHeader);
        }

        let mut parts = rest.split(',');
        let api_key = next_field(&mut parts, API_KEY)?;
        let api_version = next_field(&mut parts, API_VERSION)?;
        let signed_host = match next_field(&mut parts, SIGNED_HOST)? {
            "true" => true,
            "false" => false,
            _ => return Err(SignerError::InvalidAuthHeader),
        };
        let timestamp = next_field(&mut parts, TIMESTAMP)?
            .parse::<i64>()
            .map_err(|_| SignerError::InvalidAuthHeader)?;
        let signature = next_field(&mut parts, SIGNATURE)?;

        if parts.next().is_some() {
            return Err(SignerError::InvalidAuthHeader);
        }

        Ok(Self {
            authentication_type: authentication_type.to_owned(),
            api_key: api_key.to_owned(),
            api_version: api_version.to_owned(),
            signed_host,
            timestamp,
            signature: signature.to_owned(),
        })
    }
}

/// Take the next `name=value` pair, requiring `name` and a non-empty value.
fn next_field<'a>(parts: &mut impl Iterator<Item = &'a str>, name: &str) -> SignerResult<&'a str> {
    parts
        .next()
        .and_then(|part| part.strip_prefix(name))
        .and_then(|part| part.strip_prefix('='))
        .filter(|value| !value.is_empty())
        .ok_or(SignerError::InvalidAuthHeader)
}
