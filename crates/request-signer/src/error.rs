//! Error types for request signing and verification.
//!
//! All failures are represented by [`SignerError`]. None of the variants carry
//! secret key material.

/// Errors that can occur while signing or verifying a request.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// The URL could not be split into scheme, host, path and query.
    #[error("Unable to parse url: {0}")]
    MalformedUrl(String),

    /// The configured hash or MAC algorithm is not available.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The configured text charset is not available.
    ///
    /// The charset is a configuration point alongside the hash and MAC names;
    /// this variant reports it the same way `UnsupportedAlgorithm` reports those.
    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    /// The MAC primitive rejected the key material.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The signed header could not be represented as an HTTP header value.
    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(String),

    /// The `Authorization` header is missing from the request.
    #[error("Missing Authorization header")]
    MissingAuthHeader,

    /// The `Authorization` header could not be parsed.
    #[error("Invalid Authorization header format")]
    InvalidAuthHeader,

    /// The header carries an authentication type the verifier does not accept.
    #[error("Unsupported authentication type: {0}")]
    UnsupportedAuthenticationType(String),

    /// The API key was not found in the credential store.
    #[error("Api key not found: {0}")]
    ApiKeyNotFound(String),

    /// The computed signature does not match the provided signature.
    #[error("Signature does not match")]
    SignatureDoesNotMatch,
}

/// Convenience result type for signing operations.
pub type SignerResult<T> = Result<T, SignerError>;
