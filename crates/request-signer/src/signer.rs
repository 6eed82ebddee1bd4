//! Request signing.
//!
//! Signing a request runs these steps:
//!
//! 1. Build the canonical request from the method and URL.
//! 2. Build the string to sign:
//!    ```text
//!    <AUTH_TYPE> <API_KEY> <API_VERSION> <TIMESTAMP> base64url(hash(canonical_request))
//!    ```
//! 3. Derive the signing key from the secret, API version and timestamp.
//! 4. MAC the string to sign with the signing key and encode it.
//!
//! The computation is pure given its inputs. The timestamp is read from the
//! signer's [`Clock`] exactly once per call when the caller does not supply one.

use tracing::debug;

use crate::canonical::build_canonical_request;
use crate::clock::{Clock, SystemClock};
use crate::config::SignerConfig;
use crate::credentials::SigningCredentials;
use crate::crypto::{CryptoSuite, encode};
use crate::error::SignerResult;
use crate::schema::AuthenticationSchema;
use crate::signing_key::derive_signing_key;

/// A request to sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    /// HTTP method, any case.
    pub http_method: String,
    /// Absolute URL.
    pub url: String,
    /// Signing time in epoch milliseconds; the signer's clock is used when `None`.
    pub timestamp: Option<i64>,
}

impl SigningRequest {
    /// Create a request signed at the current time.
    pub fn new(http_method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            url: url.into(),
            timestamp: None,
        }
    }

    /// Pin the signing time.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Signs requests with a fixed set of primitives and a time source.
///
/// The signer holds no mutable state; a single instance can be shared across
/// threads and used concurrently.
#[derive(Debug, Clone)]
pub struct RequestSigner<C = SystemClock> {
    suite: CryptoSuite,
    clock: C,
}

impl RequestSigner<SystemClock> {
    /// Create a signer from `config`, using wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::UnsupportedAlgorithm`](crate::SignerError::UnsupportedAlgorithm)
    /// or [`SignerError::UnsupportedCharset`](crate::SignerError::UnsupportedCharset)
    /// if a configured name cannot be resolved.
    pub fn new(config: &SignerConfig) -> SignerResult<Self> {
        Ok(Self {
            suite: CryptoSuite::from_config(config)?,
            clock: SystemClock,
        })
    }
}

impl Default for RequestSigner<SystemClock> {
    fn default() -> Self {
        Self {
            suite: CryptoSuite::default(),
            clock: SystemClock,
        }
    }
}

impl<C: Clock> RequestSigner<C> {
    /// Replace the time source.
    #[must_use]
    pub fn with_clock<T: Clock>(self, clock: T) -> RequestSigner<T> {
        RequestSigner {
            suite: self.suite,
            clock,
        }
    }

    /// Sign `request` with `credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::MalformedUrl`](crate::SignerError::MalformedUrl)
    /// if the URL cannot be parsed, or a key error from the MAC primitive.
    pub fn sign(
        &self,
        request: &SigningRequest,
        credentials: &SigningCredentials,
    ) -> SignerResult<AuthenticationSchema> {
        let timestamp = request
            .timestamp
            .unwrap_or_else(|| self.clock.now_millis());
        self.sign_request_at(&request.http_method, &request.url, credentials, timestamp)
    }

    /// Sign a request at the current time of the signer's clock.
    pub fn sign_request(
        &self,
        http_method: &str,
        url: &str,
        credentials: &SigningCredentials,
    ) -> SignerResult<AuthenticationSchema> {
        let timestamp = self.clock.now_millis();
        self.sign_request_at(http_method, url, credentials, timestamp)
    }

    /// Sign a request at an explicit timestamp.
    ///
    /// # Examples
    ///
    /// ```
    /// use request_signer::{RequestSigner, SigningCredentials};
    ///
    /// let signer = RequestSigner::default();
    /// let credentials = SigningCredentials::new("aaa-bbb-ccc", "secret-aaa-bbb-ccc", "v1");
    /// let schema = signer
    ///     .sign_request_at("GET", "https://api.com/search?product_id=prd1", &credentials, 1_585_733_039_477)
    ///     .unwrap();
    /// assert_eq!(schema.signature(), "kqZmfo4_lfLoAhmlg0XNFWbygQ7GRnTbjBBOcAVu_po");
    /// ```
    pub fn sign_request_at(
        &self,
        http_method: &str,
        url: &str,
        credentials: &SigningCredentials,
        timestamp: i64,
    ) -> SignerResult<AuthenticationSchema> {
        let signature = self.calculate_signature(http_method, url, credentials, timestamp)?;
        debug!(
            api_key = credentials.api_key(),
            api_version = credentials.api_version(),
            timestamp,
            "Signed request"
        );
        Ok(AuthenticationSchema::new(credentials, timestamp, signature))
    }

    /// Compute the encoded signature for a request.
    pub fn calculate_signature(
        &self,
        http_method: &str,
        url: &str,
        credentials: &SigningCredentials,
        timestamp: i64,
    ) -> SignerResult<String> {
        let canonical_request =
            build_canonical_request(http_method, url, credentials.signed_host())?;
        signature_for_canonical_request(&self.suite, &canonical_request, credentials, timestamp)
    }

    /// Sign an outgoing HTTP request and set its `Authorization` header.
    ///
    /// The URL signed is the request URI as rendered by [`http::Uri`], so the
    /// URI must be absolute.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::MalformedUrl`](crate::SignerError::MalformedUrl)
    /// for a relative URI, or
    /// [`SignerError::InvalidHeaderValue`](crate::SignerError::InvalidHeaderValue)
    /// if the header cannot be encoded.
    pub fn sign_http_request<B>(
        &self,
        request: &mut http::Request<B>,
        credentials: &SigningCredentials,
    ) -> SignerResult<AuthenticationSchema> {
        let url = request.uri().to_string();
        let schema = self.sign_request(request.method().as_str(), &url, credentials)?;
        request
            .headers_mut()
            .insert(http::header::AUTHORIZATION, schema.to_header_value()?);
        Ok(schema)
    }
}

/// Build the string to sign.
///
/// # Examples
///
/// ```
/// use request_signer::crypto::CryptoSuite;
/// use request_signer::signer::build_string_to_sign;
///
/// let sts = build_string_to_sign(
///     &CryptoSuite::default(),
///     "REQUEST-SIGNATURE",
///     "aaa-bbb-ccc",
///     "v1",
///     1_585_658_784_903,
///     "GET api.com /search",
/// );
/// assert_eq!(
///     sts,
///     "REQUEST-SIGNATURE aaa-bbb-ccc v1 1585658784903 zkHoDF4mn0ZLHsmVkueJysX1I0rBaMQWwpWA2bRNHbw"
/// );
/// ```
#[must_use]
pub fn build_string_to_sign(
    suite: &CryptoSuite,
    authentication_type: &str,
    api_key: &str,
    api_version: &str,
    timestamp: i64,
    canonical_request: &str,
) -> String {
    let canonical_hash = encode(&suite.hash_text(canonical_request));
    format!("{authentication_type} {api_key} {api_version} {timestamp} {canonical_hash}")
}

/// MAC `text` with `signing_key` and encode the result.
///
/// # Errors
///
/// Returns [`SignerError::InvalidKey`](crate::SignerError::InvalidKey) if the
/// key is rejected.
pub fn compute_signature(suite: &CryptoSuite, signing_key: &[u8], text: &str) -> SignerResult<String> {
    Ok(encode(&suite.hmac(text, signing_key)?))
}

/// Sign an already-built canonical request.
pub(crate) fn signature_for_canonical_request(
    suite: &CryptoSuite,
    canonical_request: &str,
    credentials: &SigningCredentials,
    timestamp: i64,
) -> SignerResult<String> {
    debug!(canonical_request, "Built canonical request");

    let string_to_sign = build_string_to_sign(
        suite,
        credentials.authentication_type(),
        credentials.api_key(),
        credentials.api_version(),
        timestamp,
        canonical_request,
    );

    debug!(string_to_sign, "Built string to sign");

    let signing_key = derive_signing_key(
        suite,
        credentials.secret_api_key(),
        credentials.api_version(),
        timestamp,
    )?;
    compute_signature(suite, signing_key.as_bytes(), &string_to_sign)
}
