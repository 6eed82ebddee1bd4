//! Server-side signature verification.
//!
//! The verifier re-derives the signature from the request and the claims in
//! the `Authorization` header, then compares it to the provided signature in
//! constant time. It does not judge the timestamp: replay windows are a policy
//! decision left to the caller, who gets the claimed timestamp back in
//! [`VerifiedRequest`].

use subtle::ConstantTimeEq;
use tracing::debug;

use crate::canonical::{build_canonical_request, canonical_request_for_parts};
use crate::config::SignerConfig;
use crate::credentials::{CredentialProvider, SIGNATURE_AUTHENTICATION_TYPE, SigningCredentials};
use crate::crypto::CryptoSuite;
use crate::error::{SignerError, SignerResult};
use crate::schema::ParsedAuthorization;
use crate::signer::signature_for_canonical_request;

/// The claims of a request whose signature verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedRequest {
    /// API key that signed the request.
    pub api_key: String,
    /// API version the signature was scoped to.
    pub api_version: String,
    /// Whether the host was signed.
    pub signed_host: bool,
    /// Claimed signing time in epoch milliseconds.
    pub timestamp: i64,
}

/// Verifies signed requests against a credential store.
#[derive(Debug, Clone)]
pub struct RequestVerifier<P> {
    suite: CryptoSuite,
    provider: P,
    authentication_type: String,
}

impl<P: CredentialProvider> RequestVerifier<P> {
    /// Create a verifier accepting the default authentication type.
    ///
    /// # Errors
    ///
    /// Returns an error if an algorithm name in `config` cannot be resolved.
    pub fn new(config: &SignerConfig, provider: P) -> SignerResult<Self> {
        Ok(Self {
            suite: CryptoSuite::from_config(config)?,
            provider,
            authentication_type: SIGNATURE_AUTHENTICATION_TYPE.to_owned(),
        })
    }

    /// Accept a different authentication type.
    #[must_use]
    pub fn with_authentication_type(mut self, authentication_type: impl Into<String>) -> Self {
        self.authentication_type = authentication_type.into();
        self
    }

    /// Verify `authorization` for a request to `url` with `http_method`.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::InvalidAuthHeader`] or
    /// [`SignerError::UnsupportedAuthenticationType`] for a bad header,
    /// [`SignerError::ApiKeyNotFound`] for an unknown key,
    /// [`SignerError::MalformedUrl`] for a bad URL, and
    /// [`SignerError::SignatureDoesNotMatch`] when the signature is wrong.
    pub fn verify(
        &self,
        http_method: &str,
        url: &str,
        authorization: &str,
    ) -> SignerResult<VerifiedRequest> {
        let parsed = self.parse(authorization)?;
        let canonical_request = build_canonical_request(http_method, url, parsed.signed_host)?;
        self.check(parsed, &canonical_request)
    }

    /// Verify a received HTTP request.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::MissingAuthHeader`] when there is no
    /// `Authorization` header, otherwise the same errors as
    /// [`RequestVerifier::verify`].
    pub fn verify_parts(&self, parts: &http::request::Parts) -> SignerResult<VerifiedRequest> {
        let authorization = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .ok_or(SignerError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| SignerError::InvalidAuthHeader)?;

        let parsed = self.parse(authorization)?;
        let canonical_request = canonical_request_for_parts(parts, parsed.signed_host)?;
        self.check(parsed, &canonical_request)
    }

    fn parse(&self, authorization: &str) -> SignerResult<ParsedAuthorization> {
        let parsed = ParsedAuthorization::parse(authorization)?;
        if parsed.authentication_type != self.authentication_type {
            return Err(SignerError::UnsupportedAuthenticationType(
                parsed.authentication_type,
            ));
        }
        Ok(parsed)
    }

    fn check(
        &self,
        parsed: ParsedAuthorization,
        canonical_request: &str,
    ) -> SignerResult<VerifiedRequest> {
        let secret_key = self.provider.get_secret_key(&parsed.api_key)?;

        debug!(
            api_key = %parsed.api_key,
            api_version = %parsed.api_version,
            timestamp = parsed.timestamp,
            "Verifying request signature"
        );

        let credentials = SigningCredentials::new(
            parsed.api_key.as_str(),
            secret_key,
            parsed.api_version.as_str(),
        )
        .with_signed_host(parsed.signed_host)
        .with_authentication_type(parsed.authentication_type.as_str());

        let expected = signature_for_canonical_request(
            &self.suite,
            canonical_request,
            &credentials,
            parsed.timestamp,
        )?;

        if parsed.signature.as_bytes().ct_eq(expected.as_bytes()).into() {
            debug!(api_key = %parsed.api_key, "Signature verification succeeded");
            Ok(VerifiedRequest {
                api_key: parsed.api_key,
                api_version: parsed.api_version,
                signed_host: parsed.signed_host,
                timestamp: parsed.timestamp,
            })
        } else {
            debug!(api_key = %parsed.api_key, "Signature mismatch");
            Err(SignerError::SignatureDoesNotMatch)
        }
    }
}
