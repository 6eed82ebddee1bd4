//! Signing credentials and credential lookup.
//!
//! [`SigningCredentials`] is the caller-owned input to every signing call.
//! [`CredentialProvider`] resolves secrets by API key on the verifying side,
//! with [`StaticCredentialProvider`] as an in-memory implementation.

use std::collections::HashMap;
use std::fmt;

use crate::error::SignerError;

/// Default authentication scheme name placed at the start of the header.
pub const SIGNATURE_AUTHENTICATION_TYPE: &str = "REQUEST-SIGNATURE";

/// API credentials and signing options for a client.
///
/// The secret is only readable through [`SigningCredentials::secret_api_key`]
/// and is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningCredentials {
    api_key: String,
    secret_api_key: String,
    api_version: String,
    signed_host: bool,
    authentication_type: String,
}

impl SigningCredentials {
    /// Create credentials that sign the host under the default authentication type.
    pub fn new(
        api_key: impl Into<String>,
        secret_api_key: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            secret_api_key: secret_api_key.into(),
            api_version: api_version.into(),
            signed_host: true,
            authentication_type: SIGNATURE_AUTHENTICATION_TYPE.to_owned(),
        }
    }

    /// Choose whether the host is part of the canonical request.
    #[must_use]
    pub fn with_signed_host(mut self, signed_host: bool) -> Self {
        self.signed_host = signed_host;
        self
    }

    /// Override the authentication type.
    #[must_use]
    pub fn with_authentication_type(mut self, authentication_type: impl Into<String>) -> Self {
        self.authentication_type = authentication_type.into();
        self
    }

    /// Public API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Secret API key. Never include it in output.
    #[must_use]
    pub fn secret_api_key(&self) -> &str {
        &self.secret_api_key
    }

    /// API version the signature is scoped to.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Whether the host is signed.
    #[must_use]
    pub fn signed_host(&self) -> bool {
        self.signed_host
    }

    /// Authentication type (header scheme name).
    #[must_use]
    pub fn authentication_type(&self) -> &str {
        &self.authentication_type
    }
}

impl fmt::Debug for SigningCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningCredentials")
            .field("api_key", &self.api_key)
            .field("secret_api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("signed_host", &self.signed_host)
            .field("authentication_type", &self.authentication_type)
            .finish()
    }
}

/// Trait for looking up secret API keys by API key.
///
/// Implementations may back this with a database, configuration file,
/// or any other credential store.
pub trait CredentialProvider: Send + Sync {
    /// Retrieve the secret API key for the given API key.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::ApiKeyNotFound`] if the API key is not recognized.
    fn get_secret_key(&self, api_key: &str) -> Result<String, SignerError>;
}

/// A simple in-memory credential provider backed by a `HashMap`.
///
/// # Examples
///
/// ```
/// use request_signer::credentials::{CredentialProvider, StaticCredentialProvider};
///
/// let provider = StaticCredentialProvider::new(vec![
///     ("aaa-bbb-ccc".to_owned(), "secret-aaa-bbb-ccc".to_owned()),
/// ]);
///
/// let secret = provider.get_secret_key("aaa-bbb-ccc").unwrap();
/// assert_eq!(secret, "secret-aaa-bbb-ccc");
/// ```
#[derive(Clone, Default)]
pub struct StaticCredentialProvider {
    credentials: HashMap<String, String>,
}

impl StaticCredentialProvider {
    /// Create a provider from an iterable of (api_key, secret_api_key) pairs.
    pub fn new(credentials: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            credentials: credentials.into_iter().collect(),
        }
    }
}

impl fmt::Debug for StaticCredentialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.credentials.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("StaticCredentialProvider")
            .field("api_keys", &keys)
            .finish()
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn get_secret_key(&self, api_key: &str) -> Result<String, SignerError> {
        self.credentials
            .get(api_key)
            .cloned()
            .ok_or_else(|| SignerError::ApiKeyNotFound(api_key.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_default_to_signed_host_and_signature_type() {
        let credentials = SigningCredentials::new("api-key", "secret-api-key", "v1");
        assert_eq!(credentials.api_key(), "api-key");
        assert_eq!(credentials.secret_api_key(), "secret-api-key");
        assert_eq!(credentials.api_version(), "v1");
        assert!(credentials.signed_host());
        assert_eq!(credentials.authentication_type(), "REQUEST-SIGNATURE");
    }

    #[test]
    fn test_should_override_options() {
        let credentials = SigningCredentials::new("api-key", "secret-api-key", "v1")
            .with_signed_host(false)
            .with_authentication_type("CUSTOM");
        assert!(!credentials.signed_host());
        assert_eq!(credentials.authentication_type(), "CUSTOM");
    }

    #[test]
    fn test_should_redact_secret_in_debug_output() {
        let credentials = SigningCredentials::new("api-key", "secret-api-key", "v1");
        let printed = format!("{credentials:?}");
        assert!(printed.contains("api-key"));
        assert!(!printed.contains("secret-api-key"));
    }

    #[test]
    fn test_should_compare_credentials_by_value() {
        let a = SigningCredentials::new("api-key", "secret", "v1");
        let b = SigningCredentials::new("api-key", "secret", "v1");
        assert_eq!(a, b);
        assert_ne!(a, b.clone().with_signed_host(false));
        assert_ne!(a, SigningCredentials::new("api-key", "other", "v1"));
    }

    #[test]
    fn test_should_return_secret_key_for_known_api_key() {
        let provider =
            StaticCredentialProvider::new(vec![("api-key".to_owned(), "secret".to_owned())]);

        let result = provider.get_secret_key("api-key");
        assert_eq!(result.unwrap(), "secret");
    }

    #[test]
    fn test_should_return_error_for_unknown_api_key() {
        let provider = StaticCredentialProvider::default();

        let result = provider.get_secret_key("UNKNOWN");
        assert!(matches!(result, Err(SignerError::ApiKeyNotFound(key)) if key == "UNKNOWN"));
    }

    #[test]
    fn test_should_not_print_provider_secrets() {
        let provider =
            StaticCredentialProvider::new(vec![("api-key".to_owned(), "top-secret".to_owned())]);
        let printed = format!("{provider:?}");
        assert!(printed.contains("api-key"));
        assert!(!printed.contains("top-secret"));
    }
}
