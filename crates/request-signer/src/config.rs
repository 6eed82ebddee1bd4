//! Algorithm configuration for the signer.
//!
//! Defaults are fixed and must match between an interoperating client and
//! server. Environment variables can override them for testing failure paths.

/// Default hash algorithm name.
pub const DEFAULT_HASH_ALGORITHM: &str = "SHA-256";
/// Default MAC algorithm name.
pub const DEFAULT_MAC_ALGORITHM: &str = "HmacSHA256";
/// Default text charset name.
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Algorithm identifiers used by the signer and verifier.
///
/// Names are resolved when a [`CryptoSuite`](crate::crypto::CryptoSuite) is
/// built, so an unknown name fails at construction rather than mid-request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignerConfig {
    /// Digest used to hash the canonical request.
    pub hash_algorithm: String,
    /// MAC used for key derivation and the final signature.
    pub mac_algorithm: String,
    /// Charset used to turn text into bytes.
    pub charset: String,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            hash_algorithm: DEFAULT_HASH_ALGORITHM.to_owned(),
            mac_algorithm: DEFAULT_MAC_ALGORITHM.to_owned(),
            charset: DEFAULT_CHARSET.to_owned(),
        }
    }
}

impl SignerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// Recognized variables: `REQUEST_SIGNER_HASH_ALGORITHM`,
    /// `REQUEST_SIGNER_MAC_ALGORITHM` and `REQUEST_SIGNER_CHARSET`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source, falling back to defaults.
    ///
    /// Uses the same variable names as [`SignerConfig::from_env`].
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("REQUEST_SIGNER_HASH_ALGORITHM") {
            config.hash_algorithm = v;
        }
        if let Some(v) = lookup("REQUEST_SIGNER_MAC_ALGORITHM") {
            config.mac_algorithm = v;
        }
        if let Some(v) = lookup("REQUEST_SIGNER_CHARSET") {
            config.charset = v;
        }

        config
    }

    /// Override the hash algorithm name.
    #[must_use]
    pub fn with_hash_algorithm(mut self, name: impl Into<String>) -> Self {
        self.hash_algorithm = name.into();
        self
    }

    /// Override the MAC algorithm name.
    #[must_use]
    pub fn with_mac_algorithm(mut self, name: impl Into<String>) -> Self {
        self.mac_algorithm = name.into();
        self
    }

    /// Override the charset name.
    #[must_use]
    pub fn with_charset(mut self, name: impl Into<String>) -> Self {
        self.charset = name.into();
        self
    }
}
