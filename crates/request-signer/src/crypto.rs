//! Hashing, MAC and encoding primitives.
//!
//! Every value that leaves the signer is a SHA-256 digest or an HMAC-SHA256
//! tag rendered with the URL-safe Base64 alphabet and no padding:
//!
//! ```text
//! hash(bytes)        = SHA-256(bytes)
//! hmac(message, key) = HMAC-SHA256(key, charset(message))
//! encode(bytes)      = base64url(bytes), no '=' padding
//! ```
//!
//! Algorithm names come from [`SignerConfig`] and are resolved once into a
//! [`CryptoSuite`]. A suite is `Copy` and holds no state, so it can be shared
//! freely between threads.

use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, KeyInit, Mac};
use sha2::{Digest, Sha256};

use crate::config::SignerConfig;
use crate::error::{SignerError, SignerResult};

type HmacSha256 = Hmac<Sha256>;

/// Normalize an algorithm name for lookup: lowercase, without `-` or `_`.
fn lookup_key(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    /// SHA-256, 32-byte output.
    #[default]
    Sha256,
}

impl HashAlgorithm {
    /// Canonical name of the algorithm.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "SHA-256",
        }
    }

    /// Size of the digest in bytes.
    #[must_use]
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
        }
    }

    /// Compute the digest of `data`.
    #[must_use]
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(data).to_vec(),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match lookup_key(s).as_str() {
            "sha256" => Ok(Self::Sha256),
            _ => Err(SignerError::UnsupportedAlgorithm(s.to_owned())),
        }
    }
}

/// Supported MAC algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MacAlgorithm {
    /// HMAC over SHA-256, 32-byte output.
    #[default]
    HmacSha256,
}

impl MacAlgorithm {
    /// Canonical name of the algorithm.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HmacSha256 => "HmacSHA256",
        }
    }

    /// Compute the MAC of `data` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::InvalidKey`] for empty key material or when the
    /// MAC implementation refuses the key.
    pub fn compute(self, key: &[u8], data: &[u8]) -> SignerResult<Vec<u8>> {
        if key.is_empty() {
            return Err(SignerError::InvalidKey("empty key".to_owned()));
        }
        match self {
            Self::HmacSha256 => {
                let mut mac = HmacSha256::new_from_slice(key)
                    .map_err(|e| SignerError::InvalidKey(e.to_string()))?;
                mac.update(data);
                Ok(mac.finalize().into_bytes().to_vec())
            }
        }
    }
}

impl FromStr for MacAlgorithm {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match lookup_key(s).as_str() {
            "hmacsha256" => Ok(Self::HmacSha256),
            _ => Err(SignerError::UnsupportedAlgorithm(s.to_owned())),
        }
    }
}

/// Supported charsets for turning text into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    /// UTF-8.
    #[default]
    Utf8,
}

impl Charset {
    /// Canonical name of the charset.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
        }
    }

    /// Encode `text` into bytes.
    #[must_use]
    pub fn encode(self, text: &str) -> &[u8] {
        match self {
            Self::Utf8 => text.as_bytes(),
        }
    }
}

impl FromStr for Charset {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match lookup_key(s).as_str() {
            "utf8" => Ok(Self::Utf8),
            _ => Err(SignerError::UnsupportedCharset(s.to_owned())),
        }
    }
}

/// A resolved set of primitives: digest, MAC and charset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CryptoSuite {
    hash: HashAlgorithm,
    mac: MacAlgorithm,
    charset: Charset,
}

impl CryptoSuite {
    /// Resolve the algorithm names in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::UnsupportedAlgorithm`] if the hash or MAC name is
    /// unknown, or [`SignerError::UnsupportedCharset`] if the charset is unknown.
    pub fn from_config(config: &SignerConfig) -> SignerResult<Self> {
        Ok(Self {
            hash: config.hash_algorithm.parse()?,
            mac: config.mac_algorithm.parse()?,
            charset: config.charset.parse()?,
        })
    }

    /// The digest algorithm of this suite.
    #[must_use]
    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash
    }

    /// The MAC algorithm of this suite.
    #[must_use]
    pub fn mac_algorithm(&self) -> MacAlgorithm {
        self.mac
    }

    /// The charset of this suite.
    #[must_use]
    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Hash raw bytes.
    #[must_use]
    pub fn hash(&self, data: &[u8]) -> Vec<u8> {
        self.hash.digest(data)
    }

    /// Hash text after encoding it with the suite's charset.
    #[must_use]
    pub fn hash_text(&self, text: &str) -> Vec<u8> {
        self.hash(self.charset.encode(text))
    }

    /// MAC `message` (encoded with the suite's charset) under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::InvalidKey`] if the key is rejected.
    pub fn hmac(&self, message: &str, key: &[u8]) -> SignerResult<Vec<u8>> {
        self.mac.compute(key, self.charset.encode(message))
    }
}

/// Encode bytes with the URL-safe Base64 alphabet, without padding.
///
/// # Examples
///
/// ```
/// use request_signer::crypto::encode;
///
/// assert_eq!(encode(b"1 String To Encode"), "MSBTdHJpbmcgVG8gRW5jb2Rl");
/// assert_eq!(encode(&[0xfb, 0xff]), "-_8");
/// ```
#[must_use]
pub fn encode(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Decode an unpadded URL-safe Base64 string.
///
/// # Errors
///
/// Returns the underlying [`base64::DecodeError`] for characters outside the
/// URL-safe alphabet, padding, or a truncated final quantum.
pub fn decode(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(encoded)
}
