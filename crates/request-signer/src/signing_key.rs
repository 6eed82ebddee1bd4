//! Per-request signing key derivation.
//!
//! The secret never signs a request directly. It is scoped to an API version
//! and a timestamp through a chain of MAC rounds, each round keying the next:
//!
//! ```text
//! k0         = "REQUEST_SIGNER" + secret
//! k1         = MAC(k0, api_version)
//! k2         = MAC(k1, decimal(timestamp))
//! SigningKey = MAC(k2, "REQUEST_SIGNER_REQUEST")
//! ```
//!
//! The two literals are domain-separation labels.

use std::fmt;

use crate::crypto::CryptoSuite;
use crate::error::SignerResult;

/// Label prefixed to the secret to form the root key.
pub const SCHEMA_LABEL: &str = "REQUEST_SIGNER";

/// Label MAC'ed in the final derivation round.
pub const REQUEST_LABEL: &str = "REQUEST_SIGNER_REQUEST";

/// A signing key valid for one API version and one timestamp.
///
/// The key bytes are never printed; `Debug` only shows the length.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the key is empty. A derived key never is.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

/// Derive the signing key for `secret_api_key`, `api_version` and `timestamp`.
///
/// # Errors
///
/// Propagates [`SignerError::InvalidKey`](crate::SignerError::InvalidKey) if a
/// MAC round rejects its key.
///
/// # Examples
///
/// ```
/// use request_signer::crypto::{CryptoSuite, encode};
/// use request_signer::signing_key::derive_signing_key;
///
/// let key = derive_signing_key(&CryptoSuite::default(), "SecretApiKey", "v1", 1_585_658_784_903)
///     .unwrap();
/// assert_eq!(encode(key.as_bytes()), "uT-NHNKtsf6nl2smF3i57Cen7PiJ-7VDCvi_AjEyyNM");
/// ```
pub fn derive_signing_key(
    suite: &CryptoSuite,
    secret_api_key: &str,
    api_version: &str,
    timestamp: i64,
) -> SignerResult<SigningKey> {
    let mut root_key = suite.charset().encode(SCHEMA_LABEL).to_vec();
    root_key.extend_from_slice(suite.charset().encode(secret_api_key));

    let version_key = suite.hmac(api_version, &root_key)?;
    let timestamp_key = suite.hmac(&timestamp.to_string(), &version_key)?;
    let signing_key = suite.hmac(REQUEST_LABEL, &timestamp_key)?;

    Ok(SigningKey(signing_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::encode;

    #[test]
    fn test_should_compute_signing_key() {
        let suite = CryptoSuite::default();
        let key = derive_signing_key(&suite, "SecretApiKey", "v1", 1_585_658_784_903).unwrap();
        assert_eq!(key.len(), suite.hash_algorithm().output_len());
        assert_eq!(
            encode(key.as_bytes()),
            "uT-NHNKtsf6nl2smF3i57Cen7PiJ-7VDCvi_AjEyyNM"
        );
    }

    #[test]
    fn test_should_scope_key_to_version_and_timestamp() {
        let suite = CryptoSuite::default();
        let base = derive_signing_key(&suite, "SecretApiKey", "v1", 1_585_658_784_903).unwrap();
        let other_version =
            derive_signing_key(&suite, "SecretApiKey", "v2", 1_585_658_784_903).unwrap();
        let other_timestamp =
            derive_signing_key(&suite, "SecretApiKey", "v1", 1_585_658_784_904).unwrap();
        let other_secret =
            derive_signing_key(&suite, "OtherSecret", "v1", 1_585_658_784_903).unwrap();

        assert_ne!(base, other_version);
        assert_ne!(base, other_timestamp);
        assert_ne!(base, other_secret);
    }

    #[test]
    fn test_should_derive_with_empty_secret() {
        // The label keeps the root key non-empty.
        let key = derive_signing_key(&CryptoSuite::default(), "", "v1", 0).unwrap();
        assert!(!key.is_empty());
    }

    #[test]
    fn test_should_not_print_key_bytes() {
        let key = derive_signing_key(&CryptoSuite::default(), "SecretApiKey", "v1", 1).unwrap();
        let printed = format!("{key:?}");
        assert_eq!(printed, "SigningKey { len: 32, .. }");
    }
}
