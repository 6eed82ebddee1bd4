//! HMAC-SHA256 request signing with per-request signing keys.
//!
//! This crate signs an HTTP method and URL with API credentials and a
//! timestamp, producing a signature carried in the `Authorization` header. A
//! server holding the same secret re-derives the signature from the same
//! inputs to authenticate the request.
//!
//! # Overview
//!
//! ```text
//! canonical      = METHOD [HOST] PATH [QUERY]
//! string_to_sign = AUTH_TYPE API_KEY API_VERSION TIMESTAMP base64url(SHA-256(canonical))
//! signing_key    = MAC(MAC(MAC("REQUEST_SIGNER" + secret, version), timestamp), "REQUEST_SIGNER_REQUEST")
//! signature      = base64url(MAC(signing_key, string_to_sign))
//! ```
//!
//! The signing key is scoped to an API version and a timestamp, so a leaked key
//! cannot sign requests at another time or for another version.
//!
//! # Usage
//!
//! ```rust
//! use request_signer::{RequestSigner, RequestVerifier, SignerConfig, SigningCredentials};
//! use request_signer::credentials::StaticCredentialProvider;
//!
//! let credentials = SigningCredentials::new("aaa-bbb-ccc", "secret-aaa-bbb-ccc", "v1");
//! let signer = RequestSigner::new(&SignerConfig::default()).unwrap();
//! let schema = signer
//!     .sign_request_at("GET", "https://api.com/search?product_id=prd1", &credentials, 1_585_733_039_477)
//!     .unwrap();
//! assert_eq!(
//!     schema.authorization_header(),
//!     "REQUEST-SIGNATURE ApiKey=aaa-bbb-ccc,ApiVersion=v1,SignedHost=true,\
//!      Timestamp=1585733039477,Signature=kqZmfo4_lfLoAhmlg0XNFWbygQ7GRnTbjBBOcAVu_po"
//! );
//!
//! let provider = StaticCredentialProvider::new(vec![
//!     ("aaa-bbb-ccc".to_owned(), "secret-aaa-bbb-ccc".to_owned()),
//! ]);
//! let verifier = RequestVerifier::new(&SignerConfig::default(), provider).unwrap();
//! let verified = verifier
//!     .verify("GET", "https://api.com/search?product_id=prd1", schema.authorization_header())
//!     .unwrap();
//! assert_eq!(verified.timestamp, 1_585_733_039_477);
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Canonical request construction
//! - [`clock`] - Time sources for signing timestamps
//! - [`config`] - Algorithm configuration
//! - [`credentials`] - Signing credentials and credential lookup
//! - [`crypto`] - Hash, MAC and encoding primitives
//! - [`error`] - Error types
//! - [`schema`] - The `Authorization` header value
//! - [`signer`] - Request signing
//! - [`signing_key`] - Per-request signing key derivation
//! - [`verify`] - Server-side signature verification

pub mod canonical;
pub mod clock;
pub mod config;
pub mod credentials;
pub mod crypto;
pub mod error;
pub mod schema;
pub mod signer;
pub mod signing_key;
pub mod verify;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::SignerConfig;
pub use credentials::{CredentialProvider, SigningCredentials, StaticCredentialProvider};
pub use error::{SignerError, SignerResult};
pub use schema::AuthenticationSchema;
pub use signer::{RequestSigner, SigningRequest};
pub use verify::{RequestVerifier, VerifiedRequest};
