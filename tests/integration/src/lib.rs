//! End-to-end tests for request-signer.
//!
//! These exercise the public API only: a client signs, a server-side verifier
//! re-derives the signature from what it receives.

use std::sync::Once;

use request_signer::{
    RequestSigner, RequestVerifier, SignerConfig, SigningCredentials, StaticCredentialProvider,
};

static INIT: Once = Once::new();

/// API key shared by the test client and verifier.
pub const TEST_API_KEY: &str = "aaa-bbb-ccc";
/// Secret shared by the test client and verifier.
pub const TEST_SECRET_KEY: &str = "secret-aaa-bbb-ccc";

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Credentials of the test client.
#[must_use]
pub fn test_credentials() -> SigningCredentials {
    SigningCredentials::new(TEST_API_KEY, TEST_SECRET_KEY, "v1")
}

/// A signer using the default algorithms and wall-clock time.
#[must_use]
pub fn test_signer() -> RequestSigner {
    init_tracing();
    RequestSigner::new(&SignerConfig::default()).expect("default config resolves")
}

/// A verifier that knows the test client.
#[must_use]
pub fn test_verifier() -> RequestVerifier<StaticCredentialProvider> {
    init_tracing();
    let provider = StaticCredentialProvider::new(vec![(
        TEST_API_KEY.to_owned(),
        TEST_SECRET_KEY.to_owned(),
    )]);
    RequestVerifier::new(&SignerConfig::default(), provider).expect("default config resolves")
}

mod test_http;
mod test_sign_verify;
