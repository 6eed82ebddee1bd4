//! Signing `http::Request`s on the client and verifying their parts on the server.

#[cfg(test)]
mod tests {
    use request_signer::{FixedClock, SignerError};

    use crate::{test_credentials, test_signer, test_verifier};

    /// Turn a client request (absolute URI) into what a server sees
    /// (origin-form URI plus `Host` header).
    fn as_received(request: &http::Request<()>) -> anyhow::Result<http::request::Parts> {
        let uri = request.uri();
        let host = uri.authority().map(ToString::to_string).unwrap_or_default();
        let path_and_query = uri
            .path_and_query()
            .map_or_else(|| "/".to_owned(), ToString::to_string);

        let mut builder = http::Request::builder()
            .method(request.method().clone())
            .uri(path_and_query)
            .header(http::header::HOST, host);
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }
        Ok(builder.body(())?.into_parts().0)
    }

    #[test]
    fn test_should_verify_signed_http_request() -> anyhow::Result<()> {
        let signer = test_signer().with_clock(FixedClock(1_585_733_039_477));
        let mut request = http::Request::builder()
            .method("GET")
            .uri("https://api.com:8443/search?product_id=prd1")
            .body(())?;

        let schema = signer.sign_http_request(&mut request, &test_credentials())?;
        tracing::info!(header = schema.authorization_header(), "signed");

        let parts = as_received(&request)?;
        let verified = test_verifier().verify_parts(&parts)?;
        assert_eq!(verified.timestamp, 1_585_733_039_477);
        Ok(())
    }

    #[test]
    fn test_should_reject_request_with_tampered_query() -> anyhow::Result<()> {
        let mut request = http::Request::builder()
            .method("DELETE")
            .uri("https://api.com/items?id=1")
            .body(())?;
        test_signer().sign_http_request(&mut request, &test_credentials())?;

        let mut parts = as_received(&request)?;
        parts.uri = "/items?id=2".parse()?;

        let result = test_verifier().verify_parts(&parts);
        assert!(matches!(result, Err(SignerError::SignatureDoesNotMatch)));
        Ok(())
    }

    #[test]
    fn test_should_reject_request_without_authorization() -> anyhow::Result<()> {
        let request = http::Request::builder()
            .method("GET")
            .uri("https://api.com/search")
            .body(())?;

        let parts = as_received(&request)?;
        let result = test_verifier().verify_parts(&parts);
        assert!(matches!(result, Err(SignerError::MissingAuthHeader)));
        Ok(())
    }
}
