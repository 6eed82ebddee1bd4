//! Sign-then-verify integration tests over URLs and header strings.

#[cfg(test)]
mod tests {
    use request_signer::{FixedClock, SignerError, SigningRequest};

    use crate::{TEST_API_KEY, TEST_SECRET_KEY, test_credentials, test_signer, test_verifier};

    #[test]
    fn test_should_match_published_vector() -> anyhow::Result<()> {
        let schema = test_signer().sign(
            &SigningRequest::new("GET", "https://api.com/search?product_id=prd1")
                .with_timestamp(1_585_733_039_477),
            &test_credentials(),
        )?;

        assert_eq!(
            schema.authorization_header(),
            "REQUEST-SIGNATURE ApiKey=aaa-bbb-ccc,ApiVersion=v1,SignedHost=true,\
             Timestamp=1585733039477,Signature=kqZmfo4_lfLoAhmlg0XNFWbygQ7GRnTbjBBOcAVu_po"
        );
        Ok(())
    }

    #[test]
    fn test_should_verify_what_was_signed_now() -> anyhow::Result<()> {
        let url = "https://api.com/v1/orders/42?expand=items&currency=EUR";
        let schema = test_signer().sign_request("PATCH", url, &test_credentials())?;

        let verified = test_verifier().verify("PATCH", url, schema.authorization_header())?;
        assert_eq!(verified.api_key, TEST_API_KEY);
        assert_eq!(verified.api_version, "v1");
        assert!(verified.signed_host);
        assert_eq!(verified.timestamp, schema.timestamp());
        Ok(())
    }

    #[test]
    fn test_should_verify_across_method_case() -> anyhow::Result<()> {
        let url = "https://api.com/search";
        let schema = test_signer().sign_request_at("get", url, &test_credentials(), 1)?;

        test_verifier().verify("GET", url, schema.authorization_header())?;
        Ok(())
    }

    #[test]
    fn test_should_reject_syntactically_different_url() -> anyhow::Result<()> {
        // Percent-encoding differences are not normalized away.
        let schema = test_signer().sign_request_at(
            "GET",
            "https://api.com/a%20b",
            &test_credentials(),
            1,
        )?;

        let result = test_verifier().verify("GET", "https://api.com/a b", schema.authorization_header());
        assert!(matches!(result, Err(SignerError::SignatureDoesNotMatch)));
        Ok(())
    }

    #[test]
    fn test_should_reject_signature_from_another_secret() -> anyhow::Result<()> {
        let credentials = request_signer::SigningCredentials::new(TEST_API_KEY, "guessed", "v1");
        let schema = test_signer().sign_request_at(
            "GET",
            "https://api.com/search",
            &credentials,
            1,
        )?;

        let result = test_verifier().verify("GET", "https://api.com/search", schema.authorization_header());
        assert!(matches!(result, Err(SignerError::SignatureDoesNotMatch)));
        assert_ne!(credentials.secret_api_key(), TEST_SECRET_KEY);
        Ok(())
    }

    #[test]
    fn test_should_sign_identically_with_fixed_clock() -> anyhow::Result<()> {
        let signer = test_signer().with_clock(FixedClock(1_585_733_039_477));
        let url = "https://api.com/search?product_id=prd1";

        let first = signer.sign_request("GET", url, &test_credentials())?;
        let second = signer.sign_request("GET", url, &test_credentials())?;
        assert_eq!(first, second);
        assert_eq!(first.signature(), "kqZmfo4_lfLoAhmlg0XNFWbygQ7GRnTbjBBOcAVu_po");
        Ok(())
    }

    #[tokio::test]
    async fn test_should_sign_and_verify_in_parallel() -> anyhow::Result<()> {
        let mut handles = Vec::new();
        for i in 0..32_i64 {
            handles.push(tokio::spawn(async move {
                let url = format!("https://api.com/items/{i}");
                let schema = test_signer().sign_request_at("GET", &url, &test_credentials(), i)?;
                test_verifier().verify("GET", &url, schema.authorization_header())
            }));
        }

        for (i, handle) in handles.into_iter().enumerate() {
            let verified = handle.await??;
            assert_eq!(verified.timestamp, i64::try_from(i)?);
        }
        Ok(())
    }
}
