//! HMAC-SHA384 signature generation for Buda API authentication.
//!
//! Buda private endpoints require a signature computed as:
//! ```text
//! hex(HMAC-SHA384(api_secret, "METHOD PATH?QUERY [BASE64(BODY)] NONCE"))
//! ```
//!
//! The parts are joined with single spaces. The body segment is only present
//! for requests that carry one (POST, PUT).

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use reqwest::Method;
use sha2::Sha384;

use crate::auth::Credentials;
use crate::error::BudaError;

type HmacSha384 = Hmac<Sha384>;

/// Sign an ordered list of request parts with a secret.
///
/// The parts are joined with a single space and the HMAC-SHA384 digest of the
/// result is returned as lowercase hex.
///
/// # Example
///
/// ```rust
/// use buda_api_client::auth::sign;
///
/// let signature = sign(&["GET", "/api/v2/balances", "1620000000000000"], "secret").unwrap();
/// assert_eq!(signature.len(), 96);
/// ```
pub fn sign(parts: &[&str], secret: &str) -> Result<String, BudaError> {
    let mut hmac = HmacSha384::new_from_slice(secret.as_bytes())
        .map_err(|e| BudaError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(parts.join(" ").as_bytes());
    Ok(hex::encode(hmac.finalize().into_bytes()))
}

/// Sign a request for Buda's private API.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `method` - HTTP method of the request
/// * `request_uri` - Path and query exactly as sent (e.g., "/api/v2/balances?page=2")
/// * `body` - The request body, for methods that carry one
/// * `nonce` - The nonce value for this request
///
/// # Returns
///
/// Lowercase hex HMAC-SHA384 signature for the `X-SBTC-SIGNATURE` header.
pub fn sign_request(
    credentials: &Credentials,
    method: &Method,
    request_uri: &str,
    body: Option<&[u8]>,
    nonce: u64,
) -> Result<String, BudaError> {
    let nonce_str = nonce.to_string();
    match body {
        Some(body) => {
            let encoded = BASE64.encode(body);
            sign(
                &[method.as_str(), request_uri, &encoded, &nonce_str],
                credentials.expose_secret(),
            )
        }
        None => sign(
            &[method.as_str(), request_uri, &nonce_str],
            credentials.expose_secret(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_golden_value() {
        let signature = sign(&["GET", "/api/v2/markets", "1620000000000000"], "s3cr3t").unwrap();
        assert_eq!(
            signature,
            "87cf0cfa4c46be5591f96157fe925b2048c64b67f002fcf3639cbdbead144507e9733b6890968b2d1467caf24a441408"
        );
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let signature = sign(&["GET", "/api/v2/balances", "1"], "key").unwrap();
        // SHA-384 produces 48 bytes, hex encoded = 96 chars
        assert_eq!(signature.len(), 96);
        assert!(
            signature
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_signature_consistency() {
        let credentials = Credentials::new("key", "my_secret").unwrap();
        let sig1 = sign_request(&credentials, &Method::GET, "/api/v2/balances", None, 12345).unwrap();
        let sig2 = sign_request(&credentials, &Method::GET, "/api/v2/balances", None, 12345).unwrap();
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_get_request_matches_three_parts() {
        let credentials = Credentials::new("key", "s3cr3t").unwrap();
        let signature = sign_request(
            &credentials,
            &Method::GET,
            "/api/v2/markets",
            None,
            1620000000000000,
        )
        .unwrap();
        assert_eq!(
            signature,
            sign(&["GET", "/api/v2/markets", "1620000000000000"], "s3cr3t").unwrap()
        );
    }

    #[test]
    fn test_post_request_includes_base64_body() {
        let credentials = Credentials::new("key", "s3cr3t").unwrap();
        let signature = sign_request(
            &credentials,
            &Method::POST,
            "/api/v2/markets/btc-clp/orders",
            Some(br#"{"type":"Bid"}"#),
            1620000000000000,
        )
        .unwrap();
        assert_eq!(
            signature,
            sign(
                &[
                    "POST",
                    "/api/v2/markets/btc-clp/orders",
                    "eyJ0eXBlIjoiQmlkIn0=",
                    "1620000000000000"
                ],
                "s3cr3t"
            )
            .unwrap()
        );
        assert_eq!(
            signature,
            "15e064b59d10e8e814856f89bda7e53967e7c92c46791a6e2531401e137e418f45f2532c1733954bc9937e3749cc441e"
        );
    }

    #[test]
    fn test_signature_changes_with_each_part() {
        let base = sign(&["GET", "/api/v2/balances", "12345"], "my_secret").unwrap();

        let variants = [
            sign(&["POST", "/api/v2/balances", "12345"], "my_secret").unwrap(),
            sign(&["GET", "/api/v2/balances/btc", "12345"], "my_secret").unwrap(),
            sign(&["GET", "/api/v2/balances", "12346"], "my_secret").unwrap(),
            sign(&["GET", "/api/v2/balances", "12345"], "other_secret").unwrap(),
        ];
        for variant in variants {
            assert_ne!(base, variant);
        }
    }

    #[test]
    fn test_signature_changes_with_body() {
        let credentials = Credentials::new("key", "my_secret").unwrap();
        let uri = "/api/v2/markets/btc-clp/orders";
        let sig1 = sign_request(&credentials, &Method::POST, uri, Some(b"{\"a\":1}"), 1).unwrap();
        let sig2 = sign_request(&credentials, &Method::POST, uri, Some(b"{\"a\":2}"), 1).unwrap();
        let sig3 = sign_request(&credentials, &Method::POST, uri, None, 1).unwrap();
        assert_ne!(sig1, sig2);
        assert_ne!(sig1, sig3);
    }
}
