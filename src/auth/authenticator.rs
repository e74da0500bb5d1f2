//! Request authentication for Buda private endpoints.

use std::sync::Arc;

use reqwest::Method;
use reqwest::Request;
use reqwest::header::{HeaderName, HeaderValue};

use crate::auth::{Credentials, NonceProvider, sign_request};
use crate::error::BudaError;

/// Header carrying the API key.
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-sbtc-apikey");
/// Header carrying the nonce as a decimal string.
pub const NONCE_HEADER: HeaderName = HeaderName::from_static("x-sbtc-nonce");
/// Header carrying the lowercase hex signature.
pub const SIGNATURE_HEADER: HeaderName = HeaderName::from_static("x-sbtc-signature");

/// Signs outgoing requests with the client's credentials.
///
/// Every clone shares the same nonce provider, so requests signed from
/// concurrent page tasks still get strictly increasing nonces.
#[derive(Clone)]
pub struct Authenticator {
    credentials: Arc<Credentials>,
    nonce_provider: Arc<dyn NonceProvider>,
}

impl Authenticator {
    /// Create an authenticator from credentials and a nonce provider.
    pub fn new(credentials: Credentials, nonce_provider: Arc<dyn NonceProvider>) -> Self {
        Self {
            credentials: Arc::new(credentials),
            nonce_provider,
        }
    }

    /// Attach the key, nonce and signature headers to `request`.
    ///
    /// The body is read by reference, so the request can still be sent
    /// afterwards and authenticating twice signs the same bytes. Streaming
    /// bodies are rejected because they cannot be read without being consumed.
    pub fn authenticate(&self, mut request: Request) -> Result<Request, BudaError> {
        let body: Option<&[u8]> = if carries_body(request.method()) {
            match request.body() {
                Some(body) => Some(body.as_bytes().ok_or_else(|| {
                    BudaError::Auth("streaming request bodies cannot be signed".to_string())
                })?),
                None => Some(b"".as_slice()),
            }
        } else {
            None
        };

        let request_uri = request_uri(request.url());
        let nonce = self.nonce_provider.next_nonce();
        let signature = sign_request(&self.credentials, request.method(), &request_uri, body, nonce)?;

        let headers = request.headers_mut();
        headers.insert(API_KEY_HEADER, self.credentials.api_key_header().clone());
        headers.insert(NONCE_HEADER, HeaderValue::from(nonce));
        headers.insert(
            SIGNATURE_HEADER,
            HeaderValue::from_str(&signature)
                .map_err(|e| BudaError::Auth(format!("Invalid signature header: {e}")))?,
        );

        Ok(request)
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("credentials", &self.credentials)
            .finish()
    }
}

fn carries_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT
}

/// Path plus query string, as the server sees it.
fn request_uri(url: &url::Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::sign;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct FixedNonce(AtomicU64);

    impl NonceProvider for FixedNonce {
        fn next_nonce(&self) -> u64 {
            self.0.fetch_add(1, Ordering::SeqCst)
        }
    }

    fn authenticator(start_nonce: u64) -> Authenticator {
        Authenticator::new(
            Credentials::new("my_key", "s3cr3t").unwrap(),
            Arc::new(FixedNonce(AtomicU64::new(start_nonce))),
        )
    }

    fn header<'a>(request: &'a Request, name: &HeaderName) -> &'a str {
        request.headers().get(name).unwrap().to_str().unwrap()
    }

    #[test]
    fn test_get_request_headers() {
        let url = url::Url::parse("https://www.buda.com/api/v2/markets").unwrap();
        let request = Request::new(Method::GET, url);

        let signed = authenticator(1620000000000000).authenticate(request).unwrap();

        assert_eq!(header(&signed, &API_KEY_HEADER), "my_key");
        assert_eq!(header(&signed, &NONCE_HEADER), "1620000000000000");
        assert_eq!(
            header(&signed, &SIGNATURE_HEADER),
            "87cf0cfa4c46be5591f96157fe925b2048c64b67f002fcf3639cbdbead144507e9733b6890968b2d1467caf24a441408"
        );
    }

    #[test]
    fn test_query_string_is_signed() {
        let url = url::Url::parse("https://www.buda.com/api/v2/markets/btc-clp/orders?page=2&per=300")
            .unwrap();
        let signed = authenticator(7)
            .authenticate(Request::new(Method::GET, url))
            .unwrap();

        let expected = sign(
            &["GET", "/api/v2/markets/btc-clp/orders?page=2&per=300", "7"],
            "s3cr3t",
        )
        .unwrap();
        assert_eq!(header(&signed, &SIGNATURE_HEADER), expected);
    }

    #[test]
    fn test_post_body_survives_authentication() {
        let url = url::Url::parse("https://www.buda.com/api/v2/markets/btc-clp/orders").unwrap();
        let mut request = Request::new(Method::POST, url);
        *request.body_mut() = Some(r#"{"type":"Bid"}"#.into());

        let auth = authenticator(1620000000000000);
        let signed = auth.authenticate(request).unwrap();

        assert_eq!(
            signed.body().and_then(|b| b.as_bytes()),
            Some(&br#"{"type":"Bid"}"#[..])
        );
        assert_eq!(
            header(&signed, &SIGNATURE_HEADER),
            "15e064b59d10e8e814856f89bda7e53967e7c92c46791a6e2531401e137e418f45f2532c1733954bc9937e3749cc441e"
        );

        // Re-signing reads the same body again; only the nonce moves.
        let resigned = auth.authenticate(signed).unwrap();
        let expected = sign(
            &[
                "POST",
                "/api/v2/markets/btc-clp/orders",
                "eyJ0eXBlIjoiQmlkIn0=",
                "1620000000000001",
            ],
            "s3cr3t",
        )
        .unwrap();
        assert_eq!(header(&resigned, &SIGNATURE_HEADER), expected);
    }

    #[test]
    fn test_post_without_body_signs_empty_segment() {
        let url = url::Url::parse("https://www.buda.com/api/v2/orders").unwrap();
        let signed = authenticator(5)
            .authenticate(Request::new(Method::POST, url))
            .unwrap();

        let expected = sign(&["POST", "/api/v2/orders", "", "5"], "s3cr3t").unwrap();
        assert_eq!(header(&signed, &SIGNATURE_HEADER), expected);
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug_str = format!("{:?}", authenticator(1));
        assert!(debug_str.contains("my_key"));
        assert!(!debug_str.contains("s3cr3t"));
    }
}
