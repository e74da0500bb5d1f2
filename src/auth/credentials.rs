//! API key and secret for Buda private endpoints.

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::BudaError;

/// Default environment variable holding the API key.
pub const API_KEY_VAR: &str = "BUDA_API_KEY";
/// Default environment variable holding the API secret.
pub const API_SECRET_VAR: &str = "BUDA_API_SECRET";

/// A Buda API key and its secret.
///
/// The key is checked once here, so signing a request never fails on it.
/// The secret is kept in a [`SecretString`] and never printed.
///
/// # Example
///
/// ```rust
/// use buda_api_client::auth::Credentials;
///
/// let credentials = Credentials::new("my_key", "my_secret").unwrap();
/// assert_eq!(credentials.api_key(), "my_key");
/// assert!(Credentials::new("bad\nkey", "my_secret").is_err());
/// ```
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_key_header: HeaderValue,
    api_secret: SecretString,
}

impl Credentials {
    /// Validate and wrap an API key and secret.
    ///
    /// Fails with [`BudaError::Auth`] when either is empty or the key cannot
    /// travel in the `X-SBTC-APIKEY` header.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self, BudaError> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.is_empty() || api_secret.is_empty() {
            return Err(BudaError::Auth("API key and secret must not be empty".to_string()));
        }
        if !api_key.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(BudaError::Auth(
                "API key must be printable ASCII without spaces".to_string(),
            ));
        }
        let mut api_key_header = HeaderValue::from_str(&api_key)
            .map_err(|e| BudaError::Auth(format!("API key is not a valid header value: {e}")))?;
        api_key_header.set_sensitive(true);

        Ok(Self {
            api_key,
            api_key_header,
            api_secret: SecretString::from(api_secret),
        })
    }

    /// Read credentials from `BUDA_API_KEY` and `BUDA_API_SECRET`.
    pub fn from_env() -> Result<Self, BudaError> {
        Self::from_env_vars(API_KEY_VAR, API_SECRET_VAR)
    }

    /// Read credentials from custom environment variable names.
    ///
    /// An unset variable gives [`BudaError::MissingCredentials`].
    pub fn from_env_vars(key_var: &str, secret_var: &str) -> Result<Self, BudaError> {
        match (std::env::var(key_var), std::env::var(secret_var)) {
            (Ok(api_key), Ok(api_secret)) => Self::new(api_key, api_secret),
            _ => Err(BudaError::MissingCredentials),
        }
    }

    /// The public API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The API key as a ready-made, sensitive header value.
    pub(crate) fn api_key_header(&self) -> &HeaderValue {
        &self.api_key_header
    }

    /// The secret used to key the request HMAC.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("my_key", "super_secret").unwrap();
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("my_key"));
        assert!(!debug_str.contains("super_secret"));
    }

    #[test]
    fn test_header_value_is_sensitive() {
        let creds = Credentials::new("my_key", "s3cr3t").unwrap();
        assert_eq!(creds.api_key_header(), "my_key");
        assert!(creds.api_key_header().is_sensitive());
    }

    #[test]
    fn test_rejects_unusable_keys() {
        for key in ["", "two words", "line\nbreak", "clé"] {
            let result = Credentials::new(key, "secret");
            assert!(matches!(result, Err(BudaError::Auth(_))), "{key:?} was accepted");
        }
        assert!(Credentials::new("key", "").is_err());
    }

    #[test]
    fn test_env_credentials_missing_vars() {
        let result =
            Credentials::from_env_vars("BUDA_TEST_UNSET_KEY_VAR", "BUDA_TEST_UNSET_SECRET");
        assert!(matches!(result, Err(BudaError::MissingCredentials)));
    }
}
