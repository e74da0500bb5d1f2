//! Error types for the Buda client library.

use serde::Deserialize;
use thiserror::Error;

/// The main error type for all Buda client operations.
#[derive(Error, Debug)]
pub enum BudaError {
    /// Sending the request failed (connection, TLS, middleware)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest_middleware::Error),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    Request(#[from] reqwest::Error),

    /// The response arrived but its body could not be read
    #[error("Failed to read response body: {0}")]
    ResponseBody(#[source] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Buda API answered with a non-success status
    #[error("Buda API error: {0}")]
    Api(ApiError),

    /// A page of a paginated collection could not be fetched
    #[error("Failed to fetch page {page}: {source}")]
    Page {
        /// 1-based page number that failed
        page: u32,
        /// The underlying failure
        #[source]
        source: Box<BudaError>,
    },

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A page task ended without reporting a result
    #[error("Page task failed: {0}")]
    TaskFailed(String),

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for private endpoints")]
    MissingCredentials,
}

impl BudaError {
    /// Wrap an error as the failure of a specific page.
    pub(crate) fn for_page(page: u32, source: BudaError) -> Self {
        BudaError::Page {
            page,
            source: Box::new(source),
        }
    }

    /// The page number, if this error came out of a paginated fetch.
    pub fn page(&self) -> Option<u32> {
        match self {
            BudaError::Page { page, .. } => Some(*page),
            _ => None,
        }
    }

    /// The API error behind this error, looking through page wrappers.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            BudaError::Api(e) => Some(e),
            BudaError::Page { source, .. } => source.api_error(),
            _ => None,
        }
    }
}

/// An error response returned by the Buda API.
///
/// Buda answers failures with a non-2xx status and, usually, a body of the form
/// `{"message": "...", "code": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Machine-readable error code (e.g., "not_found"), when the body carried one
    pub code: Option<String>,
    /// Human-readable message, or the raw body when it was not Buda's error shape
    pub message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "HTTP {} {}: {}", self.status, code, self.message),
            None => write!(f, "HTTP {}: {}", self.status, self.message),
        }
    }
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Build an API error from a status and the raw response body.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) => Self::new(status, parsed.code, parsed.message),
            Err(_) => Self::new(status, None, String::from_utf8_lossy(body).trim().to_string()),
        }
    }

    /// Check if the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status == 404 || self.code.as_deref() == Some(error_codes::NOT_FOUND)
    }

    /// Check if the request was rejected for its credentials, nonce or signature.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401 || self.code.as_deref() == Some(error_codes::AUTHENTICATION_ERROR)
    }

    /// Check if the caller lacks permission for the resource.
    pub fn is_forbidden(&self) -> bool {
        self.status == 403 || self.code.as_deref() == Some(error_codes::FORBIDDEN)
    }

    /// Check if the server failed on its side.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

/// Known Buda error codes for pattern matching.
pub mod error_codes {
    /// Resource not found
    pub const NOT_FOUND: &str = "not_found";
    /// Invalid key, nonce or signature
    pub const AUTHENTICATION_ERROR: &str = "authentication_error";
    /// Insufficient permissions
    pub const FORBIDDEN: &str = "forbidden";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_buda_body() {
        let body = br#"{"message":"Not found","code":"not_found"}"#;
        let error = ApiError::from_body(404, body);
        assert_eq!(error.code.as_deref(), Some("not_found"));
        assert_eq!(error.message, "Not found");
        assert!(error.is_not_found());
        assert!(!error.is_unauthorized());
    }

    #[test]
    fn test_api_error_from_plain_body() {
        let error = ApiError::from_body(502, b"<html>Bad Gateway</html>\n");
        assert!(error.code.is_none());
        assert_eq!(error.message, "<html>Bad Gateway</html>");
        assert!(error.is_server_error());
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiError::new(401, Some("authentication_error".into()), "Invalid nonce");
        assert_eq!(error.to_string(), "HTTP 401 authentication_error: Invalid nonce");
        assert_eq!(ApiError::new(500, None, "boom").to_string(), "HTTP 500: boom");
    }

    #[test]
    fn test_page_error_exposes_inner_api_error() {
        let error = BudaError::for_page(3, BudaError::Api(ApiError::new(500, None, "boom")));
        assert_eq!(error.page(), Some(3));
        assert_eq!(error.api_error().map(|e| e.status), Some(500));
        assert!(error.to_string().starts_with("Failed to fetch page 3"));
    }
}
