//! Authentication module for Buda API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Nonce generation for replay attack prevention
//! - HMAC-SHA384 signature generation for authenticated requests
//! - An [`Authenticator`] that attaches the signing headers to a request

mod authenticator;
mod credentials;
mod nonce;
mod signature;

pub use authenticator::{API_KEY_HEADER, Authenticator, NONCE_HEADER, SIGNATURE_HEADER};
pub use credentials::{API_KEY_VAR, API_SECRET_VAR, Credentials};
pub use nonce::{IncreasingNonce, NonceProvider};
pub use signature::{sign, sign_request};
