//! Common types used across the Buda client library.

pub mod common;
pub mod envelope;
pub mod serde_helpers;

pub use common::*;
pub use envelope::{Envelope, PageMeta};
