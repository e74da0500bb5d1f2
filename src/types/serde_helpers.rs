//! Serde helpers for Buda's serialization quirks.

use serde::{Deserialize, Deserializer};

/// Helper for strings that should be `None` when empty or null.
///
/// Transaction hashes and addresses of pending transfers come back as `""`
/// or `null` depending on the currency.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use buda_api_client::types::serde_helpers::empty_string_as_none;
///
/// #[derive(Deserialize, Debug)]
/// struct TransferData {
///     #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
///     tx_hash: Option<String>,
/// }
///
/// let json = r#"{"tx_hash":""}"#;
/// let data: TransferData = serde_json::from_str(json).unwrap();
/// assert!(data.tx_hash.is_none());
///
/// let json = r#"{"tx_hash":"abc123"}"#;
/// let data: TransferData = serde_json::from_str(json).unwrap();
/// assert_eq!(data.tx_hash.unwrap(), "abc123");
/// ```
pub mod empty_string_as_none {
    use super::*;

    /// Deserialize a string, returning None if empty.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.filter(|s| !s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Debug)]
    struct Test {
        #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
        tx_hash: Option<String>,
    }

    #[test]
    fn test_empty_string_as_none() {
        let test: Test = serde_json::from_str(r#"{"tx_hash":""}"#).unwrap();
        assert!(test.tx_hash.is_none());

        let test: Test = serde_json::from_str(r#"{"tx_hash":null}"#).unwrap();
        assert!(test.tx_hash.is_none());

        let test: Test = serde_json::from_str(r#"{}"#).unwrap();
        assert!(test.tx_hash.is_none());

        let test: Test = serde_json::from_str(r#"{"tx_hash":"0xabc"}"#).unwrap();
        assert_eq!(test.tx_hash.as_deref(), Some("0xabc"));
    }
}
