//! Decoder for Buda's response envelope.
//!
//! Every Buda response wraps its payload under a resource-named key, and
//! paginated collections add a `meta` object:
//!
//! ```json
//! {
//!     "orders": [{...}, {...}],
//!     "meta": {"current_page": 1, "total_count": 600, "total_pages": 2}
//! }
//! ```
//!
//! Only the expected resource key and `meta` are read. Any other top-level key
//! is skipped without being decoded.

use std::fmt;
use std::marker::PhantomData;

use serde::Deserialize;
use serde::de::{self, DeserializeOwned, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};

use crate::error::BudaError;

/// Pagination metadata returned with every paginated collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageMeta {
    /// 1-based number of the page this response holds.
    pub current_page: u32,
    /// Number of items across all pages.
    pub total_count: u64,
    /// Number of pages in the collection.
    pub total_pages: u32,
}

impl PageMeta {
    /// Whether more pages follow the first one.
    pub fn has_more_pages(&self) -> bool {
        self.total_pages > 1
    }
}

/// A decoded response: the payload and optional page metadata.
///
/// # Example
///
/// ```rust
/// use buda_api_client::types::Envelope;
///
/// let json = br#"{"orders": [1, 2], "meta": {"current_page": 1, "total_count": 2, "total_pages": 1}}"#;
/// let envelope: Envelope<Vec<u32>> = Envelope::from_slice(json, "orders").unwrap();
///
/// assert_eq!(envelope.data, vec![1, 2]);
/// assert_eq!(envelope.meta.unwrap().total_pages, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    /// The payload.
    pub data: T,
    /// Page metadata, present on paginated collections.
    pub meta: Option<PageMeta>,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode raw response bytes, taking the payload from `key`.
    ///
    /// A body without `key` is an [`BudaError::InvalidResponse`] naming the
    /// keys that were present; malformed JSON is a [`BudaError::Json`].
    pub fn from_slice(bytes: &[u8], key: &str) -> Result<Self, BudaError> {
        let mut deserializer = serde_json::Deserializer::from_slice(bytes);
        let fields = EnvelopeSeed::<T>::new(key).deserialize(&mut deserializer)?;
        deserializer.end()?;

        match fields.data {
            Some(data) => Ok(Envelope {
                data,
                meta: fields.meta,
            }),
            None => Err(BudaError::InvalidResponse(format!(
                "expected '{}' in response envelope, found [{}]",
                key,
                fields.other_keys.join(", ")
            ))),
        }
    }
}

/// What one pass over the envelope map found.
struct EnvelopeFields<T> {
    data: Option<T>,
    meta: Option<PageMeta>,
    other_keys: Vec<String>,
}

struct EnvelopeSeed<'k, T> {
    key: &'k str,
    marker: PhantomData<T>,
}

impl<'k, T> EnvelopeSeed<'k, T> {
    fn new(key: &'k str) -> Self {
        Self {
            key,
            marker: PhantomData,
        }
    }
}

impl<'de, T: Deserialize<'de>> DeserializeSeed<'de> for EnvelopeSeed<'_, T> {
    type Value = EnvelopeFields<T>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for EnvelopeSeed<'_, T> {
    type Value = EnvelopeFields<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a map holding '{}' and an optional 'meta'", self.key)
    }

    fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut fields = EnvelopeFields {
            data: None,
            meta: None,
            other_keys: Vec::new(),
        };

        while let Some(key) = map.next_key::<String>()? {
            if key == self.key {
                if fields.data.is_some() {
                    return Err(de::Error::custom(format!("duplicate field `{key}`")));
                }
                fields.data = Some(map.next_value()?);
            } else if key == "meta" {
                if fields.meta.is_some() {
                    return Err(de::Error::duplicate_field("meta"));
                }
                fields.meta = Some(map.next_value()?);
            } else {
                map.next_value::<IgnoredAny>()?;
                fields.other_keys.push(key);
            }
        }

        Ok(fields)
    }
}
