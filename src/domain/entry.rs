//! Backend record types for the public API directory.
//!
//! [`RawEntry`] mirrors one record of the `/entries` endpoint with its exact wire
//! field names. [`EntriesResponse`] is the validated payload: decoding rejects
//! bodies that break the `{count, entries}` contract so that the adapter never has
//! to guard against them.

use crate::domain::error::{ApidexError, Result};
use serde::{Deserialize, Serialize};

/// One API record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    #[serde(rename = "API")]
    pub api: String,

    #[serde(rename = "Description", default)]
    pub description: String,

    /// Authentication scheme; `None` and `""` both mean "no authentication".
    #[serde(rename = "Auth", default)]
    pub auth: Option<String>,

    #[serde(rename = "HTTPS", default)]
    pub https: bool,

    #[serde(rename = "Cors", default)]
    pub cors: Option<String>,

    #[serde(rename = "Link", default)]
    pub link: String,

    #[serde(rename = "Category", default)]
    pub category: String,
}

impl RawEntry {
    /// Returns the authentication scheme, treating an empty string as absent.
    #[must_use]
    pub fn auth_scheme(&self) -> Option<&str> {
        self.auth.as_deref().filter(|scheme| !scheme.is_empty())
    }
}

/// Wire shape of the `/entries` body before validation.
#[derive(Debug, Deserialize)]
struct WireEntries {
    count: u64,
    #[serde(default)]
    entries: Option<Vec<RawEntry>>,
}

/// A validated `/entries` response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntriesResponse {
    pub count: u64,
    pub entries: Vec<RawEntry>,
}

impl EntriesResponse {
    /// Decodes and validates a response body.
    ///
    /// A zero `count` may come with a `null` or missing `entries` field. A positive
    /// `count` without an entries array is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ApidexError::Decode`] for invalid JSON and [`ApidexError::Payload`]
    /// when the entries array is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use apidex::domain::EntriesResponse;
    ///
    /// let response = EntriesResponse::decode(br#"{"count":0,"entries":null}"#).unwrap();
    /// assert!(response.entries.is_empty());
    /// ```
    pub fn decode(body: &[u8]) -> Result<Self> {
        let wire: WireEntries = serde_json::from_slice(body)?;

        match wire.entries {
            Some(entries) => Ok(Self {
                count: wire.count,
                entries,
            }),
            None if wire.count == 0 => Ok(Self::default()),
            None => Err(ApidexError::Payload(format!(
                "count is {} but the entries array is missing",
                wire.count
            ))),
        }
    }
}

/// Decodes the `/categories` body (a plain JSON string array).
///
/// # Errors
///
/// Returns [`ApidexError::Decode`] if the body is not a string array.
pub fn decode_categories(body: &[u8]) -> Result<Vec<String>> {
    Ok(serde_json::from_slice(body)?)
}
