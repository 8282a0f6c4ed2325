//! Opaque request and response bodies.

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::Error;

/// Content type used for every JSON body the SDK sends.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// An opaque body: raw bytes plus an optional content type.
///
/// The SDK never parses a payload on its own. Bytes go out exactly as the
/// caller built them and come back exactly as the service sent them, so
/// unknown or recursive fields survive a round trip untouched. The JSON
/// helpers are conveniences for callers who want typed access.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Payload {
    bytes: Vec<u8>,
    content_type: Option<String>,
}

impl Payload {
    pub fn new(bytes: impl Into<Vec<u8>>, content_type: Option<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type,
        }
    }

    /// A payload with no bytes and no content type (e.g. a `204` body).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap bytes that are already JSON text.
    pub fn from_json_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(bytes, Some(JSON_CONTENT_TYPE.to_string()))
    }

    /// Serialise any value as a JSON payload.
    pub fn from_json<T: Serialize + ?Sized>(value: &T) -> Result<Self, Error> {
        Ok(Self::from_json_bytes(serde_json::to_vec(value)?))
    }

    /// Deserialise the bytes as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_slice(&self.bytes)?)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Self::from_json_bytes(value.to_string())
    }
}

impl From<&serde_json::Value> for Payload {
    fn from(value: &serde_json::Value) -> Self {
        Self::from_json_bytes(value.to_string())
    }
}

/// Shows the content type and, for textual bodies, the first 256 bytes.
impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 256;
        let shown = &self.bytes[..self.bytes.len().min(PREVIEW)];
        let mut d = f.debug_struct("Payload");
        d.field("content_type", &self.content_type);
        match std::str::from_utf8(shown) {
            Ok(text) => d.field("body", &text),
            Err(_) => d.field("bytes", &self.bytes.len()),
        };
        d.finish()
    }
}
