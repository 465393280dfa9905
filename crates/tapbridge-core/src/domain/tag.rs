//! Tag identifiers and discovery events

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw identifier bytes reported by the reader for one discovered tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TagUid(Vec<u8>);

impl TagUid {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Uppercase hex, two digits per byte, no separators.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.0)
    }
}

impl From<&[u8]> for TagUid {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Vec<u8>> for TagUid {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for TagUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// One tag discovery, produced exactly once per accepted reader callback.
///
/// Events carry no identity beyond their content: two taps of the same
/// physical tag yield two independent events with equal `uid`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEvent {
    /// Identifier reported by the reader
    pub uid: TagUid,
    /// Logical sequence position assigned when the callback entered the bridge
    pub observed_at: u64,
}

impl TagEvent {
    pub fn new(uid: impl Into<TagUid>, observed_at: u64) -> Self {
        Self {
            uid: uid.into(),
            observed_at,
        }
    }

    /// The record handed to the UI layer
    pub fn payload(&self) -> TagEventPayload {
        TagEventPayload {
            uid: self.uid.to_hex(),
        }
    }
}

/// Wire record sent over the tag event channel: `{ "uid": "04A13F" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEventPayload {
    pub uid: String,
}

impl TagEventPayload {
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({ "uid": self.uid })
    }
}
