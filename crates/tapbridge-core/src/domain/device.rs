use serde::{Deserialize, Serialize};

/// Placeholder reported for any identifier that could not be read
pub const UNKNOWN: &str = "unknown";

/// Best-effort hardware identifiers answered over the device channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceIdentifiers {
    pub android_id: String,
    pub serial: String,
    pub manufacturer: String,
    pub model: String,
}

impl Default for DeviceIdentifiers {
    fn default() -> Self {
        Self {
            android_id: UNKNOWN.to_string(),
            serial: UNKNOWN.to_string(),
            manufacturer: UNKNOWN.to_string(),
            model: UNKNOWN.to_string(),
        }
    }
}
