//! Device identifier lookup
//!
//! Every identifier is best effort. A read that errors or returns nothing is
//! reported as `"unknown"`; the lookup as a whole never fails.

use tracing::debug;

use crate::{DeviceIdentifiers, DeviceInfoError, UNKNOWN};

/// Platform source of device identifiers
pub trait DeviceInfoProvider: Send + Sync {
    fn android_id(&self) -> Result<Option<String>, DeviceInfoError>;

    /// Serial via the privileged API (may be denied)
    fn serial(&self) -> Result<Option<String>, DeviceInfoError>;

    /// Serial via the legacy build property, tried when `serial` fails
    fn legacy_serial(&self) -> Result<Option<String>, DeviceInfoError>;

    fn manufacturer(&self) -> Result<Option<String>, DeviceInfoError>;

    fn model(&self) -> Result<Option<String>, DeviceInfoError>;
}

fn or_unknown(field: &str, value: Result<Option<String>, DeviceInfoError>) -> String {
    match value {
        Ok(Some(v)) => v,
        Ok(None) => UNKNOWN.to_string(),
        Err(e) => {
            debug!(field, "[DeviceInfo] Read failed: {}", e);
            UNKNOWN.to_string()
        }
    }
}

fn resolve_serial(provider: &dyn DeviceInfoProvider) -> String {
    match provider.serial() {
        Ok(Some(serial)) => serial,
        Ok(None) => UNKNOWN.to_string(),
        Err(e) => {
            debug!("[DeviceInfo] Serial read failed ({}), trying legacy serial", e);
            or_unknown("legacy_serial", provider.legacy_serial())
        }
    }
}

impl DeviceIdentifiers {
    /// Read all identifiers from `provider`, substituting `"unknown"` per field
    pub fn collect(provider: &dyn DeviceInfoProvider) -> Self {
        Self {
            android_id: or_unknown("android_id", provider.android_id()),
            serial: resolve_serial(provider),
            manufacturer: or_unknown("manufacturer", provider.manufacturer()),
            model: or_unknown("model", provider.model()),
        }
    }
}
