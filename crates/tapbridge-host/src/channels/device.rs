use std::sync::Arc;

use tapbridge_core::{DeviceIdentifiers, DeviceInfoProvider};
use tracing::{debug, error};

use super::{MethodCall, MethodHandler, MethodResult};

pub const GET_DEVICE_IDENTIFIERS: &str = "getDeviceIdentifiers";
pub const DEVICE_ERROR: &str = "DEVICE_ERROR";

/// Answers `getDeviceIdentifiers` with best-effort strings
pub struct DeviceMethodHandler {
    provider: Arc<dyn DeviceInfoProvider>,
}

impl DeviceMethodHandler {
    pub fn new(provider: Arc<dyn DeviceInfoProvider>) -> Self {
        Self { provider }
    }

    pub fn identifiers(&self) -> DeviceIdentifiers {
        DeviceIdentifiers::collect(self.provider.as_ref())
    }
}

impl MethodHandler for DeviceMethodHandler {
    fn on_method_call(&self, call: &MethodCall) -> MethodResult {
        if call.method != GET_DEVICE_IDENTIFIERS {
            debug!(method = %call.method, "[DeviceChannel] Method not implemented");
            return MethodResult::NotImplemented;
        }

        match serde_json::to_value(self.identifiers()) {
            Ok(value) => MethodResult::Success(value),
            Err(e) => {
                error!("[DeviceChannel] Failed to encode device identifiers: {}", e);
                MethodResult::error(
                    DEVICE_ERROR,
                    format!("Failed to read device identifiers: {}", e),
                )
            }
        }
    }
}
