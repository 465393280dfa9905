//! Reader-mode commands
//!
//! Both commands always reply success: failures are logged, never surfaced,
//! matching the best-effort contract of the shell.

use std::sync::Arc;

use parking_lot::Mutex;
use tapbridge_core::LifecycleGate;
use tracing::{debug, warn};

use super::{MethodCall, MethodHandler, MethodResult};

pub const ENABLE_READER_MODE: &str = "enableReaderMode";
pub const DISABLE_READER_MODE: &str = "disableReaderMode";

pub struct ReaderMethodHandler {
    gate: Arc<Mutex<LifecycleGate>>,
}

impl ReaderMethodHandler {
    pub fn new(gate: Arc<Mutex<LifecycleGate>>) -> Self {
        Self { gate }
    }
}

impl MethodHandler for ReaderMethodHandler {
    fn on_method_call(&self, call: &MethodCall) -> MethodResult {
        match call.method.as_str() {
            ENABLE_READER_MODE => {
                debug!("[ReaderChannel] enableReaderMode");
                if let Err(e) = self.gate.lock().session_mut().activate() {
                    warn!("[ReaderChannel] enableReaderMode failed: {}", e);
                }
                MethodResult::ok()
            }
            DISABLE_READER_MODE => {
                debug!("[ReaderChannel] disableReaderMode");
                self.gate.lock().session_mut().deactivate();
                MethodResult::ok()
            }
            other => {
                debug!(method = other, "[ReaderChannel] Method not implemented");
                MethodResult::NotImplemented
            }
        }
    }
}
