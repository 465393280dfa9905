//! Software reader
//!
//! Stands in for platform hardware when running the stack on a desktop.
//! Taps are delivered from a freshly spawned OS thread, the way a real driver
//! calls back from its own binder/IO thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use parking_lot::Mutex;
use tapbridge_core::{
    DeviceInfoError, DeviceInfoProvider, DriverError, ReaderDriver, ReaderFlags, TagCallback,
};
use tracing::{debug, trace};

pub struct SimulatedReader {
    available: bool,
    fail_next_enable: AtomicBool,
    callback: Mutex<Option<TagCallback>>,
    flags: Mutex<Option<ReaderFlags>>,
}

impl Default for SimulatedReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedReader {
    pub fn new() -> Self {
        Self {
            available: true,
            fail_next_enable: AtomicBool::new(false),
            callback: Mutex::new(None),
            flags: Mutex::new(None),
        }
    }

    /// A device without reader hardware
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Make the next `enable_reader_mode` fail with `DriverError::Busy`
    pub fn fail_next_enable(&self) {
        self.fail_next_enable.store(true, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.callback.lock().is_some()
    }

    /// Flags passed to the last successful enable, while enabled
    pub fn enabled_flags(&self) -> Option<ReaderFlags> {
        *self.flags.lock()
    }

    /// Present a tag. Returns the callback thread, or `None` if reader mode is off.
    pub fn tap(&self, uid: &[u8]) -> Option<thread::JoinHandle<()>> {
        let callback = self.callback.lock().clone()?;
        let uid = uid.to_vec();
        trace!(uid = %hex::encode_upper(&uid), "[SimulatedReader] Tap");
        Some(thread::spawn(move || callback(uid.as_slice())))
    }
}

impl ReaderDriver for SimulatedReader {
    fn is_available(&self) -> bool {
        self.available
    }

    fn enable_reader_mode(&self, callback: TagCallback, flags: ReaderFlags) -> Result<(), DriverError> {
        if !self.available {
            return Err(DriverError::Unavailable);
        }
        if self.fail_next_enable.swap(false, Ordering::SeqCst) {
            return Err(DriverError::Busy);
        }
        if !flags.polls_any() {
            return Err(DriverError::Platform("no reader technology enabled".to_string()));
        }

        *self.callback.lock() = Some(callback);
        *self.flags.lock() = Some(flags);
        debug!(?flags, "[SimulatedReader] Reader mode on");
        Ok(())
    }

    fn disable_reader_mode(&self) -> Result<(), DriverError> {
        if !self.available {
            return Err(DriverError::Unavailable);
        }
        self.callback.lock().take();
        self.flags.lock().take();
        debug!("[SimulatedReader] Reader mode off");
        Ok(())
    }
}

/// Fixed device identifiers; the serial read is denied like on recent
/// platform versions without the privileged permission.
#[derive(Debug, Clone)]
pub struct SimulatedDeviceInfo {
    pub android_id: Result<Option<String>, DeviceInfoError>,
    pub serial: Result<Option<String>, DeviceInfoError>,
    pub legacy_serial: Result<Option<String>, DeviceInfoError>,
    pub manufacturer: Result<Option<String>, DeviceInfoError>,
    pub model: Result<Option<String>, DeviceInfoError>,
}

impl Default for SimulatedDeviceInfo {
    fn default() -> Self {
        Self {
            android_id: Ok(Some("0000000000000000".to_string())),
            serial: Err(DeviceInfoError::Denied),
            legacy_serial: Ok(None),
            manufacturer: Ok(Some("TapBridge".to_string())),
            model: Ok(Some("Simulator".to_string())),
        }
    }
}

impl DeviceInfoProvider for SimulatedDeviceInfo {
    fn android_id(&self) -> Result<Option<String>, DeviceInfoError> {
        self.android_id.clone()
    }

    fn serial(&self) -> Result<Option<String>, DeviceInfoError> {
        self.serial.clone()
    }

    fn legacy_serial(&self) -> Result<Option<String>, DeviceInfoError> {
        self.legacy_serial.clone()
    }

    fn manufacturer(&self) -> Result<Option<String>, DeviceInfoError> {
        self.manufacturer.clone()
    }

    fn model(&self) -> Result<Option<String>, DeviceInfoError> {
        self.model.clone()
    }
}
