//! Mock implementations for testing
//!
//! In-memory stand-ins for the reader driver, subscribers, event sinks and
//! device-info provider, with failure injection and call recording.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use parking_lot::RwLock;
use serde_json::Value;
use tapbridge_core::{
    DeliveryError, DeviceInfoError, DeviceInfoProvider, DriverError, ReaderDriver, ReaderFlags,
    TagCallback, TagEvent, TagEventPayload, TagSubscriber,
};
use tapbridge_host::EventSink;

// ============================================================================
// MockReaderDriver
// ============================================================================

/// Reader driver that records every handler it is given.
///
/// Unlike real hardware it can replay callbacks through handlers that were
/// already replaced or released, which is how late platform callbacks are
/// simulated.
pub struct MockReaderDriver {
    available: bool,
    enable_error: RwLock<Option<DriverError>>,
    disable_error: RwLock<Option<DriverError>>,
    current: RwLock<Option<TagCallback>>,
    history: RwLock<Vec<TagCallback>>,
    last_flags: RwLock<Option<ReaderFlags>>,
    enable_calls: AtomicUsize,
    disable_calls: AtomicUsize,
}

impl Default for MockReaderDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockReaderDriver {
    pub fn new() -> Self {
        Self {
            available: true,
            enable_error: RwLock::new(None),
            disable_error: RwLock::new(None),
            current: RwLock::new(None),
            history: RwLock::new(Vec::new()),
            last_flags: RwLock::new(None),
            enable_calls: AtomicUsize::new(0),
            disable_calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Every subsequent enable fails with `error` until cleared
    pub fn with_enable_error(self, error: DriverError) -> Self {
        *self.enable_error.write() = Some(error);
        self
    }

    pub fn with_disable_error(self, error: DriverError) -> Self {
        *self.disable_error.write() = Some(error);
        self
    }

    pub fn set_enable_error(&self, error: Option<DriverError>) {
        *self.enable_error.write() = error;
    }

    pub fn enable_calls(&self) -> usize {
        self.enable_calls.load(Ordering::SeqCst)
    }

    pub fn disable_calls(&self) -> usize {
        self.disable_calls.load(Ordering::SeqCst)
    }

    /// Whether the driver currently holds a handler (reader mode on)
    pub fn is_enabled(&self) -> bool {
        self.current.read().is_some()
    }

    pub fn last_flags(&self) -> Option<ReaderFlags> {
        *self.last_flags.read()
    }

    /// Number of handlers ever installed
    pub fn handlers_installed(&self) -> usize {
        self.history.read().len()
    }

    /// Invoke the current handler on the calling thread. Returns false when
    /// reader mode is off.
    pub fn fire(&self, uid: &[u8]) -> bool {
        let callback = self.current.read().clone();
        match callback {
            Some(callback) => {
                callback(uid);
                true
            }
            None => false,
        }
    }

    /// Invoke the current handler from a fresh OS thread
    pub fn fire_from_thread(&self, uid: &[u8]) -> Option<thread::JoinHandle<()>> {
        let callback = self.current.read().clone()?;
        let uid = uid.to_vec();
        Some(thread::spawn(move || callback(uid.as_slice())))
    }

    /// Invoke every handler ever installed, oldest first
    pub fn fire_all_handlers(&self, uid: &[u8]) {
        let handlers = self.history.read().clone();
        for handler in handlers {
            handler(uid);
        }
    }

    /// Invoke the handler installed by the `index`-th successful enable
    pub fn fire_handler(&self, index: usize, uid: &[u8]) {
        let handler = self.history.read().get(index).cloned();
        if let Some(handler) = handler {
            handler(uid);
        }
    }
}

impl ReaderDriver for MockReaderDriver {
    fn is_available(&self) -> bool {
        self.available
    }

    fn enable_reader_mode(&self, callback: TagCallback, flags: ReaderFlags) -> Result<(), DriverError> {
        self.enable_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.enable_error.read().clone() {
            return Err(error);
        }
        *self.current.write() = Some(callback.clone());
        self.history.write().push(callback);
        *self.last_flags.write() = Some(flags);
        Ok(())
    }

    fn disable_reader_mode(&self) -> Result<(), DriverError> {
        self.disable_calls.fetch_add(1, Ordering::SeqCst);
        self.current.write().take();
        if let Some(error) = self.disable_error.read().clone() {
            return Err(error);
        }
        Ok(())
    }
}

// ============================================================================
// Subscribers
// ============================================================================

/// Records every event it receives together with the delivering thread
#[derive(Default)]
pub struct RecordingSubscriber {
    events: RwLock<Vec<TagEvent>>,
    threads: RwLock<Vec<thread::ThreadId>>,
}

impl RecordingSubscriber {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.events.read().len()
    }

    pub fn events(&self) -> Vec<TagEvent> {
        self.events.read().clone()
    }

    pub fn payloads(&self) -> Vec<TagEventPayload> {
        self.events.read().iter().map(TagEvent::payload).collect()
    }

    pub fn uids(&self) -> Vec<String> {
        self.events.read().iter().map(|e| e.uid.to_hex()).collect()
    }

    pub fn delivery_threads(&self) -> Vec<thread::ThreadId> {
        self.threads.read().clone()
    }
}

impl TagSubscriber for RecordingSubscriber {
    fn on_tag(&self, event: &TagEvent) -> Result<(), DeliveryError> {
        self.events.write().push(event.clone());
        self.threads.write().push(thread::current().id());
        Ok(())
    }
}

/// Always returns an error; counts attempts
#[derive(Default)]
pub struct FailingSubscriber {
    attempts: AtomicUsize,
}

impl FailingSubscriber {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl TagSubscriber for FailingSubscriber {
    fn on_tag(&self, _event: &TagEvent) -> Result<(), DeliveryError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(DeliveryError::SubscriberFailed("listener rejected event".to_string()))
    }
}

/// Panics on every event
#[derive(Default)]
pub struct PanickingSubscriber;

impl TagSubscriber for PanickingSubscriber {
    fn on_tag(&self, event: &TagEvent) -> Result<(), DeliveryError> {
        panic!("subscriber blew up on {}", event.uid);
    }
}

// ============================================================================
// RecordingSink
// ============================================================================

/// Event channel sink that keeps every record; can be switched to fail
#[derive(Default)]
pub struct RecordingSink {
    records: RwLock<Vec<Value>>,
    closed: RwLock<bool>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<Value> {
        self.records.read().clone()
    }

    pub fn count(&self) -> usize {
        self.records.read().len()
    }

    /// Make subsequent `success` calls fail with `SinkClosed`
    pub fn close(&self) {
        *self.closed.write() = true;
    }
}

impl EventSink for RecordingSink {
    fn success(&self, event: Value) -> Result<(), DeliveryError> {
        if *self.closed.read() {
            return Err(DeliveryError::SinkClosed);
        }
        self.records.write().push(event);
        Ok(())
    }
}

// ============================================================================
// MockDeviceInfo
// ============================================================================

pub struct MockDeviceInfo {
    pub android_id: Result<Option<String>, DeviceInfoError>,
    pub serial: Result<Option<String>, DeviceInfoError>,
    pub legacy_serial: Result<Option<String>, DeviceInfoError>,
    pub manufacturer: Result<Option<String>, DeviceInfoError>,
    pub model: Result<Option<String>, DeviceInfoError>,
    serial_reads: AtomicUsize,
    legacy_reads: AtomicUsize,
}

impl Default for MockDeviceInfo {
    fn default() -> Self {
        Self {
            android_id: Ok(Some("9774d56d682e549c".to_string())),
            serial: Ok(Some("R58M123ABC".to_string())),
            legacy_serial: Ok(Some("LEGACY001".to_string())),
            manufacturer: Ok(Some("samsung".to_string())),
            model: Ok(Some("SM-G991B".to_string())),
            serial_reads: AtomicUsize::new(0),
            legacy_reads: AtomicUsize::new(0),
        }
    }
}

impl MockDeviceInfo {
    /// Every read fails
    pub fn broken() -> Self {
        let down = || Err(DeviceInfoError::Unavailable("service down".to_string()));
        Self {
            android_id: down(),
            serial: Err(DeviceInfoError::Denied),
            legacy_serial: down(),
            manufacturer: down(),
            model: down(),
            ..Self::default()
        }
    }

    pub fn with_serial(mut self, serial: Result<Option<String>, DeviceInfoError>) -> Self {
        self.serial = serial;
        self
    }

    pub fn with_legacy_serial(mut self, legacy: Result<Option<String>, DeviceInfoError>) -> Self {
        self.legacy_serial = legacy;
        self
    }

    pub fn serial_reads(&self) -> usize {
        self.serial_reads.load(Ordering::SeqCst)
    }

    pub fn legacy_reads(&self) -> usize {
        self.legacy_reads.load(Ordering::SeqCst)
    }
}

impl DeviceInfoProvider for MockDeviceInfo {
    fn android_id(&self) -> Result<Option<String>, DeviceInfoError> {
        self.android_id.clone()
    }

    fn serial(&self) -> Result<Option<String>, DeviceInfoError> {
        self.serial_reads.fetch_add(1, Ordering::SeqCst);
        self.serial.clone()
    }

    fn legacy_serial(&self) -> Result<Option<String>, DeviceInfoError> {
        self.legacy_reads.fetch_add(1, Ordering::SeqCst);
        self.legacy_serial.clone()
    }

    fn manufacturer(&self) -> Result<Option<String>, DeviceInfoError> {
        self.manufacturer.clone()
    }

    fn model(&self) -> Result<Option<String>, DeviceInfoError> {
        self.model.clone()
    }
}
