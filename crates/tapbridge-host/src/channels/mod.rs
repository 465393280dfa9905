//! Host channels
//!
//! The application shell talks to the bridge through three named channels:
//!
//! ```text
//! ┌──────────────────────────────┐   enableReaderMode / disableReaderMode
//! │ com.example.untitled/nfc     │ ─────────────────────► ReaderSession
//! ├──────────────────────────────┤   getDeviceIdentifiers
//! │ com.example.untitled/device  │ ─────────────────────► DeviceInfoProvider
//! ├──────────────────────────────┤   listen / cancel
//! │ com.example.untitled/nfc_tags│ ◄───────────────────── EventBridge
//! └──────────────────────────────┘   { "uid": "04A13F" }
//! ```

mod device;
mod events;
mod method;
mod reader;

pub use device::DeviceMethodHandler;
pub use events::{EventSink, SinkSubscriber, TagEventChannel};
pub use method::{MethodCall, MethodHandler, MethodResult};
pub use reader::ReaderMethodHandler;

/// Default method channel for reader-mode commands
pub const READER_CHANNEL: &str = "com.example.untitled/nfc";
/// Default event channel for tag discoveries
pub const EVENT_CHANNEL: &str = "com.example.untitled/nfc_tags";
/// Default method channel for device identifiers
pub const DEVICE_CHANNEL: &str = "com.example.untitled/device";
