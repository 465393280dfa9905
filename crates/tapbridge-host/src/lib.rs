//! TapBridge Host
//!
//! Glue between the reader bridge and an application shell:
//! - Method channels for one-shot commands (reader mode, device identifiers)
//! - Tag event channel streaming `{ "uid": ... }` records to one listener
//! - Host facade receiving resume/pause callbacks
//! - Configuration loading and tracing setup
//! - Software reader for running the stack without hardware

pub mod channels;
pub mod config;
pub mod host;
pub mod logging;
pub mod simulator;

pub use channels::{
    DeviceMethodHandler, EventSink, MethodCall, MethodHandler, MethodResult,
    ReaderMethodHandler, SinkSubscriber, TagEventChannel,
};
pub use config::{ChannelNames, ConfigError, HostConfig, LoggingConfig};
pub use host::ReaderHost;
pub use simulator::{SimulatedDeviceInfo, SimulatedReader};
