//! # TapBridge Core Library
//!
//! Reader session management and tag-discovery event delivery.
//!
//! ## Modules
//!
//! - `domain` - Tag events, session state, reader flags, bridge configuration
//! - `driver` - Reader driver abstraction implemented by platform backends
//! - `error` - Error types shared across the bridge
//! - `event_bridge` - Single-subscriber event delivery with marshaling
//! - `session` - Reader session (activation state and callback handler)
//! - `lifecycle` - Foreground/background gate driving the session
//! - `service` - Auxiliary services (device identifiers)

pub mod domain;
pub mod driver;
pub mod error;
pub mod event_bridge;
pub mod lifecycle;
pub mod service;
pub mod session;

// Re-export commonly used types
pub use domain::*;
pub use driver::{ReaderDriver, TagCallback};
pub use error::{DeliveryError, DeviceInfoError, DriverError, HardwareError};
pub use event_bridge::{
    BridgeStats, ChannelSubscriber, EventBridge, SubscriberSlot, TagSubscriber,
};
pub use lifecycle::{LifecycleGate, LifecycleSignal};
pub use service::*;
pub use session::ReaderSession;
