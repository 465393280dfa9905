//! Error types for the reader bridge
//!
//! Only activation errors ever reach a caller. Deactivation swallows its
//! errors, delivery errors stop at the delivery task, and device-info read
//! errors are folded into `"unknown"` values.

use thiserror::Error;

/// Error reported by a [`ReaderDriver`](crate::ReaderDriver) implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    #[error("reader hardware not present")]
    Unavailable,

    #[error("reader is busy")]
    Busy,

    #[error("platform error: {0}")]
    Platform(String),
}

/// Error returned from `ReaderSession::activate`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HardwareError {
    /// No reader capability on this device; permanent for the process lifetime
    #[error("reader hardware is not available on this device")]
    HardwareUnavailable,

    /// The platform refused to start reader mode (transient)
    #[error("failed to enable reader mode: {0}")]
    ActivationError(#[source] DriverError),
}

impl HardwareError {
    /// Whether a later foreground transition could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ActivationError(_))
    }
}

/// Subscriber-side failure while handling a delivered event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("subscriber failed: {0}")]
    SubscriberFailed(String),

    #[error("event sink is closed")]
    SinkClosed,

    #[error("subscriber panicked: {0}")]
    Panicked(String),
}

/// A single device identifier could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceInfoError {
    #[error("permission denied")]
    Denied,

    #[error("identifier unavailable: {0}")]
    Unavailable(String),
}
