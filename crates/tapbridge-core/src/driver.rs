//! Reader driver abstraction
//!
//! Platform backends (Android NFC adapter, PC/SC, a software simulator)
//! implement [`ReaderDriver`]. The bridge treats the driver as a black box that
//! calls back with raw tag identifiers, on any thread, at any time between a
//! successful enable and the matching disable.

use std::sync::Arc;

use crate::{DriverError, ReaderFlags};

/// Callback registered with the driver; receives the raw tag identifier.
///
/// May be invoked concurrently from several driver threads.
pub type TagCallback = Arc<dyn Fn(&[u8]) + Send + Sync>;

/// Hardware reader backend
pub trait ReaderDriver: Send + Sync {
    /// Whether reader hardware exists on this device
    fn is_available(&self) -> bool;

    /// Start reader mode, replacing any previously registered callback
    fn enable_reader_mode(&self, callback: TagCallback, flags: ReaderFlags)
        -> Result<(), DriverError>;

    /// Stop reader mode and drop the registered callback
    fn disable_reader_mode(&self) -> Result<(), DriverError>;
}
