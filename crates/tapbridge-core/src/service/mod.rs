//! Auxiliary services
//!
//! One-shot queries answered next to the bridge; no state, no concurrency.

pub mod device_info;

pub use device_info::DeviceInfoProvider;
