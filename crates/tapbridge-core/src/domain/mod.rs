//! Domain types and value objects
//!
//! This module contains the data model shared by the bridge and its hosts:
//! - Tag identifiers and the canonical `TagEvent` record
//! - Reader session state and polling flags
//! - Device identifiers reported over the device channel
//! - Bridge configuration

pub mod config;
mod device;
mod reader;
mod tag;

pub use config::*;
pub use device::{DeviceIdentifiers, UNKNOWN};
pub use reader::{ReaderFlags, SessionState};
pub use tag::{TagEvent, TagEventPayload, TagUid};
