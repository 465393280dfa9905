use serde::{Deserialize, Serialize};

use super::ReaderFlags;

/// Default capacity of the channel between reader callbacks and the delivery task
pub const DEFAULT_EVENT_BUFFER: usize = 64;

/// Bridge configuration
///
/// Every field has a default, so a partial document (or none at all) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Events that may wait for delivery before new ones are dropped
    pub event_buffer: usize,
    /// Technologies enabled on every activation
    pub reader_flags: ReaderFlags,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            event_buffer: DEFAULT_EVENT_BUFFER,
            reader_flags: ReaderFlags::default(),
        }
    }
}

impl BridgeConfig {
    /// Channel capacity actually used; tokio rejects a zero-sized channel
    pub fn effective_buffer(&self) -> usize {
        self.event_buffer.max(1)
    }

    pub fn with_event_buffer(mut self, event_buffer: usize) -> Self {
        self.event_buffer = event_buffer;
        self
    }
}
