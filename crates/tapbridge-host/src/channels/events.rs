//! Tag event channel
//!
//! Stream-handler style attach/detach over the bridge's single subscriber
//! slot. A new listener replaces the previous one.

use std::sync::Arc;

use serde_json::Value;
use tapbridge_core::{DeliveryError, EventBridge, TagEvent, TagSubscriber};
use tracing::info;

/// Shell-side receiver of event channel records
pub trait EventSink: Send + Sync {
    fn success(&self, event: Value) -> Result<(), DeliveryError>;
}

/// Adapts an [`EventSink`] to the bridge's subscriber interface
pub struct SinkSubscriber {
    sink: Arc<dyn EventSink>,
}

impl SinkSubscriber {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }
}

impl TagSubscriber for SinkSubscriber {
    fn on_tag(&self, event: &TagEvent) -> Result<(), DeliveryError> {
        self.sink.success(event.payload().to_value())
    }
}

pub struct TagEventChannel {
    name: String,
    bridge: Arc<EventBridge>,
}

impl TagEventChannel {
    pub fn new(name: impl Into<String>, bridge: Arc<EventBridge>) -> Self {
        Self {
            name: name.into(),
            bridge,
        }
    }

    pub fn on_listen(&self, sink: Arc<dyn EventSink>) {
        self.bridge.subscribe(Arc::new(SinkSubscriber::new(sink)));
        info!(channel = %self.name, "[EventChannel] Listener attached");
    }

    pub fn on_cancel(&self) {
        self.bridge.unsubscribe();
        info!(channel = %self.name, "[EventChannel] Listener detached");
    }

    pub fn is_listening(&self) -> bool {
        self.bridge.has_subscriber()
    }
}
