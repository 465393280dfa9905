//! Host facade
//!
//! Wires driver, bridge, session, lifecycle gate and channels together and
//! exposes the callbacks an application shell needs: resume/pause, method
//! calls by channel name, and event listen/cancel.

use std::sync::Arc;

use parking_lot::Mutex;
use tapbridge_core::{
    BridgeStats, DeviceInfoProvider, EventBridge, HardwareError, LifecycleGate, ReaderDriver,
    ReaderSession, SessionState,
};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::channels::{
    DeviceMethodHandler, EventSink, MethodCall, MethodHandler, MethodResult, ReaderMethodHandler,
    TagEventChannel,
};
use crate::HostConfig;

pub struct ReaderHost {
    config: HostConfig,
    /// Serializes lifecycle transitions and reader commands on the session
    gate: Arc<Mutex<LifecycleGate>>,
    bridge: Arc<EventBridge>,
    delivery_task: JoinHandle<()>,
    events: TagEventChannel,
    reader_methods: ReaderMethodHandler,
    device_methods: DeviceMethodHandler,
}

impl ReaderHost {
    /// Build the host. `runtime` is the callback-safe context on which tag
    /// events are delivered to the listener.
    pub fn new(
        config: HostConfig,
        driver: Arc<dyn ReaderDriver>,
        device_info: Arc<dyn DeviceInfoProvider>,
        runtime: &Handle,
    ) -> Self {
        if !driver.is_available() {
            warn!("[ReaderHost] Reader hardware not supported on this device");
        }

        let (bridge, delivery_task) = EventBridge::from_config(&config.bridge, runtime);
        let session = ReaderSession::new(driver, bridge.clone(), config.bridge.reader_flags);
        let gate = Arc::new(Mutex::new(LifecycleGate::new(session)));

        let events = TagEventChannel::new(config.channels.events.clone(), bridge.clone());
        let reader_methods = ReaderMethodHandler::new(gate.clone());
        let device_methods = DeviceMethodHandler::new(device_info);

        info!(
            reader_channel = %config.channels.reader,
            event_channel = %config.channels.events,
            device_channel = %config.channels.device,
            event_buffer = config.bridge.effective_buffer(),
            "[ReaderHost] Channels configured"
        );

        Self {
            config,
            gate,
            bridge,
            delivery_task,
            events,
            reader_methods,
            device_methods,
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Foreground transition; the session has already logged any error
    pub fn on_resume(&self) -> Result<(), HardwareError> {
        self.gate.lock().on_foreground()
    }

    /// Background transition; always releases the reader
    pub fn on_pause(&self) {
        self.gate.lock().on_background();
    }

    /// Route a method call by channel name
    pub fn handle_method_call(&self, channel: &str, call: &MethodCall) -> MethodResult {
        let channels = &self.config.channels;
        if channel == channels.reader {
            self.reader_methods.on_method_call(call)
        } else if channel == channels.device {
            self.device_methods.on_method_call(call)
        } else {
            debug!(channel, method = %call.method, "[ReaderHost] No handler for channel");
            MethodResult::NotImplemented
        }
    }

    pub fn listen(&self, sink: Arc<dyn EventSink>) {
        self.events.on_listen(sink);
    }

    pub fn cancel(&self) {
        self.events.on_cancel();
    }

    pub fn is_listening(&self) -> bool {
        self.events.is_listening()
    }

    pub fn session_state(&self) -> SessionState {
        self.gate.lock().state()
    }

    pub fn stats(&self) -> BridgeStats {
        self.bridge.stats()
    }

    pub fn bridge(&self) -> &Arc<EventBridge> {
        &self.bridge
    }

    pub fn delivery_finished(&self) -> bool {
        self.delivery_task.is_finished()
    }
}

impl Drop for ReaderHost {
    fn drop(&mut self) {
        // The driver holds the handler (and through it the bridge) until
        // reader mode is disabled.
        let mut gate = self.gate.lock();
        if gate.state().is_active() {
            gate.on_background();
        }
    }
}
