//! Event Bridge - single-subscriber delivery of tag discoveries
//!
//! Reader callbacks arrive on driver-owned threads. The bridge never calls a
//! subscriber from those threads: each callback is turned into a [`TagEvent`]
//! and pushed into a bounded channel, and a single delivery task running on
//! the host's callback-safe runtime hands events to whoever currently occupies
//! the subscriber slot.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐  try_send   ┌────────────────┐  recv ┌────────────────┐
//! │ reader callback  │ ──────────► │ mpsc (bounded) │ ────► │ delivery task  │
//! │ (any thread, N)  │             └────────────────┘       │ (host runtime) │
//! └──────────────────┘                                      └───────┬────────┘
//!                                                                   │ slot.current()
//!                                                                   ▼
//!                                                           ┌────────────────┐
//!                                                           │ TagSubscriber  │
//!                                                           │ (0 or 1)       │
//!                                                           └────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let (bridge, _task) = EventBridge::start(64, &tokio::runtime::Handle::current());
//! let (subscriber, mut rx) = ChannelSubscriber::channel();
//! bridge.subscribe(Arc::new(subscriber));
//!
//! // From a driver thread:
//! bridge.ingest(&[0x04, 0xA1, 0x3F]);
//!
//! assert_eq!(rx.recv().await.unwrap().uid, "04A13F");
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::{BridgeConfig, DeliveryError, TagEvent, TagEventPayload};

/// Receiver of delivered tag events.
///
/// Always invoked from the bridge's delivery task, one event at a time.
/// Errors and panics are caught and logged by the bridge.
pub trait TagSubscriber: Send + Sync {
    fn on_tag(&self, event: &TagEvent) -> Result<(), DeliveryError>;
}

impl<F> TagSubscriber for F
where
    F: Fn(&TagEvent) -> Result<(), DeliveryError> + Send + Sync,
{
    fn on_tag(&self, event: &TagEvent) -> Result<(), DeliveryError> {
        self(event)
    }
}

/// Holds at most one subscriber.
///
/// Written from the command path (attach/detach) and read from the delivery
/// task; the lock keeps both sides from observing a half-written slot.
#[derive(Default)]
pub struct SubscriberSlot {
    inner: RwLock<Option<Arc<dyn TagSubscriber>>>,
}

impl SubscriberSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `subscriber`; returns true if it replaced an existing one
    pub fn install(&self, subscriber: Arc<dyn TagSubscriber>) -> bool {
        self.inner.write().replace(subscriber).is_some()
    }

    /// Empty the slot; returns true if a subscriber was removed
    pub fn clear(&self) -> bool {
        self.inner.write().take().is_some()
    }

    /// Snapshot of the current subscriber (the lock is not held afterwards)
    pub fn current(&self) -> Option<Arc<dyn TagSubscriber>> {
        self.inner.read().clone()
    }

    pub fn is_occupied(&self) -> bool {
        self.inner.read().is_some()
    }
}

/// Point-in-time copy of the bridge counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeStats {
    /// Callbacks accepted into the bridge
    pub ingested: u64,
    /// Events handed to a subscriber that returned Ok
    pub delivered: u64,
    /// Events dropped because no subscriber was attached
    pub discarded: u64,
    /// Events whose subscriber returned an error or panicked
    pub failed: u64,
    /// Events dropped because the delivery queue was full or closed
    pub dropped: u64,
    /// Callbacks rejected because their handler had been retired
    pub stale: u64,
}

#[derive(Default)]
struct Counters {
    ingested: AtomicU64,
    delivered: AtomicU64,
    discarded: AtomicU64,
    failed: AtomicU64,
    dropped: AtomicU64,
    stale: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> BridgeStats {
        BridgeStats {
            ingested: self.ingested.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            stale: self.stale.load(Ordering::Relaxed),
        }
    }
}

/// State shared between the bridge handle and its delivery task.
///
/// Does not own the channel sender: the delivery task ends once the last
/// `EventBridge` reference is gone.
#[derive(Default)]
struct Shared {
    slot: SubscriberSlot,
    counters: Counters,
}

impl Shared {
    fn deliver(&self, event: &TagEvent) {
        let Some(subscriber) = self.slot.current() else {
            Counters::bump(&self.counters.discarded);
            debug!(
                uid = %event.uid,
                observed_at = event.observed_at,
                "[EventBridge] No subscriber attached, discarding tag event"
            );
            return;
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| subscriber.on_tag(event)))
            .unwrap_or_else(|payload| Err(DeliveryError::Panicked(panic_message(payload.as_ref()))));

        match outcome {
            Ok(()) => {
                Counters::bump(&self.counters.delivered);
            }
            Err(e) => {
                Counters::bump(&self.counters.failed);
                error!(
                    uid = %event.uid,
                    observed_at = event.observed_at,
                    "[EventBridge] Error sending tag to subscriber: {}",
                    e
                );
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

async fn run_delivery(shared: Arc<Shared>, mut receiver: mpsc::Receiver<TagEvent>) {
    info!("[EventBridge] Delivery task started");
    while let Some(event) = receiver.recv().await {
        shared.deliver(&event);
    }
    info!("[EventBridge] Delivery task stopped");
}

/// Event Bridge - turns reader callbacks into subscriber deliveries
pub struct EventBridge {
    shared: Arc<Shared>,
    sender: mpsc::Sender<TagEvent>,
    sequence: AtomicU64,
}

impl EventBridge {
    /// Create a bridge and spawn its delivery task on `runtime`.
    ///
    /// `runtime` is the host's callback-safe execution context: every
    /// subscriber call happens on the spawned task. The task finishes when the
    /// returned bridge (and every clone of the `Arc`) has been dropped.
    pub fn start(capacity: usize, runtime: &Handle) -> (Arc<Self>, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let shared = Arc::new(Shared::default());
        let task = runtime.spawn(run_delivery(shared.clone(), receiver));

        let bridge = Arc::new(Self {
            shared,
            sender,
            sequence: AtomicU64::new(0),
        });
        (bridge, task)
    }

    /// [`start`](Self::start) with the buffer size from `config`
    pub fn from_config(config: &BridgeConfig, runtime: &Handle) -> (Arc<Self>, JoinHandle<()>) {
        Self::start(config.effective_buffer(), runtime)
    }

    /// Attach `subscriber`, replacing any previous one
    pub fn subscribe(&self, subscriber: Arc<dyn TagSubscriber>) {
        if self.shared.slot.install(subscriber) {
            info!("[EventBridge] Subscriber replaced");
        } else {
            info!("[EventBridge] Subscriber attached");
        }
    }

    /// Detach the current subscriber, if any
    pub fn unsubscribe(&self) {
        if self.shared.slot.clear() {
            info!("[EventBridge] Subscriber detached");
        } else {
            debug!("[EventBridge] Unsubscribe with no subscriber attached");
        }
    }

    pub fn has_subscriber(&self) -> bool {
        self.shared.slot.is_occupied()
    }

    pub fn stats(&self) -> BridgeStats {
        self.shared.counters.snapshot()
    }

    /// Accept one raw identifier from a reader callback.
    ///
    /// Safe to call from any thread, inside or outside a tokio runtime. Never
    /// blocks: when the delivery queue is full the event is dropped. Returns
    /// whether the event was queued.
    pub fn ingest(&self, raw_uid: &[u8]) -> bool {
        let observed_at = self.sequence.fetch_add(1, Ordering::Relaxed);
        let event = TagEvent::new(raw_uid, observed_at);
        Counters::bump(&self.shared.counters.ingested);
        debug!(uid = %event.uid, observed_at, "[EventBridge] Tag detected");

        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                Counters::bump(&self.shared.counters.dropped);
                warn!(
                    uid = %event.uid,
                    observed_at = event.observed_at,
                    "[EventBridge] Delivery queue full, dropping tag event"
                );
                false
            }
            Err(TrySendError::Closed(event)) => {
                Counters::bump(&self.shared.counters.dropped);
                debug!(
                    uid = %event.uid,
                    "[EventBridge] Delivery task stopped, dropping tag event"
                );
                false
            }
        }
    }

    /// Count a callback rejected before ingress (retired handler)
    pub(crate) fn record_stale(&self) {
        Counters::bump(&self.shared.counters.stale);
    }
}

/// Subscriber that forwards payloads into an unbounded channel.
///
/// Useful for stream-style consumers that want to `recv().await` events.
pub struct ChannelSubscriber {
    sender: mpsc::UnboundedSender<TagEventPayload>,
}

impl ChannelSubscriber {
    pub fn new(sender: mpsc::UnboundedSender<TagEventPayload>) -> Self {
        Self { sender }
    }

    /// Create a subscriber together with the receiving end of its channel
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TagEventPayload>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl TagSubscriber for ChannelSubscriber {
    fn on_tag(&self, event: &TagEvent) -> Result<(), DeliveryError> {
        self.sender
            .send(event.payload())
            .map_err(|_| DeliveryError::SinkClosed)
    }
}

// ============================================================================
// TESTS
// ============================================================================
