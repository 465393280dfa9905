//! Reader Session - exclusive owner of the hardware reader
//!
//! State machine:
//!
//! ```text
//! Inactive --activate(ok)----> Active
//! Inactive --activate(fail)--> Inactive   (error returned)
//! Active   --activate(ok)----> Active     (handler replaced)
//! Active   --activate(fail)--> Inactive   (error returned, reader released)
//! any      --deactivate------> Inactive   (never fails)
//! ```
//!
//! Every installed callback handler carries a generation number. Activation
//! and deactivation retire the previous generation, so a callback from a
//! replaced or released handler is rejected before it reaches the bridge even
//! if the driver still invokes it.
//!
//! `activate`/`deactivate` take `&mut self`: the session has no lock of its
//! own and relies on its owner to serialize lifecycle commands.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info, trace};

use crate::{
    EventBridge, HardwareError, ReaderDriver, ReaderFlags, SessionState, TagCallback,
};

pub struct ReaderSession {
    driver: Arc<dyn ReaderDriver>,
    bridge: Arc<EventBridge>,
    flags: ReaderFlags,
    state: SessionState,
    /// Generation of the handler allowed to feed the bridge
    generation: Arc<AtomicU64>,
    handler: Option<TagCallback>,
}

impl ReaderSession {
    pub fn new(driver: Arc<dyn ReaderDriver>, bridge: Arc<EventBridge>, flags: ReaderFlags) -> Self {
        Self {
            driver,
            bridge,
            flags,
            state: SessionState::Inactive,
            generation: Arc::new(AtomicU64::new(0)),
            handler: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn flags(&self) -> ReaderFlags {
        self.flags
    }

    pub fn bridge(&self) -> &Arc<EventBridge> {
        &self.bridge
    }

    /// Whether a callback handler is currently installed
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Enable reader mode and install a fresh callback handler.
    ///
    /// Safe to call while already active: the handler is replaced and the
    /// previous one stops feeding the bridge.
    pub fn activate(&mut self) -> Result<(), HardwareError> {
        if !self.driver.is_available() {
            error!("[ReaderSession] Reader hardware not available, cannot enable reader mode");
            return Err(HardwareError::HardwareUnavailable);
        }

        let generation = self.retire_handler();
        let handler = self.build_handler(generation);

        match self.driver.enable_reader_mode(handler.clone(), self.flags) {
            Ok(()) => {
                let reinstalled = self.state.is_active();
                self.handler = Some(handler);
                self.state = SessionState::Active;
                if reinstalled {
                    debug!(generation, "[ReaderSession] Reader mode re-enabled, handler replaced");
                } else {
                    info!(generation, "[ReaderSession] Reader mode enabled");
                }
                Ok(())
            }
            Err(e) => {
                error!("[ReaderSession] Error enabling reader mode: {}", e);
                self.retire_handler();
                if let Err(release) = self.driver.disable_reader_mode() {
                    debug!("[ReaderSession] Release after failed enable also failed: {}", release);
                }
                self.handler = None;
                self.state = SessionState::Inactive;
                Err(HardwareError::ActivationError(e))
            }
        }
    }

    /// Disable reader mode and drop the handler. Never fails; errors are logged.
    ///
    /// Callbacks that already passed the generation check may still be
    /// delivered shortly after this returns.
    pub fn deactivate(&mut self) {
        self.retire_handler();

        if self.driver.is_available() {
            match self.driver.disable_reader_mode() {
                Ok(()) => info!("[ReaderSession] Reader mode disabled"),
                Err(e) => error!("[ReaderSession] Error disabling reader mode: {}", e),
            }
        } else {
            debug!("[ReaderSession] No reader hardware, nothing to disable");
        }

        self.handler = None;
        self.state = SessionState::Inactive;
    }

    /// Invalidate the current handler; returns the next generation number
    fn retire_handler(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn build_handler(&self, generation: u64) -> TagCallback {
        let current = self.generation.clone();
        let bridge = self.bridge.clone();

        Arc::new(move |raw_uid: &[u8]| {
            if current.load(Ordering::Acquire) != generation {
                bridge.record_stale();
                trace!(generation, "[ReaderSession] Callback from retired handler ignored");
                return;
            }
            bridge.ingest(raw_uid);
        })
    }
}
