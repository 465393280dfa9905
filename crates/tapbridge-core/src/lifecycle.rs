//! Lifecycle Gate
//!
//! Keeps the reader session active exactly while the application is in the
//! foreground. There is no retry: a failed activation is logged and returned,
//! and the next foreground transition tries again.

use tracing::debug;

use crate::{HardwareError, ReaderSession, SessionState};

/// Lifecycle transition reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleSignal {
    /// Application moved to the foreground (including re-entry)
    Resumed,
    /// Application is leaving the foreground
    Paused,
}

pub struct LifecycleGate {
    session: ReaderSession,
    foreground: bool,
}

impl LifecycleGate {
    pub fn new(session: ReaderSession) -> Self {
        Self {
            session,
            foreground: false,
        }
    }

    pub fn on_foreground(&mut self) -> Result<(), HardwareError> {
        self.foreground = true;
        debug!("[LifecycleGate] Foreground, activating reader session");
        self.session.activate().map_err(|e| {
            debug!(transient = e.is_transient(), "[LifecycleGate] Activation failed, waiting for next foreground");
            e
        })
    }

    /// Must run before the host suspends so the reader is released
    pub fn on_background(&mut self) {
        self.foreground = false;
        debug!("[LifecycleGate] Background, deactivating reader session");
        self.session.deactivate();
    }

    pub fn apply(&mut self, signal: LifecycleSignal) -> Result<(), HardwareError> {
        match signal {
            LifecycleSignal::Resumed => self.on_foreground(),
            LifecycleSignal::Paused => {
                self.on_background();
                Ok(())
            }
        }
    }

    pub fn is_foreground(&self) -> bool {
        self.foreground
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn session(&self) -> &ReaderSession {
        &self.session
    }

    /// Direct access for one-shot commands (enable/disable reader mode)
    pub fn session_mut(&mut self) -> &mut ReaderSession {
        &mut self.session
    }
}
