//! Reader session state and polling configuration

use serde::{Deserialize, Serialize};

/// Activation state of the reader session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Reader mode is off; no callbacks are expected
    #[default]
    Inactive,
    /// Reader mode is on and a callback handler is installed
    Active,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Active => "active",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Technologies the reader polls for while active.
///
/// Passed to the driver on every activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderFlags {
    /// Poll for ISO 14443-3A tags
    pub nfc_a: bool,
    /// Poll for ISO 14443-3B tags
    pub nfc_b: bool,
    /// Skip the NDEF presence check after discovery (faster UID-only reads)
    pub skip_ndef_check: bool,
}

impl Default for ReaderFlags {
    fn default() -> Self {
        Self {
            nfc_a: true,
            nfc_b: true,
            skip_ndef_check: true,
        }
    }
}

impl ReaderFlags {
    /// True if at least one technology is polled
    pub fn polls_any(&self) -> bool {
        self.nfc_a || self.nfc_b
    }
}
