//! Host configuration
//!
//! Defaults cover everything; a JSON file and/or environment variables
//! override individual values. Environment keys:
//!
//! | Key | Meaning |
//! |---|---|
//! | `TAPBRIDGE_EVENT_BUFFER` | delivery queue capacity |
//! | `TAPBRIDGE_NFC_A` / `TAPBRIDGE_NFC_B` | poll for NFC-A / NFC-B |
//! | `TAPBRIDGE_SKIP_NDEF_CHECK` | skip NDEF presence check |
//! | `TAPBRIDGE_LOG` | tracing filter directives |
//! | `TAPBRIDGE_LOG_FILE` | write a daily rolling log file |
//! | `TAPBRIDGE_LOG_DIR` | log directory (implies `TAPBRIDGE_LOG_FILE`) |

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tapbridge_core::BridgeConfig;
use thiserror::Error;
use tracing::debug;

use crate::channels::{DEVICE_CHANNEL, EVENT_CHANNEL, READER_CHANNEL};

/// Directory name under the platform's local data dir
const APP_DIR_NAME: &str = "tapbridge";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelNames {
    pub reader: String,
    pub events: String,
    pub device: String,
}

impl Default for ChannelNames {
    fn default() -> Self {
        Self {
            reader: READER_CHANNEL.to_string(),
            events: EVENT_CHANNEL.to_string(),
            device: DEVICE_CHANNEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives; `RUST_LOG` still wins when set
    pub filter: Option<String>,
    /// Write a daily rolling log file in addition to the console
    pub to_file: bool,
    /// Log directory; defaults to `<local data dir>/tapbridge/logs`
    pub log_dir: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            to_file: false,
            log_dir: None,
            file_prefix: APP_DIR_NAME.to_string(),
        }
    }
}

impl LoggingConfig {
    /// Directory to write log files into, if file logging is on
    pub fn resolved_log_dir(&self) -> Option<PathBuf> {
        if !self.to_file {
            return None;
        }
        Some(self.log_dir.clone().unwrap_or_else(default_log_dir))
    }
}

/// `<local data dir>/tapbridge/logs`, or `./logs` when the platform has none
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logs")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub bridge: BridgeConfig,
    pub channels: ChannelNames,
    pub logging: LoggingConfig,
}

impl HostConfig {
    /// Defaults, then `.env` (if present), then process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("[Config] Loaded {}", path.display());
        }
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Load a JSON document; absent fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        debug!("[Config] Loaded {}", path.display());
        Ok(config)
    }

    /// Apply `TAPBRIDGE_*` overrides read through `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("TAPBRIDGE_EVENT_BUFFER") {
            self.bridge.event_buffer = value.trim().parse().map_err(|_| invalid("TAPBRIDGE_EVENT_BUFFER", &value))?;
        }

        let flags = &mut self.bridge.reader_flags;
        if let Some(value) = lookup("TAPBRIDGE_NFC_A") {
            flags.nfc_a = parse_bool("TAPBRIDGE_NFC_A", &value)?;
        }
        if let Some(value) = lookup("TAPBRIDGE_NFC_B") {
            flags.nfc_b = parse_bool("TAPBRIDGE_NFC_B", &value)?;
        }
        if let Some(value) = lookup("TAPBRIDGE_SKIP_NDEF_CHECK") {
            flags.skip_ndef_check = parse_bool("TAPBRIDGE_SKIP_NDEF_CHECK", &value)?;
        }

        if let Some(value) = lookup("TAPBRIDGE_LOG") {
            self.logging.filter = Some(value);
        }
        if let Some(value) = lookup("TAPBRIDGE_LOG_FILE") {
            self.logging.to_file = parse_bool("TAPBRIDGE_LOG_FILE", &value)?;
        }
        if let Some(value) = lookup("TAPBRIDGE_LOG_DIR") {
            self.logging.log_dir = Some(PathBuf::from(value));
            self.logging.to_file = true;
        }

        Ok(self)
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}
