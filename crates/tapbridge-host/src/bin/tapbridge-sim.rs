//! TapBridge simulator
//!
//! Runs the full host stack against a software reader. Reads commands from
//! stdin, one per line:
//!
//! - `04A13F` / `04:a1:3f` - present a tag with that UID
//! - `pause` / `resume`    - lifecycle transitions
//! - `enable` / `disable`  - reader-mode method calls
//! - `attach` / `detach`   - event channel listen/cancel
//! - `device`              - device identifier query
//! - `stats`               - bridge counters
//! - `quit`
//!
//! Delivered events are printed to stdout as JSON lines.

use std::sync::Arc;

use anyhow::Context;
use serde_json::Value;
use tapbridge_core::DeliveryError;
use tapbridge_host::channels::{DEVICE_CHANNEL, READER_CHANNEL};
use tapbridge_host::logging::init_tracing;
use tapbridge_host::{
    EventSink, HostConfig, MethodCall, ReaderHost, SimulatedDeviceInfo, SimulatedReader,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Handle;
use tracing::{info, warn};

struct StdoutSink;

impl EventSink for StdoutSink {
    fn success(&self, event: Value) -> Result<(), DeliveryError> {
        println!("{}", event);
        Ok(())
    }
}

fn print_json(value: &impl serde::Serialize) {
    match serde_json::to_string(value) {
        Ok(text) => println!("{}", text),
        Err(e) => warn!("Failed to encode output: {}", e),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = HostConfig::from_env().context("failed to load configuration")?;
    let _log_guard = init_tracing(&config.logging);

    info!("Starting TapBridge simulator v{}", env!("CARGO_PKG_VERSION"));

    let reader_channel = config.channels.reader.clone();
    let device_channel = config.channels.device.clone();
    if reader_channel != READER_CHANNEL || device_channel != DEVICE_CHANNEL {
        info!("Using custom channel names: {} / {}", reader_channel, device_channel);
    }

    let reader = Arc::new(SimulatedReader::new());
    let host = ReaderHost::new(
        config,
        reader.clone(),
        Arc::new(SimulatedDeviceInfo::default()),
        &Handle::current(),
    );

    host.listen(Arc::new(StdoutSink));
    if let Err(e) = host.on_resume() {
        warn!("Reader not active at startup: {}", e);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("failed to read stdin")?
    {
        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "pause" => host.on_pause(),
            "resume" => {
                if let Err(e) = host.on_resume() {
                    warn!("Resume failed: {}", e);
                }
            }
            "enable" => print_json(&host.handle_method_call(&reader_channel, &MethodCall::new("enableReaderMode"))),
            "disable" => print_json(&host.handle_method_call(&reader_channel, &MethodCall::new("disableReaderMode"))),
            "attach" => host.listen(Arc::new(StdoutSink)),
            "detach" => host.cancel(),
            "device" => print_json(&host.handle_method_call(&device_channel, &MethodCall::new("getDeviceIdentifiers"))),
            "stats" => println!("{:?} session={}", host.stats(), host.session_state().as_str()),
            other => match hex::decode(other.replace(':', "")) {
                Ok(uid) => {
                    if reader.tap(&uid).is_none() {
                        warn!("Reader mode is off, tap ignored");
                    }
                }
                Err(_) => warn!("Unknown command or malformed UID: {}", other),
            },
        }
    }

    host.on_pause();
    info!("Simulator stopped");
    Ok(())
}
