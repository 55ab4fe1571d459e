//! # Pad Bridge
//!
//! Shapes Xbox 360 class controller input reports with per-device settings.
//!
//! Reads raw reports as hex lines on stdin, one report per line, and writes
//! the processed reports to stdout in the same format. Lines carrying a
//! 4-byte rumble output report are validated and acknowledged instead.
//! Settings come from the `[settings]` table of the config file and are
//! reloaded on `SIGHUP`.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use pad_bridge::config::Config;
use pad_bridge::controller::device::Controller;
use pad_bridge::controller::rumble::RUMBLE_REPORT_LEN;
use pad_bridge::store::ConfigStore;

/// Config file used when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Log file name prefix inside `logging.log_dir`
const LOG_FILE_PREFIX: &str = "pad-bridge.log";

/// Main entry point for Pad Bridge
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Load configuration (first argument, or `config/default.toml`)
///    - Set up non-blocking logging with tracing subscriber
///    - Create the controller and load its settings
///
/// 2. **Main Loop**
///    - Process each hex line from stdin and print the result
///    - Reload settings on `SIGHUP`
///    - Handle Ctrl+C or end of input for shutdown
///
/// # Errors
///
/// Returns error if the config file cannot be loaded or stdio fails.
///
/// # Examples
///
/// ```bash
/// echo "00 14 00 00 64 c8 e8 03 00 00 00 00 00 00 00 00 00 00 00 00" \
///     | cargo run --release -- config/default.toml
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path))?;

    let _guard = init_logging(&config)?;

    info!("Pad Bridge v{} starting...", env!("CARGO_PKG_VERSION"));

    let controller = Controller::new(None);
    controller.set_properties(Some(&config.settings as &dyn ConfigStore))?;

    let mut hangup = signal(SignalKind::hangup())?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut processed: u64 = 0;

    info!("Reading reports from stdin (SIGHUP reloads {})", config_path);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("End of input");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                match handle_line(&controller, &line) {
                    Ok(Some(output)) => {
                        stdout.write_all(output.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;
                        processed += 1;
                    }
                    Ok(None) => {}
                    Err(e) => warn!("Skipping line: {}", e),
                }
            }

            _ = hangup.recv() => {
                match Config::load(&config_path) {
                    Ok(reloaded) => {
                        controller.set_properties(Some(&reloaded.settings as &dyn ConfigStore))?;
                    }
                    Err(e) => warn!("Reload of {} failed, keeping settings: {}", config_path, e),
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    info!("Total reports processed: {}", processed);
    Ok(())
}

/// Initializes the tracing subscriber with a non-blocking writer.
fn init_logging(config: &Config) -> Result<WorkerGuard> {
    let level = config.logging.level()?;

    let (writer, guard) = match &config.logging.log_dir {
        Some(dir) => tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX)),
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(level.into())
        )
        .init();

    Ok(guard)
}

/// Processes one input line.
///
/// A 4-byte line declaring length 4 is a rumble request; anything else is
/// treated as an input report. Returns the processed input report as hex,
/// or `None` for an accepted rumble request.
fn handle_line(controller: &Controller, line: &str) -> pad_bridge::error::Result<Option<String>> {
    let mut data = parse_hex(line)?;

    if data.len() == RUMBLE_REPORT_LEN && usize::from(data[1]) == RUMBLE_REPORT_LEN {
        controller.set_report(&data)?;
        debug!("Rumble request accepted");
        return Ok(None);
    }

    controller.received_report(&mut data)?;
    Ok(Some(format_hex(&data)))
}

/// Parses hex bytes, with or without whitespace between them.
fn parse_hex(line: &str) -> pad_bridge::error::Result<Vec<u8>> {
    let digits: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(pad_bridge::error::PadBridgeError::Report(format!(
            "invalid hex digit '{}'",
            bad
        )));
    }
    if digits.len() % 2 != 0 {
        return Err(pad_bridge::error::PadBridgeError::Report(format!(
            "odd number of hex digits ({})",
            digits.len()
        )));
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|e| {
                pad_bridge::error::PadBridgeError::Report(format!("invalid hex '{}': {}", &digits[i..i + 2], e))
            })
        })
        .collect()
}

/// Formats bytes as space-separated lowercase hex.
fn format_hex(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
