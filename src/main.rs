//! # IRU Link
//!
//! Polling console for an IRU gyrocompass device.
//!
//! Connects once, then reads gyrocompass status and heading/attitude on a
//! fixed interval until the cycle cap is reached or Ctrl+C is pressed,
//! then disconnects. Transaction failures inside the loop are logged and
//! polling continues; connection failures are fatal.

use anyhow::Result;
use std::io::ErrorKind;
use tokio::time::{interval, Duration};
use tracing::{error, info};

use iru_link::client::IruClient;
use iru_link::config::Config;
use iru_link::error::IruLinkError;

/// Default configuration file path
const CONFIG_PATH: &str = "config.toml";

/// Load the configuration file, falling back to defaults only when the
/// file does not exist
///
/// A config file that is present but unreadable (or malformed) is an
/// error; silently ignoring it would run the poller against the wrong
/// device.
fn load_or_default(path: &str) -> iru_link::error::Result<Config> {
    match Config::load(path) {
        Ok(config) => Ok(config),
        Err(IruLinkError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            info!("No {} found, using defaults", path);
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

/// Main entry point for the IRU Link poller
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load `config.toml` (falling back to defaults if absent)
///    - Connect to the device over TCP
///
/// 2. **Main Loop**
///    - Issue the 0x000F and 0x0062 reads each poll interval
///    - Log the decoded records
///    - Stop after `poll.max_cycles` cycles (0 = unbounded) or Ctrl+C
///
/// 3. **Shutdown**
///    - Close the connection
///    - Clean exit
///
/// # Errors
///
/// Returns error if the configuration is invalid or the device cannot be
/// reached.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("IRU Link v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = load_or_default(CONFIG_PATH)?;

    let mut client = IruClient::connect(
        &config.connection.host,
        config.connection.port,
        config.connection.verbose,
    )
    .await?;

    info!(
        "Polling every {}ms (max {} cycles, 0 = unbounded)",
        config.poll.interval_ms, config.poll.max_cycles
    );
    info!("Press Ctrl+C to exit");

    let mut poll_interval = interval(Duration::from_millis(config.poll.interval_ms));
    let mut cycles: u64 = 0;

    // Main polling loop
    loop {
        tokio::select! {
            _ = poll_interval.tick() => {
                match client.get_gc_status().await {
                    Ok(status) => info!(
                        "GC phase {} ({}), t={}s, {}",
                        status.gc_mode_num, status.gc_mode_str, status.gc_time, status.move_stat_str
                    ),
                    Err(e) => error!("Gyrocompass status read failed: {}", e),
                }

                match client.get_heading_attitude().await {
                    Ok(heading) => info!(
                        "hdg_true={:.2} hdg_grid={:.2} pitch={:.2} roll={:.2}",
                        heading.hdg_true, heading.hdg_grid, heading.pitch, heading.roll
                    ),
                    Err(e) => error!("Heading read failed: {}", e),
                }

                cycles += 1;
                if config.poll.max_cycles > 0 && cycles >= config.poll.max_cycles {
                    info!("Reached {} cycles, stopping", cycles);
                    break;
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                info!("Total poll cycles: {}", cycles);
                break;
            }
        }
    }

    client.disconnect().await?;
    Ok(())
}
