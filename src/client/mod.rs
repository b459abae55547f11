//! # IRU Client Module
//!
//! The transaction engine and the typed command surface on top of it.
//!
//! This module handles:
//! - One blocking send-then-receive transaction per call
//! - Parse-at-boundary of textual command words
//! - Response validation with non-fatal integrity warnings
//! - Telemetry reads (0x000F, 0x0062, 0x002C) and the mode set (0x005D)
//!
//! The protocol is strictly half-duplex: every operation takes `&mut self`,
//! so the borrow checker enforces one outstanding transaction per
//! connection. Run multiple devices with multiple clients.

use tracing::{debug, warn};

use crate::error::{IruLinkError, Result};
use crate::protocol::codec::to_hex_digits;
use crate::protocol::frame::{
    encode_command, parse_command_words, parse_response, IntegrityWarning, RESPONSE_FRAME_LEN,
};
use crate::transport::{IruTransport, StreamIO};

pub mod telemetry;

pub use telemetry::{BmcStatus, GyrocompassStatus, HeadingAttitude};

use telemetry::{CMD_BMC_STATUS, CMD_GC_STATUS, CMD_HEADING_ATTITUDE, CMD_SET_MODE};

/// Result of one completed transaction
///
/// Integrity anomalies (header echo or checksum mismatch) do not abort
/// the transaction; they ride along here so callers and test harnesses
/// can assert on them without losing the payload.
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Command code that was sent
    pub command: u16,

    /// Response bytes with the 2-byte header stripped (empty for
    /// send-only transactions)
    pub payload: Vec<u8>,

    /// Non-fatal anomalies found while validating the response
    pub warnings: Vec<IntegrityWarning>,
}

/// Client for one IRU device connection
///
/// Generic over [`StreamIO`] so the engine can be exercised against a mock
/// stream; production code uses [`IruClient::connect`] to get a
/// TCP-backed client.
pub struct IruClient<S: StreamIO> {
    /// Underlying byte stream
    stream: S,
    /// Verbosity level: 0 silent, >1 dumps raw sent/received bytes
    verbose: u8,
}

impl IruClient<IruTransport> {
    /// Connect to a device and build a client over the TCP transport
    ///
    /// # Arguments
    ///
    /// * `host` - Device hostname or IP address
    /// * `port` - Device TCP port
    /// * `verbose` - Verbosity level (0 silent, >1 raw byte dumps)
    ///
    /// # Errors
    ///
    /// Returns error if the connection cannot be established
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use iru_link::client::IruClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let mut client = IruClient::connect("192.0.2.10", 4001, 0).await?;
    ///     let heading = client.get_heading_attitude().await?;
    ///     println!("true heading: {:.2}", heading.hdg_true);
    ///     Ok(())
    /// }
    /// ```
    pub async fn connect(host: &str, port: u16, verbose: u8) -> Result<Self> {
        let transport = IruTransport::connect(host, port).await?;
        Ok(Self::with_verbosity(transport, verbose))
    }

    /// Close the connection, consuming the client
    pub async fn disconnect(self) -> Result<()> {
        self.stream.disconnect().await
    }
}

impl<S: StreamIO> IruClient<S> {
    /// Build a client over an already-open stream, silent logging
    pub fn new(stream: S) -> Self {
        Self::with_verbosity(stream, 0)
    }

    /// Build a client over an already-open stream with a verbosity level
    pub fn with_verbosity(stream: S, verbose: u8) -> Self {
        Self { stream, verbose }
    }

    /// Perform one command/response transaction
    ///
    /// Encodes `words` (command code in hex text first, decimal arguments
    /// after) into a big-endian frame with an XOR checksum trailer, writes
    /// it, and unless `send_only` reads the fixed 16-byte response,
    /// validates it, and returns the payload.
    ///
    /// Header-echo and checksum mismatches are *non-fatal*: they are
    /// logged at `warn!` and recorded on the returned [`Transaction`], and
    /// the payload is still returned.
    ///
    /// # Arguments
    ///
    /// * `words` - Textual command words, e.g. `["0x000F", "0", "0", "0", "0", "0", "0"]`
    /// * `send_only` - Skip the read phase (write-only "set" commands)
    ///
    /// # Errors
    ///
    /// * [`IruLinkError::InvalidCommand`] - a word failed to parse (no I/O performed)
    /// * [`IruLinkError::ShortWrite`] - frame not fully written (read phase skipped)
    /// * [`IruLinkError::Io`] - transport failure on send or receive
    pub async fn transact(&mut self, words: &[&str], send_only: bool) -> Result<Transaction> {
        let command_words = parse_command_words(words)?;
        let command = command_words[0];

        let frame = encode_command(&command_words);
        if self.verbose > 1 {
            debug!("Sent: {}", to_hex_digits(&frame).concat());
        }

        let written = self.stream.send(&frame).await?;
        if written != frame.len() {
            return Err(IruLinkError::ShortWrite {
                written,
                expected: frame.len(),
            });
        }

        // Set commands have nothing to read
        if send_only {
            return Ok(Transaction {
                command,
                payload: Vec::new(),
                warnings: Vec::new(),
            });
        }

        let response = self.stream.receive(RESPONSE_FRAME_LEN).await?;
        if self.verbose > 1 {
            debug!("Rcvd: {}", to_hex_digits(&response).concat());
        }

        let parsed = parse_response(command, &response);
        for warning in &parsed.warnings {
            match warning {
                IntegrityWarning::HeaderMismatch { sent, echoed } => {
                    warn!(
                        "Return header does not match command sent: 0x{:04X} != 0x{:04X} ({})",
                        sent,
                        echoed,
                        to_hex_digits(&response).concat()
                    );
                }
                IntegrityWarning::ChecksumMismatch {
                    computed,
                    transmitted,
                } => {
                    warn!(
                        "Checksum failed (calc != rtn): 0x{:04X} != 0x{:04X}",
                        computed, transmitted
                    );
                }
            }
        }

        Ok(Transaction {
            command,
            payload: parsed.payload,
            warnings: parsed.warnings,
        })
    }

    /// Set the device operating mode (command 0x005D, write-only)
    ///
    /// The mode is validated as text against the device allow-list
    /// {3, 6, 8, 9, 12} by whole-string match; anything else fails with
    /// [`IruLinkError::InvalidMode`] before any I/O. The device returns no
    /// status for this command, so success means only that the frame was
    /// fully written.
    pub async fn set_mode(&mut self, mode: &str) -> Result<()> {
        const VALID_MODES: [&str; 5] = ["3", "6", "8", "9", "12"];
        if !VALID_MODES.contains(&mode) {
            return Err(IruLinkError::InvalidMode(mode.to_string()));
        }

        let header = format!("0x{:04X}", CMD_SET_MODE);
        self.transact(&[&header, mode, "0", "0", "0", "0", "0"], true)
            .await?;
        Ok(())
    }

    /// Read gyrocompass alignment status (command 0x000F)
    ///
    /// # Errors
    ///
    /// Empty-response policy is fatal: an empty payload returns
    /// [`IruLinkError::EmptyResponse`].
    pub async fn get_gc_status(&mut self) -> Result<GyrocompassStatus> {
        let txn = self.read_command(CMD_GC_STATUS).await?;
        telemetry::decode_gc_status(&txn.payload)
    }

    /// Read heading and attitude (command 0x0062)
    ///
    /// # Errors
    ///
    /// Empty-response policy is fatal: an empty payload returns
    /// [`IruLinkError::EmptyResponse`].
    pub async fn get_heading_attitude(&mut self) -> Result<HeadingAttitude> {
        let txn = self.read_command(CMD_HEADING_ATTITUDE).await?;
        telemetry::decode_heading_attitude(&txn.payload)
    }

    /// Read base-motion-compensated alignment status (command 0x002C)
    ///
    /// # Errors
    ///
    /// Empty-response policy is fatal: an empty payload returns
    /// [`IruLinkError::EmptyResponse`].
    pub async fn get_bmc_status(&mut self) -> Result<BmcStatus> {
        let txn = self.read_command(CMD_BMC_STATUS).await?;
        telemetry::decode_bmc_status(&txn.payload)
    }

    /// Issue a read transaction with the fixed all-zero argument tail
    async fn read_command(&mut self, code: u16) -> Result<Transaction> {
        let header = format!("0x{:04X}", code);
        self.transact(&[&header, "0", "0", "0", "0", "0", "0"], false)
            .await
    }
}
