//! # Command and Response Frames
//!
//! Encoding of outbound command frames and parsing of inbound response
//! frames.
//!
//! Outbound: each 16-bit word is written big-endian, followed by an XOR
//! checksum trailer over all preceding words. Inbound: a fixed 16-byte
//! frame whose first word (little-endian) echoes the command code and
//! whose last word (big-endian) is the transmitted checksum. Header and
//! checksum mismatches are protocol anomalies, not failures: the device is
//! known to echo stale headers under load, so they are reported as
//! [`IntegrityWarning`] values while the payload is still handed on.

use bytes::{BufMut, BytesMut};

use super::checksum::{xor_fold, xor_fold_bytes};
use crate::error::{IruLinkError, Result};

/// Fixed size of every response frame in bytes (8 words)
pub const RESPONSE_FRAME_LEN: usize = 16;

/// Size of one protocol word in bytes
pub const WORD_LEN: usize = 2;

/// Non-fatal anomaly detected while validating a response frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityWarning {
    /// Echoed header word does not match the command code sent
    HeaderMismatch { sent: u16, echoed: u16 },

    /// Locally computed checksum does not match the transmitted trailer
    ChecksumMismatch { computed: u16, transmitted: u16 },
}

/// A parsed response frame: the payload plus any integrity anomalies
#[derive(Debug, Clone, Default)]
pub struct ParsedResponse {
    /// Response bytes with the 2-byte header stripped
    pub payload: Vec<u8>,

    /// Anomalies found during validation (empty for a clean frame)
    pub warnings: Vec<IntegrityWarning>,
}

/// Parse textual command words into protocol words
///
/// Word 0 is the command code and is given in hexadecimal text (with or
/// without a `0x` prefix, e.g. `"0x005D"` or `"5D"`); the remaining words
/// are decimal text. This is the parse-at-boundary step: malformed input
/// fails here with [`IruLinkError::InvalidCommand`] before any encoding or
/// I/O happens.
///
/// # Arguments
///
/// * `words` - Textual command words, command code first
///
/// # Returns
///
/// * `Result<Vec<u16>>` - Parsed words in order
pub fn parse_command_words(words: &[&str]) -> Result<Vec<u16>> {
    let mut parsed = Vec::with_capacity(words.len());

    for (i, word) in words.iter().enumerate() {
        let value = if i == 0 {
            let hex = word
                .trim()
                .trim_start_matches("0x")
                .trim_start_matches("0X");
            u16::from_str_radix(hex, 16)
        } else {
            word.trim().parse::<u16>()
        };

        parsed.push(value.map_err(|_| IruLinkError::InvalidCommand(word.to_string()))?);
    }

    if parsed.is_empty() {
        return Err(IruLinkError::InvalidCommand(String::new()));
    }

    Ok(parsed)
}

/// Encode command words into a wire frame with checksum trailer
///
/// # Arguments
///
/// * `words` - Parsed command words (code + arguments)
///
/// # Returns
///
/// * `Vec<u8>` - Big-endian encoded frame: words followed by the XOR fold
///   of those words as the final word
///
/// # Examples
///
/// ```
/// use iru_link::protocol::frame::encode_command;
///
/// let frame = encode_command(&[0x000F, 0, 0]);
/// assert_eq!(frame, vec![0x00, 0x0F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0F]);
/// ```
pub fn encode_command(words: &[u16]) -> Vec<u8> {
    let mut frame = BytesMut::with_capacity((words.len() + 1) * WORD_LEN);

    for &word in words {
        frame.put_u16(word);
    }
    frame.put_u16(xor_fold(words));

    frame.to_vec()
}

/// Validate a response frame and extract its payload
///
/// Performs the two soft integrity checks:
/// 1. word 0 (little-endian) must echo the command code sent;
/// 2. the XOR fold of words 1..n-2 must match the trailer word n-1
///    (big-endian). The header word is excluded from the fold.
///
/// Neither check aborts the transaction; failures are collected as
/// warnings so callers can surface them without losing the telemetry. A
/// response shorter than one word yields an empty payload and no warnings
/// (there is nothing to validate).
///
/// # Arguments
///
/// * `sent_code` - Command code that was transmitted
/// * `response` - Raw response bytes as received
///
/// # Returns
///
/// * `ParsedResponse` - Payload (header stripped) and any warnings
pub fn parse_response(sent_code: u16, response: &[u8]) -> ParsedResponse {
    if response.len() < WORD_LEN {
        return ParsedResponse::default();
    }

    let mut warnings = Vec::new();

    let echoed = u16::from_le_bytes([response[0], response[1]]);
    if echoed != sent_code {
        warnings.push(IntegrityWarning::HeaderMismatch {
            sent: sent_code,
            echoed,
        });
    }

    // Checksum trailer is only meaningful once there is at least a header,
    // one folded word and the trailer itself.
    let word_count = response.len() / WORD_LEN;
    if word_count >= 3 {
        let trailer = &response[(word_count - 1) * WORD_LEN..word_count * WORD_LEN];
        let transmitted = u16::from_be_bytes([trailer[0], trailer[1]]);

        let computed = xor_fold_bytes(&response[WORD_LEN..(word_count - 1) * WORD_LEN]);

        if computed != transmitted {
            warnings.push(IntegrityWarning::ChecksumMismatch {
                computed,
                transmitted,
            });
        }
    }

    ParsedResponse {
        payload: response[WORD_LEN..].to_vec(),
        warnings,
    }
}

/// Build a clean 16-byte response frame (test helper for this crate)
///
/// Word 0 is written little-endian, the trailer big-endian, with the
/// trailer set to the XOR fold of words 1..6, exactly what the device
/// produces for an intact frame.
#[cfg(test)]
pub fn build_response(code: u16, payload_words: &[i16; 6]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(RESPONSE_FRAME_LEN);
    frame.extend_from_slice(&code.to_le_bytes());

    let mut fold = 0u16;
    for &word in payload_words {
        let le = word.to_le_bytes();
        frame.extend_from_slice(&le);
        fold ^= u16::from_be_bytes([le[0], le[1]]);
    }

    frame.extend_from_slice(&fold.to_be_bytes());
    frame
}
