//! # Telemetry Records
//!
//! One fixed-field record type per telemetry command, plus the pure
//! decoders that build them from a response payload. Decoding here is
//! word math only; issuing the transaction is the client's job.
//!
//! The device counts alignment time in update cycles of roughly 1/61 s,
//! so time fields divide the raw word by 61 and round. Heading, attitude
//! and variance words are centidegrees.

use crate::error::{IruLinkError, Result};
use crate::protocol::codec::to_signed_words;
use crate::protocol::tables::{lookup, GC_BMC_PHASES, GC_PHASES, IRU_MODES};

/// Command code for the gyrocompass status read
pub const CMD_GC_STATUS: u16 = 0x000F;

/// Command code for the heading and attitude read
pub const CMD_HEADING_ATTITUDE: u16 = 0x0062;

/// Command code for the base-motion-compensated status read
pub const CMD_BMC_STATUS: u16 = 0x002C;

/// Command code for the mode set (write-only)
pub const CMD_SET_MODE: u16 = 0x005D;

/// Update cycles per second in the device's alignment timers
const CYCLES_PER_SECOND: f64 = 61.0;

/// Gyrocompass alignment status (command 0x000F)
#[derive(Debug, Clone, PartialEq)]
pub struct GyrocompassStatus {
    /// Box azimuth alignment, raw word
    pub box_az_align: i16,
    /// Alignment residual, raw word
    pub residual: i16,
    /// Current phase number of the north-finding sequence
    pub gc_mode_num: i16,
    /// Phase name from the 21-entry phase table
    pub gc_mode_str: &'static str,
    /// Elapsed alignment time in seconds (rounded from update cycles)
    pub gc_time: i32,
    /// Raw movement status word
    pub move_stat: i16,
    /// "Moving" when `move_stat` is nonzero
    pub move_stat_str: &'static str,
    /// Raw payload length in bytes
    pub len: usize,
}

/// Heading and attitude (command 0x0062)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingAttitude {
    /// Grid heading in degrees
    pub hdg_grid: f64,
    /// True heading in degrees
    pub hdg_true: f64,
    /// Pitch in degrees
    pub pitch: f64,
    /// Roll in degrees
    pub roll: f64,
}

/// Base-motion-compensated alignment status (command 0x002C)
///
/// Word 5 is a packed status word: the low byte is the continuous
/// built-in-test (CBIT) status, bits 8-11 the operating-mode index.
#[derive(Debug, Clone, PartialEq)]
pub struct BmcStatus {
    /// True heading in degrees
    pub hdg_true: f64,
    /// Grid heading in degrees
    pub hdg_grid: f64,
    /// Current phase number of the BMC alignment sequence
    pub gc_bmc_mode_num: i16,
    /// Phase name from the 12-entry BMC phase table
    pub gc_bmc_mode_str: &'static str,
    /// Elapsed alignment time in seconds (rounded from update cycles)
    pub gc_bmc_time: i32,
    /// Heading variance in degrees
    pub hdg_bmc_var: f64,
    /// Continuous built-in-test status byte
    pub cbit: u8,
    /// Operating-mode index (4 bits)
    pub iru_mode: u8,
    /// Operating-mode name from the 12-entry mode table
    pub iru_mode_str: &'static str,
}

/// Round an update-cycle count to whole seconds
fn cycles_to_seconds(word: i16) -> i32 {
    (f64::from(word) / CYCLES_PER_SECOND).round() as i32
}

/// Decode a 0x000F response payload
///
/// # Errors
///
/// Empty-response policy is fatal: an empty (or truncated) payload
/// returns [`IruLinkError::EmptyResponse`].
pub fn decode_gc_status(payload: &[u8]) -> Result<GyrocompassStatus> {
    let words = to_signed_words(payload);
    if words.len() < 5 {
        return Err(IruLinkError::EmptyResponse(CMD_GC_STATUS));
    }

    Ok(GyrocompassStatus {
        box_az_align: words[0],
        residual: words[1],
        gc_mode_num: words[2],
        gc_mode_str: lookup(&GC_PHASES, words[2]),
        gc_time: cycles_to_seconds(words[3]),
        move_stat: words[4],
        move_stat_str: if words[4] != 0 { "Moving" } else { "Not Moving" },
        len: payload.len(),
    })
}

/// Decode a 0x0062 response payload
///
/// Words 0..3 are grid heading, true heading, pitch and roll in
/// centidegrees.
///
/// # Errors
///
/// Empty-response policy is fatal: an empty (or truncated) payload
/// returns [`IruLinkError::EmptyResponse`].
pub fn decode_heading_attitude(payload: &[u8]) -> Result<HeadingAttitude> {
    let words = to_signed_words(payload);
    if words.len() < 4 {
        return Err(IruLinkError::EmptyResponse(CMD_HEADING_ATTITUDE));
    }

    Ok(HeadingAttitude {
        hdg_grid: f64::from(words[0]) / 100.0,
        hdg_true: f64::from(words[1]) / 100.0,
        pitch: f64::from(words[2]) / 100.0,
        roll: f64::from(words[3]) / 100.0,
    })
}

/// Decode a 0x002C response payload
///
/// # Errors
///
/// Empty-response policy is fatal: an empty (or truncated) payload
/// returns [`IruLinkError::EmptyResponse`].
pub fn decode_bmc_status(payload: &[u8]) -> Result<BmcStatus> {
    let words = to_signed_words(payload);
    if words.len() < 6 {
        return Err(IruLinkError::EmptyResponse(CMD_BMC_STATUS));
    }

    let stat = words[5] as u16;
    let cbit = (stat & 0x00FF) as u8;
    // Only bits 8-11 carry the mode (section 3.2.3 of the ICD)
    let iru_mode = ((stat >> 8) & 0xF) as u8;

    Ok(BmcStatus {
        hdg_true: f64::from(words[0]) / 100.0,
        hdg_grid: f64::from(words[1]) / 100.0,
        gc_bmc_mode_num: words[2],
        gc_bmc_mode_str: lookup(&GC_BMC_PHASES, words[2]),
        gc_bmc_time: cycles_to_seconds(words[3]),
        hdg_bmc_var: f64::from(words[4]) / 100.0,
        cbit,
        iru_mode,
        iru_mode_str: lookup(&IRU_MODES, iru_mode as i16),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_from_words(words: &[i16]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(words.len() * 2);
        for w in words {
            bytes.extend_from_slice(&w.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_decode_gc_status_vector() {
        // Known vector: words [100, 250, 5, 610, 1]
        let payload = payload_from_words(&[100, 250, 5, 610, 1, 0, 0]);
        let status = decode_gc_status(&payload).unwrap();

        assert_eq!(status.gc_time, 10); // round(610 / 61)
        assert_eq!(status.gc_mode_num, 5);
        assert_eq!(status.gc_mode_str, "SETTLE_AT_180");
        assert_eq!(status.box_az_align, 100);
        assert_eq!(status.residual, 250);
        assert_eq!(status.move_stat, 1);
        assert_eq!(status.move_stat_str, "Moving");
        assert_eq!(status.len, 14);
    }

    #[test]
    fn test_decode_gc_status_not_moving() {
        let payload = payload_from_words(&[0, 0, 0, 0, 0]);
        let status = decode_gc_status(&payload).unwrap();

        assert_eq!(status.move_stat_str, "Not Moving");
        assert_eq!(status.gc_mode_str, "CHECK_IF_VALID_TO_GC");
        assert_eq!(status.gc_time, 0);
    }

    #[test]
    fn test_decode_gc_status_rounds_half_up() {
        // 92 cycles / 61 = 1.508.. -> 2 seconds
        let payload = payload_from_words(&[0, 0, 0, 92, 0]);
        assert_eq!(decode_gc_status(&payload).unwrap().gc_time, 2);
    }

    #[test]
    fn test_decode_gc_status_unknown_phase() {
        let payload = payload_from_words(&[0, 0, 99, 0, 0]);
        assert_eq!(decode_gc_status(&payload).unwrap().gc_mode_str, "Unknown");
    }

    #[test]
    fn test_decode_gc_status_empty_is_fatal() {
        assert!(matches!(
            decode_gc_status(&[]),
            Err(IruLinkError::EmptyResponse(CMD_GC_STATUS))
        ));
    }

    #[test]
    fn test_decode_heading_attitude_vector() {
        // Known vector: words [9000, 8550, 450, 1200]
        let payload = payload_from_words(&[9000, 8550, 450, 1200]);
        let record = decode_heading_attitude(&payload).unwrap();

        assert_eq!(record.hdg_grid, 90.0);
        assert_eq!(record.hdg_true, 85.5);
        assert_eq!(record.pitch, 4.5);
        assert_eq!(record.roll, 12.0);
    }

    #[test]
    fn test_decode_heading_attitude_negative_attitude() {
        // Heading words are signed 16-bit, so 179.99 degrees is the largest
        // positive heading a word can carry
        let payload = payload_from_words(&[0, 17999, -450, -1200]);
        let record = decode_heading_attitude(&payload).unwrap();

        assert_eq!(record.hdg_true, 179.99);
        assert_eq!(record.pitch, -4.5);
        assert_eq!(record.roll, -12.0);
    }

    #[test]
    fn test_decode_heading_attitude_empty_is_fatal() {
        assert!(matches!(
            decode_heading_attitude(&[]),
            Err(IruLinkError::EmptyResponse(CMD_HEADING_ATTITUDE))
        ));
    }

    #[test]
    fn test_decode_bmc_status_packed_word() {
        // Status word 0x0305: cbit = 5, mode = 3 ("Gyrocompass Mode (GC)")
        let payload = payload_from_words(&[8550, 9000, 2, 122, 50, 0x0305]);
        let status = decode_bmc_status(&payload).unwrap();

        assert_eq!(status.hdg_true, 85.5);
        assert_eq!(status.hdg_grid, 90.0);
        assert_eq!(status.gc_bmc_mode_num, 2);
        assert_eq!(status.gc_bmc_mode_str, "FIRST_COLLECT_DATA_AT_0");
        assert_eq!(status.gc_bmc_time, 2); // round(122 / 61)
        assert_eq!(status.hdg_bmc_var, 0.5);
        assert_eq!(status.cbit, 5);
        assert_eq!(status.iru_mode, 3);
        assert_eq!(status.iru_mode_str, "Gyrocompass Mode (GC)");
    }

    #[test]
    fn test_decode_bmc_status_mode_masks_to_four_bits() {
        // Bits above 11 must not leak into the mode index
        let payload = payload_from_words(&[0, 0, 0, 0, 0, 0x7600u16 as i16]);
        let status = decode_bmc_status(&payload).unwrap();

        assert_eq!(status.iru_mode, 6);
        assert_eq!(status.iru_mode_str, "Navigation Mode (NAV)");
        assert_eq!(status.cbit, 0);
    }

    #[test]
    fn test_decode_bmc_status_empty_is_fatal() {
        assert!(matches!(
            decode_bmc_status(&[]),
            Err(IruLinkError::EmptyResponse(CMD_BMC_STATUS))
        ));
    }
}
