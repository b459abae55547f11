//! # Mode and Phase Lookup Tables
//!
//! Immutable name tables for the enumerated status fields the device packs
//! into its telemetry words. Initialized at compile time and shared
//! read-only across all connections; safe for unsynchronized concurrent
//! reads.

/// Operating modes reported in bits 8-11 of the packed status word
/// (12 entries, indexed by the 4-bit mode number)
pub static IRU_MODES: [&str; 12] = [
    "None",
    "Power Up Mode",
    "Standby Mode",
    "Gyrocompass Mode (GC)",
    "Gyrocompass Abort Mode",
    "Initiated BIT Mode",
    "Navigation Mode (NAV)",
    "Reserved",
    "In-Vehicle Calibration Mode",
    "Base Motion Compensated Coarse Align",
    "Base Motion Compensated Fine Align",
    "Base Motion Compensated Align Abort",
];

/// Gyrocompass alignment phases reported by the 0x000F status command
/// (21 entries, indexed by the phase number in word 2)
pub static GC_PHASES: [&str; 21] = [
    "CHECK_IF_VALID_TO_GC",
    "FIRST_SETTLE_AT_0",
    "FIRST_COLLECT_DATA_AT_0",
    "MOVE_0_TO_180",
    "STOP_AT_180",
    "SETTLE_AT_180",
    "FIRST_COLLECT_DATA_AT_180",
    "SECOND_COLLECT_DATA_AT_180",
    "MOVE_FROM_180_TO_0",
    "STOP_AT_0",
    "SETTLE_AT_0",
    "SECOND_COLLECT_DATA_AT_0",
    "COMPUTE_FIRST_HEADING_EST",
    "GYRO_COMPASS_FAIL",
    "END_GYRO_COMPASS",
    "RETRY_MOVE_0_TO_180",
    "RETRY_MOVE_180_TO_0",
    "MOVE_TO_0_NOW",
    "RESTART_GYRO_COMPASS",
    "ESTIMATE_R_GYRO_BIAS",
    "ITERATE_HEADING_ESTIMATE",
];

/// Base-motion-compensated alignment phases reported by the 0x002C status
/// command (12 entries, indexed by the phase number in word 2)
pub static GC_BMC_PHASES: [&str; 12] = [
    "CHECK_IF_VALID_TO_GC",
    "SETTLE_AT_0",
    "FIRST_COLLECT_DATA_AT_0",
    "MOVE_0_TO_180",
    "STOP_AT_180",
    "COLLECT_DATA_AT_180",
    "MOVE_FROM_180_TO_0",
    "STOP_AT_0",
    "SECOND_COLLECT_DATA_AT_0",
    "END_GYRO_COMPASS",
    "MOVE_TO_0_NOW",
    "RESTART_GYRO_COMPASS",
];

/// Name returned when a reported index falls outside its table
pub const UNKNOWN_ENTRY: &str = "Unknown";

/// Look up a name table entry by a device-reported index
///
/// Negative or out-of-range indices resolve to [`UNKNOWN_ENTRY`] rather
/// than panicking; the device occasionally reports transient garbage while
/// switching phases.
///
/// # Arguments
///
/// * `table` - One of the tables in this module
/// * `index` - Device-reported index (signed word)
///
/// # Returns
///
/// * `&'static str` - Table entry, or [`UNKNOWN_ENTRY`]
pub fn lookup(table: &'static [&'static str], index: i16) -> &'static str {
    usize::try_from(index)
        .ok()
        .and_then(|i| table.get(i).copied())
        .unwrap_or(UNKNOWN_ENTRY)
}
