//! # IRU Link Library
//!
//! Client for the binary command/response protocol of an inertial
//! reference unit (IRU gyrocompass) over a persistent TCP stream.
//!
//! This library provides the frame codec (big-endian words with an XOR
//! checksum trailer), a half-duplex transaction engine with non-fatal
//! integrity diagnostics, typed telemetry decoders, and a validated
//! mode-set command.

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod transport;
