//! # IRU Wire Protocol Module
//!
//! Implementation of the gyrocompass command/response wire format.
//!
//! This module handles:
//! - Command frame encoding (big-endian 16-bit words, XOR checksum trailer)
//! - Response frame validation (header echo, checksum, payload split)
//! - Payload conversions (signed words, word-swapped longs, hex digits)
//! - Mode and gyrocompass-phase name tables

pub mod checksum;
pub mod codec;
pub mod frame;
pub mod tables;
