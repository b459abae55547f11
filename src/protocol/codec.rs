//! # Payload Conversion Utilities
//!
//! Pure, stateless conversions between the raw response payload and the
//! representations the telemetry decoders work in. No I/O, no validation
//! beyond chunk alignment: a trailing partial chunk is a caller error and
//! is silently dropped.

/// Reinterpret a payload as little-endian signed 16-bit words
///
/// # Arguments
///
/// * `bytes` - Payload bytes, 2 per word, in receive order
///
/// # Returns
///
/// * `Vec<i16>` - Decoded words
///
/// # Examples
///
/// ```
/// use iru_link::protocol::codec::to_signed_words;
///
/// let words = to_signed_words(&[0x28, 0x23, 0xFF, 0xFF]);
/// assert_eq!(words, vec![9000, -1]);
/// ```
pub fn to_signed_words(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Reinterpret a payload as word-swapped signed 32-bit values
///
/// The device transmits 32-bit fields as two 16-bit halves in swapped
/// order, so each 4-byte group is reordered to offsets [2, 3, 0, 1]
/// before being read as a little-endian i32.
///
/// # Arguments
///
/// * `bytes` - Payload bytes, 4 per value
///
/// # Returns
///
/// * `Vec<i32>` - Decoded values
pub fn to_swapped_longs(bytes: &[u8]) -> Vec<i32> {
    bytes
        .chunks_exact(4)
        .map(|group| i32::from_le_bytes([group[2], group[3], group[0], group[1]]))
        .collect()
}

/// Render each payload byte as a two-character lowercase hex string
///
/// Used for raw byte dumps in verbose logging and for inspecting frames in
/// test failures.
///
/// # Arguments
///
/// * `bytes` - Payload bytes
///
/// # Returns
///
/// * `Vec<String>` - One "xx" entry per input byte
pub fn to_hex_digits(bytes: &[u8]) -> Vec<String> {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
