//! # XOR Word Checksum
//!
//! Frame checksum for the IRU command protocol.
//!
//! Every frame ends with a trailer word equal to the bitwise XOR of all
//! 16-bit words preceding it. XOR is its own inverse, so folding a frame
//! *including* its trailer yields zero for an intact frame.

/// Fold a sequence of 16-bit words with XOR
///
/// # Arguments
///
/// * `words` - Words to fold: command code and arguments, without the trailer
///
/// # Returns
///
/// * `u16` - Checksum word to append to the frame
///
/// # Examples
///
/// ```
/// use iru_link::protocol::checksum::xor_fold;
///
/// let words = [0x005D, 0x0003, 0x0000];
/// assert_eq!(xor_fold(&words), 0x005E);
/// ```
pub fn xor_fold(words: &[u16]) -> u16 {
    words.iter().fold(0, |acc, &w| acc ^ w)
}

/// Fold an encoded byte buffer as big-endian 16-bit words
///
/// Equivalent to decoding the buffer back into words and calling
/// [`xor_fold`]. The buffer length must be even; a trailing odd byte is a
/// caller error and is ignored.
///
/// # Arguments
///
/// * `bytes` - Big-endian encoded words
///
/// # Returns
///
/// * `u16` - XOR fold of the decoded words
pub fn xor_fold_bytes(bytes: &[u8]) -> u16 {
    bytes
        .chunks_exact(2)
        .fold(0, |acc, pair| acc ^ u16::from_be_bytes([pair[0], pair[1]]))
}
