//! # Error Types
//!
//! Custom error types for IRU Link using `thiserror`.

use thiserror::Error;

/// Main error type for IRU Link
#[derive(Debug, Error)]
pub enum IruLinkError {
    /// Command word could not be parsed into a 16-bit integer
    #[error("invalid command word '{0}'")]
    InvalidCommand(String),

    /// Mode argument is outside the device allow-list for the 0x005D command
    #[error("invalid mode '{0}' sent to 0x005D command")]
    InvalidMode(String),

    /// Fewer bytes were written than the encoded frame holds
    #[error("short write: wrote {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    /// Device returned an empty (or truncated) payload for a read command
    #[error("empty response for command 0x{0:04X}")]
    EmptyResponse(u16),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for IRU Link
pub type Result<T> = std::result::Result<T, IruLinkError>;
