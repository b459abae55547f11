//! Trait abstraction for stream I/O operations to enable testing

use async_trait::async_trait;
use std::io;

/// Trait for byte-stream I/O against the device
///
/// The two primitives the transaction engine needs: write a buffer and
/// read a fixed-size buffer. No framing knowledge lives here; the engine
/// always asks for the protocol's fixed response size.
#[async_trait]
pub trait StreamIO: Send {
    /// Write a buffer to the stream, returning the number of bytes written
    async fn send(&mut self, data: &[u8]) -> io::Result<usize>;

    /// Read up to `expected` bytes from the stream
    ///
    /// Returns fewer bytes only if the peer closed the connection; an
    /// empty buffer means EOF before any data arrived.
    async fn receive(&mut self, expected: usize) -> io::Result<Vec<u8>>;
}
