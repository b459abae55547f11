//! # Transport Module
//!
//! TCP stream transport to the IRU device.
//!
//! This module handles:
//! - Establishing and tearing down the TCP connection
//! - Writing command frames and reading fixed-size responses
//! - Nothing else: no framing, no retries, no timeouts
//!
//! A stalled read blocks indefinitely; cadence and lifecycle belong to the
//! polling layer above.

use async_trait::async_trait;
use std::io;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::error::Result;

pub mod stream_trait;

pub use stream_trait::StreamIO;

/// TCP transport to a single IRU device
///
/// One transport carries one connection; multiple devices mean multiple
/// independent transports.
pub struct IruTransport {
    /// Connected stream
    stream: TcpStream,
    /// Peer address, for logs
    peer: String,
}

impl std::fmt::Debug for IruTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IruTransport")
            .field("peer", &self.peer)
            .finish_non_exhaustive()
    }
}

impl IruTransport {
    /// Connect to the device
    ///
    /// # Arguments
    ///
    /// * `host` - Device hostname or IP address
    /// * `port` - Device TCP port (typically a serial-server port such as 4001)
    ///
    /// # Returns
    ///
    /// * `Result<IruTransport>` - Connected transport or error
    ///
    /// # Errors
    ///
    /// Returns error if the TCP connection cannot be established
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use iru_link::transport::IruTransport;
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let transport = IruTransport::connect("192.0.2.10", 4001).await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        let peer = format!("{}:{}", host, port);
        let stream = TcpStream::connect(&peer).await?;
        info!("Connected to {}", peer);

        Ok(Self { stream, peer })
    }

    /// Close the connection
    ///
    /// Consumes the transport; a new connection requires a new
    /// [`IruTransport::connect`] call (the core does not reconnect).
    pub async fn disconnect(mut self) -> Result<()> {
        self.stream.shutdown().await?;
        info!("Connection to {} ended", self.peer);
        Ok(())
    }

    /// Peer address of the open connection
    pub fn peer(&self) -> &str {
        &self.peer
    }
}

#[async_trait]
impl StreamIO for IruTransport {
    async fn send(&mut self, data: &[u8]) -> io::Result<usize> {
        let written = self.stream.write(data).await?;
        self.stream.flush().await?;
        debug!("Sent {} of {} bytes to {}", written, data.len(), self.peer);
        Ok(written)
    }

    async fn receive(&mut self, expected: usize) -> io::Result<Vec<u8>> {
        let mut buf = vec![0u8; expected];
        let mut filled = 0;

        // Read until the full frame arrives or the peer closes
        while filled < expected {
            let n = self.stream.read(&mut buf[filled..]).await?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        buf.truncate(filled);
        debug!("Received {} bytes from {}", filled, self.peer);
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::frame::RESPONSE_FRAME_LEN;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_connect_refused_returns_error() {
        // Grab a free port, then close the listener before connecting
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let result = IruTransport::connect("127.0.0.1", port).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_send_and_receive_against_local_peer() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let echo = tokio::spawn(async move {
            let (mut peer, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 16];
            peer.read_exact(&mut buf).await.unwrap();
            peer.write_all(&buf).await.unwrap();
            buf
        });

        let mut transport = IruTransport::connect("127.0.0.1", addr.port())
            .await
            .unwrap();

        let frame = [0xABu8; 16];
        let written = transport.send(&frame).await.unwrap();
        assert_eq!(written, frame.len());

        let response = transport.receive(RESPONSE_FRAME_LEN).await.unwrap();
        assert_eq!(response, frame.to_vec());

        assert_eq!(echo.await.unwrap(), frame.to_vec());
        transport.disconnect().await.unwrap();
    }

    #[tokio::test]
    async fn test_receive_returns_short_buffer_on_peer_close() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut peer, _) = listener.accept().await.unwrap();
            // Send half a frame, then close
            peer.write_all(&[0x01u8; 8]).await.unwrap();
            peer.shutdown().await.unwrap();
        });

        let mut transport = IruTransport::connect("127.0.0.1", addr.port())
            .await
            .unwrap();

        let response = transport.receive(RESPONSE_FRAME_LEN).await.unwrap();
        assert_eq!(response.len(), 8);
    }
}
