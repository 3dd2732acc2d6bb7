//! Length-prefixed transport to the language server.
//!
//! Messages are framed with a `Content-Length` header followed by a blank
//! line and the payload:
//! ```text
//! Content-Length: <length>\r\n
//! \r\n
//! <payload>
//! ```
//!
//! The transport is generic over its streams so the same framing code runs
//! against child-process pipes in production and in-memory buffers in tests.

use std::io::{BufRead, Read, Write};

use crate::errors::TransportError;

/// Frames and unframes messages on a reader/writer pair.
pub struct StdioTransport<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> StdioTransport<R, W> {
    /// Wraps the channel's read and write halves.
    #[must_use]
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Writes one framed message and flushes.
    pub fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        let header = format!("Content-Length: {}\r\n\r\n", payload.len());
        self.writer.write_all(header.as_bytes())?;
        self.writer.write_all(payload)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Reads one framed message, blocking until it is complete.
    pub fn receive(&mut self) -> Result<Vec<u8>, TransportError> {
        let length = self.read_headers()?;
        let mut payload = vec![0u8; length];
        self.reader.read_exact(&mut payload)?;
        Ok(payload)
    }

    fn read_headers(&mut self) -> Result<usize, TransportError> {
        let mut content_length: Option<usize> = None;

        loop {
            let mut line = String::new();
            let bytes_read = self.reader.read_line(&mut line)?;
            if bytes_read == 0 {
                return Err(TransportError::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "server closed the channel while sending headers",
                )));
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                // Blank line ends the header block.
                break;
            }

            if let Some(value) = trimmed.strip_prefix("Content-Length: ") {
                content_length = Some(value.parse().map_err(|_| TransportError::InvalidHeader)?);
            }
            // Other headers (Content-Type) are ignored.
        }

        content_length.ok_or(TransportError::MissingContentLength)
    }
}
