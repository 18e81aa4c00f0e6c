//! Low-level I/O operations for NNTP protocol communication
//!
//! This module provides the core I/O primitives used by all NNTP client operations:
//! - Command transmission with logging
//! - Single-line response parsing
//! - Multi-line response handling (text and binary)
//! - Compression detection and decompression
//! - Timeout management
//! - Connection error detection

use super::{CompressionMode, NntpClient};
use crate::commands;
use crate::error::{NntpError, Result};
use crate::response::NntpResponse;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::time::timeout;
use tracing::trace;

const SINGLE_LINE_TIMEOUT: Duration = Duration::from_secs(60);
const MULTILINE_TIMEOUT: Duration = Duration::from_secs(180);
const COMPRESSED_READ_BUFFER_SIZE: usize = 256 * 1024;
const BINARY_DATA_INITIAL_CAPACITY: usize = 512 * 1024;
/// Maximum size for a compressed block to prevent OOM from malicious/broken servers (64 MB)
const MAX_COMPRESSED_BLOCK_SIZE: usize = 64 * 1024 * 1024;

/// Strip NNTP byte-stuffing from a line (leading ".." becomes ".").
fn strip_byte_stuffing(line: &str) -> &str {
    if line.starts_with("..") {
        &line[1..]
    } else {
        line
    }
}

impl NntpClient {
    /// Send a command to the server
    pub(super) async fn send_command(&mut self, command: &str) -> Result<()> {
        trace!("Sending command: {}", command.trim());
        self.stream.get_mut().write_all(command.as_bytes()).await?;
        self.stream.get_mut().flush().await?;
        Ok(())
    }

    /// Read a single-line response
    pub(super) async fn read_response(&mut self) -> Result<NntpResponse> {
        let result = self.read_response_with_timeout(SINGLE_LINE_TIMEOUT).await;
        // Mark connection as broken if we got invalid/garbage data
        if let Err(NntpError::InvalidResponse(_)) = &result {
            self.mark_broken();
        }
        result
    }

    /// Read a single-line response with custom timeout
    pub(super) async fn read_response_with_timeout(
        &mut self,
        timeout_duration: Duration,
    ) -> Result<NntpResponse> {
        use tokio::io::AsyncBufReadExt;

        let read_future = async {
            let mut line_bytes = Vec::with_capacity(512);
            self.stream.read_until(b'\n', &mut line_bytes).await?;

            if line_bytes.is_empty() {
                return Err(NntpError::ConnectionClosed);
            }

            // Convert to string with lossy UTF-8 conversion
            let line = String::from_utf8_lossy(&line_bytes);
            let line = line.trim_end();
            trace!("Received: {}", line);

            commands::parse_single_response(line)
        };

        timeout(timeout_duration, read_future)
            .await
            .map_err(|_| NntpError::Timeout)?
    }

    /// Read a multi-line response (ending with ".\r\n")
    pub(super) async fn read_multiline_response(&mut self) -> Result<NntpResponse> {
        let result = self
            .read_multiline_response_with_timeout(MULTILINE_TIMEOUT)
            .await;
        // Mark connection as broken if we got invalid/garbage data
        if let Err(NntpError::InvalidResponse(_)) = &result {
            self.mark_broken();
        }
        result
    }

    /// Read a multi-line response with custom timeout
    pub(super) async fn read_multiline_response_with_timeout(
        &mut self,
        timeout_duration: Duration,
    ) -> Result<NntpResponse> {
        use tokio::io::AsyncBufReadExt;

        let read_future = async {
            // Read first line (status)
            let mut first_line_bytes = Vec::with_capacity(512);
            self.stream.read_until(b'\n', &mut first_line_bytes).await?;

            if first_line_bytes.is_empty() {
                return Err(NntpError::ConnectionClosed);
            }

            let first_line = String::from_utf8_lossy(&first_line_bytes);
            let first_line = first_line.trim_end();
            trace!("Received: {}", first_line);

            let (code, message) = commands::parse_response_line(first_line)?;

            // If error response, no multi-line data follows
            if code >= 400 {
                return Ok(NntpResponse {
                    code,
                    message,
                    lines: vec![],
                });
            }

            // For HeadersOnly compression mode, the server only compresses certain responses
            // and indicates this with [COMPRESS=GZIP] in the status line
            let response_is_compressed = self.compression_mode == CompressionMode::HeadersOnly
                && message.contains("[COMPRESS=GZIP]");

            if response_is_compressed {
                let all_data = self.read_compressed_block().await?;

                trace!("Read {} compressed bytes", all_data.len());

                // Decompress the entire block
                let decompressed = self.maybe_decompress(&all_data)?;
                trace!("Decompressed to {} bytes", decompressed.len());

                // Parse decompressed data into lines
                let decompressed_str = String::from_utf8_lossy(&decompressed);
                // Pre-allocate: estimate 1 line per 80 bytes (typical NNTP line length)
                let estimated_lines = (decompressed.len() / 80).max(16);
                let mut lines = Vec::with_capacity(estimated_lines);
                for line in decompressed_str.lines() {
                    lines.push(strip_byte_stuffing(line).to_string());
                }

                return Ok(NntpResponse {
                    code,
                    message,
                    lines,
                });
            }

            // Standard uncompressed or FullSession mode: Read line-by-line
            // Pre-allocate with conservative estimate (most multiline responses have 10-100 lines)
            let mut lines = Vec::with_capacity(64);
            loop {
                let mut line_bytes = Vec::with_capacity(512);
                self.stream.read_until(b'\n', &mut line_bytes).await?;

                if line_bytes.is_empty() {
                    return Err(NntpError::ConnectionClosed);
                }

                let line = String::from_utf8_lossy(&line_bytes);
                let line = line.trim_end();

                // Check for terminator
                if line == "." {
                    break;
                }

                // Handle byte-stuffing (lines starting with ".." become ".")
                lines.push(strip_byte_stuffing(line).to_string());
            }

            Ok(NntpResponse {
                code,
                message,
                lines,
            })
        };

        timeout(timeout_duration, read_future)
            .await
            .map_err(|_| NntpError::Timeout)?
    }

    /// Read compressed data as binary until the uncompressed terminator (".\r\n" or ".\n")
    async fn read_compressed_block(&mut self) -> Result<Vec<u8>> {
        use tokio::io::AsyncReadExt;

        let mut all_data = Vec::new();
        let mut buffer = vec![0u8; COMPRESSED_READ_BUFFER_SIZE];

        loop {
            let n = self.stream.read(&mut buffer).await?;
            if n == 0 {
                return Err(NntpError::ConnectionClosed);
            }

            all_data.extend_from_slice(&buffer[..n]);

            if all_data.len() > MAX_COMPRESSED_BLOCK_SIZE {
                return Err(NntpError::InvalidResponse(format!(
                    "Compressed block exceeds maximum size of {} bytes",
                    MAX_COMPRESSED_BLOCK_SIZE
                )));
            }

            if all_data.ends_with(b".\r\n") {
                all_data.truncate(all_data.len() - 3);
                break;
            } else if all_data.ends_with(b".\n") {
                all_data.truncate(all_data.len() - 2);
                break;
            }
        }

        Ok(all_data)
    }

    /// Read a multi-line response as raw binary data (optimized for articles)
    ///
    /// This method is optimized for high-throughput binary data like articles:
    /// - Uses chunked reads instead of line-by-line
    /// - Returns raw bytes instead of Vec<String>
    /// - Avoids UTF-8 validation overhead
    /// - Pre-allocates buffer for reduced allocations
    pub(super) async fn read_multiline_response_binary(
        &mut self,
    ) -> Result<crate::response::NntpBinaryResponse> {
        self.read_multiline_response_binary_with_timeout(MULTILINE_TIMEOUT)
            .await
    }

    /// Read a multi-line response as raw binary with custom timeout
    pub(super) async fn read_multiline_response_binary_with_timeout(
        &mut self,
        timeout_duration: Duration,
    ) -> Result<crate::response::NntpBinaryResponse> {
        use tokio::io::AsyncBufReadExt;

        let read_future = async {
            // Read first line (status) - this is always text
            let mut first_line_bytes = Vec::with_capacity(256);
            self.stream.read_until(b'\n', &mut first_line_bytes).await?;

            if first_line_bytes.is_empty() {
                return Err(NntpError::ConnectionClosed);
            }

            let first_line = String::from_utf8_lossy(&first_line_bytes);
            let first_line = first_line.trim_end();
            trace!("Received: {}", first_line);

            let (code, message) = commands::parse_response_line(first_line)?;

            // If error response, no multi-line data follows
            if code >= 400 {
                return Ok(crate::response::NntpBinaryResponse {
                    code,
                    message,
                    data: vec![],
                });
            }

            // For compressed responses, read and decompress the block
            let response_is_compressed = self.compression_mode == CompressionMode::HeadersOnly
                && message.contains("[COMPRESS=GZIP]");

            if response_is_compressed {
                let all_data = self.read_compressed_block().await?;
                let decompressed = self.maybe_decompress(&all_data);
                return Ok(crate::response::NntpBinaryResponse {
                    code,
                    message,
                    data: decompressed,
                });
            }

            // Optimized binary read: use read_until for efficient buffered I/O
            // but collect bytes directly instead of creating strings
            let mut data = Vec::with_capacity(BINARY_DATA_INITIAL_CAPACITY);

            loop {
                let mut line_bytes = Vec::with_capacity(512);
                self.stream.read_until(b'\n', &mut line_bytes).await?;

                if line_bytes.is_empty() {
                    return Err(NntpError::ConnectionClosed);
                }

                // Check for terminator: line containing only "." (plus CRLF/LF)
                if line_bytes == b".\r\n" || line_bytes == b".\n" {
                    break;
                }

                // Strip trailing \r\n (NNTP line terminator, not part of payload)
                let content_end = if line_bytes.ends_with(b"\r\n") {
                    line_bytes.len() - 2
                } else if line_bytes.ends_with(b"\n") {
                    line_bytes.len() - 1
                } else {
                    line_bytes.len()
                };
                let line_content = &line_bytes[..content_end];

                // Handle dot-stuffing: lines starting with ".." become "."
                if line_content.starts_with(b"..") {
                    data.extend_from_slice(&line_content[1..]);
                } else {
                    data.extend_from_slice(line_content);
                }
            }

            Ok(crate::response::NntpBinaryResponse {
                code,
                message,
                data,
            })
        };

        let result = timeout(timeout_duration, read_future)
            .await
            .map_err(|_| NntpError::Timeout)?;

        // Mark connection as broken if we got invalid data
        if let Err(NntpError::InvalidResponse(_)) = &result {
            self.mark_broken();
        }

        result
    }
}
