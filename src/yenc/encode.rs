use crate::{NntpError, Result};
use crc32fast::Hasher;

/// Encode binary data to yEnc format
///
/// # Arguments
/// * `data` - Binary data to encode (the part data)
/// * `filename` - Original filename
/// * `line_length` - Maximum line length (default 128, max 997)
/// * `part_info` - Optional multi-part information (part number, total parts, begin offset, end offset, total file size)
///
/// # Returns
/// yEnc encoded data as bytes including =ybegin, data lines, and =yend
///
/// # Example
/// ```ignore
/// let data = b"Hello";
/// let encoded = encode(data, "test.bin", 128, None)?;
/// // Can round-trip: decode(encoded)? should give back original data
/// ```
pub fn encode(
    data: &[u8],
    filename: &str,
    line_length: usize,
    part_info: Option<(u32, u32, u64, u64, u64)>, // (part, total_parts, begin, end, total_file_size)
) -> Result<Vec<u8>> {
    // Validate line length
    if line_length == 0 || line_length > 997 {
        return Err(NntpError::InvalidResponse(format!(
            "Invalid line length: {} (must be 1-997)",
            line_length
        )));
    }

    let mut output = Vec::new();

    // Generate =ybegin header
    if let Some((part, total_parts, begin, end, total_file_size)) = part_info {
        // For multi-part files, size in =ybegin header is the TOTAL file size
        output.extend_from_slice(
            format!(
                "=ybegin part={} total={} line={} size={} name={}\r\n",
                part, total_parts, line_length, total_file_size, filename
            )
            .as_bytes(),
        );

        // Generate =ypart header for multi-part files
        output.extend_from_slice(format!("=ypart begin={} end={}\r\n", begin, end).as_bytes());
    } else {
        output.extend_from_slice(
            format!(
                "=ybegin line={} size={} name={}\r\n",
                line_length,
                data.len(),
                filename
            )
            .as_bytes(),
        );
    }

    // Encode data with line breaks
    let encoded_data = encode_data(data, line_length)?;
    output.extend_from_slice(&encoded_data);

    // Calculate CRC32
    let mut hasher = Hasher::new();
    hasher.update(data);
    let crc32 = hasher.finalize();

    // Generate =yend trailer
    if part_info.is_some() {
        // Multi-part: include pcrc32 (part CRC)
        output.extend_from_slice(
            format!("=yend size={} pcrc32={:08x}\r\n", data.len(), crc32).as_bytes(),
        );
    } else {
        // Single-part: include crc32
        output.extend_from_slice(
            format!("=yend size={} crc32={:08x}\r\n", data.len(), crc32).as_bytes(),
        );
    }

    Ok(output)
}

/// Encode binary data with proper escaping and line breaks
///
/// yEnc encoding: output = (input + 42) mod 256
/// Critical bytes that must be escaped:
/// - NUL (0x00)
/// - TAB (0x09) - at line start/end
/// - LF (0x0A)
/// - CR (0x0D)
/// - SPACE (0x20) - at line start/end
/// - '=' (0x3D)
///
/// Escape sequence: = followed by (byte + 64)
fn encode_data(data: &[u8], line_length: usize) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    let mut current_line = Vec::new();

    for &byte in data {
        // Encode: (byte + 42) mod 256
        let encoded = byte.wrapping_add(42);

        // Check if this byte needs escaping
        let needs_escape = is_critical_byte(encoded)
            || (encoded == b'\t' && current_line.is_empty())
            || (encoded == b' ' && current_line.is_empty());

        if needs_escape {
            // Add escape sequence: = followed by (encoded + 64)
            let escaped = encoded.wrapping_add(64);

            // Check if adding escape sequence would exceed line length
            if current_line.len() + 2 > line_length {
                // Flush current line
                output.extend_from_slice(&current_line);
                output.extend_from_slice(b"\r\n");
                current_line.clear();
            }

            current_line.push(b'=');
            current_line.push(escaped);
        } else {
            // Check if we need to handle TAB or SPACE at end of line
            // We need to look ahead to see if this would be the last byte on the line
            let would_end_line = current_line.len() + 1 >= line_length;

            if would_end_line && (encoded == b'\t' || encoded == b' ') {
                // Escape TAB/SPACE at end of line
                if current_line.len() + 2 > line_length {
                    // Not enough room for escape sequence, flush line
                    output.extend_from_slice(&current_line);
                    output.extend_from_slice(b"\r\n");
                    current_line.clear();
                }

                let escaped = encoded.wrapping_add(64);
                current_line.push(b'=');
                current_line.push(escaped);
            } else {
                // Regular byte
                if current_line.len() >= line_length {
                    // Flush current line
                    output.extend_from_slice(&current_line);
                    output.extend_from_slice(b"\r\n");
                    current_line.clear();
                }

                current_line.push(encoded);
            }
        }
    }

    // Flush remaining line
    if !current_line.is_empty() {
        output.extend_from_slice(&current_line);
        output.extend_from_slice(b"\r\n");
    }

    Ok(output)
}

/// Check if a byte is a critical byte that must always be escaped
fn is_critical_byte(byte: u8) -> bool {
    matches!(
        byte,
        0x00 |  // NUL
        0x0A |  // LF
        0x0D |  // CR
        0x3D // '='
    )
}
