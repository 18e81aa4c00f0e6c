//! uuencode binary encoding/decoding for Usenet.
//!
//! Older binary posts on Usenet predate yEnc and use the classic Unix
//! uuencode format: a `begin <mode> <name>` header, data lines each prefixed
//! with a length byte, and an `end` trailer. Three input bytes become four
//! printable characters by packing them into 6-bit groups and adding 0x20;
//! a 0x00 group is encoded as backtick (0x60) rather than space so mail and
//! news transports that strip trailing whitespace don't corrupt the line.
//!
//! Structured the same way as [`crate::yenc`]: a header type, a decode
//! function, and an encode function.

use crate::{NntpError, Result};

/// Default number of source bytes per encoded line (the traditional uuencode
/// line length).
pub const BYTES_PER_LINE: usize = 45;

/// Parsed `begin` line of a uuencoded block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UuHeader {
    /// Unix permission mode, e.g. `644`.
    pub mode: u32,
    /// Original filename.
    pub name: String,
}

/// Result of decoding a uuencoded block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UuDecoded {
    /// The parsed `begin` line.
    pub header: UuHeader,
    /// Decoded binary payload.
    pub data: Vec<u8>,
}

fn encode_char(six_bits: u8) -> u8 {
    if six_bits == 0 {
        b'`'
    } else {
        (six_bits & 0x3F) + 0x20
    }
}

fn decode_char(c: u8) -> Result<u8> {
    match c {
        b'`' | b' ' => Ok(0),
        0x21..=0x5F => Ok(c - 0x20),
        _ => Err(NntpError::InvalidResponse(format!("invalid uuencode character {c:#x}"))),
    }
}

fn encode_line(chunk: &[u8], out: &mut String) {
    out.push(encode_char(chunk.len() as u8) as char);
    for triple in chunk.chunks(3) {
        let b0 = triple[0];
        let b1 = *triple.get(1).unwrap_or(&0);
        let b2 = *triple.get(2).unwrap_or(&0);
        out.push(encode_char(b0 >> 2) as char);
        out.push(encode_char(((b0 << 4) | (b1 >> 4)) & 0x3F) as char);
        out.push(encode_char(((b1 << 2) | (b2 >> 6)) & 0x3F) as char);
        out.push(encode_char(b2 & 0x3F) as char);
    }
    out.push('\n');
}

/// Encode `data` as a full uuencoded block: `begin`, data lines, `end`.
#[must_use]
pub fn encode(data: &[u8], name: &str, mode: u32) -> String {
    let mut out = String::new();
    out.push_str(&format!("begin {mode:o} {name}\n"));
    for chunk in data.chunks(BYTES_PER_LINE) {
        encode_line(chunk, &mut out);
    }
    out.push_str("`\nend\n");
    out
}

fn decode_line(line: &str) -> Result<Vec<u8>> {
    let bytes = line.as_bytes();
    if bytes.is_empty() {
        return Err(NntpError::InvalidResponse("empty uuencode line".to_string()));
    }
    let length = decode_char(bytes[0])? as usize;
    let mut out = Vec::with_capacity(length);
    let body = &bytes[1..];
    for group in body.chunks(4) {
        if group.len() < 4 && out.len() >= length {
            break;
        }
        let c0 = decode_char(group[0])?;
        let c1 = decode_char(*group.get(1).unwrap_or(&b'`'))?;
        let c2 = decode_char(*group.get(2).unwrap_or(&b'`'))?;
        let c3 = decode_char(*group.get(3).unwrap_or(&b'`'))?;
        out.push((c0 << 2) | (c1 >> 4));
        out.push((c1 << 4) | (c2 >> 2));
        out.push((c2 << 6) | c3);
    }
    out.truncate(length);
    Ok(out)
}

/// Decode a full uuencoded block (`begin` through `end`).
pub fn decode(input: &str) -> Result<UuDecoded> {
    let mut lines = input.lines();

    let begin_line = lines
        .find(|l| l.starts_with("begin "))
        .ok_or_else(|| NntpError::InvalidResponse("missing uuencode begin line".to_string()))?;

    let mut parts = begin_line.splitn(3, ' ');
    parts.next();
    let mode_str = parts
        .next()
        .ok_or_else(|| NntpError::InvalidResponse("malformed uuencode begin line".to_string()))?;
    let name = parts
        .next()
        .ok_or_else(|| NntpError::InvalidResponse("malformed uuencode begin line".to_string()))?
        .trim()
        .to_string();
    let mode = u32::from_str_radix(mode_str, 8)
        .map_err(|_| NntpError::InvalidResponse(format!("invalid uuencode mode {mode_str}")))?;

    let mut data = Vec::new();
    for line in lines {
        if line == "end" {
            break;
        }
        if line.is_empty() {
            continue;
        }
        let decoded_len = decode_char(line.as_bytes()[0])?;
        if decoded_len == 0 {
            continue;
        }
        data.extend(decode_line(line)?);
    }

    Ok(UuDecoded { header: UuHeader { mode, name }, data })
}
