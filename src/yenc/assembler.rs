use crate::{NntpError, Result};
use crc32fast::Hasher;
use std::collections::HashMap;

use super::types::YencDecoded;

/// Multi-part yEnc file assembler
///
/// Collects and assembles multi-part yEnc encoded files into a single file.
/// Validates part ranges don't overlap and verifies the final CRC32.
///
/// # Example
/// ```ignore
/// let mut assembler = YencMultipartAssembler::new();
///
/// // Add parts as they're received
/// assembler.add_part(decoded_part1)?;
/// assembler.add_part(decoded_part2)?;
///
/// // Check if complete and assemble
/// if assembler.is_complete() {
///     let final_data = assembler.assemble()?;
///     assert!(assembler.verify_final_crc32(&final_data));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct YencMultipartAssembler {
    /// Expected total number of parts
    total_parts: Option<u32>,
    /// Expected total file size
    total_size: Option<u64>,
    /// Expected filename
    filename: Option<String>,
    /// Expected final CRC32 (from header)
    expected_crc32: Option<u32>,
    /// Collected parts indexed by part number
    parts: HashMap<u32, YencDecoded>,
}

impl YencMultipartAssembler {
    /// Create a new multi-part assembler
    pub fn new() -> Self {
        Self {
            total_parts: None,
            total_size: None,
            filename: None,
            expected_crc32: None,
            parts: HashMap::new(),
        }
    }

    /// Check if a new part's byte range overlaps with any existing part.
    fn check_overlap(&self, part_num: u32, part_info: &super::types::YencPart) -> Result<()> {
        for (existing_num, existing) in &self.parts {
            if let Some(existing_info) = &existing.part {
                let overlaps =
                    !(part_info.end < existing_info.begin || part_info.begin > existing_info.end);
                if overlaps {
                    return Err(NntpError::InvalidResponse(format!(
                        "Part {} range ({}-{}) overlaps with part {} range ({}-{})",
                        part_num,
                        part_info.begin,
                        part_info.end,
                        existing_num,
                        existing_info.begin,
                        existing_info.end
                    )));
                }
            }
        }
        Ok(())
    }

    /// Add a decoded part to the assembler
    ///
    /// # Errors
    /// Returns an error if:
    /// - The part is not a multi-part file
    /// - The part overlaps with an existing part
    /// - The part has inconsistent metadata
    // expect() is used here for invariants that are guaranteed by prior checks (is_multipart, Option state)
    #[allow(clippy::expect_used)]
    pub fn add_part(&mut self, decoded: YencDecoded) -> Result<()> {
        // Validate this is a multi-part file
        if !decoded.is_multipart() {
            return Err(NntpError::InvalidResponse(
                "Cannot add single-part file to multi-part assembler".to_string(),
            ));
        }

        // SAFETY: is_multipart() guarantees both part and total are Some
        let part_num = decoded
            .header
            .part
            .expect("part must be Some after is_multipart check");
        let total = decoded
            .header
            .total
            .expect("total must be Some after is_multipart check");

        // Initialize or validate metadata
        // Note: decoded.header.size is the TOTAL file size, not the part size
        if self.total_parts.is_none() {
            self.total_parts = Some(total);
            self.total_size = Some(decoded.header.size);
            self.filename = Some(decoded.header.name.clone());
            // The crc32 from header is the full file CRC32 (only present in some implementations)
            // For multi-part files, we typically don't have the full file CRC32 in individual parts
            if decoded.trailer.crc32.is_some() {
                self.expected_crc32 = decoded.trailer.crc32;
            }
        } else {
            // Validate consistency
            // SAFETY: total_parts, total_size, and filename are all Some in this else branch
            if let Some(expected_total) = self.total_parts {
                if expected_total != total {
                    return Err(NntpError::InvalidResponse(format!(
                        "Inconsistent total parts: expected {}, got {}",
                        expected_total, total
                    )));
                }
            }
            if let Some(expected_size) = self.total_size {
                if expected_size != decoded.header.size {
                    return Err(NntpError::InvalidResponse(format!(
                        "Inconsistent total size: expected {}, got {}",
                        expected_size, decoded.header.size
                    )));
                }
            }
            if let Some(ref expected_name) = self.filename {
                if expected_name != &decoded.header.name {
                    return Err(NntpError::InvalidResponse(format!(
                        "Inconsistent filename: expected {}, got {}",
                        expected_name, decoded.header.name
                    )));
                }
            }
        }

        // Validate part CRC32
        if !decoded.verify_crc32() {
            return Err(NntpError::InvalidResponse(format!(
                "Part {} CRC32 verification failed",
                part_num
            )));
        }

        // Check for overlapping ranges
        if let Some(part_info) = &decoded.part {
            self.check_overlap(part_num, part_info)?;
        }

        // Check if part already exists
        if self.parts.contains_key(&part_num) {
            return Err(NntpError::InvalidResponse(format!(
                "Part {} already added",
                part_num
            )));
        }

        // Add the part
        self.parts.insert(part_num, decoded);

        Ok(())
    }

    /// Check if all parts have been received
    pub fn is_complete(&self) -> bool {
        if let Some(total) = self.total_parts {
            self.parts.len() == total as usize
        } else {
            false
        }
    }

    /// Get the number of parts received
    pub fn parts_received(&self) -> usize {
        self.parts.len()
    }

    /// Get the total number of expected parts
    pub fn total_parts(&self) -> Option<u32> {
        self.total_parts
    }

    /// Get list of missing part numbers
    pub fn missing_parts(&self) -> Vec<u32> {
        if let Some(total) = self.total_parts {
            (1..=total)
                .filter(|n| !self.parts.contains_key(n))
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Assemble all parts into final file data
    ///
    /// # Errors
    /// Returns an error if:
    /// - Not all parts have been received
    /// - Parts have gaps or overlaps
    pub fn assemble(&self) -> Result<Vec<u8>> {
        if !self.is_complete() {
            return Err(NntpError::InvalidResponse(format!(
                "Cannot assemble: missing {} parts",
                self.total_parts.unwrap_or(0) as usize - self.parts.len()
            )));
        }

        let total_size = self
            .total_size
            .ok_or_else(|| NntpError::InvalidResponse("No parts added yet".to_string()))?;

        let mut result = vec![0u8; total_size as usize];

        // Sort parts by part number and assemble
        let mut sorted_parts: Vec<_> = self.parts.iter().collect();
        sorted_parts.sort_by_key(|(num, _)| *num);

        for (_part_num, decoded) in sorted_parts {
            if let Some(part_info) = &decoded.part {
                // yEnc uses 1-based offsets
                let begin = (part_info.begin - 1) as usize;
                let end = part_info.end as usize;

                // Validate range
                if end > total_size as usize {
                    return Err(NntpError::InvalidResponse(format!(
                        "Part range {}-{} exceeds total size {}",
                        part_info.begin, part_info.end, total_size
                    )));
                }

                let expected_len = end - begin;
                if decoded.data.len() != expected_len {
                    return Err(NntpError::InvalidResponse(format!(
                        "Part data length {} doesn't match range {}-{} (expected {})",
                        decoded.data.len(),
                        part_info.begin,
                        part_info.end,
                        expected_len
                    )));
                }

                // Copy data to correct offset
                result[begin..end].copy_from_slice(&decoded.data);
            } else {
                return Err(NntpError::InvalidResponse(
                    "Part missing part info".to_string(),
                ));
            }
        }

        Ok(result)
    }

    /// Verify the final CRC32 of assembled data
    pub fn verify_final_crc32(&self, data: &[u8]) -> bool {
        if let Some(expected) = self.expected_crc32 {
            let mut hasher = Hasher::new();
            hasher.update(data);
            let calculated = hasher.finalize();
            calculated == expected
        } else {
            // No expected CRC32 to verify against
            false
        }
    }

    /// Get expected filename
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Get expected total size
    pub fn expected_size(&self) -> Option<u64> {
        self.total_size
    }
}

impl Default for YencMultipartAssembler {
    fn default() -> Self {
        Self::new()
    }
}
