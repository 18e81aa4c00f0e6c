//! NZB file format parser and generator
//!
//! NZB is an XML-based file format used to describe Usenet binary posts.
//! It contains metadata and segment references for efficient binary downloads.
//!
//! Reference: https://sabnzbd.org/wiki/extra/nzb-spec

use crate::{NntpError, Result};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::collections::{HashMap, HashSet};
use std::io::Cursor;

/// NZB file containing metadata and file references
#[derive(Debug, Clone, PartialEq)]
pub struct Nzb {
    /// Metadata from <head> section (e.g., title, password, tag, category)
    pub meta: HashMap<String, String>,
    /// List of files described in this NZB
    pub files: Vec<NzbFile>,
}

/// A single file entry in an NZB
#[derive(Debug, Clone, PartialEq)]
pub struct NzbFile {
    /// Poster name/email
    pub poster: String,
    /// Unix timestamp of posting
    pub date: i64,
    /// Subject line
    pub subject: String,
    /// Save directory for this file's decoded output, if any. This is a
    /// Pan-specific extension to the NZB format (not part of the newzBin
    /// DTD); tasks without a save path omit `<path>` on write.
    pub path: Option<String>,
    /// Newsgroups where this file was posted
    pub groups: Vec<String>,
    /// Segments (parts) of this file
    pub segments: Vec<NzbSegment>,
}

/// A segment (part) of a file
#[derive(Debug, Clone, PartialEq)]
pub struct NzbSegment {
    /// Size of this segment in bytes
    pub bytes: u64,
    /// Segment number (1-based)
    pub number: u32,
    /// Message-ID for retrieving this segment
    pub message_id: String,
}

impl NzbFile {
    /// Calculate total size of all segments
    pub fn total_bytes(&self) -> u64 {
        self.segments.iter().map(|s| s.bytes).sum()
    }

    /// Validate segment numbering
    ///
    /// Returns an error if:
    /// - Segments are not sequential starting from 1
    /// - There are duplicate segment numbers
    /// - Segments are empty
    pub fn validate_segments(&self) -> Result<()> {
        if self.segments.is_empty() {
            return Err(NntpError::InvalidResponse(
                "File has no segments".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut max_number = 0u32;

        for seg in &self.segments {
            if seg.number < 1 {
                return Err(NntpError::InvalidResponse(format!(
                    "Invalid segment number: {}",
                    seg.number
                )));
            }

            if !seen.insert(seg.number) {
                return Err(NntpError::InvalidResponse(format!(
                    "Duplicate segment number: {}",
                    seg.number
                )));
            }

            max_number = max_number.max(seg.number);
        }

        // Check all numbers from 1 to max_number are present
        for i in 1..=max_number {
            if !seen.contains(&i) {
                return Err(NntpError::InvalidResponse(format!(
                    "Missing segment number: {}",
                    i
                )));
            }
        }

        Ok(())
    }

    /// Get missing segment numbers (if any)
    pub fn missing_segments(&self) -> Vec<u32> {
        if self.segments.is_empty() {
            return vec![];
        }

        let mut seen = HashSet::new();
        let mut max_number = 0u32;

        for seg in &self.segments {
            seen.insert(seg.number);
            max_number = max_number.max(seg.number);
        }

        let mut missing = Vec::new();

        for i in 1..=max_number {
            if !seen.contains(&i) {
                missing.push(i);
            }
        }

        missing
    }
}

impl Nzb {
    /// Calculate total size of all files
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.total_bytes()).sum()
    }

    /// Validate all files in the NZB
    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            return Err(NntpError::InvalidResponse("NZB has no files".to_string()));
        }

        for (i, file) in self.files.iter().enumerate() {
            file.validate_segments()
                .map_err(|e| NntpError::InvalidResponse(format!("File {}: {}", i, e)))?;
        }

        Ok(())
    }

    /// Generate XML string from NZB structure
    ///
    /// Creates a properly formatted NZB XML file with all metadata and file references.
    ///
    /// # Returns
    /// XML string representation of this NZB
    ///
    /// # Example
    /// ```
    /// use newsflow_engine::{Nzb, NzbFile, NzbSegment};
    /// use std::collections::HashMap;
    ///
    /// let nzb = Nzb {
    ///     meta: HashMap::from([("title".to_string(), "Test File".to_string())]),
    ///     files: vec![NzbFile {
    ///         poster: "user@example.com".to_string(),
    ///         date: 1234567890,
    ///         subject: "Test [1/1]".to_string(),
    ///         path: None,
    ///         groups: vec!["alt.binaries.test".to_string()],
    ///         segments: vec![NzbSegment {
    ///             bytes: 768000,
    ///             number: 1,
    ///             message_id: "part1@example.com".to_string(),
    ///         }],
    ///     }],
    /// };
    ///
    /// let xml = nzb.to_xml();
    /// assert!(xml.contains("<nzb"));
    /// assert!(xml.contains("Test File"));
    /// ```
    pub fn to_xml(&self) -> String {
        // Build the XML body first with quick-xml
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        // Root <nzb> element with namespace
        let mut nzb_elem = BytesStart::new("nzb");
        nzb_elem.push_attribute(("xmlns", "http://www.newzbin.com/DTD/2003/nzb"));
        writer.write_event(Event::Start(nzb_elem)).unwrap();

        // <head> section if we have metadata
        if !self.meta.is_empty() {
            writer
                .write_event(Event::Start(BytesStart::new("head")))
                .unwrap();

            for (key, value) in &self.meta {
                let mut meta_elem = BytesStart::new("meta");
                meta_elem.push_attribute(("type", key.as_str()));
                writer.write_event(Event::Start(meta_elem)).unwrap();

                // BytesText automatically escapes XML entities
                writer
                    .write_event(Event::Text(BytesText::new(value)))
                    .unwrap();

                writer
                    .write_event(Event::End(BytesEnd::new("meta")))
                    .unwrap();
            }

            writer
                .write_event(Event::End(BytesEnd::new("head")))
                .unwrap();
        }

        // <file> elements
        for file in &self.files {
            let mut file_elem = BytesStart::new("file");
            // push_attribute automatically escapes, so don't manually escape
            file_elem.push_attribute(("poster", file.poster.as_str()));
            file_elem.push_attribute(("date", file.date.to_string().as_str()));
            file_elem.push_attribute(("subject", file.subject.as_str()));
            writer.write_event(Event::Start(file_elem)).unwrap();

            // <path>, Pan extension, omitted when there's no save directory
            if let Some(path) = &file.path {
                writer
                    .write_event(Event::Start(BytesStart::new("path")))
                    .unwrap();
                writer
                    .write_event(Event::Text(BytesText::new(path)))
                    .unwrap();
                writer
                    .write_event(Event::End(BytesEnd::new("path")))
                    .unwrap();
            }

            // <groups>
            writer
                .write_event(Event::Start(BytesStart::new("groups")))
                .unwrap();
            for group in &file.groups {
                writer
                    .write_event(Event::Start(BytesStart::new("group")))
                    .unwrap();
                // BytesText automatically escapes
                writer
                    .write_event(Event::Text(BytesText::new(group)))
                    .unwrap();
                writer
                    .write_event(Event::End(BytesEnd::new("group")))
                    .unwrap();
            }
            writer
                .write_event(Event::End(BytesEnd::new("groups")))
                .unwrap();

            // <segments>
            writer
                .write_event(Event::Start(BytesStart::new("segments")))
                .unwrap();
            for segment in &file.segments {
                let mut seg_elem = BytesStart::new("segment");
                seg_elem.push_attribute(("bytes", segment.bytes.to_string().as_str()));
                seg_elem.push_attribute(("number", segment.number.to_string().as_str()));
                writer.write_event(Event::Start(seg_elem)).unwrap();

                // BytesText automatically escapes
                writer
                    .write_event(Event::Text(BytesText::new(&segment.message_id)))
                    .unwrap();

                writer
                    .write_event(Event::End(BytesEnd::new("segment")))
                    .unwrap();
            }
            writer
                .write_event(Event::End(BytesEnd::new("segments")))
                .unwrap();

            writer
                .write_event(Event::End(BytesEnd::new("file")))
                .unwrap();
        }

        // Close root element
        writer
            .write_event(Event::End(BytesEnd::new("nzb")))
            .unwrap();

        let body = writer.into_inner().into_inner();
        let body_str = String::from_utf8(body).unwrap();

        // Prepend XML declaration and DOCTYPE
        let mut result = String::new();
        result.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        result.push_str("<!DOCTYPE nzb PUBLIC \"-//newzBin//DTD NZB 1.1//EN\" \"http://www.newzbin.com/DTD/nzb/nzb-1.1.dtd\">\n");
        result.push_str(&body_str);

        result
    }
}

/// Parse an NZB file from XML string
///
/// # Arguments
/// * `xml` - NZB file contents as string
///
/// # Returns
/// Parsed `Nzb` structure or error
///
/// # Example
/// ```
/// use newsflow_engine::parse_nzb;
///
/// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
/// <!DOCTYPE nzb PUBLIC "-//newzBin//DTD NZB 1.1//EN" "http://www.newzbin.com/DTD/nzb/nzb-1.1.dtd">
/// <nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
///   <head>
///     <meta type="title">Example File</meta>
///   </head>
///   <file poster="user@example.com" date="1234567890" subject="Example [1/1]">
///     <groups>
///       <group>alt.binaries.test</group>
///     </groups>
///     <segments>
///       <segment bytes="768000" number="1">part1of1@example.com</segment>
///     </segments>
///   </file>
/// </nzb>"#;
///
/// let nzb = parse_nzb(xml).unwrap();
/// assert_eq!(nzb.files.len(), 1);
/// assert_eq!(nzb.files[0].segments.len(), 1);
/// ```
pub fn parse_nzb(xml: &str) -> Result<Nzb> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut nzb = Nzb {
        meta: HashMap::new(),
        files: Vec::new(),
    };

    let mut in_head = false;
    let mut in_file = false;
    let mut in_groups = false;
    let mut in_segments = false;
    let mut in_path = false;
    let mut in_meta = false;
    let mut meta_type = String::new();

    let mut current_file: Option<NzbFile> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                match name.as_ref() {
                    b"head" => in_head = true,
                    b"meta" if in_head => {
                        in_meta = true;
                        // Extract type attribute
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"type" {
                                meta_type = String::from_utf8_lossy(&attr.value).to_string();
                            }
                        }
                    }
                    b"file" => {
                        in_file = true;
                        let mut poster = String::new();
                        let mut date = 0i64;
                        let mut subject = String::new();

                        // Extract attributes
                        for attr in e.attributes().flatten() {
                            let key = attr.key.as_ref();
                            let value = attr.unescape_value().unwrap_or_default().to_string();

                            match key {
                                b"poster" => poster = value,
                                b"date" => date = value.parse().unwrap_or(0),
                                b"subject" => subject = value,
                                _ => {}
                            }
                        }

                        current_file = Some(NzbFile {
                            poster,
                            date,
                            subject,
                            path: None,
                            groups: Vec::new(),
                            segments: Vec::new(),
                        });
                    }
                    b"path" if in_file => in_path = true,
                    b"groups" if in_file => in_groups = true,
                    b"segments" if in_file => in_segments = true,
                    b"segment" if in_segments => {
                        // Will handle in Text event
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                // Handle self-closing tags if needed
                let name = e.name();
                if name.as_ref() == b"segment" && in_segments {
                    if let Some(ref mut _file) = current_file {
                        let mut _bytes = 0u64;
                        let mut _number = 0u32;

                        for attr in e.attributes().flatten() {
                            let key = attr.key.as_ref();
                            let value = String::from_utf8_lossy(&attr.value).to_string();

                            match key {
                                b"bytes" => _bytes = value.parse().unwrap_or(0),
                                b"number" => _number = value.parse().unwrap_or(0),
                                _ => {}
                            }
                        }

                        // Empty segment tag, no message-id - skip
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                match name.as_ref() {
                    b"head" => in_head = false,
                    b"meta" => {
                        in_meta = false;
                        meta_type.clear();
                    }
                    b"file" => {
                        in_file = false;
                        if let Some(file) = current_file.take() {
                            nzb.files.push(file);
                        }
                    }
                    b"path" => in_path = false,
                    b"groups" => in_groups = false,
                    b"segments" => in_segments = false,
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default().trim().to_string();

                if in_meta && !meta_type.is_empty() {
                    nzb.meta.insert(meta_type.clone(), text);
                } else if in_path {
                    if let Some(ref mut file) = current_file {
                        if !text.is_empty() {
                            file.path = Some(text);
                        }
                    }
                } else if in_groups {
                    if let Some(ref mut file) = current_file {
                        if !text.is_empty() {
                            file.groups.push(text);
                        }
                    }
                } else if in_segments {
                    // This is the message-id inside <segment>
                    // We need to get attributes from the parent Start event
                    // This is handled differently - we'll process on End
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(NntpError::InvalidResponse(format!(
                    "XML parse error: {}",
                    e
                )))
            }
            _ => {}
        }

        buf.clear();
    }

    // Second pass to get segment data properly
    parse_nzb_segments(&mut nzb, xml)?;

    Ok(nzb)
}

/// Helper to parse segments (second pass needed for message-id extraction)
fn parse_nzb_segments(nzb: &mut Nzb, xml: &str) -> Result<()> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut file_index = 0;
    let mut in_segments = false;
    let mut buf = Vec::new();

    let mut segment_bytes = 0u64;
    let mut segment_number = 0u32;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                match name.as_ref() {
                    b"file" => {
                        // Do nothing, we're just tracking
                    }
                    b"segments" => in_segments = true,
                    b"segment" if in_segments => {
                        // Extract attributes
                        segment_bytes = 0;
                        segment_number = 0;

                        for attr in e.attributes().flatten() {
                            let key = attr.key.as_ref();
                            let value = String::from_utf8_lossy(&attr.value).to_string();

                            match key {
                                b"bytes" => segment_bytes = value.parse().unwrap_or(0),
                                b"number" => segment_number = value.parse().unwrap_or(0),
                                _ => {}
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) if in_segments => {
                let message_id = e.unescape().unwrap_or_default().trim().to_string();

                if !message_id.is_empty() && segment_number > 0 && file_index < nzb.files.len() {
                    nzb.files[file_index].segments.push(NzbSegment {
                        bytes: segment_bytes,
                        number: segment_number,
                        message_id,
                    });
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                match name.as_ref() {
                    b"file" => file_index += 1,
                    b"segments" => in_segments = false,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(NntpError::InvalidResponse(format!(
                    "XML parse error in segments: {}",
                    e
                )))
            }
            _ => {}
        }

        buf.clear();
    }

    Ok(())
}
