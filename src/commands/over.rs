//! OVER/XOVER commands and overview data parsing

use crate::error::{NntpError, Result};
use crate::response::NntpResponse;

/// Build XOVER command for fetching article overview data
pub fn xover(range: &str) -> String {
    format!("XOVER {}\r\n", range)
}

/// Build XZVER command: the zlib-compressed, yEnc-encoded overview
/// extension some servers answer with a `224` instead of rejecting.
pub fn xzver(range: &str) -> String {
    format!("XZVER {}\r\n", range)
}

/// Build OVER command (RFC 3977 ยง8.3)
///
/// Retrieves overview data (same as XOVER but RFC 3977 standard name).
pub fn over(range: &str) -> String {
    format!("OVER {}\r\n", range)
}

/// Build OVER command for current article
pub fn over_current() -> &'static str {
    "OVER\r\n"
}

/// Build LIST OVERVIEW.FMT command (RFC 3977 ยง8.4)
///
/// Lists the format of overview data.
pub fn list_overview_fmt() -> &'static str {
    "LIST OVERVIEW.FMT\r\n"
}

/// XOVER entry structure containing article metadata
#[derive(Debug, Clone)]
pub struct XoverEntry {
    /// Article number within the newsgroup
    pub article_number: u64,
    /// Article subject line
    pub subject: String,
    /// Article author (From header)
    pub author: String,
    /// Article date string
    pub date: String,
    /// Unique message ID
    pub message_id: String,
    /// References to parent articles (for threading)
    pub references: String,
    /// Article size in bytes
    pub bytes: usize,
    /// Number of lines in the article
    pub lines: usize,
}

/// Parse XOVER response line into components
///
/// Format: "article-number\tsubject\tauthor\tdate\tmessage-id\treferences\tbytes\tlines\txref"
pub fn parse_xover_line(line: &str) -> Result<XoverEntry> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < 8 {
        return Err(NntpError::InvalidResponse(line.to_string()));
    }

    Ok(XoverEntry {
        article_number: parts[0].parse().unwrap_or(0),
        subject: parts[1].to_string(),
        author: parts[2].to_string(),
        date: parts[3].to_string(),
        message_id: parts[4].to_string(),
        references: parts[5].to_string(),
        bytes: parts[6].parse().unwrap_or(0),
        lines: parts[7].parse().unwrap_or(0),
    })
}

/// Parse an XOVER/OVER line the way [`crate::task::XoverTask`] needs it: a
/// 9th xref field is read if present and fabricated from `server`/`group`
/// otherwise, and lines missing number/subject/author/date/message-id, or
/// whose message-id doesn't start with `<`, are rejected so the task can
/// drop them silently instead of caching garbage.
pub fn parse_xover_line_for_store(
    line: &str,
    server: &str,
    group: &str,
) -> Result<crate::store::XoverRecord> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < 8 {
        return Err(NntpError::InvalidResponse(line.to_string()));
    }

    let article_number: u64 = parts[0]
        .parse()
        .map_err(|_| NntpError::InvalidResponse(line.to_string()))?;
    let subject = parts[1];
    let author = parts[2];
    let date = parts[3];
    let message_id = parts[4];
    if subject.is_empty() || author.is_empty() || date.is_empty() || !message_id.starts_with('<') {
        return Err(NntpError::InvalidResponse(line.to_string()));
    }

    let xref = parts
        .get(8)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("{server} {group}:{article_number}"));

    Ok(crate::store::XoverRecord {
        number: article_number,
        subject: subject.to_string(),
        author: author.to_string(),
        date: date.to_string(),
        message_id: message_id.to_string(),
        references: parts[5].to_string(),
        bytes: parts[6].parse().unwrap_or(0),
        lines: parts[7].parse().unwrap_or(0),
        xref,
    })
}

/// Parse LIST OVERVIEW.FMT response into field names
///
/// Format: One field name per line, in order of OVER/XOVER output
/// Example lines: "Subject:", "From:", ":bytes", "Xref:full"
///
/// RFC 3977 Section 8.4
pub fn parse_list_overview_fmt_response(response: NntpResponse) -> Result<Vec<String>> {
    if !response.is_success() {
        return Err(NntpError::Protocol {
            code: response.code,
            message: response.message,
        });
    }

    // Each line is a field name - return as-is for maximum compatibility
    // The caller can parse colons and metadata markers as needed
    Ok(response.lines)
}
