//! NNTP error types

use thiserror::Error;

/// NNTP protocol and connection errors
#[derive(Error, Debug)]
pub enum NntpError {
    /// IO error during network operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TLS error during secure connection
    #[error("TLS error: {0}")]
    Tls(String),

    /// Connection timeout
    #[error("Connection timeout")]
    Timeout,

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// NNTP protocol error with response code
    #[error("NNTP error {code}: {message}")]
    Protocol {
        /// NNTP response code (e.g., 411, 430, 502)
        code: u16,
        /// Error message from server
        message: String,
    },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// No such newsgroup
    #[error("No such newsgroup: {0}")]
    NoSuchGroup(String),

    /// No such article
    #[error("No such article: {0}")]
    NoSuchArticle(String),

    /// No newsgroup selected
    #[error("No newsgroup selected")]
    NoGroupSelected,

    /// Invalid article number
    #[error("Invalid article number")]
    InvalidArticleNumber,

    /// Posting not permitted
    #[error("Posting not permitted")]
    PostingNotPermitted,

    /// Posting failed
    #[error("Posting failed: {0}")]
    PostingFailed(String),

    /// Article not wanted (IHAVE rejected)
    #[error("Article not wanted")]
    ArticleNotWanted,

    /// Transfer not possible; try again later
    #[error("Transfer not possible: {0}")]
    TransferNotPossible(String),

    /// Transfer rejected; do not retry
    #[error("Transfer rejected: {0}")]
    TransferRejected(String),

    /// Encryption required for authentication
    #[error("Encryption required: {0}")]
    EncryptionRequired(String),

    /// Connection closed unexpectedly
    #[error("Connection closed")]
    ConnectionClosed,

    /// UTF-8 decoding error
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias using NntpError
pub type Result<T> = std::result::Result<T, NntpError>;

/// Health of a task or server as seen by the queue.
///
/// Coarser than [`NntpError`]: the queue only needs to decide whether to
/// retry on another server, log and move on, or stop accepting new work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Health {
    /// Nothing wrong.
    Ok,
    /// Server rejected a command (bad group, missing article, protocol
    /// error). Specific to this task; other tasks on the same server are
    /// unaffected.
    ErrCommand,
    /// Connection-level failure (timeout, reset, TLS handshake failure).
    /// Logged, not surfaced, per the error design: a flaky server is
    /// expected and the pool will retry on reconnect.
    ErrNetwork,
    /// Local failure (disk I/O, permissions, decode/encode mismatch).
    /// Surfaced to the queue/user: this is not the server's fault.
    ErrLocal,
    /// Out of disk space. Surfaced to the queue, which takes itself
    /// offline rather than churn through every queued task.
    ErrNoSpace,
}

impl Health {
    /// Worst of two health values, where `ErrNoSpace` > `ErrLocal` >
    /// `ErrCommand` > `ErrNetwork` > `Ok`. Used to fold per-segment health
    /// into a single task-level health.
    #[must_use]
    pub fn worse(self, other: Health) -> Health {
        fn rank(h: Health) -> u8 {
            match h {
                Health::Ok => 0,
                Health::ErrNetwork => 1,
                Health::ErrCommand => 2,
                Health::ErrLocal => 3,
                Health::ErrNoSpace => 4,
            }
        }
        if rank(other) > rank(self) { other } else { self }
    }
}

impl From<&NntpError> for Health {
    fn from(err: &NntpError) -> Health {
        match err {
            NntpError::Io(_) | NntpError::Tls(_) | NntpError::Timeout | NntpError::ConnectionClosed => {
                Health::ErrNetwork
            }
            NntpError::Protocol { code, .. } => match code {
                480..=489 => Health::ErrCommand,
                400..=499 => Health::ErrNetwork,
                _ => Health::ErrCommand,
            },
            NntpError::AuthFailed(_)
            | NntpError::NoSuchGroup(_)
            | NntpError::NoSuchArticle(_)
            | NntpError::NoGroupSelected
            | NntpError::InvalidArticleNumber
            | NntpError::PostingNotPermitted
            | NntpError::PostingFailed(_)
            | NntpError::ArticleNotWanted
            | NntpError::TransferRejected(_)
            | NntpError::EncryptionRequired(_)
            | NntpError::InvalidResponse(_) => Health::ErrCommand,
            NntpError::TransferNotPossible(_) => Health::ErrNetwork,
            NntpError::Utf8(_) | NntpError::Other(_) => Health::ErrLocal,
        }
    }
}
