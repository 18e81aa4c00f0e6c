//! Trait seams for the collaborators tasks call into but don't own: the
//! header/metadata database, the on-disk article and encode caches, and the
//! user-visible log. Production wiring lives outside this crate; the
//! `InMemory*` types here exist so tasks and the queue can be exercised in
//! tests without a real database or filesystem.

use crate::quark::Quark;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// One parsed XOVER header record, handed to [`DataStore::xover_add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XoverRecord {
    pub number: u64,
    pub subject: String,
    pub author: String,
    pub date: String,
    pub message_id: String,
    pub references: String,
    pub bytes: u64,
    pub lines: u64,
    pub xref: String,
}

/// The header/metadata database. Tasks write parsed records here; they
/// never read the database back out (that's the GUI's job).
pub trait DataStore: Send + Sync {
    /// Record one parsed overview line for `group`.
    fn xover_add(&self, group: &Quark, entry: XoverRecord);
    /// Record a newsgroup discovered via `LIST NEWSGROUPS`.
    fn group_add(&self, name: &str, description: &str);
    /// Record whether `server` answered an `XZVER` probe with `224`.
    fn set_supports_xzver(&self, server: &Quark, supported: bool);
    /// Whether `server` is known to answer `XZVER`; `false` until a probe
    /// has recorded otherwise.
    fn supports_xzver(&self, server: &Quark) -> bool;
}

/// Opaque blob store for article bodies, keyed by message-id.
pub trait ArticleCache: Send + Sync {
    /// True if `mid`'s body is already cached.
    fn contains(&self, mid: &str) -> bool;
    /// Store `mid`'s body.
    fn add(&self, mid: &str, bytes: Vec<u8>);
    /// Fetch `mid`'s body, if cached.
    fn get(&self, mid: &str) -> Option<Vec<u8>>;
    /// Mark `mid` as in use by a task, so it isn't evicted mid-fetch.
    fn reserve(&self, mid: &str);
    /// Release a prior [`ArticleCache::reserve`].
    fn release(&self, mid: &str);
}

/// Opaque blob store for encoded upload parts, keyed by generated
/// message-id.
pub trait EncodeCache: Send + Sync {
    /// Store an encoded part body.
    fn add(&self, mid: &str, bytes: Vec<u8>);
    /// Fetch an encoded part body.
    fn get(&self, mid: &str) -> Option<Vec<u8>>;
}

/// Severity for [`Log::log`], ordered least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Info,
    Warn,
    Urgent,
}

/// The single user-visible log every task and the queue write through.
/// `Urgent` entries are expected to set a flag the UI observes, per the
/// error design's "urgent errors set a flag" rule; this trait only carries
/// the message, the flag-setting is the implementation's job.
pub trait Log: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

/// Default [`Log`] that forwards to `tracing`, matching how the rest of the
/// crate reports diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl Log for TracingLog {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Warn => tracing::warn!("{message}"),
            LogLevel::Urgent => tracing::error!("{message}"),
        }
    }
}

/// In-memory [`DataStore`] for tests.
#[derive(Debug, Default)]
pub struct InMemoryDataStore {
    pub xover: Mutex<HashMap<Quark, Vec<XoverRecord>>>,
    pub groups: Mutex<HashMap<String, String>>,
    pub xzver_support: Mutex<HashMap<Quark, bool>>,
}

impl InMemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataStore for InMemoryDataStore {
    fn xover_add(&self, group: &Quark, entry: XoverRecord) {
        self.xover.lock().unwrap().entry(group.clone()).or_default().push(entry);
    }

    fn group_add(&self, name: &str, description: &str) {
        self.groups.lock().unwrap().insert(name.to_string(), description.to_string());
    }

    fn set_supports_xzver(&self, server: &Quark, supported: bool) {
        self.xzver_support.lock().unwrap().insert(server.clone(), supported);
    }

    fn supports_xzver(&self, server: &Quark) -> bool {
        self.xzver_support.lock().unwrap().get(server).copied().unwrap_or(false)
    }
}

/// In-memory [`ArticleCache`] for tests.
#[derive(Debug, Default)]
pub struct InMemoryArticleCache {
    bodies: Mutex<HashMap<String, Vec<u8>>>,
    reserved: Mutex<HashSet<String>>,
}

impl InMemoryArticleCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArticleCache for InMemoryArticleCache {
    fn contains(&self, mid: &str) -> bool {
        self.bodies.lock().unwrap().contains_key(mid)
    }

    fn add(&self, mid: &str, bytes: Vec<u8>) {
        self.bodies.lock().unwrap().insert(mid.to_string(), bytes);
    }

    fn get(&self, mid: &str) -> Option<Vec<u8>> {
        self.bodies.lock().unwrap().get(mid).cloned()
    }

    fn reserve(&self, mid: &str) {
        self.reserved.lock().unwrap().insert(mid.to_string());
    }

    fn release(&self, mid: &str) {
        self.reserved.lock().unwrap().remove(mid);
    }
}

/// In-memory [`EncodeCache`] for tests.
#[derive(Debug, Default)]
pub struct InMemoryEncodeCache {
    parts: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryEncodeCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EncodeCache for InMemoryEncodeCache {
    fn add(&self, mid: &str, bytes: Vec<u8>) {
        self.parts.lock().unwrap().insert(mid.to_string(), bytes);
    }

    fn get(&self, mid: &str) -> Option<Vec<u8>> {
        self.parts.lock().unwrap().get(mid).cloned()
    }
}
