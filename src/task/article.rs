//! Binary download task: fetch a set of message-id segments, yEnc-decode
//! them, and hand the result to the article cache.
//!
//! Grounded on Pan's `TaskArticle`: a `Needed` queue of outstanding parts
//! and a bitflag `SaveMode` deciding whether raw bodies, decoded output, or
//! both get kept.

use crate::client::NntpClient;
use crate::error::{Health, NntpError};
use crate::progress::Progress;
use crate::quark::Quark;
use crate::store::ArticleCache;
use crate::worker::Worker;
use crate::yenc;
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tracing::warn;

/// Bitflags for what a finished [`ArticleTask`] keeps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveMode(u8);

impl SaveMode {
    pub const NONE: SaveMode = SaveMode(0);
    pub const DECODE: SaveMode = SaveMode(1 << 0);
    pub const RAW: SaveMode = SaveMode(1 << 1);

    #[must_use]
    pub fn contains(self, other: SaveMode) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for SaveMode {
    type Output = SaveMode;
    fn bitor(self, rhs: Self) -> Self {
        SaveMode(self.0 | rhs.0)
    }
}

/// One segment fetch, still wanted from at least one server.
#[derive(Debug, Clone)]
pub struct Needed {
    pub message_id: String,
    pub part: u32,
    pub bytes: u64,
    /// Servers still believed to carry this part, lowest-rank (most
    /// preferred) first. A `430 no such article` removes the answering
    /// server; once this is empty the part is unobtainable.
    pub xref: Vec<Quark>,
}

/// One segment to fetch: its message-id, declared size, and the servers
/// still worth trying it against.
#[derive(Debug, Clone)]
pub struct ArticleSegment {
    pub message_id: String,
    pub bytes: u64,
}

pub struct ArticleTask {
    id: Quark,
    save_mode: SaveMode,
    queue: VecDeque<Needed>,
    total_parts: u32,
    bytes_expected: u64,
    bytes_done: u64,
    article_cache: Arc<dyn ArticleCache>,
    progress: Progress,
    stopped: bool,
    health: Health,
    /// A fetched-but-not-yet-decoded body, waiting for the shared decoder
    /// worker. Set by `use_nntp`, cleared by `use_decoder`.
    pending_decode: Option<(Needed, Vec<u8>)>,
}

impl ArticleTask {
    /// `servers` seeds every segment's [`Needed::xref`]: the servers this
    /// task is allowed to fetch parts from, lowest-rank first.
    #[must_use]
    pub fn new(
        segments: Vec<ArticleSegment>,
        servers: Vec<Quark>,
        save_mode: SaveMode,
        article_cache: Arc<dyn ArticleCache>,
    ) -> Self {
        let total_parts = segments.len() as u32;
        let bytes_expected = segments.iter().map(|s| s.bytes).sum();
        let queue = segments
            .into_iter()
            .enumerate()
            .map(|(i, seg)| Needed {
                message_id: seg.message_id,
                part: (i + 1) as u32,
                bytes: seg.bytes,
                xref: servers.clone(),
            })
            .collect();
        ArticleTask {
            id: Quark::intern(&format!("article:{}", uuid::Uuid::new_v4())),
            save_mode,
            queue,
            total_parts,
            bytes_expected,
            bytes_done: 0,
            article_cache,
            progress: Progress::new(),
            stopped: false,
            health: Health::Ok,
            pending_decode: None,
        }
    }

    /// Union of every outstanding `Needed`'s `xref`, in encounter order and
    /// deduplicated.
    fn acceptable_servers(&self) -> Vec<Quark> {
        let mut seen = HashSet::new();
        let mut servers = Vec::new();
        for needed in &self.queue {
            for server in &needed.xref {
                if seen.insert(server.clone()) {
                    servers.push(server.clone());
                }
            }
        }
        servers
    }
}

#[async_trait]
impl super::Task for ArticleTask {
    fn id(&self) -> Quark {
        self.id.clone()
    }

    fn state(&self) -> super::State {
        if self.stopped {
            return super::State::completed(self.health).paused();
        }
        if self.pending_decode.is_some() {
            return super::State {
                work: super::Work::NeedDecoder,
                health: self.health,
                acceptable_servers: Vec::new(),
            };
        }
        if self.queue.is_empty() {
            return super::State::completed(self.health);
        }
        super::State::need_nntp(self.acceptable_servers())
    }

    fn bytes_remaining(&self) -> u64 {
        self.bytes_expected.saturating_sub(self.bytes_done)
    }

    fn progress(&self) -> Progress {
        self.progress.clone()
    }

    async fn use_nntp(&mut self, mut client: NntpClient) -> (NntpClient, Health) {
        let server = Quark::intern(client.server_host());
        let Some(idx) = self.queue.iter().position(|n| n.xref.first() == Some(&server)).or_else(|| {
            self.queue.iter().position(|n| n.xref.contains(&server))
        }) else {
            return (client, Health::Ok);
        };
        let mut needed = self.queue.remove(idx).expect("idx came from position() over the same queue");

        if self.progress.snapshot().steps == 0 {
            self.progress.init_steps(u64::from(self.total_parts));
        }

        if self.article_cache.contains(&needed.message_id) {
            self.progress.increment_step(1);
            return (client, Health::Ok);
        }

        self.article_cache.reserve(&needed.message_id);
        let result = client.fetch_body(&needed.message_id).await;
        self.article_cache.release(&needed.message_id);

        match result {
            Ok(response) => {
                let raw = response.lines.join("\r\n").into_bytes();
                if self.save_mode.contains(SaveMode::RAW) {
                    self.article_cache.add(&format!("{}.raw", needed.message_id), raw.clone());
                }
                self.pending_decode = Some((needed, raw));
                (client, Health::Ok)
            }
            Err(err @ NntpError::NoSuchArticle(_)) => {
                let health = Health::from(&err);
                warn!("{} not on {}, trying another server", needed.message_id, server.as_str());
                needed.xref.retain(|s| *s != server);
                if needed.xref.is_empty() {
                    self.health = self.health.worse(Health::ErrCommand);
                    warn!("part {} unavailable on every configured server", needed.part);
                } else {
                    self.queue.push_back(needed);
                }
                (client, health)
            }
            Err(err) => {
                let health = Health::from(&err);
                self.health = self.health.worse(health);
                self.queue.push_back(needed);
                (client, health)
            }
        }
    }

    async fn use_decoder(&mut self, _save_dir: &std::path::Path, worker: &Worker) -> super::WorkerResult {
        let Some((needed, raw)) = self.pending_decode.take() else {
            return super::WorkerResult { health: self.health, output_paths: Vec::new() };
        };

        worker.set_progress(0.0, needed.message_id.clone());
        let decoded = tokio::task::spawn_blocking(move || yenc::decode(&raw)).await;

        match decoded {
            Ok(Ok(decoded)) => {
                self.bytes_done += decoded.data.len() as u64;
                if self.save_mode.contains(SaveMode::DECODE) {
                    self.article_cache.add(&needed.message_id, decoded.data);
                }
                worker.set_progress(100.0, needed.message_id.clone());
            }
            Ok(Err(err)) => {
                warn!("yEnc decode failed for part {}: {}", needed.part, err);
                self.health = self.health.worse(Health::ErrLocal);
            }
            Err(err) => {
                warn!("decoder task panicked for part {}: {}", needed.part, err);
                self.health = self.health.worse(Health::ErrLocal);
            }
        }
        self.progress.increment_step(1);
        super::WorkerResult { health: self.health, output_paths: Vec::new() }
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}
