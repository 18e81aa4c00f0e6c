//! Binary upload task: split a file into yEnc parts, then POST each part.
//!
//! Grounded on Pan's `TaskUpload`: an encode phase (needs the encoder
//! worker) followed by a post phase (needs an NNTP connection per part),
//! with a per-part `needed_t` table tracking which parts are still
//! outstanding.

use crate::article::ArticleBuilder;
use crate::client::NntpClient;
use crate::error::{Health, NntpError};
use crate::progress::Progress;
use crate::quark::Quark;
use crate::store::EncodeCache;
use crate::worker::Worker;
use crate::yenc;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::warn;

/// Which phase of the upload an [`UploadTask`] is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    /// Splitting and yEnc-encoding the source file.
    Encoding,
    /// Posting encoded parts.
    Posting,
    /// Every part posted.
    Done,
}

/// One part of the split file, and whether it's still outstanding.
#[derive(Debug, Clone)]
pub struct UploadPart {
    pub part_no: u32,
    pub total_parts: u32,
    pub message_id: String,
    pub posted: bool,
}

pub struct UploadTask {
    id: Quark,
    filename: String,
    subject: String,
    author: String,
    groups: Vec<String>,
    lines_per_part: usize,
    data: Vec<u8>,
    encode_cache: Arc<dyn EncodeCache>,
    servers: Vec<Quark>,
    phase: UploadPhase,
    parts: Vec<UploadPart>,
    pending: VecDeque<usize>,
    progress: Progress,
    stopped: bool,
    health: Health,
}

impl UploadTask {
    /// `servers` are the pools this task will accept a connection from to
    /// post parts; any one of them can carry the `POST`.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        data: Vec<u8>,
        subject: impl Into<String>,
        author: impl Into<String>,
        groups: Vec<String>,
        lines_per_part: usize,
        encode_cache: Arc<dyn EncodeCache>,
        servers: Vec<Quark>,
    ) -> Self {
        let filename = filename.into();
        UploadTask {
            id: Quark::intern(&format!("upload:{filename}")),
            subject: subject.into(),
            author: author.into(),
            groups,
            lines_per_part: lines_per_part.max(1),
            data,
            encode_cache,
            servers,
            phase: UploadPhase::Encoding,
            parts: Vec::new(),
            pending: VecDeque::new(),
            progress: Progress::new(),
            stopped: false,
            health: Health::Ok,
            filename,
        }
    }

    fn bytes_per_part(&self) -> usize {
        // yEnc encodes one input byte per output column, minus escapes;
        // lines_per_part * line-length is close enough for chunk sizing.
        self.lines_per_part * 128
    }
}

#[async_trait]
impl super::Task for UploadTask {
    fn id(&self) -> Quark {
        self.id.clone()
    }

    fn state(&self) -> super::State {
        if self.stopped {
            return super::State::completed(self.health).paused();
        }
        match self.phase {
            UploadPhase::Encoding => super::State {
                work: super::Work::NeedEncoder,
                health: self.health,
                acceptable_servers: Vec::new(),
            },
            UploadPhase::Posting => {
                if self.pending.is_empty() {
                    super::State::completed(self.health)
                } else {
                    super::State::need_nntp(self.servers.clone())
                }
            }
            UploadPhase::Done => super::State::completed(self.health),
        }
    }

    fn bytes_remaining(&self) -> u64 {
        let posted_parts = self.parts.iter().filter(|p| p.posted).count();
        let remaining_parts = self.parts.len().saturating_sub(posted_parts);
        (remaining_parts * self.bytes_per_part()) as u64
    }

    fn progress(&self) -> Progress {
        self.progress.clone()
    }

    async fn use_nntp(&mut self, mut client: NntpClient) -> (NntpClient, Health) {
        let Some(idx) = self.pending.pop_front() else {
            return (client, Health::Ok);
        };
        let part = &self.parts[idx];
        let Some(body) = self.encode_cache.get(&part.message_id) else {
            warn!("encoded part {} missing from cache", part.message_id);
            self.health = self.health.worse(Health::ErrLocal);
            return (client, Health::ErrLocal);
        };

        let builder = ArticleBuilder::new()
            .from(self.author.clone())
            .subject(format!("{} ({}/{})", self.subject, part.part_no, part.total_parts))
            .newsgroups(self.groups.clone())
            .message_id(part.message_id.clone())
            .body(String::from_utf8_lossy(&body).into_owned());

        match builder.build() {
            Ok(article) => match client.post(&article).await {
                Ok(()) => {
                    self.parts[idx].posted = true;
                    self.progress.increment_step(1);
                    if self.pending.is_empty() {
                        self.phase = UploadPhase::Done;
                    }
                    (client, Health::Ok)
                }
                Err(err) => {
                    let health = Health::from(&err);
                    self.health = self.health.worse(health);
                    self.pending.push_back(idx);
                    (client, health)
                }
            },
            Err(err) => {
                warn!("failed to build article for part {}: {}", part.part_no, err);
                self.health = self.health.worse(Health::ErrLocal);
                (client, Health::ErrLocal)
            }
        }
    }

    async fn use_encoder(&mut self, worker: &Worker) -> super::WorkerResult {
        let chunk_size = self.bytes_per_part();
        let total_parts = self.data.len().div_ceil(chunk_size).max(1) as u32;
        self.progress.init_steps(u64::from(total_parts));
        worker.set_progress(0.0, self.filename.clone());

        let data = self.data.clone();
        let filename = self.filename.clone();
        let encode_cache = self.encode_cache.clone();
        let encoded = tokio::task::spawn_blocking(move || {
            let chunks: Vec<&[u8]> = data.chunks(chunk_size).collect();
            let total_parts = chunks.len().max(1) as u32;
            let total_size = data.len() as u64;
            let mut offset = 0u64;
            let mut parts = Vec::new();
            for (i, chunk) in chunks.iter().enumerate() {
                let part_no = (i + 1) as u32;
                let part_info = (part_no, total_parts, offset, offset + chunk.len() as u64 - 1, total_size);
                match yenc::encode(chunk, &filename, 128, Some(part_info)) {
                    Ok(encoded) => {
                        let message_id = format!("<{}.{}@newsflow>", uuid::Uuid::new_v4(), part_no);
                        encode_cache.add(&message_id, encoded);
                        parts.push(UploadPart { part_no, total_parts, message_id, posted: false });
                    }
                    Err(err) => return Err((part_no, err)),
                }
                offset += chunk.len() as u64;
            }
            Ok(parts)
        })
        .await;

        match encoded {
            Ok(Ok(parts)) => {
                self.parts = parts;
                self.pending = (0..self.parts.len()).collect();
                self.phase = UploadPhase::Posting;
                worker.set_progress(100.0, self.filename.clone());
            }
            Ok(Err((part_no, err))) => {
                warn!("yEnc encode failed for part {}: {}", part_no, err);
                self.health = self.health.worse(Health::ErrLocal);
            }
            Err(err) => {
                warn!("encoder task panicked: {}", err);
                self.health = self.health.worse(Health::ErrLocal);
            }
        }
        super::WorkerResult { health: self.health, output_paths: Vec::new() }
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}
