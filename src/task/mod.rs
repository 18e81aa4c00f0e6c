//! Background task abstraction.
//!
//! A [`Task`] is a unit of work the [`crate::pool`]/queue layer drives
//! forward by handing it a connection, a decoder, or an encoder. Unlike
//! Pan's `Task`, which reaches back into the queue through `use_nntp`/
//! `check_in` callbacks on a shared base class, tasks here report their
//! desired [`State`] and the queue pushes resources to them — no task holds
//! a pointer back to its scheduler.

mod article;
mod groups;
mod upload;
mod xover;

pub use article::{ArticleSegment, ArticleTask, Needed, SaveMode};
pub use groups::GroupsTask;
pub use upload::{UploadPart, UploadPhase, UploadTask};
pub use xover::{MiniTask, Mode as XoverMode, XoverTask};
pub use xzver_test::XzverTestTask;

use crate::client::NntpClient;
use crate::error::Health;
use crate::progress::Progress;
use crate::quark::Quark;
use crate::worker::Worker;
use async_trait::async_trait;

/// What a task currently needs from the scheduler.
///
/// The distillation of Pan's `Task::Work` adds [`Work::Initial`] — the
/// state a freshly constructed task is in before the scheduler has looked
/// at it for the first time, so `process_task` always has a concrete state
/// to match on instead of special-casing "never visited".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Work {
    /// Not yet visited by the scheduler.
    Initial,
    /// Needs an NNTP session from one of `State::acceptable_servers`.
    NeedNntp,
    /// Needs the shared decoder worker.
    NeedDecoder,
    /// Needs the shared encoder worker.
    NeedEncoder,
    /// Holds a resource and is making progress.
    Working,
    /// Stopped by the user; holds no resources.
    Paused,
    /// Terminal. The queue removes completed tasks on its next sweep.
    Completed,
}

/// Server ids a [`Work::NeedNntp`] task would accept a connection from.
pub type NeededServers = Vec<Quark>;

/// `(work, health, acceptable_servers)` as observed by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub work: Work,
    pub health: Health,
    /// Non-empty only while `work == NeedNntp`.
    pub acceptable_servers: NeededServers,
}

impl State {
    #[must_use]
    pub fn initial() -> State {
        State { work: Work::Initial, health: Health::Ok, acceptable_servers: Vec::new() }
    }

    #[must_use]
    pub fn need_nntp(servers: NeededServers) -> State {
        State { work: Work::NeedNntp, health: Health::Ok, acceptable_servers: servers }
    }

    #[must_use]
    pub fn working() -> State {
        State { work: Work::Working, health: Health::Ok, acceptable_servers: Vec::new() }
    }

    #[must_use]
    pub fn completed(health: Health) -> State {
        State { work: Work::Completed, health, acceptable_servers: Vec::new() }
    }

    #[must_use]
    pub fn paused(self) -> State {
        State { work: Work::Paused, ..self }
    }
}

/// An ordered list of cached-part file paths, the decoder/encoder's unit of
/// input.
pub type PartPaths = Vec<std::path::PathBuf>;

/// Outcome of a decoder or encoder run, reported back to the task that
/// requested it.
#[derive(Debug, Clone)]
pub struct WorkerResult {
    pub health: Health,
    pub output_paths: PartPaths,
}

/// Every task the queue schedules implements this. `use_nntp` is called
/// once per checked-out connection; the task is expected to issue at least
/// one command before returning the connection (per the suspension-point
/// rule: a session is released inside the same logical step it was used).
#[async_trait]
pub trait Task: Send {
    /// Stable identifier, used for NZB round-tripping and logging.
    fn id(&self) -> Quark;

    /// Current `(work, health, acceptable_servers)`.
    fn state(&self) -> State;

    /// Bytes left to transfer, for progress aggregation across tasks.
    fn bytes_remaining(&self) -> u64;

    /// A handle for UI/timer sampling.
    fn progress(&self) -> Progress;

    /// Use a checked-out connection for one step of work, returning it (and
    /// the health observed) once the step completes.
    async fn use_nntp(&mut self, client: NntpClient) -> (NntpClient, Health);

    /// Run one decoder step. `save_dir` is where decoded output lands;
    /// `worker` is the shared decoder the queue has already arbitrated this
    /// task exclusive use of, and is where progress should be reported.
    /// Tasks that never enter [`Work::NeedDecoder`] can leave this as the
    /// default no-op.
    async fn use_decoder(&mut self, _save_dir: &std::path::Path, _worker: &Worker) -> WorkerResult {
        WorkerResult { health: Health::Ok, output_paths: Vec::new() }
    }

    /// Run one encoder step. Default no-op, see [`Task::use_decoder`].
    async fn use_encoder(&mut self, _worker: &Worker) -> WorkerResult {
        WorkerResult { health: Health::Ok, output_paths: Vec::new() }
    }

    /// Cooperative cancellation: flips an internal flag the task checks at
    /// its next safe point. Does not block.
    fn stop(&mut self);
}
