//! Cooperative single-threaded task scheduler.
//!
//! Mirrors Pan's `Queue`: tasks report what they need via [`Task::state`],
//! and the scheduler hands out connections, decoder turns, and encoder
//! turns as they come free. Unlike the C++ original, which reacts to
//! `NNTP_Pool::Listener` callbacks pushed in from the pool, this queue
//! pulls — each [`Queue::upkeep`] drains pending pool events and then
//! walks the task list once, matching each `NeedNntp`/`NeedDecoder`/
//! `NeedEncoder` task to a resource if one's available.

use crate::config::QueueConfig;
use crate::pool::{PoolEvent, PoolRegistry};
use crate::quark::Quark;
use crate::task::{Task, Work};
use crate::worker::Worker;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// One server's pick-a-connection score: idle connections count for more
/// than free slots, since an idle connection is ready right now while a
/// free slot still needs a handshake.
fn score(idle: usize, empty_slots: usize) -> i64 {
    (idle * 10 + empty_slots) as i64
}

pub struct Queue {
    pools: Arc<PoolRegistry>,
    tasks: Vec<Box<dyn Task>>,
    online: bool,
    /// How often the task list is persisted, and where; the actual save
    /// is the caller's job (a [`crate::nzb`] writer, typically) — this
    /// just tells callers how long to coalesce writes and which manifest
    /// to write them to.
    config: QueueConfig,
    save_dir: PathBuf,
    /// Shared decoder/encoder, single-holder arbitrated per Pan's
    /// `_decoder_task`/`_encoder_task`: at most one task at a time may be
    /// running a decode or encode step.
    decoder: Worker,
    encoder: Worker,
}

impl Queue {
    #[must_use]
    pub fn new(pools: Arc<PoolRegistry>, online: bool, config: QueueConfig, save_dir: PathBuf) -> Self {
        Queue {
            pools,
            tasks: Vec::new(),
            online,
            config,
            save_dir,
            decoder: Worker::new(),
            encoder: Worker::new(),
        }
    }

    pub fn add_task(&mut self, task: Box<dyn Task>) {
        info!("queue: added task {}", task.id().as_str());
        self.tasks.push(task);
    }

    /// Remove a task by id, wherever it is in the list. Returns whether it
    /// was found.
    pub fn remove_task(&mut self, id: &Quark) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| &t.id() != id);
        self.tasks.len() != before
    }

    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    #[must_use]
    pub fn is_online(&self) -> bool {
        self.online
    }

    #[must_use]
    pub fn save_delay_secs(&self) -> u64 {
        self.config.save_delay_secs
    }

    #[must_use]
    pub fn nzb_path(&self) -> &Path {
        &self.config.nzb_path
    }

    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn stopped_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.state().work == Work::Paused).count()
    }

    /// Total bytes left to transfer across every active task, for a
    /// queue-wide progress readout.
    #[must_use]
    pub fn bytes_remaining(&self) -> u64 {
        self.tasks.iter().map(|t| t.bytes_remaining()).sum()
    }

    /// Best server to service a task that would accept a connection from
    /// any of `acceptable`: whichever has the highest `idle*10 +
    /// empty_slots` score. Servers with no registered pool are skipped.
    async fn find_best_server(pools: &PoolRegistry, acceptable: &[Quark]) -> Option<Quark> {
        let mut best: Option<(Quark, i64)> = None;
        for server in acceptable {
            let Some(pool) = pools.get(server).await else { continue };
            let s = score(pool.idle_count().await, pool.empty_slots().await);
            if best.as_ref().is_none_or(|(_, b)| s > *b) {
                best = Some((server.clone(), s));
            }
        }
        best.map(|(server, _)| server)
    }

    /// Drain pool error/availability events. Errors are logged; the
    /// availability signal itself doesn't need special handling because
    /// [`Queue::dispatch`] re-scans every idle connection on every call.
    async fn drain_events(&mut self) {
        for event in self.pools.drain_events().await {
            match event {
                PoolEvent::NntpAvailable { server } => {
                    tracing::trace!("queue: connection available on {}", server.as_str());
                }
                PoolEvent::PoolError { server, message } => {
                    warn!("queue: pool error on {}: {}", server.as_str(), message);
                }
            }
        }
    }

    /// One scheduling pass: hand a connection to the best-scoring task
    /// needing one, run a decoder/encoder step for tasks that need those,
    /// then drop any task that's reached `Completed`.
    pub async fn dispatch(&mut self) {
        if !self.online {
            return;
        }

        for i in 0..self.tasks.len() {
            let state = self.tasks[i].state();
            match state.work {
                Work::NeedNntp => {
                    let Some(server) = Self::find_best_server(&self.pools, &state.acceptable_servers).await else {
                        continue;
                    };
                    let Some(pool) = self.pools.get(&server).await else { continue };
                    if let Some(client) = pool.check_out().await {
                        let (client, health) = self.tasks[i].use_nntp(client).await;
                        pool.check_in(client, health).await;
                    } else {
                        pool.request_connection().await;
                    }
                }
                Work::NeedDecoder => {
                    let id = self.tasks[i].id();
                    if self.decoder.try_acquire(&id) {
                        let _ = self.tasks[i].use_decoder(&self.save_dir, &self.decoder).await;
                        self.decoder.release(&id);
                    }
                }
                Work::NeedEncoder => {
                    let id = self.tasks[i].id();
                    if self.encoder.try_acquire(&id) {
                        let _ = self.tasks[i].use_encoder(&self.encoder).await;
                        self.encoder.release(&id);
                    }
                }
                Work::Initial | Work::Working | Work::Paused | Work::Completed => {}
            }
        }

        self.sweep_completed();
    }

    fn sweep_completed(&mut self) {
        self.tasks.retain(|t| {
            let done = t.state().work == Work::Completed;
            if done {
                info!("queue: task {} completed", t.id().as_str());
            }
            !done
        });
    }

    /// Idle maintenance: age out idle connections past their timeout, then
    /// run one scheduling pass.
    pub async fn upkeep(&mut self) {
        for server in self.pools.server_ids().await {
            if let Some(pool) = self.pools.get(&server).await {
                pool.idle_upkeep().await;
            }
        }
        self.drain_events().await;
        self.dispatch().await;
    }
}
