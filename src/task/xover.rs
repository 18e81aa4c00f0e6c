//! Overview (XOVER) harvesting task.
//!
//! Mirrors Pan's `TaskXOver`: one task drives GROUP + XOVER across every
//! server that carries the group, fanning each server's work out into a
//! per-server FIFO of [`MiniTask`]s instead of blocking on one connection
//! at a time.

use crate::client::NntpClient;
use crate::commands;
use crate::error::{Health, NntpError};
use crate::progress::Progress;
use crate::quark::Quark;
use crate::store::DataStore;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::warn;

/// How much of a group's overview data to harvest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every article currently in the group.
    All,
    /// Only articles past each server's last recorded high-water mark.
    /// Falls back to [`Mode::All`] on a server with no prior mark.
    New,
    /// The most recent `n` articles.
    Sample(u64),
    /// Articles posted in roughly the last `n` days.
    ///
    /// GROUP doesn't report posting dates, so this is an estimate: `n *
    /// ASSUMED_ARTICLES_PER_DAY` articles back from the high end, capped to
    /// the group's actual size.
    Days(u64),
}

const ASSUMED_ARTICLES_PER_DAY: u64 = 500;
const MINITASK_CHUNK: u64 = 1000;

/// One unit of per-server work: select the group, or fetch one chunk of
/// overview lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiniTask {
    Group,
    XOver { low: u64, high: u64 },
}

pub struct XoverTask {
    id: Quark,
    group: Quark,
    mode: Mode,
    data_store: Arc<dyn DataStore>,
    per_server: HashMap<Quark, VecDeque<MiniTask>>,
    high_water: HashMap<Quark, u64>,
    remaining_count: HashMap<Quark, u64>,
    progress: Progress,
    stopped: bool,
    health: Health,
}

impl XoverTask {
    /// `since` carries each server's last recorded high-water mark, used by
    /// [`Mode::New`]; servers absent from it are treated as never harvested.
    #[must_use]
    pub fn new(
        group: &str,
        mode: Mode,
        servers: Vec<Quark>,
        since: HashMap<Quark, u64>,
        data_store: Arc<dyn DataStore>,
    ) -> Self {
        let group = Quark::intern(group);
        let mut per_server = HashMap::new();
        for server in &servers {
            per_server.insert(server.clone(), VecDeque::from([MiniTask::Group]));
        }
        XoverTask {
            id: Quark::intern(&format!("xover:{}", group.as_str())),
            group,
            mode,
            data_store,
            per_server,
            high_water: since,
            remaining_count: HashMap::new(),
            progress: Progress::new(),
            stopped: false,
            health: Health::Ok,
        }
    }

    fn acceptable_servers(&self) -> Vec<Quark> {
        self.per_server
            .iter()
            .filter(|(_, q)| !q.is_empty())
            .map(|(s, _)| s.clone())
            .collect()
    }

    fn is_done(&self) -> bool {
        self.per_server.values().all(VecDeque::is_empty)
    }

    /// Compute the target `(low, high)` range for `info` under `self.mode`
    /// and split it into `MINITASK_CHUNK`-sized [`MiniTask::XOver`] entries,
    /// pushed onto `server`'s queue.
    fn plan_xover_range(&mut self, server: &Quark, info: commands::GroupInfo) {
        if info.count == 0 {
            return;
        }
        let (low, high) = match self.mode {
            Mode::All => (info.first, info.last),
            Mode::New => {
                let mark = self.high_water.get(server).copied().unwrap_or(info.first.saturating_sub(1));
                (mark.saturating_add(1).max(info.first), info.last)
            }
            Mode::Sample(n) => (info.last.saturating_sub(n.saturating_sub(1)).max(info.first), info.last),
            Mode::Days(n) => {
                let window = n.saturating_mul(ASSUMED_ARTICLES_PER_DAY);
                (info.last.saturating_sub(window.saturating_sub(1)).max(info.first), info.last)
            }
        };
        if low > high {
            return;
        }

        let total = high - low + 1;
        self.remaining_count.insert(server.clone(), total);
        self.progress.add_steps(total);

        let queue = self.per_server.entry(server.clone()).or_default();
        let mut start = low;
        while start <= high {
            let end = (start + MINITASK_CHUNK - 1).min(high);
            queue.push_back(MiniTask::XOver { low: start, high: end });
            start = end + 1;
        }
    }

    fn fetch_done(&mut self, server: &Quark, low: u64, high: u64, fetched: u64) {
        let mark = self.high_water.entry(server.clone()).or_insert(0);
        if high > *mark {
            *mark = high;
        }
        self.progress.increment_step(high - low + 1);
        if let Some(remaining) = self.remaining_count.get_mut(server) {
            *remaining = remaining.saturating_sub(fetched.max(1));
        }
    }
}

#[async_trait]
impl super::Task for XoverTask {
    fn id(&self) -> Quark {
        self.id.clone()
    }

    fn state(&self) -> super::State {
        if self.stopped {
            return super::State::completed(self.health).paused();
        }
        if self.is_done() {
            return super::State::completed(self.health);
        }
        super::State::need_nntp(self.acceptable_servers())
    }

    fn bytes_remaining(&self) -> u64 {
        self.remaining_count.values().sum()
    }

    fn progress(&self) -> Progress {
        self.progress.clone()
    }

    async fn use_nntp(&mut self, mut client: NntpClient) -> (NntpClient, Health) {
        let server = Quark::intern(client.server_host());
        let Some(queue) = self.per_server.get_mut(&server) else {
            return (client, Health::Ok);
        };
        let Some(minitask) = queue.pop_front() else {
            return (client, Health::Ok);
        };

        match minitask {
            MiniTask::Group => match client.select_group(self.group.as_str()).await {
                Ok(info) => {
                    self.plan_xover_range(&server, info);
                    (client, Health::Ok)
                }
                Err(err) => {
                    let health = Health::from(&err);
                    self.health = self.health.worse(health);
                    warn!("GROUP {} on {} failed: {}", self.group.as_str(), server.as_str(), err);
                    (client, health)
                }
            },
            MiniTask::XOver { low, high } => {
                let range = format!("{low}-{high}");
                let result = if self.data_store.supports_xzver(&server) {
                    client.fetch_xzver_raw(&range).await
                } else {
                    client.fetch_xover_raw(&range).await
                };
                match result {
                    Ok(lines) => {
                        let mut fetched = 0u64;
                        for line in &lines {
                            match commands::parse_xover_line_for_store(line, server.as_str(), self.group.as_str()) {
                                Ok(record) => {
                                    self.data_store.xover_add(&self.group, record);
                                    fetched += 1;
                                }
                                Err(NntpError::InvalidResponse(bad)) => {
                                    warn!("dropping malformed XOVER line: {bad}");
                                }
                                Err(err) => warn!("XOVER parse error: {err}"),
                            }
                        }
                        self.fetch_done(&server, low, high, fetched);
                        (client, Health::Ok)
                    }
                    Err(err) => {
                        let health = Health::from(&err);
                        self.health = self.health.worse(health);
                        (client, health)
                    }
                }
            }
        }
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}
