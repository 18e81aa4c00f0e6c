//! Newsgroup list harvesting task: one `LIST NEWSGROUPS` over one
//! connection, streamed into the data store as it's parsed.

use crate::client::NntpClient;
use crate::error::Health;
use crate::progress::Progress;
use crate::quark::Quark;
use crate::store::DataStore;
use async_trait::async_trait;
use std::sync::Arc;

pub struct GroupsTask {
    id: Quark,
    wildmat: String,
    servers: Vec<Quark>,
    data_store: Arc<dyn DataStore>,
    done: bool,
    stopped: bool,
    health: Health,
    progress: Progress,
}

impl GroupsTask {
    /// `servers` are the pools this task will accept a connection from; any
    /// one of them can answer `LIST NEWSGROUPS`.
    #[must_use]
    pub fn new(wildmat: impl Into<String>, servers: Vec<Quark>, data_store: Arc<dyn DataStore>) -> Self {
        let wildmat = wildmat.into();
        GroupsTask {
            id: Quark::intern(&format!("groups:{wildmat}")),
            wildmat,
            servers,
            data_store,
            done: false,
            stopped: false,
            health: Health::Ok,
            progress: Progress::new(),
        }
    }
}

#[async_trait]
impl super::Task for GroupsTask {
    fn id(&self) -> Quark {
        self.id.clone()
    }

    fn state(&self) -> super::State {
        if self.stopped {
            return super::State::completed(self.health).paused();
        }
        if self.done {
            return super::State::completed(self.health);
        }
        super::State::need_nntp(self.servers.clone())
    }

    fn bytes_remaining(&self) -> u64 {
        0
    }

    fn progress(&self) -> Progress {
        self.progress.clone()
    }

    async fn use_nntp(&mut self, mut client: NntpClient) -> (NntpClient, Health) {
        match client.list_newsgroups(&self.wildmat).await {
            Ok(groups) => {
                self.progress.init_steps(groups.len() as u64);
                for group in &groups {
                    self.data_store.group_add(&group.name, &group.description);
                    self.progress.increment_step(1);
                }
                self.done = true;
                (client, Health::Ok)
            }
            Err(err) => {
                let health = Health::from(&err);
                self.health = self.health.worse(health);
                self.done = true;
                (client, health)
            }
        }
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}
