//! Per-server NNTP connection pool.
//!
//! One [`NntpPool`] per configured server. A generic connection-pool crate
//! hides exactly the states the queue scheduler needs to see — connect,
//! is-valid, has-broken isn't enough to tell "mid-handshake" from "idle"
//! from "checked out". So each slot is tracked explicitly, mirroring Pan's
//! `NNTP_Pool`: a connection is `Connecting`, then `Handshaking`, then
//! available as `Idle` until a task `check_out`s it, and `check_in` returns
//! it to `Idle` (or drops it if the task reported network/command failure).
//!
//! A `400 TOO_MANY_CONNECTIONS` response backs this pool off exponentially,
//! capped at 5 attempts (see DESIGN.md for why 5).

use crate::client::NntpClient;
use crate::config::ServerConfig;
use crate::error::{Health, NntpError, Result};
use crate::quark::Quark;
use rand::Rng;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

/// Cap on TOO_MANY_CONNECTIONS backoff attempts before the pool gives up and
/// reports a pool error instead of retrying forever.
pub const MAX_TOO_MANY_CONNECTIONS_ATTEMPTS: u32 = 5;

/// Retry/backoff knobs for connection attempts.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts for a single connect.
    pub max_retries: u32,
    /// Initial backoff duration in milliseconds.
    pub initial_backoff_ms: u64,
    /// Maximum backoff duration in milliseconds.
    pub max_backoff_ms: u64,
    /// Backoff multiplier (exponential factor).
    pub backoff_multiplier: f64,
    /// Whether to add jitter to prevent thundering herd.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 10_000,
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Create a retry config with no retries (fail fast).
    pub fn no_retry() -> Self {
        Self { max_retries: 0, ..Default::default() }
    }

    /// Create a retry config with custom max retries.
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self { max_retries, ..Default::default() }
    }

    fn backoff_for(&self, attempt: u32) -> Duration {
        let raw = self.initial_backoff_ms as f64 * self.backoff_multiplier.powi(attempt as i32);
        let capped = raw.min(self.max_backoff_ms as f64) as u64;
        let ms = if self.jitter {
            let jitter = rand::thread_rng().gen_range(0..=(capped / 2).max(1));
            capped + jitter
        } else {
            capped
        };
        Duration::from_millis(ms)
    }
}

/// Per-connection state within a pool.
#[derive(Debug)]
enum Slot {
    /// TCP connect + TLS handshake in flight.
    Connecting,
    /// Socket open, AUTHINFO exchange in flight.
    Handshaking,
    /// Ready, not checked out.
    Idle { client: NntpClient, since: Instant },
    /// Loaned to a task.
    CheckedOut,
    /// Broken; to be dropped, not reused.
    Dead,
}

/// Events a pool raises for the queue scheduler to react to, replacing the
/// C++ `NNTP_Pool::Listener` callback graph with a channel.
#[derive(Debug, Clone)]
pub enum PoolEvent {
    /// An idle connection became available for this server.
    NntpAvailable { server: Quark },
    /// The pool hit a condition the queue should know about (repeated
    /// TOO_MANY_CONNECTIONS, auth failure, etc).
    PoolError { server: Quark, message: String },
}

struct Inner {
    slots: Vec<Slot>,
    too_many_connections_attempts: u32,
    backed_off_until: Option<Instant>,
}

/// A pool of connections to one NNTP server.
pub struct NntpPool {
    server_id: Quark,
    config: Arc<ServerConfig>,
    max_connections: usize,
    idle_timeout: Duration,
    retry_config: RetryConfig,
    events: mpsc::UnboundedSender<PoolEvent>,
    inner: Mutex<Inner>,
}

impl NntpPool {
    /// Create a pool for `server_id`. `events` is shared across every
    /// server's pool so the queue can select over one channel.
    pub fn new(
        server_id: Quark,
        config: ServerConfig,
        max_connections: usize,
        events: mpsc::UnboundedSender<PoolEvent>,
    ) -> Self {
        Self::with_retry_config(server_id, config, max_connections, events, RetryConfig::default())
    }

    /// Same as [`NntpPool::new`] with explicit retry/backoff settings.
    pub fn with_retry_config(
        server_id: Quark,
        config: ServerConfig,
        max_connections: usize,
        events: mpsc::UnboundedSender<PoolEvent>,
        retry_config: RetryConfig,
    ) -> Self {
        Self {
            server_id,
            config: Arc::new(config),
            max_connections,
            idle_timeout: Duration::from_secs(300),
            retry_config,
            events,
            inner: Mutex::new(Inner {
                slots: Vec::new(),
                too_many_connections_attempts: 0,
                backed_off_until: None,
            }),
        }
    }

    /// Override the idle-connection timeout (default 300s).
    #[must_use]
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// This pool's server id.
    #[must_use]
    pub fn server_id(&self) -> &Quark {
        &self.server_id
    }

    /// Ask the pool to open a new connection if there's room under
    /// `max_connections` and the server isn't currently in TOO_MANY_CONNECTIONS
    /// backoff. Emits [`PoolEvent::NntpAvailable`] on success.
    ///
    /// This is fire-and-forget by design: the queue calls it speculatively
    /// whenever a task needs a server and then waits on the event channel,
    /// matching Pan's `Queue::request_connections`.
    pub async fn request_connection(self: &Arc<Self>) {
        {
            let inner = self.inner.lock().await;
            if let Some(until) = inner.backed_off_until {
                if Instant::now() < until {
                    return;
                }
            }
            if inner.slots.len() >= self.max_connections {
                return;
            }
        }

        {
            let mut inner = self.inner.lock().await;
            inner.slots.push(Slot::Connecting);
        }

        let pool = Arc::clone(self);
        tokio::spawn(async move {
            pool.connect_one().await;
        });
    }

    async fn connect_one(self: Arc<Self>) {
        {
            let mut inner = self.inner.lock().await;
            if let Some(slot) = inner.slots.iter_mut().rev().find(|s| matches!(s, Slot::Connecting)) {
                *slot = Slot::Handshaking;
            }
        }

        match NntpClient::connect(Arc::clone(&self.config)).await {
            Ok(mut client) => match client.authenticate().await {
                Ok(()) => {
                    let mut inner = self.inner.lock().await;
                    inner.too_many_connections_attempts = 0;
                    inner.backed_off_until = None;
                    if let Some(slot) =
                        inner.slots.iter_mut().rev().find(|s| matches!(s, Slot::Handshaking))
                    {
                        *slot = Slot::Idle { client, since: Instant::now() };
                    }
                    drop(inner);
                    let _ = self.events.send(PoolEvent::NntpAvailable { server: self.server_id.clone() });
                }
                Err(e) => self.handle_connect_failure(e).await,
            },
            Err(e) => self.handle_connect_failure(e).await,
        }
    }

    async fn handle_connect_failure(&self, err: NntpError) {
        let mut inner = self.inner.lock().await;
        if let Some(pos) = inner.slots.iter().position(|s| matches!(s, Slot::Connecting | Slot::Handshaking)) {
            inner.slots.remove(pos);
        }

        let is_too_many = matches!(&err, NntpError::Protocol { code: 400, .. });
        if is_too_many {
            inner.too_many_connections_attempts += 1;
            if inner.too_many_connections_attempts > MAX_TOO_MANY_CONNECTIONS_ATTEMPTS {
                warn!(
                    server = %self.server_id,
                    "giving up after {} TOO_MANY_CONNECTIONS backoffs",
                    MAX_TOO_MANY_CONNECTIONS_ATTEMPTS
                );
                let message = format!(
                    "server repeatedly returned 400 TOO_MANY_CONNECTIONS ({} attempts)",
                    inner.too_many_connections_attempts
                );
                drop(inner);
                let _ = self.events.send(PoolEvent::PoolError { server: self.server_id.clone(), message });
                return;
            }
            let delay = self.retry_config.backoff_for(inner.too_many_connections_attempts);
            inner.backed_off_until = Some(Instant::now() + delay);
            debug!(server = %self.server_id, ?delay, "backing off after TOO_MANY_CONNECTIONS");
        } else {
            warn!(server = %self.server_id, error = %err, "connection attempt failed");
            drop(inner);
            let _ = self
                .events
                .send(PoolEvent::PoolError { server: self.server_id.clone(), message: err.to_string() });
        }
    }

    /// Take an idle connection, if one is available. Returns `None` rather
    /// than blocking — the queue should call [`NntpPool::request_connection`]
    /// and wait for [`PoolEvent::NntpAvailable`] instead of polling.
    pub async fn check_out(&self) -> Option<NntpClient> {
        let mut inner = self.inner.lock().await;
        let pos = inner.slots.iter().position(|s| matches!(s, Slot::Idle { .. }))?;
        let Slot::Idle { client, .. } = inner.slots.remove(pos) else { unreachable!() };
        inner.slots.push(Slot::CheckedOut);
        Some(client)
    }

    /// Return a connection a task is done with. `health` decides whether it
    /// goes back to `Idle` or is dropped: anything other than `Ok`
    /// invalidates the connection for reuse (a command error can leave the
    /// session in an unknown state), while `Ok` returns it to the idle set.
    pub async fn check_in(&self, client: NntpClient, health: Health) {
        let mut inner = self.inner.lock().await;
        if let Some(pos) = inner.slots.iter().position(|s| matches!(s, Slot::CheckedOut)) {
            inner.slots.remove(pos);
        }
        match health {
            Health::Ok if !client.is_broken() => {
                inner.slots.push(Slot::Idle { client, since: Instant::now() });
            }
            _ => {
                inner.slots.push(Slot::Dead);
                inner.slots.retain(|s| !matches!(s, Slot::Dead));
            }
        }
    }

    /// Periodic maintenance: drop connections idle longer than
    /// `idle_timeout` and prune dead slots. Call this from the queue's
    /// upkeep tick.
    pub async fn idle_upkeep(&self) {
        let mut inner = self.inner.lock().await;
        let timeout = self.idle_timeout;
        let now = Instant::now();
        inner.slots.retain(|s| match s {
            Slot::Idle { since, .. } => now.duration_since(*since) < timeout,
            Slot::Dead => false,
            _ => true,
        });
    }

    /// Number of idle connections right now.
    pub async fn idle_count(&self) -> usize {
        let inner = self.inner.lock().await;
        inner.slots.iter().filter(|s| matches!(s, Slot::Idle { .. })).count()
    }

    /// Number of slots free under `max_connections` (idle + not yet opened).
    pub async fn empty_slots(&self) -> usize {
        let inner = self.inner.lock().await;
        self.max_connections.saturating_sub(inner.slots.len())
    }

    /// Current connection count, for monitoring.
    pub async fn connections_in_use(&self) -> usize {
        let inner = self.inner.lock().await;
        inner.slots.iter().filter(|s| matches!(s, Slot::CheckedOut)).count()
    }
}

impl std::fmt::Debug for NntpPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NntpPool")
            .field("server_id", &self.server_id)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Owns one [`NntpPool`] per server id, so the queue can look servers up by
/// [`Quark`] without threading a `HashMap` through every call site.
#[derive(Default)]
pub struct PoolRegistry {
    pools: Mutex<std::collections::HashMap<Quark, Arc<NntpPool>>>,
    pending_events: Mutex<VecDeque<PoolEvent>>,
}

impl PoolRegistry {
    /// New, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pool, replacing any existing pool for the same server id.
    pub async fn insert(&self, pool: Arc<NntpPool>) {
        self.pools.lock().await.insert(pool.server_id().clone(), pool);
    }

    /// Fetch the pool for a server id, if registered.
    pub async fn get(&self, server: &Quark) -> Option<Arc<NntpPool>> {
        self.pools.lock().await.get(server).cloned()
    }

    /// All registered server ids.
    pub async fn server_ids(&self) -> Vec<Quark> {
        self.pools.lock().await.keys().cloned().collect()
    }

    /// Stash an event for later draining (used by tests that don't want to
    /// wire up a real channel receiver).
    pub async fn push_event(&self, event: PoolEvent) {
        self.pending_events.lock().await.push_back(event);
    }

    /// Drain stashed events.
    pub async fn drain_events(&self) -> Vec<PoolEvent> {
        self.pending_events.lock().await.drain(..).collect()
    }
}
