//! Headless engine binary: load one or more NZB manifests, drain them
//! against a single configured server, and exit.
//!
//! Server credentials come from the environment (`NEWSFLOW_HOST`,
//! `NEWSFLOW_USER`, `NEWSFLOW_PASS`, `NEWSFLOW_TLS`) rather than a CLI flag,
//! since the flag surface this binary honors is fixed (`--nzb`, `--no-gui`,
//! `-o`/`--output`, `--debug`) and config-file parsing is out of scope.

use clap::Parser;
use newsflow_engine::task::{ArticleSegment, ArticleTask, SaveMode};
use newsflow_engine::{InMemoryArticleCache, NntpPool, PoolRegistry, Queue, QueueConfig, ServerConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "newsflow-engine", about = "Headless Usenet task engine")]
struct Cli {
    /// NZB manifests to load; the engine exits once every task from them drains
    #[arg(long = "nzb", value_name = "FILE")]
    nzb: Vec<PathBuf>,

    /// Run without a GUI frontend (the only mode this binary supports)
    #[arg(long = "no-gui")]
    no_gui: bool,

    /// Save directory for decoded output
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(long = "debug")]
    debug: bool,
}

fn server_config_from_env() -> Option<ServerConfig> {
    let host = std::env::var("NEWSFLOW_HOST").ok()?;
    let user = std::env::var("NEWSFLOW_USER").unwrap_or_default();
    let pass = std::env::var("NEWSFLOW_PASS").unwrap_or_default();
    let tls = std::env::var("NEWSFLOW_TLS").map(|v| v != "0").unwrap_or(true);
    Some(if tls { ServerConfig::tls(host, user, pass) } else { ServerConfig::plain(host, user, pass) })
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!("newsflow_engine={level}")))
        .init();

    if !cli.no_gui {
        warn!("this binary only implements the headless engine; --no-gui is assumed");
    }

    if cli.nzb.is_empty() {
        error!("no --nzb manifests given, nothing to do");
        return ExitCode::FAILURE;
    }

    let Some(config) = server_config_from_env() else {
        error!("NEWSFLOW_HOST is not set; cannot reach any server");
        return ExitCode::FAILURE;
    };

    let pools = Arc::new(PoolRegistry::new());
    let (events_tx, _events_rx) = tokio::sync::mpsc::unbounded_channel();
    let server_id = newsflow_engine::Quark::intern(&config.host);
    pools.insert(Arc::new(NntpPool::new(server_id.clone(), config, 4, events_tx))).await;

    let save_dir = cli.output.unwrap_or_else(|| PathBuf::from("."));
    let queue_config = QueueConfig::new(cli.nzb[0].clone());
    let mut queue = Queue::new(pools, true, queue_config, save_dir);
    let article_cache: Arc<dyn newsflow_engine::ArticleCache> = Arc::new(InMemoryArticleCache::new());
    let servers = vec![server_id];

    for path in &cli.nzb {
        let xml = match std::fs::read_to_string(path) {
            Ok(xml) => xml,
            Err(err) => {
                error!("failed to read {}: {}", path.display(), err);
                return ExitCode::FAILURE;
            }
        };
        let nzb = match newsflow_engine::parse_nzb(&xml) {
            Ok(nzb) => nzb,
            Err(err) => {
                error!("failed to parse {}: {}", path.display(), err);
                return ExitCode::FAILURE;
            }
        };
        for file in nzb.files {
            let segments = file
                .segments
                .into_iter()
                .map(|s| ArticleSegment { message_id: s.message_id, bytes: s.bytes })
                .collect::<Vec<_>>();
            if segments.is_empty() {
                continue;
            }
            info!("queued {} ({} segments)", file.subject, segments.len());
            let task = ArticleTask::new(segments, servers.clone(), SaveMode::DECODE, article_cache.clone());
            queue.add_task(Box::new(task));
        }
    }

    while queue.task_count() > 0 {
        queue.upkeep().await;
        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    info!("all tasks drained");
    ExitCode::SUCCESS
}
