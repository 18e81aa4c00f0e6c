#![doc = include_str!("../README.md")]

/// RFC 5536 Article Format
pub mod article;
/// Article assembler for binary downloads
pub mod assembler;
/// Header caching for NNTP client
pub mod cache;
mod capabilities;
mod client;
/// NNTP command builders and response parsers
pub mod commands;
mod config;
/// RFC 2047 Encoded Words support for international headers
pub mod encoded_words;
mod error;
/// NZB file format parser
pub mod nzb;
mod pool;
/// Cooperative single-threaded task scheduler
pub mod queue;
/// Step-based progress tracking for tasks and workers
pub mod progress;
/// Process-wide interned strings for server ids, group names, message-ids
pub mod quark;
/// Rate limiting for bandwidth and connection management
pub mod ratelimit;
mod response;
/// Segment fetcher for Usenet binary downloads
pub mod segments;
/// Plain/TLS transport abstraction for the client connection
pub mod socket;
/// Trait seams for the data store, article/encode caches, and log a task
/// calls into but doesn't own
pub mod store;
/// Background task abstraction: state machine, concrete tasks, queue scheduler
pub mod task;
/// uuencode binary encoding/decoding for Usenet
pub mod uuencode;
/// Shared decoder/encoder worker: mutex-sampled progress, single-holder
/// arbitration
pub mod worker;
/// RFC 5536 Article validation utilities
pub mod validation;
/// yEnc binary encoding/decoding for Usenet
pub mod yenc;

pub use article::{parse_article, parse_headers, Article, ArticleBuilder, ControlMessage, Headers};
pub use assembler::{ArticleAssembler, PartInfo, PartStatus};
pub use cache::{HeaderCache, LruHeaderCache};
pub use capabilities::Capabilities;
pub use client::NntpClient;
pub use commands::{DistributionInfo, HdrEntry, ModeratorInfo, XoverEntry};
pub use config::{QueueConfig, ServerConfig};
pub use error::{Health, NntpError, Result};
pub use nzb::{parse_nzb, Nzb, NzbFile, NzbSegment};
pub use pool::{NntpPool, PoolEvent, PoolRegistry, RetryConfig};
pub use progress::{Progress, ProgressSnapshot};
pub use quark::Quark;
pub use queue::Queue;
pub use ratelimit::{BandwidthLimiter, ConnectionLimiter, ConnectionPermit};
pub use response::{codes, NntpBinaryResponse, NntpResponse};
pub use segments::{FetchConfig, FetchProgress, SegmentFetchResult, SegmentFetcher, SegmentStatus};
pub use socket::Transport;
pub use store::{
    ArticleCache, DataStore, EncodeCache, InMemoryArticleCache, InMemoryDataStore,
    InMemoryEncodeCache, Log, LogLevel, XoverRecord,
};
pub use task::{NeededServers, State, Task, Work};
pub use validation::{
    parse_date, validate_date, validate_message_id, validate_newsgroup_name, ValidationConfig,
};
pub use worker::{Worker, WorkerProgress};
pub use yenc::{
    decode as yenc_decode, encode as yenc_encode, YencDecoded, YencEnd, YencHeader,
    YencMultipartAssembler, YencPart,
};
