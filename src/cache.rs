//! Header caching for NNTP client
//!
//! This module provides in-memory caching for article metadata to reduce redundant network requests.
//! The cache stores XOVER entries (article metadata) indexed by article number within a newsgroup context.
//!
//! # Cache Strategy
//!
//! - **Scope**: Per-newsgroup (cleared when changing groups)
//! - **Index**: Article number (u64)
//! - **Eviction**: LRU (Least Recently Used)
//! - **Size Limit**: Configurable max entries
//!
//! # Example
//!
//! ```no_run
//! use newsflow_engine::cache::{HeaderCache, LruHeaderCache};
//! use newsflow_engine::XoverEntry;
//!
//! let mut cache = LruHeaderCache::new(1000); // Cache up to 1000 entries
//!
//! // Store article metadata
//! let entry = XoverEntry {
//!     article_number: 12345,
//!     subject: "Test Article".to_string(),
//!     author: "user@example.com".to_string(),
//!     date: "2024-01-01".to_string(),
//!     message_id: "<test@example.com>".to_string(),
//!     references: "".to_string(),
//!     bytes: 1024,
//!     lines: 50,
//! };
//! cache.put(12345, entry.clone());
//!
//! // Retrieve from cache
//! if let Some(cached) = cache.get(&12345) {
//!     println!("Found in cache: {}", cached.subject);
//! }
//!
//! // Clear cache when changing groups
//! cache.clear();
//! ```

use crate::XoverEntry;
use std::collections::HashMap;

/// Trait for header caching implementations
pub trait HeaderCache {
    /// Store an article's overview data
    fn put(&mut self, article_number: u64, entry: XoverEntry);

    /// Retrieve an article's overview data
    fn get(&mut self, article_number: &u64) -> Option<&XoverEntry>;

    /// Check if an article exists in cache
    fn contains(&self, article_number: &u64) -> bool;

    /// Remove an article from cache
    fn remove(&mut self, article_number: &u64) -> Option<XoverEntry>;

    /// Clear all cached entries
    fn clear(&mut self);

    /// Get the number of cached entries
    fn len(&self) -> usize;

    /// Check if cache is empty
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the maximum cache size
    fn capacity(&self) -> usize;
}

/// LRU (Least Recently Used) cache for article metadata
///
/// Implements a simple LRU cache using a HashMap and access ordering.
/// When the cache is full, the least recently accessed entry is evicted.
///
/// # Example
///
/// ```
/// use newsflow_engine::cache::{HeaderCache, LruHeaderCache};
/// use newsflow_engine::XoverEntry;
///
/// let mut cache = LruHeaderCache::new(2); // Max 2 entries
///
/// let entry1 = XoverEntry {
///     article_number: 1,
///     subject: "First".to_string(),
///     author: "author1@example.com".to_string(),
///     date: "2024-01-01".to_string(),
///     message_id: "<1@example.com>".to_string(),
///     references: "".to_string(),
///     bytes: 100,
///     lines: 10,
/// };
///
/// let entry2 = XoverEntry {
///     article_number: 2,
///     subject: "Second".to_string(),
///     author: "author2@example.com".to_string(),
///     date: "2024-01-02".to_string(),
///     message_id: "<2@example.com>".to_string(),
///     references: "".to_string(),
///     bytes: 200,
///     lines: 20,
///     };
///
/// cache.put(1, entry1);
/// cache.put(2, entry2);
/// assert_eq!(cache.len(), 2);
///
/// // Access entry 1 to make it recently used
/// cache.get(&1);
///
/// // Adding a third entry will evict entry 2 (least recently used)
/// let entry3 = XoverEntry {
///     article_number: 3,
///     subject: "Third".to_string(),
///     author: "author3@example.com".to_string(),
///     date: "2024-01-03".to_string(),
///     message_id: "<3@example.com>".to_string(),
///     references: "".to_string(),
///     bytes: 300,
///     lines: 30,
/// };
/// cache.put(3, entry3);
///
/// assert_eq!(cache.len(), 2);
/// assert!(cache.contains(&1)); // Still cached
/// assert!(!cache.contains(&2)); // Evicted
/// assert!(cache.contains(&3)); // Newly added
/// ```
#[derive(Debug, Clone)]
pub struct LruHeaderCache {
    /// Maximum number of entries
    max_size: usize,
    /// Storage for cached entries
    entries: HashMap<u64, XoverEntry>,
    /// Access order tracking (article_number -> access_count)
    /// Higher access_count means more recently used
    access_order: HashMap<u64, u64>,
    /// Current access counter
    access_counter: u64,
}

impl LruHeaderCache {
    /// Create a new LRU cache with the specified maximum size
    ///
    /// # Arguments
    ///
    /// * `max_size` - Maximum number of entries to cache (must be > 0)
    ///
    /// # Panics
    ///
    /// Panics if `max_size` is 0
    ///
    /// # Example
    ///
    /// ```
    /// use newsflow_engine::cache::{LruHeaderCache, HeaderCache};
    ///
    /// let cache = LruHeaderCache::new(1000);
    /// assert_eq!(cache.capacity(), 1000);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(max_size: usize) -> Self {
        assert!(max_size > 0, "Cache size must be greater than 0");
        Self {
            max_size,
            entries: HashMap::new(),
            access_order: HashMap::new(),
            access_counter: 0,
        }
    }

    /// Evict the least recently used entry
    ///
    /// Returns the article number that was evicted, or None if cache is empty
    fn evict_lru(&mut self) -> Option<u64> {
        if self.entries.is_empty() {
            return None;
        }

        // Find the entry with the lowest access counter
        let lru_article = self
            .access_order
            .iter()
            .min_by_key(|(_, &access_count)| access_count)
            .map(|(&article_number, _)| article_number)?;

        self.entries.remove(&lru_article);
        self.access_order.remove(&lru_article);

        Some(lru_article)
    }

    /// Update access time for an entry
    fn touch(&mut self, article_number: &u64) {
        self.access_counter += 1;
        self.access_order
            .insert(*article_number, self.access_counter);
    }
}

impl HeaderCache for LruHeaderCache {
    fn put(&mut self, article_number: u64, entry: XoverEntry) {
        // If we're at capacity and this is a new entry, evict LRU
        if self.entries.len() >= self.max_size && !self.entries.contains_key(&article_number) {
            self.evict_lru();
        }

        // Insert or update the entry
        self.entries.insert(article_number, entry);
        self.touch(&article_number);
    }

    fn get(&mut self, article_number: &u64) -> Option<&XoverEntry> {
        if self.entries.contains_key(article_number) {
            self.touch(article_number);
            self.entries.get(article_number)
        } else {
            None
        }
    }

    fn contains(&self, article_number: &u64) -> bool {
        self.entries.contains_key(article_number)
    }

    fn remove(&mut self, article_number: &u64) -> Option<XoverEntry> {
        self.access_order.remove(article_number);
        self.entries.remove(article_number)
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.access_order.clear();
        self.access_counter = 0;
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.max_size
    }
}
