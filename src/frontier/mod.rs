//! Frontier: the queue of URLs waiting to be fetched
//!
//! The frontier owns ordering and deduplication. The crawl loop makes no
//! assumption about order beyond "whatever comes next".
//!
//! - `MemoryFrontier`: FIFO queue held in memory, gone when the process exits
//! - `SqliteFrontier`: FIFO queue persisted to SQLite, resumable across runs

mod memory;
mod schema;
mod sqlite;

pub use memory::MemoryFrontier;
pub use sqlite::{FrontierStats, SqliteFrontier};

use thiserror::Error;

/// Errors that can occur during frontier operations
#[derive(Debug, Error)]
pub enum FrontierError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for frontier operations
pub type FrontierResult<T> = Result<T, FrontierError>;

/// Queue of URLs pending fetch
pub trait Frontier {
    /// Hands out the next URL and marks it fetched
    ///
    /// Returns `None` once the frontier is exhausted.
    fn get_next_url(&mut self) -> FrontierResult<Option<String>>;

    /// Queues a URL unless it was seen before
    ///
    /// Returns true if the URL was newly queued.
    fn add_url(&mut self, url: &str) -> FrontierResult<bool>;

    /// Number of URLs handed out so far
    fn fetched(&self) -> u64;

    /// Number of URLs waiting to be handed out
    fn len(&self) -> usize;

    /// Returns true if no URL is waiting
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true while there is work left
    fn has_next_url(&self) -> bool {
        !self.is_empty()
    }
}

/// Derives the deduplication key of a URL
///
/// URLs that do not normalize are keyed on their raw text.
pub(crate) fn dedup_key(url: &str) -> String {
    crate::url::frontier_key(url).unwrap_or_else(|_| url.to_string())
}
