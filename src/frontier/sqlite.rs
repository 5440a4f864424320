//! SQLite-backed frontier
//!
//! Every URL ever queued is kept with its `UrlState`, so an interrupted run
//! resumes where it stopped and URLs fetched in an earlier run are never
//! queued again.

use crate::frontier::schema::initialize_schema;
use crate::frontier::{dedup_key, Frontier, FrontierError, FrontierResult};
use crate::state::UrlState;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Counts of URLs by state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrontierStats {
    /// URLs waiting to be handed out
    pub pending: u64,

    /// URLs handed out, in this run or an earlier one
    pub fetched: u64,
}

impl FrontierStats {
    /// Every URL the frontier has ever accepted
    pub fn total(&self) -> u64 {
        self.pending + self.fetched
    }
}

/// Persistent FIFO frontier
pub struct SqliteFrontier {
    conn: Connection,
    stats: FrontierStats,
}

impl SqliteFrontier {
    /// Opens (or creates) a frontier database at `path`
    pub fn open(path: &Path) -> FrontierResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        Self::from_connection(conn)
    }

    /// Creates an in-memory frontier (for testing)
    pub fn open_in_memory() -> FrontierResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> FrontierResult<Self> {
        initialize_schema(&conn)?;
        let stats = load_stats(&conn)?;
        Ok(Self { conn, stats })
    }

    /// Current counts by state
    pub fn stats(&self) -> FrontierStats {
        self.stats
    }

    /// Forgets every URL, pending or fetched
    pub fn reset(&mut self) -> FrontierResult<()> {
        self.conn.execute("DELETE FROM urls", [])?;
        self.stats = FrontierStats::default();
        Ok(())
    }

    /// Looks up the state of a URL
    pub fn url_state(&self, url: &str) -> FrontierResult<Option<UrlState>> {
        let state: Option<String> = self
            .conn
            .query_row(
                "SELECT state FROM urls WHERE url_key = ?1",
                params![dedup_key(url)],
                |row| row.get(0),
            )
            .optional()?;

        state
            .map(|s| {
                UrlState::from_db_string(&s)
                    .ok_or_else(|| FrontierError::Database(format!("Unknown URL state '{}'", s)))
            })
            .transpose()
    }
}

/// Counts URLs per state
fn load_stats(conn: &Connection) -> FrontierResult<FrontierStats> {
    let count = |state: UrlState| -> FrontierResult<u64> {
        let n: i64 = conn.query_row(
            "SELECT COUNT(*) FROM urls WHERE state = ?1",
            params![state.to_db_string()],
            |row| row.get(0),
        )?;
        Ok(n as u64)
    };

    Ok(FrontierStats {
        pending: count(UrlState::Pending)?,
        fetched: count(UrlState::Fetched)?,
    })
}

impl Frontier for SqliteFrontier {
    fn get_next_url(&mut self) -> FrontierResult<Option<String>> {
        let tx = self.conn.transaction()?;

        let next: Option<(i64, String)> = tx
            .query_row(
                "SELECT id, url FROM urls WHERE state = ?1 ORDER BY id ASC LIMIT 1",
                params![UrlState::Pending.to_db_string()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((id, url)) = next else {
            return Ok(None);
        };

        tx.execute(
            "UPDATE urls SET state = ?1, fetched_at = ?2 WHERE id = ?3",
            params![UrlState::Fetched.to_db_string(), Utc::now().to_rfc3339(), id],
        )?;
        tx.commit()?;

        self.stats.pending = self.stats.pending.saturating_sub(1);
        self.stats.fetched += 1;

        Ok(Some(url))
    }

    fn add_url(&mut self, url: &str) -> FrontierResult<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO urls (url, url_key, state, discovered_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                url,
                dedup_key(url),
                UrlState::Pending.to_db_string(),
                Utc::now().to_rfc3339()
            ],
        )?;

        if inserted == 1 {
            self.stats.pending += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn fetched(&self) -> u64 {
        self.stats.fetched
    }

    fn len(&self) -> usize {
        self.stats.pending as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_in_memory() {
        let frontier = SqliteFrontier::open_in_memory().unwrap();
        assert_eq!(frontier.stats(), FrontierStats::default());
        assert!(!frontier.has_next_url());
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = SqliteFrontier::open_in_memory().unwrap();
        frontier.add_url("http://a.ics.uci.edu/").unwrap();
        frontier.add_url("http://b.ics.uci.edu/").unwrap();

        assert_eq!(
            frontier.get_next_url().unwrap().as_deref(),
            Some("http://a.ics.uci.edu/")
        );
        assert_eq!(
            frontier.get_next_url().unwrap().as_deref(),
            Some("http://b.ics.uci.edu/")
        );
        assert_eq!(frontier.get_next_url().unwrap(), None);
    }

    #[test]
    fn test_insert_duplicate_url() {
        let mut frontier = SqliteFrontier::open_in_memory().unwrap();

        assert!(frontier.add_url("http://a.ics.uci.edu/x").unwrap());
        assert!(!frontier.add_url("http://a.ics.uci.edu/x").unwrap());
        assert!(!frontier.add_url("http://a.ics.uci.edu/x#top").unwrap());
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_state_transitions() {
        let mut frontier = SqliteFrontier::open_in_memory().unwrap();
        frontier.add_url("http://a.ics.uci.edu/").unwrap();

        assert_eq!(
            frontier.url_state("http://a.ics.uci.edu/").unwrap(),
            Some(UrlState::Pending)
        );

        frontier.get_next_url().unwrap();

        assert_eq!(
            frontier.url_state("http://a.ics.uci.edu/").unwrap(),
            Some(UrlState::Fetched)
        );
        assert_eq!(frontier.url_state("http://z.ics.uci.edu/").unwrap(), None);
        assert_eq!(frontier.stats(), FrontierStats { pending: 0, fetched: 1 });
    }

    #[test]
    fn test_resume_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("frontier.db");

        {
            let mut frontier = SqliteFrontier::open(&path).unwrap();
            frontier.add_url("http://a.ics.uci.edu/").unwrap();
            frontier.add_url("http://b.ics.uci.edu/").unwrap();
            frontier.get_next_url().unwrap();
        }

        let mut frontier = SqliteFrontier::open(&path).unwrap();
        assert_eq!(frontier.fetched(), 1);
        assert_eq!(frontier.len(), 1);
        assert!(!frontier.add_url("http://a.ics.uci.edu/").unwrap());
        assert_eq!(
            frontier.get_next_url().unwrap().as_deref(),
            Some("http://b.ics.uci.edu/")
        );
    }

    #[test]
    fn test_reset() {
        let mut frontier = SqliteFrontier::open_in_memory().unwrap();
        frontier.add_url("http://a.ics.uci.edu/").unwrap();
        frontier.get_next_url().unwrap();

        frontier.reset().unwrap();

        assert_eq!(frontier.stats().total(), 0);
        assert!(frontier.add_url("http://a.ics.uci.edu/").unwrap());
    }
}
