use crate::frontier::{dedup_key, Frontier, FrontierResult};
use std::collections::{HashSet, VecDeque};

/// In-memory FIFO frontier with a seen-set
///
/// A URL is queued at most once per frontier lifetime, even after it has
/// been handed out.
#[derive(Debug, Default)]
pub struct MemoryFrontier {
    queue: VecDeque<String>,
    seen: HashSet<String>,
    fetched: u64,
}

impl MemoryFrontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier queued with `seeds`, in order
    pub fn with_seeds<I, S>(seeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut frontier = Self::new();
        for seed in seeds {
            frontier.push(seed.as_ref());
        }
        frontier
    }

    fn push(&mut self, url: &str) -> bool {
        if self.seen.insert(dedup_key(url)) {
            self.queue.push_back(url.to_string());
            true
        } else {
            false
        }
    }
}

impl Frontier for MemoryFrontier {
    fn get_next_url(&mut self) -> FrontierResult<Option<String>> {
        let next = self.queue.pop_front();
        if next.is_some() {
            self.fetched += 1;
        }
        Ok(next)
    }

    fn add_url(&mut self, url: &str) -> FrontierResult<bool> {
        Ok(self.push(url))
    }

    fn fetched(&self) -> u64 {
        self.fetched
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}
