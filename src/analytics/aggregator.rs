//! Running statistics over the pages of one crawl

use super::ClassifiedLink;
use crate::corpus::FetchResult;
use crate::text::is_stopword;
use crate::url::netloc_of;
use std::collections::{BTreeMap, HashMap};

/// The best value seen so far and the page it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningMax {
    /// Page URL
    pub url: String,

    /// Measured value
    pub count: usize,
}

impl RunningMax {
    /// Replaces `current` if `count` is strictly larger
    ///
    /// Ties keep the page seen first. A count of zero never qualifies.
    fn offer(current: &mut Option<RunningMax>, url: &str, count: usize) {
        let best = current.as_ref().map_or(0, |m| m.count);
        if count > best {
            *current = Some(RunningMax {
                url: url.to_string(),
                count,
            });
        }
    }
}

/// Accumulates analytics for a single crawl run
///
/// Updated in place by the crawl loop; rendering with
/// [`finalize`](Self::finalize) never mutates it.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsAggregator {
    subdomains: BTreeMap<String, u64>,
    most_outlinks: Option<RunningMax>,
    downloaded: Vec<String>,
    traps: Vec<String>,
    longest_page: Option<RunningMax>,
    word_counts: HashMap<String, u64>,
    pages: u64,
}

impl AnalyticsAggregator {
    /// Creates an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fetched page and its tokens
    ///
    /// Bumps the visit count of the page's network location, updates the
    /// longest page and tallies every token that is not a stopword.
    ///
    /// # Arguments
    ///
    /// * `result` - The fetched page
    /// * `tokens` - Tokens of the page text, in order
    pub fn record_page(&mut self, result: &FetchResult, tokens: &[String]) {
        self.pages += 1;

        RunningMax::offer(&mut self.longest_page, &result.url, tokens.len());

        let netloc = netloc_of(&result.url).unwrap_or_default();
        *self.subdomains.entry(netloc).or_insert(0) += 1;

        for token in tokens.iter().filter(|t| !is_stopword(t)) {
            match self.word_counts.get_mut(token) {
                Some(count) => *count += 1,
                None => {
                    self.word_counts.insert(token.clone(), 1);
                }
            }
        }
    }

    /// Records the classified outbound links of a page
    ///
    /// # Arguments
    ///
    /// * `source_url` - The page the links were extracted from
    /// * `links` - Every extracted link, traps included
    pub fn record_links(&mut self, source_url: &str, links: &[ClassifiedLink]) {
        RunningMax::offer(&mut self.most_outlinks, source_url, links.len());

        for link in links {
            if link.is_valid() {
                self.downloaded.push(link.url.clone());
            } else {
                self.traps.push(link.url.clone());
            }
        }
    }

    /// Returns the `n` most frequent words
    ///
    /// Sorted by descending count; equal counts are ordered by ascending word.
    pub fn top_words(&self, n: usize) -> Vec<(&str, u64)> {
        let mut words: Vec<(&str, u64)> = self
            .word_counts
            .iter()
            .map(|(word, count)| (word.as_str(), *count))
            .collect();

        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        words.truncate(n);
        words
    }

    /// Renders the report text
    pub fn finalize(&self) -> String {
        super::format_report(self)
    }

    /// Visit counts per network location, ordered by netloc
    pub fn subdomains(&self) -> &BTreeMap<String, u64> {
        &self.subdomains
    }

    /// The page with the most outbound links
    pub fn most_outlinks(&self) -> Option<&RunningMax> {
        self.most_outlinks.as_ref()
    }

    /// Links classified valid, in discovery order
    pub fn downloaded(&self) -> &[String] {
        &self.downloaded
    }

    /// Links classified as traps, in discovery order
    pub fn traps(&self) -> &[String] {
        &self.traps
    }

    /// The page with the most tokens
    pub fn longest_page(&self) -> Option<&RunningMax> {
        self.longest_page.as_ref()
    }

    /// Occurrences of a single word
    pub fn word_count(&self, word: &str) -> u64 {
        self.word_counts.get(word).copied().unwrap_or(0)
    }

    /// Number of pages recorded so far
    pub fn pages(&self) -> u64 {
        self.pages
    }
}
