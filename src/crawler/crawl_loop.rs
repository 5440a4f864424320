//! The crawl loop: one URL at a time until the frontier runs dry
//!
//! Each step pulls a URL from the frontier, fetches it through the corpus,
//! records the page text in the analytics, extracts and classifies its
//! outbound links, and hands the crawl-worthy ones the corpus keeps back to
//! the frontier.

use crate::analytics::{AnalyticsAggregator, ClassifiedLink};
use crate::config::CrawlerConfig;
use crate::corpus::Corpus;
use crate::crawler::LinkExtractor;
use crate::frontier::Frontier;
use crate::state::LoopState;
use crate::text::{page_text_from_bytes, tokenize};
use crate::url::{UrlValidator, Verdict};
use crate::Result;
use std::time::Instant;

/// Sequential crawl driver
///
/// Owns the frontier, the corpus and the run analytics. Errors from the
/// frontier or corpus abort the run.
pub struct CrawlLoop<F: Frontier, C: Corpus> {
    frontier: F,
    corpus: C,
    extractor: LinkExtractor,
    validator: UrlValidator,
    analytics: AnalyticsAggregator,
    state: LoopState,
}

impl<F: Frontier, C: Corpus> CrawlLoop<F, C> {
    /// Creates a crawl loop
    ///
    /// # Arguments
    ///
    /// * `frontier` - Source of URLs to crawl, already seeded
    /// * `corpus` - Page fetcher
    /// * `config` - Gating and validation thresholds
    pub fn new(frontier: F, corpus: C, config: &CrawlerConfig) -> Self {
        let state = LoopState::from_pending(frontier.has_next_url());

        Self {
            frontier,
            corpus,
            extractor: LinkExtractor::new(config),
            validator: UrlValidator::new(config),
            analytics: AnalyticsAggregator::new(),
            state,
        }
    }

    /// Current loop state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Analytics gathered so far
    pub fn analytics(&self) -> &AnalyticsAggregator {
        &self.analytics
    }

    /// The frontier
    pub fn frontier(&self) -> &F {
        &self.frontier
    }

    /// The corpus
    pub fn corpus(&self) -> &C {
        &self.corpus
    }

    /// Processes the next URL of the frontier
    ///
    /// # Returns
    ///
    /// * `Ok(LoopState::Running)` - More URLs are pending
    /// * `Ok(LoopState::Done)` - The frontier is exhausted
    /// * `Err(TrawlError)` - The frontier or corpus failed
    pub async fn step(&mut self) -> Result<LoopState> {
        let Some(url) = self.frontier.get_next_url()? else {
            self.state = LoopState::Done;
            return Ok(self.state);
        };

        tracing::info!(
            "Fetching URL {} ... Fetched: {}, Queue size: {}",
            url,
            self.frontier.fetched(),
            self.frontier.len()
        );

        let result = self.corpus.fetch_url(&url).await?;

        let text = page_text_from_bytes(&result.content);
        let tokens = tokenize(&text);
        self.analytics.record_page(&result, &tokens);

        let links = self.extractor.extract(&result);
        let mut classified = Vec::with_capacity(links.len());
        for link in links {
            classified.push(self.classify_link(link)?);
        }
        self.analytics.record_links(&result.url, &classified);

        tracing::debug!(
            "{}: {} tokens, {} links ({} queued)",
            url,
            tokens.len(),
            classified.len(),
            classified.iter().filter(|l| l.persisted).count()
        );

        self.state = LoopState::from_pending(self.frontier.has_next_url());
        Ok(self.state)
    }

    /// Runs until the frontier is exhausted
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The rendered report
    /// * `Err(TrawlError)` - The run was aborted; no report is produced
    pub async fn run(&mut self) -> Result<String> {
        let start_time = Instant::now();

        while !self.state.is_terminal() {
            self.step().await?;

            let pages = self.analytics.pages();
            if !self.state.is_terminal() && pages % 100 == 0 {
                let rate = pages as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} pages crawled, {} in frontier, {:.2} pages/sec",
                    pages,
                    self.frontier.len(),
                    rate
                );
            }
        }

        tracing::info!(
            "Crawl completed: {} pages crawled in {:?}",
            self.analytics.pages(),
            start_time.elapsed()
        );

        Ok(self.analytics.finalize())
    }

    /// Classifies a link and queues it if the corpus keeps it
    fn classify_link(&mut self, url: String) -> Result<ClassifiedLink> {
        let verdict = self.validator.classify(&url);

        let persisted = match &verdict {
            Verdict::Valid => {
                if self.corpus.get_file_name(&url).is_some() {
                    self.frontier.add_url(&url)?;
                    true
                } else {
                    false
                }
            }
            Verdict::Trap(reason) => {
                tracing::debug!("Trap {}: {}", url, reason);
                false
            }
        };

        Ok(ClassifiedLink {
            url,
            verdict,
            persisted,
        })
    }
}
