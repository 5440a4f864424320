//! Crawler module: link extraction and the crawl loop
//!
//! This module contains the core crawling logic, including:
//! - Content gating and outbound link extraction
//! - The sequential crawl loop driving frontier, corpus and analytics

mod crawl_loop;
mod extractor;

pub use crate::state::LoopState;
pub use crawl_loop::CrawlLoop;
pub use extractor::{LinkExtractor, LINK_ATTRIBUTES, REJECTED_CONTENT_MARKERS};

use crate::analytics::write_report;
use crate::config::Config;
use crate::corpus::HttpCorpus;
use crate::frontier::{Frontier, SqliteFrontier};
use crate::Result;
use std::path::Path;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open the persisted frontier, resetting it on a fresh run
/// 2. Seed the frontier if it holds no URLs
/// 3. Build the HTTP corpus
/// 4. Crawl until the frontier is exhausted
/// 5. Write the analytics report
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `fresh` - Discard any persisted frontier before starting
///
/// # Returns
///
/// * `Ok(())` - Crawl completed and the report was written
/// * `Err(TrawlError)` - Crawl failed; no report is written
///
/// # Example
///
/// ```no_run
/// use trawl::config::load_config;
/// use trawl::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// run_crawl(&config, false).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config, fresh: bool) -> Result<()> {
    let mut frontier = SqliteFrontier::open(Path::new(&config.output.frontier_path))?;

    if fresh {
        tracing::info!("Resetting frontier at {}", config.output.frontier_path);
        frontier.reset()?;
    }

    let stats = frontier.stats();
    if stats.total() == 0 {
        tracing::info!("Seeding frontier with {} URLs", config.seeds.len());
        for seed in &config.seeds {
            frontier.add_url(seed)?;
        }
    } else {
        tracing::info!(
            "Resuming frontier: {} pending, {} fetched",
            stats.pending,
            stats.fetched
        );
    }

    let corpus = HttpCorpus::new(config)?;
    let mut crawl = CrawlLoop::new(frontier, corpus, &config.crawler);
    crawl.run().await?;

    write_report(crawl.analytics(), Path::new(&config.output.report_path))?;
    Ok(())
}
