//! Per-run crawl analytics
//!
//! The crawl loop owns a single `AnalyticsAggregator` for the whole run and
//! feeds it every fetched page and every classified link. When the frontier
//! is exhausted the aggregator is rendered into a plain-text report.

mod aggregator;
pub mod report;

pub use aggregator::{AnalyticsAggregator, RunningMax};
pub use report::{format_report, write_report, TOP_WORDS};

use crate::url::Verdict;

/// An outbound link after trap classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLink {
    /// Absolute link target
    pub url: String,

    /// Outcome of the validity check
    pub verdict: Verdict,

    /// Whether the link was handed to the frontier
    pub persisted: bool,
}

impl ClassifiedLink {
    /// Creates a classified link
    pub fn new(url: impl Into<String>, verdict: Verdict, persisted: bool) -> Self {
        Self {
            url: url.into(),
            verdict,
            persisted,
        }
    }

    /// Returns true if the link passed the validity check
    pub fn is_valid(&self) -> bool {
        self.verdict.is_valid()
    }
}
