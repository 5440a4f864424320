//! Plain-text analytics report
//!
//! The report is written once, after the frontier is exhausted:
//!
//! ```text
//! Subdomains:
//!     www.ics.uci.edu: 12
//!
//! Page with Most OutLinks: https://www.ics.uci.edu/ Length: 48
//!
//! Downloaded URLs:
//!     https://www.ics.uci.edu/about
//! Trap URLs:
//!     mailto:someone@ics.uci.edu
//!
//! Longest Page by Words: https://www.ics.uci.edu/ Word Count: 913
//!
//! Most Common Words:
//!     research: 41
//! ```

use super::{AnalyticsAggregator, RunningMax};
use std::fs;
use std::path::Path;

/// Number of words listed under "Most Common Words"
pub const TOP_WORDS: usize = 50;

const INDENT: &str = "    ";

/// Formats the analytics of a run as report text
///
/// # Arguments
///
/// * `analytics` - The aggregated run analytics
///
/// # Returns
///
/// The report text, ending in a newline
pub fn format_report(analytics: &AnalyticsAggregator) -> String {
    let mut out = String::new();

    out.push_str("Subdomains:\n");
    for (netloc, count) in analytics.subdomains() {
        out.push_str(&format!("{}{}: {}\n", INDENT, netloc, count));
    }
    out.push('\n');

    let (url, count) = best_or_empty(analytics.most_outlinks());
    out.push_str(&format!("Page with Most OutLinks: {} Length: {}\n", url, count));
    out.push('\n');

    out.push_str("Downloaded URLs:\n");
    for url in analytics.downloaded() {
        out.push_str(&format!("{}{}\n", INDENT, url));
    }

    out.push_str("Trap URLs:\n");
    for url in analytics.traps() {
        out.push_str(&format!("{}{}\n", INDENT, url));
    }
    out.push('\n');

    let (url, count) = best_or_empty(analytics.longest_page());
    out.push_str(&format!("Longest Page by Words: {} Word Count: {}\n", url, count));
    out.push('\n');

    out.push_str("Most Common Words:\n");
    for (word, count) in analytics.top_words(TOP_WORDS) {
        out.push_str(&format!("{}{}: {}\n", INDENT, word, count));
    }

    out
}

/// Writes the report to `path`, replacing any previous report
///
/// # Arguments
///
/// * `analytics` - The aggregated run analytics
/// * `path` - Destination file
///
/// # Returns
///
/// * `Ok(())` - Report written
/// * `Err(std::io::Error)` - The file could not be written
pub fn write_report(analytics: &AnalyticsAggregator, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, analytics.finalize())?;
    tracing::info!("Report written to {}", path.display());
    Ok(())
}

fn best_or_empty(best: Option<&RunningMax>) -> (&str, usize) {
    best.map_or(("", 0), |m| (m.url.as_str(), m.count))
}
