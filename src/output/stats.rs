//! Frontier statistics and verdict listings
//!
//! Formatting is kept separate from printing so the output can be tested.

use crate::frontier::FrontierStats;
use crate::url::{UrlValidator, Verdict};

/// Formats frontier statistics for display
///
/// # Arguments
///
/// * `stats` - Counts loaded from the frontier
///
/// # Returns
///
/// A multi-line summary
pub fn format_statistics(stats: &FrontierStats) -> String {
    let mut out = String::new();
    let total = stats.total();

    out.push_str("=== Frontier Statistics ===\n\n");
    out.push_str(&format!("  Total URLs: {}\n", total));
    out.push_str(&format!("  Pending: {}\n", stats.pending));
    out.push_str(&format!("  Fetched: {}\n", stats.fetched));

    let progress = if total > 0 {
        (stats.fetched as f64 / total as f64) * 100.0
    } else {
        0.0
    };
    out.push_str(&format!(
        "\nProgress: {:.1}% ({} / {} URLs fetched)\n",
        progress, stats.fetched, total
    ));

    out
}

/// Prints frontier statistics to stdout
pub fn print_statistics(stats: &FrontierStats) {
    print!("{}", format_statistics(stats));
}

/// Classifies each URL and formats one verdict per line
///
/// # Arguments
///
/// * `validator` - The configured validator
/// * `urls` - URLs to classify
pub fn format_verdicts<S: AsRef<str>>(validator: &UrlValidator, urls: &[S]) -> String {
    let mut out = String::new();

    for url in urls {
        let url = url.as_ref();
        match validator.classify(url) {
            Verdict::Valid => {
                out.push_str(&format!("VALID  {}\n", url));
            }
            Verdict::Trap(reason) => {
                out.push_str(&format!("TRAP   {} ({})\n", url, reason));
            }
        }
    }

    out
}

/// Prints the verdict of each URL to stdout
pub fn print_verdicts<S: AsRef<str>>(validator: &UrlValidator, urls: &[S]) {
    print!("{}", format_verdicts(validator, urls));
}
