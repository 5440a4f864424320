//! Trap filter for discovered links
//!
//! Decides whether a candidate link is worth handing to the frontier. A link
//! is rejected as a trap if any rule fires:
//!
//! | Rule | Default |
//! |------|---------|
//! | query longer than `max_query_length` | 15 |
//! | full URL longer than `max_url_length` | 55 |
//! | query contains a session/export marker | `share=`, `action=download` |
//! | scheme other than http/https | |
//! | path splits on `/` into more than `max_path_segments` pieces | 5 |
//! | host outside the allowed suffixes | `.ics.uci.edu` |
//! | path ends in a denied file extension | see `tables` |
//!
//! Unparseable URLs are traps too; classification never fails.

use crate::config::CrawlerConfig;
use crate::url::matcher::matches_any_suffix;
use crate::url::tables::{denied_extension, ALLOWED_SCHEMES, TRAP_QUERY_MARKERS};
use std::fmt;
use url::Url;

/// Why a link was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrapReason {
    /// The URL could not be parsed
    Malformed,
    /// The query string is longer than allowed
    QueryTooLong(usize),
    /// The full URL is longer than allowed
    UrlTooLong(usize),
    /// The query carries a session, share or export marker
    TrapQuery(&'static str),
    /// The scheme is not http or https
    Scheme(String),
    /// The path is nested too deeply
    PathTooDeep(usize),
    /// The URL has no host
    MissingHost,
    /// The host is outside the crawl scope
    OffSite(String),
    /// The path points at a file type not worth fetching
    DeniedExtension(String),
}

impl fmt::Display for TrapReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed URL"),
            Self::QueryTooLong(len) => write!(f, "query too long ({} chars)", len),
            Self::UrlTooLong(len) => write!(f, "URL too long ({} chars)", len),
            Self::TrapQuery(marker) => write!(f, "query contains '{}'", marker),
            Self::Scheme(scheme) => write!(f, "unsupported scheme '{}'", scheme),
            Self::PathTooDeep(pieces) => write!(f, "path too deep ({} pieces)", pieces),
            Self::MissingHost => write!(f, "missing host"),
            Self::OffSite(host) => write!(f, "host '{}' outside crawl scope", host),
            Self::DeniedExtension(ext) => write!(f, "denied extension '.{}'", ext),
        }
    }
}

/// Outcome of classifying a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Worth crawling
    Valid,
    /// Rejected by a trap rule
    Trap(TrapReason),
}

impl Verdict {
    /// Returns true if the link passed every rule
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The rule that rejected the link, if any
    pub fn trap_reason(&self) -> Option<&TrapReason> {
        match self {
            Self::Valid => None,
            Self::Trap(reason) => Some(reason),
        }
    }
}

/// Classifies links as crawl-worthy or traps
#[derive(Debug, Clone)]
pub struct UrlValidator {
    allowed_host_suffixes: Vec<String>,
    max_url_length: usize,
    max_query_length: usize,
    max_path_segments: usize,
}

impl UrlValidator {
    /// Creates a validator from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Self {
        Self {
            allowed_host_suffixes: config.allowed_host_suffixes.clone(),
            max_url_length: config.max_url_length,
            max_query_length: config.max_query_length,
            max_path_segments: config.max_path_segments,
        }
    }

    /// Returns true if `url` should be crawled
    ///
    /// # Examples
    ///
    /// ```
    /// use trawl::url::UrlValidator;
    ///
    /// let validator = UrlValidator::default();
    /// assert!(validator.is_valid("https://x.ics.uci.edu/"));
    /// assert!(!validator.is_valid("http://x.ics.uci.edu/page.pdf"));
    /// assert!(!validator.is_valid("http://evil.com/"));
    /// ```
    pub fn is_valid(&self, url: &str) -> bool {
        self.classify(url).is_valid()
    }

    /// Classifies `url`, naming the first rule that rejects it
    pub fn classify(&self, url: &str) -> Verdict {
        match self.check(url) {
            Ok(()) => Verdict::Valid,
            Err(reason) => Verdict::Trap(reason),
        }
    }

    fn check(&self, raw: &str) -> Result<(), TrapReason> {
        let url = Url::parse(raw).map_err(|_| TrapReason::Malformed)?;
        let query = url.query().unwrap_or("");

        if query.len() > self.max_query_length {
            return Err(TrapReason::QueryTooLong(query.len()));
        }

        let url_length = raw.chars().count();
        if url_length > self.max_url_length {
            return Err(TrapReason::UrlTooLong(url_length));
        }

        if let Some(marker) = TRAP_QUERY_MARKERS
            .iter()
            .find(|marker| query.contains(*marker))
        {
            return Err(TrapReason::TrapQuery(*marker));
        }

        if !ALLOWED_SCHEMES.contains(&url.scheme()) {
            return Err(TrapReason::Scheme(url.scheme().to_string()));
        }

        let path = strip_params(url.path());

        let pieces = path.split('/').count();
        if pieces > self.max_path_segments {
            return Err(TrapReason::PathTooDeep(pieces));
        }

        let host = url.host_str().ok_or(TrapReason::MissingHost)?;
        if !matches_any_suffix(&self.allowed_host_suffixes, host) {
            return Err(TrapReason::OffSite(host.to_string()));
        }

        if let Some(ext) = denied_extension(path) {
            return Err(TrapReason::DeniedExtension(ext));
        }

        Ok(())
    }
}

/// Drops `;params` from the last path segment
///
/// `/file.pdf;jsessionid=x` is checked as `/file.pdf`. Earlier segments keep
/// their semicolons.
fn strip_params(path: &str) -> &str {
    let last_segment = path.rfind('/').map_or(0, |i| i + 1);
    match path[last_segment..].find(';') {
        Some(i) => &path[..last_segment + i],
        None => path,
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new(&CrawlerConfig::default())
    }
}
