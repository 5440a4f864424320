use serde::Deserialize;

/// Main configuration structure for Trawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub corpus: CorpusConfig,
    pub output: OutputConfig,
    /// URLs the frontier is seeded with on a fresh run
    #[serde(default)]
    pub seeds: Vec<String>,
}

/// Crawler behavior configuration: link gating and trap thresholds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Hosts must end with one of these suffixes to be crawled
    #[serde(rename = "allowed-host-suffixes")]
    pub allowed_host_suffixes: Vec<String>,

    /// Full URLs longer than this are traps
    #[serde(rename = "max-url-length")]
    pub max_url_length: usize,

    /// Query strings longer than this are traps
    #[serde(rename = "max-query-length")]
    pub max_query_length: usize,

    /// Maximum number of pieces the path may split into on `/`
    #[serde(rename = "max-path-segments")]
    pub max_path_segments: usize,

    /// Pages at or above this many bytes are not parsed for links
    #[serde(rename = "max-content-size")]
    pub max_content_size: u64,

    /// HTTP codes whose pages are not parsed for links
    #[serde(rename = "rejected-http-codes")]
    pub rejected_http_codes: Vec<u16>,

    /// Minimum time between two fetches (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            allowed_host_suffixes: vec![".ics.uci.edu".to_string()],
            max_url_length: 55,
            max_query_length: 15,
            max_path_segments: 5,
            max_content_size: 1_000_000,
            rejected_http_codes: vec![400, 499],
            request_delay_ms: 0,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Corpus (fetch + page store) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusConfig {
    /// Directory fetched pages are written to
    #[serde(rename = "cache-dir")]
    pub cache_dir: String,

    /// Hosts whose pages the corpus keeps; defaults to the crawler's allowed suffixes
    #[serde(rename = "persist-host-suffixes", default)]
    pub persist_host_suffixes: Option<Vec<String>>,

    /// Request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite frontier database
    #[serde(rename = "frontier-path")]
    pub frontier_path: String,

    /// Path to the plain-text analytics report
    #[serde(rename = "report-path")]
    pub report_path: String,
}

impl Config {
    /// Host suffixes the corpus persists, falling back to the crawl scope
    pub fn persist_host_suffixes(&self) -> &[String] {
        self.corpus
            .persist_host_suffixes
            .as_deref()
            .unwrap_or(&self.crawler.allowed_host_suffixes)
    }
}
