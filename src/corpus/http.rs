//! HTTP corpus implementation
//!
//! This module fetches pages over HTTP and keeps the bodies of in-scope
//! pages on disk:
//! - Building HTTP clients with proper user agent strings
//! - Politeness delay between consecutive requests
//! - Writing kept pages to `<cache-dir>/<sha256(url)>.html`
//!
//! HTTP error statuses are not errors here: a 404 page is still a
//! `FetchResult`, the link extractor decides what to do with it. Transport
//! failures (DNS, connection refused, timeouts) are returned as errors.

use crate::config::{Config, UserAgentConfig};
use crate::corpus::{Corpus, FetchResult};
use crate::url::matches_any_suffix;
use crate::TrawlError;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Overall request timeout
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use trawl::config::UserAgentConfig;
/// use trawl::corpus::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "Trawl".to_string(),
///     crawler_version: "0.1".to_string(),
///     contact_url: "https://www.ics.uci.edu/".to_string(),
///     contact_email: "crawler@ics.uci.edu".to_string(),
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// File name a kept page is stored under
///
/// Hex SHA-256 of the URL, so any URL maps to a flat, filesystem-safe name.
pub fn cache_file_name(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    format!("{}.html", hex::encode(hasher.finalize()))
}

/// Corpus backed by live HTTP fetches and an on-disk page store
pub struct HttpCorpus {
    client: Client,
    cache_dir: PathBuf,
    persist_host_suffixes: Vec<String>,
    request_delay: Duration,
    last_request: Option<Instant>,
}

impl HttpCorpus {
    /// Creates a corpus from the configuration, creating the cache directory
    pub fn new(config: &Config) -> Result<Self, TrawlError> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.corpus.timeout_secs),
        )?;

        let cache_dir = PathBuf::from(&config.corpus.cache_dir);
        std::fs::create_dir_all(&cache_dir)?;

        Ok(Self {
            client,
            cache_dir,
            persist_host_suffixes: config.persist_host_suffixes().to_vec(),
            request_delay: Duration::from_millis(config.crawler.request_delay_ms),
            last_request: None,
        })
    }

    /// Directory kept pages are written to
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Sleeps until the politeness delay since the previous request has passed
    async fn wait_for_turn(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.request_delay {
                tokio::time::sleep(self.request_delay - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

impl Corpus for HttpCorpus {
    async fn fetch_url(&mut self, url: &str) -> Result<FetchResult, TrawlError> {
        self.wait_for_turn().await;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| TrawlError::Http {
                url: url.to_string(),
                source,
            })?;

        let http_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(|source| TrawlError::Http {
            url: url.to_string(),
            source,
        })?;

        tracing::debug!(
            "Fetched {} (HTTP {}, {} bytes, {:?})",
            url,
            http_code,
            body.len(),
            content_type
        );

        if let Some(path) = self.get_file_name(url) {
            tokio::fs::write(&path, &body).await?;
            tracing::trace!("Stored {} at {}", url, path.display());
        }

        Ok(FetchResult::new(url, body.to_vec(), content_type, http_code))
    }

    fn get_file_name(&self, url: &str) -> Option<PathBuf> {
        let parsed = Url::parse(url).ok()?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return None;
        }

        let host = parsed.host_str()?;
        if !matches_any_suffix(&self.persist_host_suffixes, host) {
            return None;
        }

        Some(self.cache_dir.join(cache_file_name(url)))
    }
}
