//! Corpus: fetches pages and decides which ones are kept
//!
//! The crawl loop only talks to the `Corpus` trait. `HttpCorpus` is the
//! production implementation; tests substitute in-memory corpora.

mod http;

pub use http::{build_http_client, cache_file_name, HttpCorpus};

use crate::TrawlError;
use std::path::PathBuf;

/// A fetched page as handed to the crawl loop
///
/// Immutable once returned; lives for a single loop iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// The URL that was requested
    pub url: String,

    /// Raw response body
    pub content: Vec<u8>,

    /// Content-Type header value, if the server sent one
    pub content_type: Option<String>,

    /// Body size in bytes
    pub size: u64,

    /// HTTP status code
    pub http_code: u16,
}

impl FetchResult {
    /// Builds a result whose size is the body length
    pub fn new(
        url: impl Into<String>,
        content: Vec<u8>,
        content_type: Option<String>,
        http_code: u16,
    ) -> Self {
        let size = content.len() as u64;
        Self {
            url: url.into(),
            content,
            content_type,
            size,
            http_code,
        }
    }
}

/// Source of page content
///
/// `fetch_url` is the only suspension point of the crawl loop. An error
/// returned from it is fatal to the run.
#[allow(async_fn_in_trait)]
pub trait Corpus {
    /// Fetches a page
    async fn fetch_url(&mut self, url: &str) -> Result<FetchResult, TrawlError>;

    /// Where the corpus keeps (or will keep) the content of `url`
    ///
    /// `None` means the corpus does not keep this URL; the crawl loop then
    /// leaves it out of the frontier.
    fn get_file_name(&self, url: &str) -> Option<PathBuf>;
}
