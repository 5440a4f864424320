//! Link extraction with content gating
//!
//! This module decides whether a fetched page is parsed at all and, if so,
//! returns every link target in its markup as an absolute URL.
//!
//! # Gating Rules
//!
//! Evaluated in order; the first failing rule yields no links:
//!
//! 1. Content-Type mentions `application`, `xml` or `calendar`
//! 2. Body is empty or at least `max_content_size` bytes
//! 3. HTTP code is one of the rejected codes (400 and 499 by default)
//!
//! # Link Sources
//!
//! - The URL attributes in [`LINK_ATTRIBUTES`], on any element
//! - `<object>`: `codebase`, then `classid`, `data` and each `archive`
//!   entry resolved against the codebase
//! - `<meta http-equiv="refresh">` targets
//! - `<param valuetype="ref">` values
//! - CSS `url(...)` and `@import "..."` in `<style>` blocks, and `url(...)`
//!   in `style` attributes
//!
//! Targets resolve against the last `<base href>` if the page has one,
//! otherwise against the page URL. `<base>` itself is not a link.

use crate::config::CrawlerConfig;
use crate::corpus::FetchResult;
use regex::Regex;
use scraper::node::Element;
use scraper::{ElementRef, Html};
use std::net::Ipv6Addr;
use std::sync::LazyLock;
use url::Url;

/// Content-Type fragments that mark non-HTML payloads
pub const REJECTED_CONTENT_MARKERS: &[&str] = &["application", "xml", "calendar"];

/// Attributes read as link targets on every element but `<object>`
pub const LINK_ATTRIBUTES: &[&str] = &[
    "action",
    "archive",
    "background",
    "cite",
    "classid",
    "codebase",
    "data",
    "href",
    "longdesc",
    "profile",
    "src",
    "usemap",
    "dynsrc",
    "lowsrc",
];

static CSS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)url\(("[^"]*"|'[^']*'|[^)]*)\)"#).expect("valid css url regex")
});

static CSS_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"@import "(.*?)""#).expect("valid css import regex"));

static META_REFRESH_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[^;=]*;\s*(?:url\s*=\s*)?(?P<url>.*)$").expect("valid refresh regex")
});

/// A link target as written in the markup
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawLink {
    target: String,

    /// `codebase` of the enclosing `<object>`, resolved before `target`
    codebase: Option<String>,
}

impl RawLink {
    fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            codebase: None,
        }
    }

    fn in_codebase(target: &str, codebase: Option<&str>) -> Self {
        Self {
            target: target.to_string(),
            codebase: codebase.map(str::to_string),
        }
    }
}

/// Link targets of a document plus its `<base href>`, before resolution
#[derive(Debug, Default)]
struct RawLinks {
    base_href: Option<String>,
    links: Vec<RawLink>,
}

/// Extracts outbound links from fetched pages
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    max_content_size: u64,
    rejected_http_codes: Vec<u16>,
}

impl LinkExtractor {
    /// Creates an extractor from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Self {
        Self {
            max_content_size: config.max_content_size,
            rejected_http_codes: config.rejected_http_codes.clone(),
        }
    }

    /// Returns the absolute outbound links of a page, in document order
    ///
    /// Duplicates are kept; deduplication is the frontier's job. Pages that
    /// fail a gating rule, or that carry a link with a broken IPv6
    /// authority, yield an empty list. Other unresolvable links are skipped.
    /// This never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use trawl::corpus::FetchResult;
    /// use trawl::crawler::LinkExtractor;
    ///
    /// let html = br#"<html><body><a href="/a">A</a><a href="b">B</a></body></html>"#;
    /// let result = FetchResult::new(
    ///     "https://www.ics.uci.edu/dir/",
    ///     html.to_vec(),
    ///     Some("text/html".to_string()),
    ///     200,
    /// );
    ///
    /// let links = LinkExtractor::default().extract(&result);
    /// assert_eq!(
    ///     links,
    ///     vec!["https://www.ics.uci.edu/a", "https://www.ics.uci.edu/dir/b"]
    /// );
    /// ```
    pub fn extract(&self, result: &FetchResult) -> Vec<String> {
        if let Some(reason) = self.rejection(result) {
            tracing::debug!("Not parsing {}: {}", result.url, reason);
            return Vec::new();
        }

        let base_url = match Url::parse(&result.url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Cannot resolve links against {}: {}", result.url, e);
                return Vec::new();
            }
        };

        let html = String::from_utf8_lossy(&result.content);
        let document = Html::parse_document(&html);

        match extract_links(&document, &base_url) {
            Ok(links) => links,
            Err(e) => {
                tracing::warn!("Dropping links of {}: {}", result.url, e);
                Vec::new()
            }
        }
    }

    /// Names the gating rule a page fails, if any
    fn rejection(&self, result: &FetchResult) -> Option<String> {
        if let Some(content_type) = &result.content_type {
            let lowered = content_type.to_ascii_lowercase();
            if let Some(marker) = REJECTED_CONTENT_MARKERS
                .iter()
                .find(|marker| lowered.contains(*marker))
            {
                return Some(format!("content type '{}' is {}", content_type, marker));
            }
        }

        if result.size == 0 || result.size >= self.max_content_size {
            return Some(format!("size {} out of range", result.size));
        }

        if self.rejected_http_codes.contains(&result.http_code) {
            return Some(format!("HTTP {}", result.http_code));
        }

        None
    }
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new(&CrawlerConfig::default())
    }
}

/// Collects every link target of the document, resolved to absolute URLs
///
/// Targets that do not resolve are skipped. A target with a broken IPv6
/// authority fails the whole page.
fn extract_links(document: &Html, page_url: &Url) -> Result<Vec<String>, String> {
    let raw = collect_raw_links(document);

    let base = match raw.base_href.as_deref() {
        Some(href) => resolve(page_url, href)?.unwrap_or_else(|| page_url.clone()),
        None => page_url.clone(),
    };

    let mut links = Vec::with_capacity(raw.links.len());
    for link in &raw.links {
        let codebase = match link.codebase.as_deref() {
            Some(codebase) => resolve(&base, codebase)?,
            None => None,
        };

        if let Some(absolute) = resolve(codebase.as_ref().unwrap_or(&base), &link.target)? {
            links.push(absolute.to_string());
        }
    }

    Ok(links)
}

/// Walks the document in order and gathers unresolved link targets
fn collect_raw_links(document: &Html) -> RawLinks {
    let mut raw = RawLinks::default();

    for element in document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
    {
        let el = element.value();

        match el.name() {
            "base" if el.attr("href").is_some() => {
                raw.base_href = el.attr("href").map(str::to_string);
                continue;
            }
            "object" => object_links(el, &mut raw.links),
            _ => {
                for attr in LINK_ATTRIBUTES {
                    if let Some(value) = el.attr(attr) {
                        raw.links.push(RawLink::new(value));
                    }
                }
            }
        }

        match el.name() {
            "meta" => {
                if let Some(target) = meta_refresh_target(el) {
                    raw.links.push(RawLink::new(&target));
                }
            }
            "param" => {
                let is_ref = el
                    .attr("valuetype")
                    .is_some_and(|v| v.eq_ignore_ascii_case("ref"));
                if let Some(value) = el.attr("value").filter(|_| is_ref) {
                    raw.links.push(RawLink::new(value));
                }
            }
            "style" => {
                let css: String = element.text().collect();
                raw.links
                    .extend(style_block_urls(&css).into_iter().map(|u| RawLink::new(&u)));
            }
            _ => {}
        }

        if let Some(style) = el.attr("style") {
            raw.links
                .extend(css_urls(style).into_iter().map(|u| RawLink::new(&u)));
        }
    }

    raw
}

/// `codebase`, `classid`, `data` and `archive` entries of an `<object>`
fn object_links(el: &Element, links: &mut Vec<RawLink>) {
    let codebase = el.attr("codebase");
    if let Some(codebase) = codebase {
        links.push(RawLink::new(codebase));
    }

    for attr in ["classid", "data"] {
        if let Some(value) = el.attr(attr) {
            links.push(RawLink::in_codebase(value, codebase));
        }
    }

    if let Some(archive) = el.attr("archive") {
        for entry in archive.split(' ').filter(|e| !e.is_empty()) {
            links.push(RawLink::in_codebase(entry, codebase));
        }
    }
}

/// Target of a `<meta http-equiv="refresh">`
///
/// Content without a recognizable `url=` part is taken whole.
fn meta_refresh_target(el: &Element) -> Option<String> {
    let is_refresh = el
        .attr("http-equiv")
        .is_some_and(|v| v.eq_ignore_ascii_case("refresh"));
    if !is_refresh {
        return None;
    }

    let content = el.attr("content").unwrap_or("");
    let target = META_REFRESH_URL
        .captures(content)
        .and_then(|caps| caps.name("url"))
        .map_or(content, |m| m.as_str())
        .trim();

    (!target.is_empty()).then(|| unquote(target).to_string())
}

/// `url(...)` targets of a CSS fragment
fn css_urls(css: &str) -> Vec<String> {
    CSS_URL
        .captures_iter(css)
        .filter_map(|caps| caps.get(1))
        .map(|m| unquote(m.as_str()).to_string())
        .collect()
}

/// `url(...)` and `@import "..."` targets of a style block, in source order
fn style_block_urls(css: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = CSS_URL
        .captures_iter(css)
        .filter_map(|caps| caps.get(1))
        .map(|m| (m.start(), unquote(m.as_str()).to_string()))
        .collect();

    found.extend(
        CSS_IMPORT
            .captures_iter(css)
            .filter_map(|caps| caps.get(1))
            .map(|m| (m.start(), m.as_str().to_string())),
    );

    found.sort_by_key(|(start, _)| *start);
    found.into_iter().map(|(_, url)| url).collect()
}

/// Strips one pair of matching surrounding quotes
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Resolves `target` against `base`
///
/// # Returns
///
/// * `Ok(Some(url))` - The absolute URL
/// * `Ok(None)` - The target does not resolve and is skipped
/// * `Err(String)` - The target has a broken IPv6 authority
fn resolve(base: &Url, target: &str) -> Result<Option<Url>, String> {
    let target = target.trim();

    if has_malformed_ipv6_host(target) {
        return Err(format!("invalid IPv6 authority in '{}'", target));
    }

    match base.join(target) {
        Ok(url) => Ok(Some(url)),
        Err(e) => {
            tracing::debug!("Skipping unresolvable link '{}': {}", target, e);
            Ok(None)
        }
    }
}

/// Authority part of a URL reference, if it has one
fn authority(target: &str) -> Option<&str> {
    let rest = match target.split_once(':') {
        Some((scheme, rest)) if is_scheme(scheme) => rest,
        _ => target,
    };

    let rest = rest.strip_prefix("//")?;
    let end = rest
        .find(|c| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Unbalanced brackets, or a bracketed host that is not an IPv6 address
///
/// `[v...]` hosts are IPvFuture literals and pass.
fn has_malformed_ipv6_host(target: &str) -> bool {
    let Some(netloc) = authority(target) else {
        return false;
    };

    let open = netloc.contains('[');
    let close = netloc.contains(']');
    if open != close {
        return true;
    }
    if !open {
        return false;
    }

    let host = netloc.rsplit('@').next().unwrap_or(netloc);
    let Some(literal) = host
        .split_once('[')
        .and_then(|(_, rest)| rest.split_once(']'))
        .map(|(literal, _)| literal)
    else {
        return false;
    };

    if literal.starts_with(|c| c == 'v' || c == 'V') {
        return false;
    }

    let address = literal.split('%').next().unwrap_or(literal);
    address.parse::<Ipv6Addr>().is_err()
}
