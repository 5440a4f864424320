//! Markup to plain text
//!
//! Word statistics are computed over the text left after stripping markup
//! with a fixed sequence of regex passes. The order matters: scripts go
//! first so their bodies never reach the tag pass, and entities go before
//! tags so `&lt;b&gt;` is not turned into a tag.

use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script.*?/script>").expect("valid script regex"));

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&[^;]+;").expect("valid entity regex"));

static ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[nrt]|\\").expect("valid escape regex"));

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").expect("valid space regex"));

/// Strips markup from a document, leaving the text the word counts run on
///
/// Passes, in order: `<script>` blocks, character entities, literal
/// backslash escapes, tags, then runs of spaces collapse to one.
pub fn page_text(markup: &str) -> String {
    let text = SCRIPT_BLOCK.replace_all(markup, "");
    let text = ENTITY.replace_all(&text, "");
    let text = ESCAPE.replace_all(&text, "");
    let text = TAG.replace_all(&text, "");
    SPACES.replace_all(&text, " ").into_owned()
}

/// Decodes a raw page body and strips its markup
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn page_text_from_bytes(content: &[u8]) -> String {
    page_text(&String::from_utf8_lossy(content))
}
