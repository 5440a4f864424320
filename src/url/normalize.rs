use crate::{UrlError, UrlResult};
use url::Url;

/// Computes the key a frontier deduplicates URLs on
///
/// Two URLs with the same key point at the same document as far as the
/// frontier is concerned.
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject schemes other than http and https
/// 3. Require a host (the parser lowercases it)
/// 4. Remove the fragment
/// 5. Remove an empty query string (trailing `?`)
///
/// Path and query are otherwise left alone: the trap filter reasons about
/// them as they were linked.
///
/// # Examples
///
/// ```
/// use trawl::url::frontier_key;
///
/// let key = frontier_key("http://WWW.ICS.UCI.EDU/page?#top").unwrap();
/// assert_eq!(key, "http://www.ics.uci.edu/page");
/// ```
pub fn frontier_key(url_str: &str) -> UrlResult<String> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);

    if url.query() == Some("") {
        url.set_query(None);
    }

    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_fragment() {
        let key = frontier_key("https://www.ics.uci.edu/page#section").unwrap();
        assert_eq!(key, "https://www.ics.uci.edu/page");
    }

    #[test]
    fn test_lowercase_host() {
        let key = frontier_key("https://WWW.ICS.UCI.EDU/Page").unwrap();
        assert_eq!(key, "https://www.ics.uci.edu/Page");
    }

    #[test]
    fn test_empty_query_removed() {
        let key = frontier_key("https://www.ics.uci.edu/page?").unwrap();
        assert_eq!(key, "https://www.ics.uci.edu/page");
    }

    #[test]
    fn test_query_kept_verbatim() {
        let key = frontier_key("https://www.ics.uci.edu/page?b=2&a=1").unwrap();
        assert_eq!(key, "https://www.ics.uci.edu/page?b=2&a=1");
    }

    #[test]
    fn test_empty_path_becomes_root() {
        let key = frontier_key("https://www.ics.uci.edu").unwrap();
        assert_eq!(key, "https://www.ics.uci.edu/");
    }

    #[test]
    fn test_scheme_is_kept() {
        let key = frontier_key("http://www.ics.uci.edu/").unwrap();
        assert_eq!(key, "http://www.ics.uci.edu/");
    }

    #[test]
    fn test_invalid_scheme() {
        let result = frontier_key("ftp://www.ics.uci.edu/page");
        assert!(matches!(result.unwrap_err(), UrlError::InvalidScheme(_)));
    }

    #[test]
    fn test_malformed_url() {
        let result = frontier_key("not a url");
        assert!(matches!(result.unwrap_err(), UrlError::Parse(_)));
    }
}
