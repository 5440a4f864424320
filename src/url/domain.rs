use url::Url;

/// Extracts the network location (host plus explicit port) from a URL
///
/// Default ports are dropped by the URL parser, so `http://a.com:80/` and
/// `http://a.com/` share a network location. Returns None if the URL has no
/// host.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use trawl::url::extract_netloc;
///
/// let url = Url::parse("https://WWW.ICS.UCI.EDU/about").unwrap();
/// assert_eq!(extract_netloc(&url), Some("www.ics.uci.edu".to_string()));
///
/// let url = Url::parse("http://localhost:8080/").unwrap();
/// assert_eq!(extract_netloc(&url), Some("localhost:8080".to_string()));
/// ```
pub fn extract_netloc(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Network location of a raw URL string, or None if it does not parse
pub fn netloc_of(url: &str) -> Option<String> {
    Url::parse(url).ok().as_ref().and_then(extract_netloc)
}
