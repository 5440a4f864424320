/// Checks if a host falls under a configured suffix
///
/// Two forms are supported:
/// 1. Dotted suffix: ".ics.uci.edu" matches any host ending in it, such as
///    "www.ics.uci.edu" or "vision.ics.uci.edu", but not "ics.uci.edu" itself
/// 2. Bare suffix: "ics.uci.edu" matches the host itself and every subdomain
///
/// Hosts are expected to be lowercase already.
///
/// # Examples
///
/// ```
/// use trawl::url::matches_host_suffix;
///
/// assert!(matches_host_suffix(".ics.uci.edu", "www.ics.uci.edu"));
/// assert!(!matches_host_suffix(".ics.uci.edu", "ics.uci.edu"));
/// assert!(matches_host_suffix("ics.uci.edu", "ics.uci.edu"));
/// assert!(!matches_host_suffix("ics.uci.edu", "physics.uci.edu"));
/// ```
pub fn matches_host_suffix(suffix: &str, host: &str) -> bool {
    if suffix.is_empty() {
        return false;
    }

    if suffix.starts_with('.') {
        host.len() > suffix.len() && host.ends_with(suffix)
    } else {
        host == suffix || host.ends_with(&format!(".{}", suffix))
    }
}

/// Checks a host against a list of suffixes
pub fn matches_any_suffix(suffixes: &[String], host: &str) -> bool {
    suffixes
        .iter()
        .any(|suffix| matches_host_suffix(suffix, host))
}
