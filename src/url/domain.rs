use url::Url;

/// Extracts the authority (host plus explicit port) from a URL
///
/// The host is lowercased. A port is appended only when the URL names a
/// non-default port, so `https://example.com:443/` and `https://example.com/`
/// share the authority `example.com`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_scribe::url::authority;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(authority(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://localhost:8080/").unwrap();
/// assert_eq!(authority(&url), Some("localhost:8080".to_string()));
/// ```
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    if host.is_empty() {
        return None;
    }
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}
