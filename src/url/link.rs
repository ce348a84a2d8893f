use crate::{UrlError, UrlResult};
use url::Url;

/// Removes the fragment (`#...`) from a URL
pub fn strip_fragment(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}

/// Parses and checks the crawl root URL
///
/// The root must be http(s) with a host. Its fragment is dropped so it
/// compares equal to links pointing at the same page.
pub fn parse_root_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    Ok(strip_fragment(url))
}

/// Resolves a link href against the page URL
///
/// Returns None if the link should be ignored:
/// - empty or fragment-only hrefs (same page anchors)
/// - javascript:, mailto:, tel:, data: schemes
/// - hrefs that do not resolve to an http(s) URL
///
/// The returned URL never carries a fragment.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_scribe::url::resolve_link;
///
/// let base = Url::parse("https://example.com/docs/intro").unwrap();
/// let link = resolve_link("setup#install", &base).unwrap();
/// assert_eq!(link.as_str(), "https://example.com/docs/setup");
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    if absolute.scheme() == "http" || absolute.scheme() == "https" {
        Some(strip_fragment(absolute))
    } else {
        None
    }
}
