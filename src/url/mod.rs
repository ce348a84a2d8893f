//! URL handling module for Site-Scribe
//!
//! This module provides link resolution, authority extraction, exclusion
//! matching, and the crawl scope check.

mod domain;
mod link;
mod matcher;

use crate::config::CrawlConfig;

pub use domain::authority;
pub use link::{parse_root_url, resolve_link, strip_fragment};
pub use matcher::{has_excluded_extension, matches_excluded_pattern, EXCLUDED_EXTENSIONS};

use ::url::Url;

/// Decides whether a URL belongs to the crawl
///
/// A URL is in scope only if all of the following hold:
/// 1. Its authority equals `config.domain` exactly (no subdomain matching)
/// 2. Its path does not end with an excluded extension
/// 3. Its lowercased form contains none of the excluded patterns
///
/// Fragments must already be stripped by the caller.
///
/// # Examples
///
/// ```
/// use site_scribe::config::CrawlConfig;
/// use site_scribe::url::is_in_scope;
/// use url::Url;
///
/// let config = CrawlConfig::new("https://example.com/").unwrap();
/// assert!(is_in_scope(&Url::parse("https://example.com/about").unwrap(), &config));
/// assert!(!is_in_scope(&Url::parse("https://blog.example.com/").unwrap(), &config));
/// assert!(!is_in_scope(&Url::parse("https://example.com/cv.pdf").unwrap(), &config));
/// ```
pub fn is_in_scope(url: &Url, config: &CrawlConfig) -> bool {
    match authority(url) {
        Some(host) if host == config.domain => {}
        _ => return false,
    }

    if has_excluded_extension(url, &config.excluded_extensions) {
        return false;
    }

    !matches_excluded_pattern(url, &config.excluded_patterns)
}
