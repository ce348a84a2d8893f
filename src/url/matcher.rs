use url::Url;

/// File extensions that are never fetched
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".zip", ".rar", ".jpg", ".jpeg",
    ".png", ".gif", ".svg", ".mp4", ".mp3", ".avi", ".mov",
];

/// Checks whether the URL path ends with one of `extensions`
///
/// Matching is case-insensitive; `extensions` must already be lowercase.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_scribe::url::{has_excluded_extension, EXCLUDED_EXTENSIONS};
///
/// let exts: Vec<String> = EXCLUDED_EXTENSIONS.iter().map(|e| e.to_string()).collect();
/// let url = Url::parse("https://example.com/report.PDF").unwrap();
/// assert!(has_excluded_extension(&url, &exts));
/// ```
pub fn has_excluded_extension(url: &Url, extensions: &[String]) -> bool {
    let path = url.path().to_lowercase();
    extensions.iter().any(|ext| path.ends_with(ext.as_str()))
}

/// Checks whether the lowercased URL contains any of `patterns`
///
/// `patterns` must already be lowercase.
pub fn matches_excluded_pattern(url: &Url, patterns: &[String]) -> bool {
    if patterns.is_empty() {
        return false;
    }
    let lowered = url.as_str().to_lowercase();
    patterns
        .iter()
        .any(|pattern| lowered.contains(pattern.as_str()))
}
