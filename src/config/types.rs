use crate::config::validation::validate_crawl_settings;
use crate::url::{authority, parse_root_url, EXCLUDED_EXTENSIONS};
use crate::ConfigResult;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default page budget when none is configured
pub const DEFAULT_MAX_PAGES: usize = 100;

/// Default politeness delay in seconds
pub const DEFAULT_DELAY_SECS: f64 = 1.0;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default number of concurrent fetchers (1 = strict BFS)
pub const DEFAULT_WORKERS: usize = 1;

/// User-Agent header sent with every request
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Main configuration structure, as read from a TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlSettings,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Builds a configuration for `root_url` with every other value defaulted
    pub fn for_root(root_url: impl Into<String>) -> Self {
        Self {
            crawl: CrawlSettings::new(root_url),
            output: OutputConfig::default(),
        }
    }
}

/// Crawl behavior settings
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlSettings {
    /// Page the crawl starts from; its host defines the crawl domain
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Maximum number of documents to collect
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Pause between fetches (seconds)
    #[serde(default = "default_delay")]
    pub delay: f64,

    /// Case-insensitive substrings that exclude a URL
    #[serde(rename = "exclude-patterns", default)]
    pub exclude_patterns: Vec<String>,

    /// Number of concurrent fetchers
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl CrawlSettings {
    /// Creates settings for `root_url` with all defaults applied
    pub fn new(root_url: impl Into<String>) -> Self {
        Self {
            root_url: root_url.into(),
            max_pages: DEFAULT_MAX_PAGES,
            delay: DEFAULT_DELAY_SECS,
            exclude_patterns: Vec::new(),
            workers: DEFAULT_WORKERS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the structured (JSON) output
    #[serde(rename = "json-path", default = "default_json_path")]
    pub json_path: PathBuf,

    /// Path of the flat text output
    #[serde(rename = "text-path", default = "default_text_path")]
    pub text_path: PathBuf,

    /// Optional SQLite database receiving the documents
    #[serde(rename = "sqlite-path", default)]
    pub sqlite_path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: default_json_path(),
            text_path: default_text_path(),
            sqlite_path: None,
        }
    }
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

fn default_delay() -> f64 {
    DEFAULT_DELAY_SECS
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_json_path() -> PathBuf {
    PathBuf::from("scraped_docs.json")
}

fn default_text_path() -> PathBuf {
    PathBuf::from("scraped_docs.txt")
}

/// Immutable per-run crawl parameters, derived from validated settings
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// First URL placed on the frontier
    pub root_url: Url,

    /// Authority (host and explicit port) every crawled URL must match
    pub domain: String,

    /// Page budget
    pub max_pages: usize,

    /// Pause after each fetch (sequential) or per-host spacing (concurrent)
    pub politeness_delay: Duration,

    /// Lowercased exclusion substrings
    pub excluded_patterns: Vec<String>,

    /// Lowercased file-extension suffixes, dot included
    pub excluded_extensions: Vec<String>,

    pub request_timeout: Duration,
    pub user_agent: String,
    pub workers: usize,
}

impl CrawlConfig {
    /// Validates `settings` and derives the run configuration
    pub fn from_settings(settings: &CrawlSettings) -> ConfigResult<Self> {
        validate_crawl_settings(settings)?;

        let root_url = parse_root_url(&settings.root_url)
            .map_err(|e| crate::ConfigError::InvalidUrl(e.to_string()))?;
        let domain = authority(&root_url).ok_or_else(|| {
            crate::ConfigError::InvalidUrl(format!("No host in root URL '{}'", root_url))
        })?;
        let politeness_delay = Duration::try_from_secs_f64(settings.delay).map_err(|e| {
            crate::ConfigError::Validation(format!("delay {} is out of range: {}", settings.delay, e))
        })?;

        Ok(Self {
            root_url,
            domain,
            max_pages: settings.max_pages,
            politeness_delay,
            excluded_patterns: settings
                .exclude_patterns
                .iter()
                .map(|p| p.trim().to_lowercase())
                .collect(),
            excluded_extensions: EXCLUDED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            request_timeout: Duration::from_secs(settings.request_timeout),
            user_agent: USER_AGENT.to_string(),
            workers: settings.workers,
        })
    }

    /// Convenience constructor using defaults for everything but the root
    pub fn new(root_url: &str) -> ConfigResult<Self> {
        Self::from_settings(&CrawlSettings::new(root_url))
    }
}
