//! Configuration module for Site-Scribe
//!
//! Settings come from an optional TOML file and are overridden by CLI flags.
//! Validated settings are turned into an immutable [`CrawlConfig`] for one run.
//!
//! # Example
//!
//! ```no_run
//! use site_scribe::config::{load_config, CrawlConfig};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scribe.toml")).unwrap();
//! let crawl = CrawlConfig::from_settings(&config.crawl).unwrap();
//! println!("Crawling {} (budget {})", crawl.domain, crawl.max_pages);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    Config, CrawlConfig, CrawlSettings, OutputConfig, DEFAULT_DELAY_SECS, DEFAULT_MAX_PAGES,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_WORKERS, USER_AGENT,
};

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::{validate, MAX_WORKERS};
