//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a fixed user agent and timeout
//! - Main-content extraction and link discovery
//! - The breadth-first frontier
//! - Sequential and concurrent crawl coordination

mod coordinator;
mod decode;
mod extractor;
mod fetcher;
mod frontier;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator, CrawlContext, CrawlResult, PageRecord, Step};
pub use decode::{decode_html, detect_encoding};
pub use extractor::{
    extract, extract_with, normalize_text, Document, ExtractOutcome, Extraction, MarkupTree,
    Rejection, ScraperTree, CONTENT_SELECTORS, MIN_CONTENT_LENGTH, STRIPPED_TAGS,
};
pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use frontier::Frontier;

use crate::config::CrawlConfig;
use crate::ScribeError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Seed the frontier with the root URL
/// 3. Fetch pages and extract their content
/// 4. Follow in-scope links until the queue empties or the budget is met
///
/// # Arguments
///
/// * `config` - The run configuration
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Documents and counters of the finished crawl
/// * `Err(ScribeError)` - The crawl could not start
pub async fn crawl(config: CrawlConfig) -> Result<CrawlResult, ScribeError> {
    run_crawl(config).await
}
