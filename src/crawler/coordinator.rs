//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop. All mutable crawl
//! state lives in a [`CrawlContext`] that is passed explicitly to each
//! step, so the same bookkeeping serves the sequential loop here and the
//! worker pool in the scheduler.

use crate::config::CrawlConfig;
use crate::crawler::extractor::{extract, ExtractOutcome, Extraction};
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome};
use crate::crawler::frontier::Frontier;
use crate::crawler::scheduler::run_pool;
use crate::crawler::Document;
use crate::state::PageState;
use crate::url::is_in_scope;
use crate::ScribeError;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::sync::Arc;
use url::Url;

/// Terminal-state log entry for one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub url: String,
    pub state: PageState,
    /// Why the URL ended in this state, when it was not scraped
    pub detail: Option<String>,
}

/// Everything a crawl produced
#[derive(Debug, Clone)]
pub struct CrawlResult {
    /// Accepted documents in scrape order
    pub documents: Vec<Document>,
    pub scraped_count: usize,
    pub skipped_count: usize,
    /// One entry per URL that reached a terminal state
    pub records: Vec<PageRecord>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Default for CrawlResult {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlResult {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            scraped_count: 0,
            skipped_count: 0,
            records: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Appends an accepted document
    pub fn record_scraped(&mut self, document: Document) {
        self.records.push(PageRecord {
            url: document.url.clone(),
            state: PageState::Scraped,
            detail: None,
        });
        self.documents.push(document);
        self.scraped_count += 1;
    }

    /// Counts a URL that ended in a skip or error state
    pub fn record_skip(&mut self, url: &Url, state: PageState, detail: impl Into<String>) {
        debug_assert!(state.is_skipped());
        self.records.push(PageRecord {
            url: url.to_string(),
            state,
            detail: Some(detail.into()),
        });
        self.skipped_count += 1;
    }

    /// Sum of `length` over all documents
    pub fn total_content_length(&self) -> usize {
        self.documents.iter().map(|d| d.length).sum()
    }

    /// Number of records in the given state
    pub fn count_in(&self, state: PageState) -> usize {
        self.records.iter().filter(|r| r.state == state).count()
    }

    /// Wall-clock duration, if the crawl has finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }
}

/// How a fetched URL turned out, ready to be recorded
///
/// In concurrent mode this is built inside the fetch task, so HTML parsing
/// runs off the dispatcher.
#[derive(Debug)]
pub(crate) enum PageOutcome {
    Errored { cause: String },
    NonHtml { content_type: String },
    Extracted(Extraction),
}

impl PageOutcome {
    pub(crate) fn from_fetch(url: &Url, fetched: FetchOutcome) -> Self {
        match fetched {
            FetchOutcome::Success { body, .. } => Self::Extracted(extract(&body, url)),
            FetchOutcome::NonHtml { content_type } => Self::NonHtml { content_type },
            FetchOutcome::TransportError { cause } => Self::Errored { cause },
        }
    }
}

/// Mutable state of one crawl: the frontier and the accumulated result
#[derive(Debug)]
pub struct CrawlContext {
    pub frontier: Frontier,
    pub result: CrawlResult,
}

impl CrawlContext {
    /// Creates a context whose frontier holds only the root URL
    pub fn new(root: Url) -> Self {
        Self {
            frontier: Frontier::new(root),
            result: CrawlResult::new(),
        }
    }

    pub fn budget_reached(&self, config: &CrawlConfig) -> bool {
        self.result.scraped_count >= config.max_pages
    }

    /// Records a URL rejected by the scope check
    pub(crate) fn reject_out_of_scope(&mut self, url: &Url) {
        self.frontier.mark_visited(url);
        self.result.record_skip(url, PageState::SkippedInvalid, "out of scope");
        tracing::info!("Skipping [{}]: {}", self.result.skipped_count, url);
    }

    /// Records the terminal state of a fetched URL and queues its links
    ///
    /// Links are only followed from pages that returned HTML, whether or
    /// not the page itself was long enough to keep.
    pub(crate) fn settle(&mut self, url: &Url, outcome: PageOutcome, config: &CrawlConfig) {
        self.frontier.mark_visited(url);

        match outcome {
            PageOutcome::Errored { cause } => {
                tracing::warn!("Error scraping {}: {}", url, cause);
                self.result.record_skip(url, PageState::Errored, cause);
            }

            PageOutcome::NonHtml { content_type } => {
                tracing::info!("  → Skipping (not HTML): {}", content_type);
                self.result.record_skip(
                    url,
                    PageState::SkippedNonHtml,
                    format!("Expected HTML, got '{}'", content_type),
                );
            }

            PageOutcome::Extracted(extraction) => {
                match extraction.outcome {
                    ExtractOutcome::Accepted(document) => {
                        tracing::debug!("Scraped {} ({} chars)", url, document.length);
                        self.result.record_scraped(document);
                    }
                    ExtractOutcome::Rejected(rejection) => {
                        tracing::info!("  → Skipping (too short)");
                        self.result
                            .record_skip(url, PageState::SkippedShort, rejection.to_string());
                    }
                }
                self.discover_links(extraction.links, config);
            }
        }
    }

    /// Queues in-scope links in discovery order
    ///
    /// Out-of-scope links are settled as `SkippedInvalid` right away and
    /// never reach the queue.
    fn discover_links(&mut self, links: Vec<Url>, config: &CrawlConfig) {
        let mut queued = 0;
        for link in links {
            if self.frontier.is_known(&link) {
                continue;
            }

            if is_in_scope(&link, config) {
                self.frontier.push(link);
                queued += 1;
            } else {
                tracing::debug!("Out of scope: {}", link);
                self.reject_out_of_scope(&link);
            }
        }

        if queued > 0 {
            tracing::debug!("Queued {} new URLs ({} pending)", queued, self.frontier.len());
        }
    }
}

/// What a single controller step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Queue exhausted or budget reached
    Done,
    /// Dequeued URL was already visited
    Discarded,
    /// Dequeued URL failed the scope check, nothing was fetched
    Skipped,
    /// A network fetch was performed
    Fetched,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<CrawlConfig>,
    client: Client,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to crawl
    /// * `Err(ScribeError)` - The HTTP client could not be built
    pub fn new(config: CrawlConfig) -> Result<Self, ScribeError> {
        let client = build_http_client(&config.user_agent, config.request_timeout)?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Creates a fresh context seeded with the root URL
    pub fn context(&self) -> CrawlContext {
        CrawlContext::new(self.config.root_url.clone())
    }

    /// Processes the head of the frontier
    ///
    /// This method:
    /// 1. Stops when the budget is met or the queue is empty
    /// 2. Discards URLs that were already visited
    /// 3. Skips URLs outside the crawl scope without fetching
    /// 4. Fetches, extracts, records the outcome, and queues new links
    pub async fn step(&self, ctx: &mut CrawlContext) -> Step {
        if ctx.budget_reached(&self.config) {
            return Step::Done;
        }

        let Some(url) = ctx.frontier.pop() else {
            return Step::Done;
        };

        if ctx.frontier.is_visited(&url) {
            tracing::trace!("Already visited: {}", url);
            return Step::Discarded;
        }

        if !is_in_scope(&url, &self.config) {
            ctx.reject_out_of_scope(&url);
            return Step::Skipped;
        }

        tracing::info!("Scraping [{}]: {}", ctx.result.scraped_count + 1, url);

        let fetched = fetch_page(&self.client, &url).await;
        let outcome = PageOutcome::from_fetch(&url, fetched);
        ctx.settle(&url, outcome, &self.config);

        Step::Fetched
    }

    /// Runs the crawl to completion
    ///
    /// With `workers > 1` the crawl is handed to the concurrent worker pool;
    /// otherwise URLs are processed one at a time in strict BFS order, with
    /// the politeness delay after every fetch that is followed by another
    /// iteration.
    pub async fn run(&self) -> CrawlResult {
        tracing::info!("Starting to scrape: {}", self.config.root_url);
        tracing::info!("Max pages: {}", self.config.max_pages);
        tracing::info!("Excluding patterns: {:?}", self.config.excluded_patterns);
        tracing::debug!("Excluding file types: {:?}", self.config.excluded_extensions);

        let mut result = if self.config.workers > 1 {
            tracing::info!("Using {} concurrent workers", self.config.workers);
            run_pool(Arc::clone(&self.config), self.client.clone()).await
        } else {
            self.run_sequential().await
        };

        result.finished_at = Some(Utc::now());

        tracing::info!("✓ Scraping complete!");
        tracing::info!("✓ Scraped {} pages", result.scraped_count);
        tracing::info!("✓ Skipped {} pages", result.skipped_count);

        result
    }

    async fn run_sequential(&self) -> CrawlResult {
        let mut ctx = self.context();

        loop {
            match self.step(&mut ctx).await {
                Step::Done => break,
                Step::Discarded | Step::Skipped => continue,
                Step::Fetched => {
                    let more = !ctx.frontier.is_empty() && !ctx.budget_reached(&self.config);
                    if more && !self.config.politeness_delay.is_zero() {
                        tokio::time::sleep(self.config.politeness_delay).await;
                    }
                }
            }
        }

        ctx.result
    }
}

/// Runs a complete crawl for the given configuration
///
/// # Example
///
/// ```no_run
/// use site_scribe::config::CrawlConfig;
/// use site_scribe::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CrawlConfig::new("https://example.com/")?;
/// let result = run_crawl(config).await?;
/// println!("{} documents", result.documents.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: CrawlConfig) -> Result<CrawlResult, ScribeError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}
