//! Concurrent worker pool for multi-worker crawls
//!
//! This module handles:
//! - Keeping up to `workers` fetches in flight at once
//! - Reserving the page budget before a fetch starts
//! - Spacing requests to one host by the politeness delay
//!
//! The dispatcher owns the [`CrawlContext`] and is the only code that touches
//! it. Fetch tasks receive a URL and hand back a [`PageOutcome`], so claiming
//! and settling a URL never race.

use crate::config::CrawlConfig;
use crate::crawler::coordinator::{CrawlContext, CrawlResult, PageOutcome};
use crate::crawler::fetcher::fetch_page;
use crate::state::HostThrottle;
use crate::url::{authority, is_in_scope};
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use url::Url;

/// Next action for the dispatcher
#[derive(Debug, PartialEq, Eq)]
enum Claim {
    /// Start fetching this URL
    Fetch(Url),
    /// Nothing to start until an in-flight fetch completes
    Wait,
}

/// Pops the next URL that may be fetched
///
/// A URL is claimed (marked visited) here, before its fetch starts, so it
/// can never be handed to two tasks. A claim is only made while
/// `scraped + in_flight < max_pages`, which makes the budget a hard ceiling
/// even if every in-flight page is accepted.
fn claim_next(ctx: &mut CrawlContext, in_flight: usize, config: &CrawlConfig) -> Claim {
    loop {
        if in_flight >= config.workers || ctx.result.scraped_count + in_flight >= config.max_pages
        {
            return Claim::Wait;
        }

        let Some(url) = ctx.frontier.pop() else {
            return Claim::Wait;
        };

        if ctx.frontier.is_visited(&url) {
            continue;
        }

        if !is_in_scope(&url, config) {
            ctx.reject_out_of_scope(&url);
            continue;
        }

        ctx.frontier.mark_visited(&url);
        return Claim::Fetch(url);
    }
}

/// Fetches and extracts one URL after waiting for its host slot
async fn fetch_task(url: Url, client: Client, throttle: Arc<HostThrottle>) -> PageOutcome {
    let host = authority(&url).unwrap_or_default();
    let wait = throttle.reserve(&host, Instant::now());
    if !wait.is_zero() {
        tracing::trace!("Waiting {:?} for {}", wait, host);
        tokio::time::sleep(wait).await;
    }

    let fetched = fetch_page(&client, &url).await;
    PageOutcome::from_fetch(&url, fetched)
}

/// Runs `work` on its own task and pairs the result with `url`
///
/// A panic inside `work` becomes an `Errored` outcome, so a claimed URL
/// always reaches a terminal state.
async fn guarded<F>(url: Url, work: F) -> (Url, PageOutcome)
where
    F: Future<Output = PageOutcome> + Send + 'static,
{
    match tokio::spawn(work).await {
        Ok(outcome) => (url, outcome),
        Err(e) => {
            let cause = format!("Fetch task failed: {}", e);
            (url, PageOutcome::Errored { cause })
        }
    }
}

/// Runs a crawl with up to `config.workers` concurrent fetches
///
/// Ordering is relaxed from strict BFS: pages complete in whatever order
/// their fetches finish. Deduplication, scope and budget rules are the same
/// as in the sequential loop.
pub(crate) async fn run_pool(config: Arc<CrawlConfig>, client: Client) -> CrawlResult {
    let throttle = Arc::new(HostThrottle::new(config.politeness_delay));
    let mut ctx = CrawlContext::new(config.root_url.clone());
    let mut tasks: JoinSet<(Url, PageOutcome)> = JoinSet::new();
    tracing::debug!("Per-host spacing: {:?}", throttle.spacing());

    loop {
        while let Claim::Fetch(url) = claim_next(&mut ctx, tasks.len(), &config) {
            tracing::info!(
                "Scraping [{}]: {}",
                ctx.result.scraped_count + tasks.len() + 1,
                url
            );
            let work = fetch_task(url.clone(), client.clone(), Arc::clone(&throttle));
            tasks.spawn(guarded(url, work));
        }

        let Some(joined) = tasks.join_next().await else {
            break;
        };

        match joined {
            Ok((url, outcome)) => ctx.settle(&url, outcome, &config),
            Err(e) => tracing::error!("Dispatcher lost a fetch task: {}", e),
        }
    }

    ctx.result
}
