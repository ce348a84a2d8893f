//! Statistics generation from a finished crawl
//!
//! This module summarizes a [`CrawlResult`] and prints the end-of-run
//! report.

use crate::crawler::CrawlResult;
use crate::state::PageState;
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// URLs that reached a terminal state
    pub total_pages: u64,

    /// Count of pages by terminal state
    pub pages_by_state: HashMap<PageState, u64>,

    pub scraped: u64,
    pub skipped: u64,

    /// Sum of document lengths, in characters
    pub total_content_length: u64,

    /// Transport failures with their causes, in crawl order
    pub errors: Vec<(String, String)>,

    pub duration_seconds: Option<i64>,
}

impl CrawlStatistics {
    /// Builds statistics from a crawl result
    pub fn from_result(result: &CrawlResult) -> Self {
        let mut pages_by_state = HashMap::new();
        for record in &result.records {
            *pages_by_state.entry(record.state).or_insert(0) += 1;
        }

        let errors = result
            .records
            .iter()
            .filter(|r| r.state.is_error())
            .map(|r| (r.url.clone(), r.detail.clone().unwrap_or_default()))
            .collect();

        Self {
            total_pages: result.records.len() as u64,
            pages_by_state,
            scraped: result.scraped_count as u64,
            skipped: result.skipped_count as u64,
            total_content_length: result.total_content_length() as u64,
            errors,
            duration_seconds: result.duration().map(|d| d.num_seconds()),
        }
    }

    pub fn count(&self, state: PageState) -> u64 {
        self.pages_by_state.get(&state).copied().unwrap_or(0)
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("\nSummary:");
    println!("Total pages scraped: {}", stats.scraped);
    println!(
        "Total content length: {} characters",
        stats.total_content_length
    );
    println!("Total pages skipped: {}", stats.skipped);
    if let Some(seconds) = stats.duration_seconds {
        println!("Duration: {} seconds", seconds);
    }
    println!();

    println!("Pages by State:");
    for state in PageState::terminal_states() {
        let count = stats.count(state);
        if count == 0 {
            continue;
        }
        let percentage = if stats.total_pages > 0 {
            (count as f64 / stats.total_pages as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", state, count, percentage);
    }

    if !stats.errors.is_empty() {
        println!();
        println!("Errors ({}):", stats.errors.len());
        for (url, cause) in stats.errors.iter().take(20) {
            println!("  - {}: {}", url, cause);
        }
        if stats.errors.len() > 20 {
            println!("  ... and {} more", stats.errors.len() - 20);
        }
    }
}
