//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageState`: the lifecycle of a single URL (queued, scraped, skipped, errored)
//! - `HostThrottle`: per-host request spacing for the concurrent worker pool

mod host_throttle;
mod page_state;

pub use host_throttle::HostThrottle;
pub use page_state::PageState;
