//! Breadth-first crawl frontier
//!
//! FIFO queue of URLs waiting to be fetched, plus the two sets that keep
//! a URL from being queued or processed twice:
//! - `pending`: URLs currently sitting in the queue
//! - `visited`: URLs that reached a terminal state

use std::collections::{HashSet, VecDeque};
use url::Url;

/// FIFO frontier with pending and visited sets
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Url>,
    pending: HashSet<String>,
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier seeded with the root URL
    pub fn new(root: Url) -> Self {
        let mut frontier = Self::default();
        frontier.push(root);
        frontier
    }

    /// Appends a URL unless it is already pending or visited
    ///
    /// # Returns
    ///
    /// `true` if the URL was queued
    pub fn push(&mut self, url: Url) -> bool {
        if self.is_known(&url) {
            return false;
        }
        self.pending.insert(url.as_str().to_string());
        self.queue.push_back(url);
        true
    }

    /// Removes and returns the oldest queued URL
    pub fn pop(&mut self) -> Option<Url> {
        let url = self.queue.pop_front()?;
        self.pending.remove(url.as_str());
        Some(url)
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Records that `url` reached a terminal state
    ///
    /// # Returns
    ///
    /// `true` if the URL was not visited before
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(url.as_str().to_string())
    }

    /// True if the URL is pending or visited
    pub fn is_known(&self, url: &Url) -> bool {
        self.pending.contains(url.as_str()) || self.visited.contains(url.as_str())
    }

    /// Number of URLs waiting in the queue
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
