/// Page state definitions for tracking crawl progress
///
/// This module defines all possible states a URL can be in during a crawl.
use std::fmt;

/// Represents the current state of a URL in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageState {
    // ===== Active States =====
    /// Link has been seen on a page but not yet checked
    Discovered,

    /// URL sits in the frontier waiting to be fetched
    Queued,

    /// Page body was fetched and is being extracted
    Fetched,

    // ===== Terminal Success States =====
    /// Page produced a document
    Scraped,

    // ===== Terminal Skip States =====
    /// Extracted text was too short to keep
    SkippedShort,

    /// URL is off-domain, has an excluded extension, or matches an excluded pattern
    SkippedInvalid,

    /// Response Content-Type is not HTML
    SkippedNonHtml,

    // ===== Terminal Error States =====
    /// Network failure, timeout, or non-2xx status
    Errored,
}

impl PageState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Returns true if this is an active state (URL may still be processed)
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Discovered | Self::Queued | Self::Fetched)
    }

    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Scraped)
    }

    /// Returns true if this counts toward the skip counter
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            Self::SkippedShort | Self::SkippedInvalid | Self::SkippedNonHtml | Self::Errored
        )
    }

    /// Returns true if this represents a transport error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Errored)
    }

    /// Short machine-friendly name for logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Queued => "queued",
            Self::Fetched => "fetched",
            Self::Scraped => "scraped",
            Self::SkippedShort => "skipped_short",
            Self::SkippedInvalid => "skipped_invalid",
            Self::SkippedNonHtml => "skipped_non_html",
            Self::Errored => "errored",
        }
    }

    /// Returns all terminal states, in report order
    pub fn terminal_states() -> [Self; 5] {
        [
            Self::Scraped,
            Self::SkippedShort,
            Self::SkippedInvalid,
            Self::SkippedNonHtml,
            Self::Errored,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
