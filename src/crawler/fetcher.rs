//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the fixed user agent and timeout
//! - Sending a single GET per URL (no retries)
//! - Classifying the response as HTML, non-HTML, or a transport failure
//! - Decoding HTML bodies by header or `<meta>` charset

use crate::crawler::decode::decode_html;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// 2xx response carrying an HTML body
    Success {
        /// Decoded page body
        body: String,
        /// Lowercased Content-Type header value
        content_type: String,
    },

    /// 2xx response whose Content-Type is not `text/html`
    NonHtml {
        /// The Content-Type received (empty when absent)
        content_type: String,
    },

    /// DNS, connection, timeout, body read failure, or non-2xx status
    TransportError {
        /// Human-readable cause
        cause: String,
    },
}

impl FetchOutcome {
    /// Returns true for the `Success` variant
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The User-Agent header sent with every request
/// * `timeout` - Upper bound on each request, connection included
///
/// # Example
///
/// ```no_run
/// use site_scribe::config::USER_AGENT;
/// use site_scribe::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(USER_AGENT, Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the response
///
/// # Classification
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | Network error / timeout | TransportError |
/// | Non-2xx status | TransportError |
/// | 2xx, Content-Type without `text/html` | NonHtml |
/// | 2xx, body unreadable | TransportError |
/// | 2xx, HTML body | Success |
///
/// A failed fetch is final: the caller never retries it.
pub async fn fetch_page(client: &Client, url: &Url) -> FetchOutcome {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            return FetchOutcome::TransportError {
                cause: describe_error(&e),
            }
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::TransportError {
            cause: format!("HTTP {}", status),
        };
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();

    if !content_type.contains("text/html") {
        return FetchOutcome::NonHtml { content_type };
    }

    match response.bytes().await {
        Ok(bytes) => FetchOutcome::Success {
            body: decode_html(&bytes, &content_type),
            content_type,
        },
        Err(e) => FetchOutcome::TransportError {
            cause: format!("Failed to read body: {}", describe_error(&e)),
        },
    }
}

/// Turns a reqwest error into a short diagnostic
fn describe_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_redirect() {
        format!("Redirect error: {}", e)
    } else {
        e.to_string()
    }
}
