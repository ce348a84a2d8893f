//! Content extraction from fetched HTML
//!
//! Turns a raw page body into a [`Document`] (or a rejection) plus the list
//! of links found on the page. HTML access goes through the [`MarkupTree`]
//! trait so the extraction rules do not depend on a particular parser.

use crate::url::resolve_link;
use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use url::Url;

/// Elements dropped before any text is read
pub const STRIPPED_TAGS: &[&str] = &["script", "style", "nav", "footer", "header"];

/// Main-content candidates, in priority order
pub const CONTENT_SELECTORS: &[&str] = &["main", "article", "div.content", "body"];

/// Documents must be strictly longer than this many characters
pub const MIN_CONTENT_LENGTH: usize = 100;

/// Elements that start a new line of text
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "caption", "dd", "details", "dialog",
    "div", "dl", "dt", "fieldset", "figcaption", "figure", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "head", "hr", "html", "li", "main", "menu", "ol", "option", "p", "pre", "section",
    "summary", "table", "tbody", "td", "tfoot", "th", "thead", "title", "tr", "ul",
];

/// A scraped page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub url: String,
    pub title: String,
    /// Normalized text, one block per line
    pub content: String,
    /// Character count of `content`
    pub length: usize,
}

/// Why a fetched page produced no document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Normalized text length was at or below [`MIN_CONTENT_LENGTH`]
    TooShort { length: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { length } => write!(f, "content too short ({} chars)", length),
        }
    }
}

/// Accept/reject decision for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    Accepted(Document),
    Rejected(Rejection),
}

/// Result of extracting one page
///
/// Links are reported for accepted and rejected pages alike, so link
/// discovery continues through short pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub outcome: ExtractOutcome,
    /// Resolved, fragment-free http(s) links in document order, without duplicates
    pub links: Vec<Url>,
}

/// Minimal HTML capability needed by the extractor
pub trait MarkupTree: Sized {
    /// Parses a page body; must never fail (malformed markup yields a best-effort tree)
    fn parse(body: &str) -> Self;

    /// Removes every element with one of the given tag names, subtree included
    fn remove_elements(&mut self, tag_names: &[&str]);

    /// Block-separated text of the first element matching `selector`
    fn first_text(&self, selector: &str) -> Option<String>;

    /// Block-separated text of the whole document
    fn document_text(&self) -> String;

    /// Raw `href` values of every remaining anchor, in document order
    fn anchors(&self) -> Vec<String>;
}

/// [`MarkupTree`] backed by the `scraper` crate (html5ever)
pub struct ScraperTree {
    html: Html,
}

impl MarkupTree for ScraperTree {
    fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    fn remove_elements(&mut self, tag_names: &[&str]) {
        let ids: Vec<_> = tag_names
            .iter()
            .filter_map(|tag| Selector::parse(tag).ok())
            .flat_map(|selector| {
                self.html
                    .select(&selector)
                    .map(|element| element.id())
                    .collect::<Vec<_>>()
            })
            .collect();

        for id in ids {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.detach();
            }
        }
    }

    fn first_text(&self, selector: &str) -> Option<String> {
        let selector = Selector::parse(selector).ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|element| block_text(*element))
    }

    fn document_text(&self) -> String {
        block_text(self.html.tree.root())
    }

    fn anchors(&self) -> Vec<String> {
        let Ok(selector) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        self.html
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect()
    }
}

/// Collects text below `node`, putting each block-level run on its own line
fn block_text(node: NodeRef<'_, Node>) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => {
            let name = element.name();
            if name == "br" {
                out.push('\n');
                return;
            }

            let block = BLOCK_TAGS.contains(&name);
            if block {
                out.push('\n');
            }
            for child in node.children() {
                collect_text(child, out);
            }
            if block {
                out.push('\n');
            }
        }
        Node::Document | Node::Fragment => {
            for child in node.children() {
                collect_text(child, out);
            }
        }
        _ => {}
    }
}

/// Trims every line, drops blank lines, and rejoins with `\n`
pub fn normalize_text(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extracts a page using the default `scraper` backend
///
/// # Example
///
/// ```
/// use site_scribe::crawler::{extract, ExtractOutcome};
/// use url::Url;
///
/// let url = Url::parse("https://example.com/").unwrap();
/// let extraction = extract("<html><body><p>tiny</p><a href='/a'>a</a></body></html>", &url);
/// assert!(matches!(extraction.outcome, ExtractOutcome::Rejected(_)));
/// assert_eq!(extraction.links[0].as_str(), "https://example.com/a");
/// ```
pub fn extract(raw_body: &str, url: &Url) -> Extraction {
    extract_with::<ScraperTree>(raw_body, url)
}

/// Extracts a page with any [`MarkupTree`] implementation
///
/// # Algorithm
///
/// 1. Remove `script`, `style`, `nav`, `footer`, `header`
/// 2. Collect anchors from what is left, so navigation links are not followed
/// 3. Title: text of the first `title`, trimmed, or empty
/// 4. Main content: first of `main`, `article`, `div.content`, `body`, whole document
/// 5. Normalize lines; reject if the result has 100 characters or fewer
pub fn extract_with<T: MarkupTree>(raw_body: &str, url: &Url) -> Extraction {
    let mut tree = T::parse(raw_body);

    tree.remove_elements(STRIPPED_TAGS);

    let links = collect_links(tree.anchors(), url);

    let title = tree
        .first_text("title")
        .map(|t| t.trim().to_string())
        .unwrap_or_default();

    let raw_text = CONTENT_SELECTORS
        .iter()
        .find_map(|selector| tree.first_text(selector))
        .unwrap_or_else(|| tree.document_text());

    let content = normalize_text(&raw_text);
    let length = content.chars().count();

    let outcome = if length <= MIN_CONTENT_LENGTH {
        ExtractOutcome::Rejected(Rejection::TooShort { length })
    } else {
        ExtractOutcome::Accepted(Document {
            url: url.to_string(),
            title,
            content,
            length,
        })
    };

    Extraction { outcome, links }
}

/// Resolves hrefs against the page URL, keeping first occurrences only
fn collect_links(hrefs: Vec<String>, base_url: &Url) -> Vec<Url> {
    let mut seen = HashSet::new();
    hrefs
        .iter()
        .filter_map(|href| resolve_link(href, base_url))
        .filter(|link| seen.insert(link.as_str().to_string()))
        .collect()
}
