//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use site_scribe::config::{CrawlConfig, CrawlSettings, OutputConfig};
use site_scribe::crawler::{run_crawl, Coordinator, CrawlResult, Document, Step};
use site_scribe::output::write_outputs;
use site_scribe::state::PageState;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

const SENTENCE: &str = "The school offers engineering programs with projects, internships and research labs. ";

/// Plain text of exactly `len` characters with no leading or trailing spaces
fn text_of_len(len: usize) -> String {
    let mut text: String = SENTENCE.chars().cycle().take(len).collect();
    // Replace a trailing space so trimming cannot shorten the text
    if text.ends_with(' ') {
        text.pop();
        text.push('.');
    }
    text
}

/// Builds a page whose links sit outside `<main>` so they do not count as content
fn html_page(title: &str, text: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!(
        "<html><head><title>{}</title></head><body><div class=\"links\">{}</div><main><p>{}</p></main></body></html>",
        title, anchors, text
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String, expected: impl Into<Times>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .expect(expected)
        .mount(server)
        .await;
}

/// Creates a test configuration rooted at the mock server
fn create_test_config(server: &MockServer, max_pages: usize) -> CrawlConfig {
    create_test_settings(server, max_pages, |_| {})
}

fn create_test_settings(
    server: &MockServer,
    max_pages: usize,
    customize: impl FnOnce(&mut CrawlSettings),
) -> CrawlConfig {
    let mut settings = CrawlSettings::new(format!("{}/", server.uri()));
    settings.max_pages = max_pages;
    settings.delay = 0.0;
    settings.request_timeout = 5;
    customize(&mut settings);
    CrawlConfig::from_settings(&settings).expect("valid test config")
}

fn document_paths(result: &CrawlResult) -> Vec<String> {
    result
        .documents
        .iter()
        .map(|d| {
            url::Url::parse(&d.url)
                .expect("document URL parses")
                .path()
                .to_string()
        })
        .collect()
}

#[tokio::test]
async fn test_root_page_queues_in_domain_links_only() {
    let server = MockServer::start().await;
    let body = html_page(
        "Home",
        &text_of_len(500),
        &["/a", "/b", "/c", "http://other.example/x"],
    );
    mount_page(&server, "/", body, 1).await;

    let coordinator = Coordinator::new(create_test_config(&server, 100)).unwrap();
    let mut ctx = coordinator.context();

    assert_eq!(coordinator.step(&mut ctx).await, Step::Fetched);

    assert_eq!(ctx.frontier.len(), 3);
    assert_eq!(ctx.result.documents.len(), 1);
    assert_eq!(ctx.result.documents[0].title, "Home");
    assert_eq!(ctx.result.documents[0].length, 500);
    assert_eq!(ctx.result.count_in(PageState::SkippedInvalid), 1);
}

#[tokio::test]
async fn test_excluded_extension_never_fetched() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        html_page("Home", &text_of_len(300), &["/report.pdf", "/about"]),
        1,
    )
    .await;
    mount_page(&server, "/about", html_page("About", &text_of_len(300), &[]), 1).await;
    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"))
        .expect(0)
        .mount(&server)
        .await;

    let result = run_crawl(create_test_config(&server, 100)).await.unwrap();

    assert_eq!(document_paths(&result), vec!["/", "/about"]);
    assert_eq!(result.skipped_count, 1);
    assert_eq!(result.count_in(PageState::SkippedInvalid), 1);
    assert!(result.records.iter().any(|r| r.url.ends_with("/report.pdf")));
}

#[tokio::test]
async fn test_budget_of_one_fetches_only_root() {
    let server = MockServer::start().await;
    let links = ["/p1", "/p2", "/p3", "/p4", "/p5"];
    mount_page(&server, "/", html_page("Home", &text_of_len(300), &links), 1).await;
    for link in links {
        mount_page(&server, link, html_page("Page", &text_of_len(300), &[]), 0).await;
    }

    let result = run_crawl(create_test_config(&server, 1)).await.unwrap();

    assert_eq!(result.documents.len(), 1);
    assert_eq!(result.scraped_count, 1);
    assert_eq!(document_paths(&result), vec!["/"]);
}

#[tokio::test]
async fn test_server_error_is_skipped_and_crawl_continues() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        html_page("Home", &text_of_len(300), &["/broken", "/ok"]),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/ok", html_page("Ok", &text_of_len(300), &["/broken"]), 1).await;

    let result = run_crawl(create_test_config(&server, 100)).await.unwrap();

    assert_eq!(document_paths(&result), vec!["/", "/ok"]);
    assert_eq!(result.skipped_count, 1);
    assert_eq!(result.count_in(PageState::Errored), 1);

    let record = result
        .records
        .iter()
        .find(|r| r.url.ends_with("/broken"))
        .unwrap();
    assert!(record.detail.as_deref().unwrap_or("").contains("500"));
}

#[tokio::test]
async fn test_short_page_rejected_but_links_followed() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        html_page("Home", &text_of_len(300), &["/short"]),
        1,
    )
    .await;
    mount_page(
        &server,
        "/short",
        html_page("Short", &text_of_len(80), &["/deep"]),
        1,
    )
    .await;
    mount_page(&server, "/deep", html_page("Deep", &text_of_len(300), &[]), 1).await;

    let result = run_crawl(create_test_config(&server, 100)).await.unwrap();

    assert_eq!(document_paths(&result), vec!["/", "/deep"]);
    assert_eq!(result.count_in(PageState::SkippedShort), 1);
    let short = result
        .records
        .iter()
        .find(|r| r.url.ends_with("/short"))
        .unwrap();
    assert_eq!(short.state, PageState::SkippedShort);
}

#[tokio::test]
async fn test_breadth_first_order() {
    let server = MockServer::start().await;
    let text = text_of_len(200);
    mount_page(&server, "/", html_page("Root", &text, &["/a", "/b"]), 1).await;
    mount_page(&server, "/a", html_page("A", &text, &["/c"]), 1).await;
    mount_page(&server, "/b", html_page("B", &text, &["/d"]), 1).await;
    mount_page(&server, "/c", html_page("C", &text, &[]), 1).await;
    mount_page(&server, "/d", html_page("D", &text, &[]), 1).await;

    let result = run_crawl(create_test_config(&server, 100)).await.unwrap();

    assert_eq!(document_paths(&result), vec!["/", "/a", "/b", "/c", "/d"]);
}

#[tokio::test]
async fn test_excluded_pattern_never_fetched() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        html_page("Home", &text_of_len(300), &["/Actualites/2024", "/contact"]),
        1,
    )
    .await;
    mount_page(&server, "/Actualites/2024", html_page("News", &text_of_len(300), &[]), 0).await;
    mount_page(&server, "/contact", html_page("Contact", &text_of_len(300), &[]), 1).await;

    let config = create_test_settings(&server, 100, |s| {
        s.exclude_patterns = vec!["actualites".to_string()];
    });
    let result = run_crawl(config).await.unwrap();

    assert_eq!(document_paths(&result), vec!["/", "/contact"]);
    assert_eq!(result.count_in(PageState::SkippedInvalid), 1);
}

#[tokio::test]
async fn test_non_html_response_skipped() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        html_page("Home", &text_of_len(300), &["/feed"]),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"items\":[]}", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let result = run_crawl(create_test_config(&server, 100)).await.unwrap();

    assert_eq!(result.documents.len(), 1);
    assert_eq!(result.count_in(PageState::SkippedNonHtml), 1);
    assert_eq!(result.skipped_count, 1);
}

#[tokio::test]
async fn test_each_url_fetched_once() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        html_page("Home", &text_of_len(300), &["/a", "/a#team", "/a", "/"]),
        1,
    )
    .await;
    mount_page(&server, "/a", html_page("A", &text_of_len(300), &["/", "/a"]), 1).await;

    let result = run_crawl(create_test_config(&server, 100)).await.unwrap();

    assert_eq!(document_paths(&result), vec!["/", "/a"]);
    assert_eq!(result.skipped_count, 0);
}

#[tokio::test]
async fn test_unreachable_root_yields_empty_result() {
    let mut settings = CrawlSettings::new("http://127.0.0.1:9/");
    settings.delay = 0.0;
    settings.request_timeout = 2;
    let config = CrawlConfig::from_settings(&settings).unwrap();

    let result = run_crawl(config).await.unwrap();

    assert!(result.documents.is_empty());
    assert_eq!(result.count_in(PageState::Errored), 1);
    assert!(result.finished_at.is_some());
}

#[tokio::test]
async fn test_politeness_delay_between_fetches() {
    let server = MockServer::start().await;
    let text = text_of_len(200);
    mount_page(&server, "/", html_page("Root", &text, &["/a", "/b"]), 1).await;
    mount_page(&server, "/a", html_page("A", &text, &[]), 1).await;
    mount_page(&server, "/b", html_page("B", &text, &[]), 1).await;

    let config = create_test_settings(&server, 100, |s| s.delay = 0.2);
    let started = Instant::now();
    let result = run_crawl(config).await.unwrap();

    assert_eq!(result.documents.len(), 3);
    // Two pauses between three fetches, none after the last one
    assert!(started.elapsed() >= Duration::from_millis(400));
}

#[tokio::test]
async fn test_concurrent_workers_respect_budget_and_dedup() {
    let server = MockServer::start().await;
    let pages: Vec<String> = (0..10).map(|i| format!("/page{}", i)).collect();
    let links: Vec<&str> = pages.iter().map(String::as_str).collect();

    mount_page(&server, "/", html_page("Home", &text_of_len(300), &links), 1).await;
    for page in &pages {
        // Every page links to every other page
        mount_page(
            &server,
            page,
            html_page("Page", &text_of_len(300), &links),
            0..=1,
        )
        .await;
    }

    let config = create_test_settings(&server, 4, |s| s.workers = 4);
    let result = run_crawl(config).await.unwrap();

    assert_eq!(result.documents.len(), 4);
    assert_eq!(result.scraped_count, 4);

    let mut urls: Vec<&str> = result.documents.iter().map(|d| d.url.as_str()).collect();
    urls.sort();
    urls.dedup();
    assert_eq!(urls.len(), 4);
}

#[tokio::test]
async fn test_concurrent_crawl_reaches_every_page() {
    let server = MockServer::start().await;
    let text = text_of_len(200);
    mount_page(&server, "/", html_page("Root", &text, &["/a", "/b", "/c"]), 1).await;
    mount_page(&server, "/a", html_page("A", &text, &["/d", "/"]), 1).await;
    mount_page(&server, "/b", html_page("B", &text, &["/d", "/e"]), 1).await;
    mount_page(&server, "/c", html_page("C", &text, &["/missing"]), 1).await;
    mount_page(&server, "/d", html_page("D", &text, &[]), 1).await;
    mount_page(&server, "/e", html_page("E", &text, &[]), 1).await;

    let config = create_test_settings(&server, 100, |s| s.workers = 3);
    let result = run_crawl(config).await.unwrap();

    let mut paths = document_paths(&result);
    paths.sort();
    assert_eq!(paths, vec!["/", "/a", "/b", "/c", "/d", "/e"]);
    assert_eq!(result.count_in(PageState::Errored), 1);
}

#[tokio::test]
async fn test_concurrent_workers_space_requests_to_one_host() {
    let server = MockServer::start().await;
    let text = text_of_len(200);
    mount_page(&server, "/", html_page("Root", &text, &["/a", "/b", "/c"]), 1).await;
    mount_page(&server, "/a", html_page("A", &text, &[]), 1).await;
    mount_page(&server, "/b", html_page("B", &text, &[]), 1).await;
    mount_page(&server, "/c", html_page("C", &text, &[]), 1).await;

    let config = create_test_settings(&server, 100, |s| {
        s.workers = 4;
        s.delay = 0.2;
    });
    let started = Instant::now();
    let result = run_crawl(config).await.unwrap();

    assert_eq!(result.documents.len(), 4);
    // Four requests to one host need three gaps even with four workers
    assert!(started.elapsed() >= Duration::from_millis(600));
}

#[tokio::test]
async fn test_crawl_then_write_outputs() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        html_page("Accueil", &text_of_len(250), &["/b"]),
        1,
    )
    .await;
    mount_page(&server, "/b", html_page("B", &text_of_len(150), &[]), 1).await;

    let result = run_crawl(create_test_config(&server, 100)).await.unwrap();

    let dir = tempfile::TempDir::new().unwrap();
    let output = OutputConfig {
        json_path: dir.path().join("docs.json"),
        text_path: dir.path().join("docs.txt"),
        sqlite_path: Some(dir.path().join("docs.db")),
    };
    let written = write_outputs(&result.documents, &output).unwrap();
    assert_eq!(written.len(), 3);

    let json = std::fs::read_to_string(&output.json_path).unwrap();
    let parsed: Vec<Document> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, result.documents);

    let text = std::fs::read_to_string(&output.text_path).unwrap();
    assert!(text.contains("TITLE: Accueil"));
    assert_eq!(text.matches("URL: ").count(), 2);
}
