//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, from seeding the frontier to the
//! written report.

use std::path::Path;
use tempfile::TempDir;
use trawl::config::{Config, CorpusConfig, CrawlerConfig, OutputConfig, UserAgentConfig};
use trawl::corpus::{cache_file_name, HttpCorpus};
use trawl::crawler::{run_crawl, CrawlLoop};
use trawl::frontier::{Frontier, MemoryFrontier, SqliteFrontier};
use trawl::{Corpus, LoopState, TrawlError, UrlState};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration scoped to the mock server's host
fn create_test_config(seeds: Vec<String>, dir: &Path) -> Config {
    Config {
        crawler: CrawlerConfig {
            allowed_host_suffixes: vec!["127.0.0.1".to_string()],
            ..CrawlerConfig::default()
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        corpus: CorpusConfig {
            cache_dir: dir.join("corpus").to_string_lossy().into_owned(),
            persist_host_suffixes: None,
            timeout_secs: 5,
        },
        output: OutputConfig {
            frontier_path: dir.join("frontier.db").to_string_lossy().into_owned(),
            report_path: dir.join("analytics.txt").to_string_lossy().into_owned(),
        },
        seeds,
    }
}

async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Mounts a three-page site: an index linking to two pages, a PDF and an
/// external host
async fn mount_site(server: &MockServer) {
    mount_html(
        server,
        "/",
        r#"<html><head><title>Home</title></head><body>
        <a href="/page1">Page 1</a>
        <a href="/page2">Page 2</a>
        <a href="/doc.pdf">Paper</a>
        <a href="https://evil.com/">Elsewhere</a>
        </body></html>"#,
    )
    .await;

    mount_html(
        server,
        "/page1",
        r#"<html><body>Research lab research <a href="/">Home</a></body></html>"#,
    )
    .await;

    mount_html(
        server,
        "/page2",
        r#"<html><body><script>var hidden = 1;</script>Lab notes</body></html>"#,
    )
    .await;
}

#[tokio::test]
async fn test_full_crawl_writes_report() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_site(&mock_server).await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(vec![format!("{}/", base_url)], temp_dir.path());

    run_crawl(&config, true).await.expect("Crawl failed");

    let report = std::fs::read_to_string(&config.output.report_path).expect("No report written");
    let netloc = base_url.trim_start_matches("http://");

    let expected = format!(
        "Subdomains:\n\
         \x20   {netloc}: 3\n\
         \n\
         Page with Most OutLinks: {base}/ Length: 4\n\
         \n\
         Downloaded URLs:\n\
         \x20   {base}/page1\n\
         \x20   {base}/page2\n\
         \x20   {base}/\n\
         Trap URLs:\n\
         \x20   {base}/doc.pdf\n\
         \x20   https://evil.com/\n\
         \n",
        netloc = netloc,
        base = base_url
    );
    assert!(
        report.starts_with(&expected),
        "Unexpected report:\n{}",
        report
    );

    assert!(report.contains("    research: 2\n"));
    assert!(report.contains("    lab: 2\n"));
    assert!(!report.contains("hidden"));
}

#[tokio::test]
async fn test_fetched_pages_are_kept_in_corpus() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_site(&mock_server).await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(vec![format!("{}/", base_url)], temp_dir.path());

    run_crawl(&config, true).await.expect("Crawl failed");

    let cache_dir = Path::new(&config.corpus.cache_dir);
    for route in ["/", "/page1", "/page2"] {
        let file = cache_dir.join(cache_file_name(&format!("{}{}", base_url, route)));
        assert!(file.exists(), "{} was not kept", route);
    }

    let page1 = cache_dir.join(cache_file_name(&format!("{}/page1", base_url)));
    let content = std::fs::read_to_string(page1).unwrap();
    assert!(content.contains("Research lab research"));
}

#[tokio::test]
async fn test_frontier_persists_fetched_state() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_site(&mock_server).await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(vec![format!("{}/", base_url)], temp_dir.path());

    run_crawl(&config, true).await.expect("Crawl failed");

    let frontier = SqliteFrontier::open(Path::new(&config.output.frontier_path)).unwrap();
    let stats = frontier.stats();
    assert_eq!(stats.fetched, 3);
    assert_eq!(stats.pending, 0);

    assert_eq!(
        frontier.url_state(&format!("{}/page2", base_url)).unwrap(),
        Some(UrlState::Fetched)
    );
    // Traps never reach the frontier
    assert_eq!(
        frontier.url_state(&format!("{}/doc.pdf", base_url)).unwrap(),
        None
    );
}

#[tokio::test]
async fn test_resume_does_not_refetch() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>Only page</body></html>", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(vec![format!("{}/", base_url)], temp_dir.path());

    run_crawl(&config, true).await.expect("First crawl failed");
    run_crawl(&config, false).await.expect("Resumed crawl failed");

    // The resumed run found nothing pending
    let report = std::fs::read_to_string(&config.output.report_path).unwrap();
    assert!(report.starts_with("Subdomains:\n\n"));
}

#[tokio::test]
async fn test_fresh_run_recrawls() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>Only page</body></html>", "text/html"),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(vec![format!("{}/", base_url)], temp_dir.path());

    run_crawl(&config, true).await.expect("First crawl failed");
    run_crawl(&config, true).await.expect("Fresh crawl failed");
}

#[tokio::test]
async fn test_gated_pages_yield_no_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Links inside a JSON payload are not followed
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                r#"{"html": "<a href=\"/page1\">x</a>"}"#,
                "application/json",
            ),
        )
        .mount(&mock_server)
        .await;

    // Nor are links on a rejected status page
    Mock::given(method("GET"))
        .and(path("/bad"))
        .respond_with(
            ResponseTemplate::new(400).set_body_raw(r#"<a href="/page2">x</a>"#, "text/html"),
        )
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(
        vec![format!("{}/", base_url), format!("{}/bad", base_url)],
        temp_dir.path(),
    );

    run_crawl(&config, true).await.expect("Crawl failed");

    let report = std::fs::read_to_string(&config.output.report_path).unwrap();
    assert!(report.contains("Page with Most OutLinks:  Length: 0\n"));
    assert!(report.contains("Downloaded URLs:\nTrap URLs:\n"));

    let netloc = base_url.trim_start_matches("http://");
    assert!(report.contains(&format!("    {}: 2\n", netloc)));
}

#[tokio::test]
async fn test_error_status_pages_are_recorded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Unmatched routes get wiremock's default 404
    mount_html(&mock_server, "/", r#"<a href="/missing">gone</a>"#).await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(vec![format!("{}/", base_url)], temp_dir.path());

    let corpus = HttpCorpus::new(&config).unwrap();
    let frontier = MemoryFrontier::with_seeds([format!("{}/", base_url)]);
    let mut crawl = CrawlLoop::new(frontier, corpus, &config.crawler);

    crawl.run().await.expect("Crawl failed");

    assert_eq!(crawl.state(), LoopState::Done);
    assert_eq!(crawl.analytics().pages(), 2);
    assert_eq!(crawl.frontier().fetched(), 2);
    assert_eq!(
        crawl.analytics().downloaded(),
        &[format!("{}/missing", base_url)]
    );
}

#[tokio::test]
async fn test_http_corpus_fetch_result() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_html(&mock_server, "/page", "<p>hello</p>").await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(vec![], temp_dir.path());
    let mut corpus = HttpCorpus::new(&config).unwrap();

    let url = format!("{}/page", base_url);
    let result = corpus.fetch_url(&url).await.unwrap();

    assert_eq!(result.url, url);
    assert_eq!(result.http_code, 200);
    assert_eq!(result.size, 12);
    assert_eq!(result.content, b"<p>hello</p>");
    assert_eq!(
        result.content_type.as_deref(),
        Some("text/html; charset=utf-8")
    );
    assert!(corpus.get_file_name(&url).is_some());
    assert!(corpus.get_file_name("https://evil.com/").is_none());
}

#[tokio::test]
async fn test_transport_failure_aborts_without_report() {
    let temp_dir = TempDir::new().unwrap();

    // Nothing listens on port 1
    let config = create_test_config(vec!["http://127.0.0.1:1/".to_string()], temp_dir.path());

    let result = run_crawl(&config, true).await;
    assert!(matches!(result, Err(TrawlError::Http { .. })));
    assert!(!Path::new(&config.output.report_path).exists());
}
