//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use sitesage::config::{Config, CrawlerConfig};
use sitesage::crawler::{Coordinator, LinkOutcome};
use sitesage::scoring::{score, Grade};
use sitesage::{CrawlError, CrawlStage, FetchError, LinkScope};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with short timeouts
fn create_test_config(page_timeout_secs: u64, probe_timeout_secs: u64) -> Config {
    Config {
        crawler: CrawlerConfig {
            page_timeout_secs,
            probe_timeout_secs,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_response(body))
        .mount(server)
        .await;
}

async fn mount_head(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_extracts_page_signals() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r##"<html><head>
            <title>  A Well Sized Title For Search Results  </title>
            <meta name="description" content="A short description">
        </head><body>
            <h1>Main <em>Heading</em></h1>
            <h2>First</h2>
            <h2>Second</h2>
            <img src="/logo.png" alt="Logo">
            <img src="/banner.png">
            <a href="/about">About</a>
            <a href="/contact">Contact</a>
            <a href="http://localhost:1/offsite">Offsite</a>
            <a href="mailto:someone@example.com">Mail</a>
            <a href="javascript:void(0)">Nothing</a>
            <a href="#top">Top</a>
        </body></html>"##
            .to_string(),
    )
    .await;
    mount_head(&mock_server, "/about", 200).await;
    mount_head(&mock_server, "/contact", 200).await;

    let coordinator = Coordinator::new(create_test_config(5, 2));
    let result = coordinator
        .crawl(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(result.status_code, 200);
    assert_eq!(
        result.title.as_deref(),
        Some("A Well Sized Title For Search Results")
    );
    assert_eq!(result.meta_description.as_deref(), Some("A short description"));
    assert_eq!(result.h1_tags, vec!["Main Heading".to_string()]);
    assert_eq!(result.h2_tags.len(), 2);

    assert_eq!(result.total_images, 2);
    assert_eq!(result.images_without_alt, 1);
    assert_eq!(result.images[0].src, format!("{}/logo.png", base_url));

    assert_eq!(result.internal_links.len(), 2);
    assert!(result
        .internal_links
        .iter()
        .all(|l| l.scope == LinkScope::Internal));
    assert_eq!(result.internal_links[0].url, format!("{}/about", base_url));
    assert_eq!(result.internal_links[0].text, "About");

    // Offsite host and the mailto link; fragment and javascript links are skipped
    assert_eq!(result.external_links.len(), 2);
    assert_eq!(result.total_links, 4);

    // Both external links fail to connect; internal links are healthy
    assert_eq!(result.broken_links.len(), 2);
    assert!(result
        .broken_links
        .iter()
        .all(|b| b.is_connection_failure()));
    assert_eq!(result.broken_links[0].link.url, "http://localhost:1/offsite");

    assert!(result.load_time >= 0.0);
    assert!(result.page_size > 0);
}

#[tokio::test]
async fn test_broken_links_detected() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>
            <a href="/ok">Fine</a>
            <a href="/gone">Gone</a>
            <a href="/error">Error</a>
            <a href="/moved">Moved</a>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_head(&mock_server, "/ok", 200).await;
    mount_head(&mock_server, "/gone", 404).await;
    mount_head(&mock_server, "/error", 500).await;
    Mock::given(method("HEAD"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/ok"))
        .mount(&mock_server)
        .await;

    let coordinator = Coordinator::new(create_test_config(5, 2));
    let result = coordinator
        .crawl(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(result.total_links, 4);
    assert_eq!(result.broken_links.len(), 2);

    // Input order is preserved
    assert_eq!(result.broken_links[0].link.url, format!("{}/gone", base_url));
    assert_eq!(
        result.broken_links[0].outcome,
        LinkOutcome::Status { code: 404 }
    );
    assert_eq!(result.broken_links[1].status_code(), Some(500));
}

#[tokio::test]
async fn test_slow_probe_times_out_without_blocking_others() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>
            <a href="/slow">Slow</a>
            <a href="/fast">Fast</a>
            <a href="/missing">Missing</a>
        </body></html>"#
            .to_string(),
    )
    .await;
    Mock::given(method("HEAD"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;
    mount_head(&mock_server, "/fast", 200).await;
    mount_head(&mock_server, "/missing", 404).await;

    let coordinator = Coordinator::new(create_test_config(5, 1));
    let started = std::time::Instant::now();
    let result = coordinator
        .crawl(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(result.broken_links.len(), 2);
    assert_eq!(result.broken_links[0].link.url, format!("{}/slow", base_url));
    assert!(result.broken_links[0].is_connection_failure());
    assert_eq!(result.broken_links[1].status_code(), Some(404));
}

#[tokio::test]
async fn test_only_first_links_are_checked() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Every link 404s, so the broken count equals the number probed
    let links: String = (0..60)
        .map(|i| format!(r#"<a href="/link{}">Link {}</a>"#, i, i))
        .collect();
    mount_page(&mock_server, "/", format!("<html><body>{}</body></html>", links)).await;

    let coordinator = Coordinator::new(create_test_config(5, 2));
    let result = coordinator
        .crawl(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(result.total_links, 60);
    assert_eq!(result.broken_links.len(), 50);
    assert_eq!(result.broken_links[49].link.url, format!("{}/link49", base_url));

    let config = Config {
        crawler: CrawlerConfig {
            max_links_checked: 5,
            ..create_test_config(5, 2).crawler
        },
        ..Default::default()
    };
    let result = Coordinator::new(config)
        .crawl(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");
    assert_eq!(result.broken_links.len(), 5);
}

#[tokio::test]
async fn test_page_timeout_fails_crawl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            html_response("<html></html>".to_string()).set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let coordinator = Coordinator::new(create_test_config(1, 1));
    let err = coordinator
        .crawl(&format!("{}/", mock_server.uri()))
        .await
        .unwrap_err();

    assert_eq!(err.stage(), CrawlStage::Fetch);
    assert!(matches!(err, CrawlError::Fetch(FetchError::Timeout { .. })));
}

#[tokio::test]
async fn test_unreachable_target_fails_crawl() {
    let coordinator = Coordinator::new(create_test_config(2, 1));
    let err = coordinator.crawl("http://127.0.0.1:1/").await.unwrap_err();

    assert_eq!(err.stage(), CrawlStage::Fetch);
}

#[tokio::test]
async fn test_invalid_target_fails_before_fetch() {
    let coordinator = Coordinator::default();

    for target in ["ftp://example.com/", "not a url", ""] {
        let err = coordinator.crawl(target).await.unwrap_err();
        assert_eq!(err.stage(), CrawlStage::Target, "target: {:?}", target);
    }
}

#[tokio::test]
async fn test_error_page_is_still_analyzed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string("<html><head><title>Not Found</title></head></html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let result = Coordinator::new(create_test_config(5, 2))
        .crawl(&format!("{}/", mock_server.uri()))
        .await
        .expect("Crawl failed");

    assert_eq!(result.status_code, 404);
    assert_eq!(result.title.as_deref(), Some("Not Found"));
}

#[tokio::test]
async fn test_redirect_records_final_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/new",
        "<html><head><title>Moved Here</title></head></html>".to_string(),
    )
    .await;

    let result = Coordinator::new(create_test_config(5, 2))
        .crawl(&format!("{}/old", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(result.url, format!("{}/old", base_url));
    assert_eq!(result.final_url, format!("{}/new", base_url));
    assert_eq!(result.status_code, 200);
    assert_eq!(result.title.as_deref(), Some("Moved Here"));
}

#[tokio::test]
async fn test_crawl_and_score_end_to_end() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<html><head><title>Short</title></head><body>
            <h1>Only Heading</h1>
            <img src="/a.png">
            <img src="/b.png" alt="   ">
            <a href="/one">One</a>
            <a href="/two">Two</a>
            <a href="/three">Three</a>
        </body></html>"#
            .to_string(),
    )
    .await;
    for route in ["/one", "/two", "/three"] {
        mount_head(&mock_server, route, 200).await;
    }

    let result = Coordinator::new(create_test_config(5, 2))
        .crawl(&format!("{}/", mock_server.uri()))
        .await
        .expect("Crawl failed");
    let scored = score(&result);

    // title 70, meta 0, headings 70, images 0, links 100, performance 100
    assert_eq!(scored.breakdown.title, 70.0);
    assert_eq!(scored.breakdown.meta_description, 0.0);
    assert_eq!(scored.breakdown.headings, 70.0);
    assert_eq!(scored.breakdown.images, 0.0);
    assert_eq!(scored.breakdown.links, 100.0);
    assert_eq!(scored.breakdown.performance, 100.0);
    assert_eq!(scored.overall_score, 54.5);
    assert_eq!(scored.grade, Grade::F);
    assert_eq!(
        scored.issues,
        vec![
            "Missing meta description".to_string(),
            "2 images missing alt text".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_repeated_crawls_are_consistent() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<html><head><title>Stable Page</title></head><body>
            <h1>Stable</h1><a href="/a">A</a><a href="/b">B</a>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_head(&mock_server, "/a", 200).await;

    let coordinator = Coordinator::new(create_test_config(5, 2));
    let url = format!("{}/", mock_server.uri());

    let mut first = coordinator.crawl(&url).await.expect("Crawl failed");
    let mut second = coordinator.crawl(&url).await.expect("Crawl failed");

    first.load_time = 0.0;
    second.load_time = 0.0;
    assert_eq!(first, second);
    assert_eq!(score(&first), score(&second));
}
