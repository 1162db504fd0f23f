//! HTTP fetcher implementation
//!
//! This module handles the page request for the crawler, including:
//! - Building the per-crawl HTTP client with a proper user agent string
//! - GET requests to fetch page content under a timeout
//! - Measuring load time and page size
//! - Error classification

use crate::config::Config;
use crate::crawler::types::RawPage;
use crate::url::CrawlTarget;
use crate::FetchError;
use reqwest::{redirect::Policy, Client};
use std::time::{Duration, Instant};

/// Builds an HTTP client with proper configuration
///
/// The client's default timeout is the page timeout; link probes override
/// it per request.
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sitesage::config::Config;
/// use sitesage::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let page_timeout = config.crawler.page_timeout();

    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(page_timeout)
        .connect_timeout(page_timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(config.crawler.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the audited page
///
/// The elapsed time covers sending the request and reading the whole body.
/// Non-success status codes are not errors: the body is still analyzed and
/// the status is recorded on the returned page.
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Timeout elapsed | `FetchError::Timeout` |
/// | DNS failure, connection refused, TLS error | `FetchError::Connect` |
/// | Body unreadable or undecodable | `FetchError::Decode` |
/// | Anything else | `FetchError::Request` |
pub async fn fetch_page(client: &Client, target: &CrawlTarget) -> Result<RawPage, FetchError> {
    let url = target.as_str();
    let start = Instant::now();

    let response = client
        .get(target.url().clone())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status_code = response.status().as_u16();
    let final_url = response.url().to_string();

    if status_code >= 400 {
        tracing::warn!("{} answered with HTTP {}", url, status_code);
    }

    let html = response.text().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    })?;

    let elapsed_secs = start.elapsed().as_secs_f64();
    let byte_size = html.len();

    tracing::debug!(
        "Fetched {} ({} bytes, HTTP {}) in {:.3}s",
        final_url,
        byte_size,
        status_code,
        elapsed_secs
    );

    Ok(RawPage {
        url: url.to_string(),
        final_url,
        status_code,
        html,
        byte_size,
        elapsed_secs,
    })
}

/// Maps a request error onto the fetch error taxonomy
fn classify_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
            message: e.to_string(),
        }
    } else if e.is_decode() || e.is_body() {
        FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            source: e,
        }
    }
}
