//! Crawler coordinator - crawl orchestration logic
//!
//! This module runs one crawl end to end:
//! - Validating the target URL
//! - Opening the crawl's HTTP session
//! - Fetching and parsing the page
//! - Validating the first links found
//! - Assembling the crawl result

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::parser::parse_html;
use crate::crawler::types::{CrawlResult, LinkRecord};
use crate::crawler::validator::validate_links;
use crate::url::parse_target;
use crate::CrawlError;
use std::sync::Arc;
use std::time::Instant;

/// Main crawler coordinator structure
///
/// The coordinator holds configuration only. Each call to
/// [`Coordinator::crawl`] opens its own HTTP session and drops it before
/// returning, on success and on failure alike.
#[derive(Debug, Clone)]
pub struct Coordinator {
    config: Arc<Config>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the coordinator's configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Crawls a single page
    ///
    /// This method:
    /// 1. Validates the target URL
    /// 2. Builds the crawl's HTTP session
    /// 3. Fetches the page
    /// 4. Extracts title, meta description, headings, images and links
    /// 5. Probes the first `max_links_checked` links, internal first
    /// 6. Assembles the crawl result
    ///
    /// Any stage failure aborts the crawl and no partial result is returned.
    /// Link probe failures are not stage failures; they become broken links.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlResult)` - Crawl completed
    /// * `Err(CrawlError)` - The first stage failure
    pub async fn crawl(&self, target_url: &str) -> Result<CrawlResult, CrawlError> {
        let target = parse_target(target_url).map_err(CrawlError::Target)?;
        let client = build_http_client(&self.config).map_err(CrawlError::Session)?;
        let start_time = Instant::now();

        tracing::info!("Starting crawl of {}", target);

        let page = fetch_page(&client, &target)
            .await
            .map_err(CrawlError::Fetch)?;

        let signals = parse_html(&page.html, target.url()).map_err(|source| CrawlError::Extract {
            url: target.to_string(),
            source,
        })?;

        tracing::debug!(
            "Extracted {} h1, {} h2, {} images, {} internal and {} external links",
            signals.h1_tags.len(),
            signals.h2_tags.len(),
            signals.images.len(),
            signals.internal_links.len(),
            signals.external_links.len()
        );

        let candidates: Vec<LinkRecord> = signals
            .all_links()
            .take(self.config.crawler.max_links_checked)
            .cloned()
            .collect();

        let broken_links = validate_links(
            &client,
            &candidates,
            self.config.crawler.probe_timeout(),
        )
        .await;

        let result = CrawlResult::from_parts(&page, signals, broken_links);

        tracing::info!(
            "Crawl of {} completed in {:?}: {} links, {} broken",
            target,
            start_time.elapsed(),
            result.total_links,
            result.broken_links.len()
        );

        Ok(result)
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Crawls a page with the default configuration
///
/// # Example
///
/// ```no_run
/// # async fn example() -> Result<(), sitesage::CrawlError> {
/// let result = sitesage::crawl("https://example.com/").await?;
/// println!("{} links found", result.total_links);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(target_url: &str) -> Result<CrawlResult, CrawlError> {
    Coordinator::default().crawl(target_url).await
}
