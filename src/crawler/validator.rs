//! Link validation
//!
//! Every candidate link gets one HEAD probe. All probes of a crawl run
//! concurrently and each carries its own timeout, so one slow or unreachable
//! host can only ever mark its own link as broken.

use crate::crawler::types::{BrokenLinkRecord, LinkOutcome, LinkRecord};
use futures::future::join_all;
use reqwest::Client;
use std::time::Duration;

/// Probes links concurrently and returns the broken ones
///
/// | Probe result | Outcome |
/// |--------------|---------|
/// | HTTP status >= 400 | broken, `LinkOutcome::Status` |
/// | Error, timeout, connection refused | broken, `LinkOutcome::ConnectionFailed` |
/// | HTTP status < 400 (after redirects) | healthy, no record |
///
/// The caller decides how many links to pass in. This function returns only
/// after every probe has settled; broken links keep their input order.
///
/// # Arguments
///
/// * `client` - The crawl's HTTP client, shared by all probes
/// * `links` - Links to probe
/// * `probe_timeout` - Timeout applied to each probe independently
pub async fn validate_links(
    client: &Client,
    links: &[LinkRecord],
    probe_timeout: Duration,
) -> Vec<BrokenLinkRecord> {
    if links.is_empty() {
        return Vec::new();
    }

    tracing::debug!("Probing {} links", links.len());

    let probes = links
        .iter()
        .map(|link| probe_link(client, link, probe_timeout));

    let broken: Vec<BrokenLinkRecord> = join_all(probes).await.into_iter().flatten().collect();

    tracing::debug!(
        "Link probes settled: {} checked, {} broken",
        links.len(),
        broken.len()
    );

    broken
}

/// Probes a single link, converting every failure into data
async fn probe_link(
    client: &Client,
    link: &LinkRecord,
    probe_timeout: Duration,
) -> Option<BrokenLinkRecord> {
    let request = client.head(&link.url).timeout(probe_timeout).send();

    // The request timeout covers the HTTP exchange; the outer timeout also
    // bounds anything reqwest does before the request is issued.
    let outcome = match tokio::time::timeout(probe_timeout, request).await {
        Ok(Ok(response)) => {
            let status = response.status();
            if status.as_u16() >= 400 {
                LinkOutcome::Status {
                    code: status.as_u16(),
                }
            } else {
                return None;
            }
        }
        Ok(Err(e)) => LinkOutcome::ConnectionFailed {
            reason: describe_error(&e),
        },
        Err(_) => LinkOutcome::ConnectionFailed {
            reason: "timeout".to_string(),
        },
    };

    tracing::warn!("Broken link {}: {}", link.url, outcome);

    Some(BrokenLinkRecord {
        link: link.clone(),
        outcome,
    })
}

fn describe_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "timeout".to_string()
    } else if e.is_connect() {
        "connection refused".to_string()
    } else if e.is_redirect() {
        "too many redirects".to_string()
    } else if e.is_builder() {
        "invalid url".to_string()
    } else {
        e.to_string()
    }
}
