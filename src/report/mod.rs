//! Report lifecycle
//!
//! This module covers everything that happens around a crawl:
//! - Report status tracking (pending → processing → completed/failed)
//! - Collaborator boundaries for persistence and narrative generation
//! - An in-memory report store
//! - The audit pipeline that ties crawl, score and collaborators together

mod memory;
mod pipeline;
mod status;
mod traits;

pub use memory::MemoryReportStore;
pub use pipeline::run_audit;
pub use status::ReportStatus;
pub use traits::{
    NarrativeError, NarrativeGenerator, ReportStore, StoreError, StoreResult,
};

use crate::crawler::CrawlResult;
use crate::scoring::{Grade, ScoreBreakdown};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of recommendations kept from a narrative
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Opaque report identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReportId(pub u64);

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Narrative generated from a report's score data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    pub summary: String,
    pub recommendations: Vec<String>,
    pub model_used: Option<String>,
}

impl Insights {
    /// Creates insights, keeping at most [`MAX_RECOMMENDATIONS`] non-empty
    /// recommendations
    pub fn new(summary: String, recommendations: Vec<String>, model_used: Option<String>) -> Self {
        let recommendations = recommendations
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .take(MAX_RECOMMENDATIONS)
            .collect();

        Self {
            summary: summary.trim().to_string(),
            recommendations,
            model_used,
        }
    }
}

/// The crawl fields a narrative generator gets to see
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub url: String,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1_count: usize,
    pub h2_count: usize,
    pub total_images: usize,
    pub images_without_alt: usize,
    pub total_links: usize,
    pub broken_links: usize,
    pub load_time: f64,
    pub page_size: usize,
}

impl From<&CrawlResult> for AuditSummary {
    fn from(result: &CrawlResult) -> Self {
        Self {
            url: result.url.clone(),
            title: result.title.clone(),
            meta_description: result.meta_description.clone(),
            h1_count: result.h1_tags.len(),
            h2_count: result.h2_tags.len(),
            total_images: result.total_images,
            images_without_alt: result.images_without_alt,
            total_links: result.total_links,
            broken_links: result.broken_links.len(),
            load_time: result.load_time,
            page_size: result.page_size,
        }
    }
}

/// A report as held by a store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredReport {
    pub id: ReportId,
    pub url: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub crawl: Option<CrawlResult>,
    pub score: Option<ScoreBreakdown>,
    pub insights: Option<Insights>,
}

impl StoredReport {
    /// Creates a pending report
    pub fn new(id: ReportId, url: &str) -> Self {
        Self {
            id,
            url: url.to_string(),
            status: ReportStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
            error_message: None,
            crawl: None,
            score: None,
            insights: None,
        }
    }

    /// Overall score, once the report is scored
    pub fn overall_score(&self) -> Option<f64> {
        self.score.as_ref().map(|s| s.overall_score)
    }

    /// Letter grade, once the report is scored
    pub fn grade(&self) -> Option<Grade> {
        self.score.as_ref().map(|s| s.grade)
    }
}
