//! Renderer trait and error types
//!
//! This module defines the trait interface for report renderers and the
//! view of a report that renderers consume.

use crate::crawler::CrawlResult;
use crate::report::{Insights, ReportId, ReportStatus, StoredReport};
use crate::scoring::ScoreBreakdown;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Report {0} is not completed")]
    NotCompleted(ReportId),

    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A completed report, ready to render
#[derive(Debug, Clone, Serialize)]
pub struct ReportView<'a> {
    pub id: ReportId,
    pub url: &'a str,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub crawl: &'a CrawlResult,
    pub score: &'a ScoreBreakdown,
    pub insights: Option<&'a Insights>,
}

impl<'a> ReportView<'a> {
    /// Builds a view of a stored report
    ///
    /// Fails unless the report is completed with a crawl result and a score.
    pub fn from_report(report: &'a StoredReport) -> OutputResult<Self> {
        if report.status != ReportStatus::Completed {
            return Err(OutputError::NotCompleted(report.id));
        }

        match (&report.crawl, &report.score) {
            (Some(crawl), Some(score)) => Ok(Self {
                id: report.id,
                url: &report.url,
                created_at: report.created_at,
                completed_at: report.completed_at,
                crawl,
                score,
                insights: report.insights.as_ref(),
            }),
            _ => Err(OutputError::NotCompleted(report.id)),
        }
    }
}

/// Trait for report renderers
pub trait ReportRenderer {
    /// File extension of the rendered artifact, without the dot
    fn extension(&self) -> &'static str;

    /// Renders a report into its downloadable form
    fn render(&self, view: &ReportView<'_>) -> OutputResult<String>;
}
