//! Collaborator traits and error types
//!
//! The crawl-and-score pipeline hands its output to two collaborators: a
//! store that persists reports, and a narrative generator that turns scores
//! into prose. Both are defined here as traits.

use crate::crawler::CrawlResult;
use crate::report::{AuditSummary, Insights, ReportId, ReportStatus, StoredReport};
use crate::scoring::ScoreBreakdown;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during report store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Report not found: {0}")]
    NotFound(ReportId),

    #[error("Invalid status transition for report {id}: {from} -> {to}")]
    InvalidTransition {
        id: ReportId,
        from: ReportStatus,
        to: ReportStatus,
    },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for report store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for report persistence backends
///
/// Implementations must reject status changes that
/// [`ReportStatus::can_transition_to`] does not allow.
pub trait ReportStore {
    /// Creates a pending report for a URL and returns its identifier
    fn create_report(&mut self, url: &str) -> StoreResult<ReportId>;

    /// Gets a report by ID
    fn get_report(&self, id: ReportId) -> StoreResult<StoredReport>;

    /// Lists reports, newest first
    ///
    /// Skips the first `skip` reports and returns at most `limit`.
    fn list_reports(&self, skip: usize, limit: usize) -> StoreResult<Vec<StoredReport>>;

    /// Deletes a report and everything stored with it
    fn delete_report(&mut self, id: ReportId) -> StoreResult<()>;

    /// Updates the status of a report
    fn set_status(&mut self, id: ReportId, status: ReportStatus) -> StoreResult<()>;

    /// Stores the crawl result and score of a report
    fn save_results(
        &mut self,
        id: ReportId,
        crawl: &CrawlResult,
        score: &ScoreBreakdown,
    ) -> StoreResult<()>;

    /// Stores generated insights for a report
    fn save_insights(&mut self, id: ReportId, insights: Insights) -> StoreResult<()>;

    /// Marks a report as failed with an error message
    fn mark_failed(&mut self, id: ReportId, message: &str) -> StoreResult<()>;
}

/// Errors returned by a narrative generator
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("Narrative service unavailable: {0}")]
    Unavailable(String),

    #[error("Narrative service returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Turns score data into a written summary and recommendations
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(
        &self,
        summary: &AuditSummary,
        score: &ScoreBreakdown,
    ) -> Result<Insights, NarrativeError>;
}
