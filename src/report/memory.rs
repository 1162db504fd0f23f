//! In-memory report store
//!
//! Keeps reports in a map for the lifetime of the process. Used by the CLI,
//! which audits one page per run, and by tests.

use crate::crawler::CrawlResult;
use crate::report::traits::{ReportStore, StoreError, StoreResult};
use crate::report::{Insights, ReportId, ReportStatus, StoredReport};
use crate::scoring::ScoreBreakdown;
use chrono::Utc;
use std::collections::BTreeMap;

/// Report store backed by an ordered map
#[derive(Debug, Default)]
pub struct MemoryReportStore {
    reports: BTreeMap<ReportId, StoredReport>,
    next_id: u64,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reports
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    fn report_mut(&mut self, id: ReportId) -> StoreResult<&mut StoredReport> {
        self.reports.get_mut(&id).ok_or(StoreError::NotFound(id))
    }

    fn transition(&mut self, id: ReportId, status: ReportStatus) -> StoreResult<&mut StoredReport> {
        let report = self.report_mut(id)?;

        if !report.status.can_transition_to(status) {
            return Err(StoreError::InvalidTransition {
                id,
                from: report.status,
                to: status,
            });
        }

        report.status = status;
        if status.is_terminal() {
            report.completed_at = Some(Utc::now());
        }

        Ok(report)
    }
}

impl ReportStore for MemoryReportStore {
    fn create_report(&mut self, url: &str) -> StoreResult<ReportId> {
        self.next_id += 1;
        let id = ReportId(self.next_id);
        self.reports.insert(id, StoredReport::new(id, url));
        Ok(id)
    }

    fn get_report(&self, id: ReportId) -> StoreResult<StoredReport> {
        self.reports.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn list_reports(&self, skip: usize, limit: usize) -> StoreResult<Vec<StoredReport>> {
        // Identifiers grow with creation time
        Ok(self
            .reports
            .values()
            .rev()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    fn delete_report(&mut self, id: ReportId) -> StoreResult<()> {
        self.reports
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    fn set_status(&mut self, id: ReportId, status: ReportStatus) -> StoreResult<()> {
        self.transition(id, status)?;
        Ok(())
    }

    fn save_results(
        &mut self,
        id: ReportId,
        crawl: &CrawlResult,
        score: &ScoreBreakdown,
    ) -> StoreResult<()> {
        let report = self.report_mut(id)?;
        report.crawl = Some(crawl.clone());
        report.score = Some(score.clone());
        Ok(())
    }

    fn save_insights(&mut self, id: ReportId, insights: Insights) -> StoreResult<()> {
        let report = self.report_mut(id)?;
        report.insights = Some(insights);
        Ok(())
    }

    fn mark_failed(&mut self, id: ReportId, message: &str) -> StoreResult<()> {
        let report = self.transition(id, ReportStatus::Failed)?;
        report.error_message = Some(message.to_string());
        Ok(())
    }
}
