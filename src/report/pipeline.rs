//! Audit pipeline
//!
//! Drives one report from pending to a terminal status: crawl, score,
//! store, and optionally attach a narrative.

use crate::crawler::Coordinator;
use crate::report::traits::{NarrativeGenerator, ReportStore};
use crate::report::{AuditSummary, ReportId, ReportStatus};
use crate::scoring::{score, ScoreBreakdown};
use crate::SiteSageError;

/// Runs the audit for a pending report
///
/// # Status Flow
///
/// | Step | Outcome |
/// |------|---------|
/// | Start | Pending → Processing |
/// | Crawl or store update fails | Processing → Failed, error message stored, error returned |
/// | Crawl succeeds | crawl result and score stored |
/// | Narrative fails | logged, report completes without insights |
/// | End | Processing → Completed |
///
/// # Arguments
///
/// * `coordinator` - Crawl coordinator to use
/// * `store` - Report store holding the report
/// * `narrative` - Optional narrative generator
/// * `id` - The pending report to process
///
/// # Returns
///
/// * `Ok(ScoreBreakdown)` - The report completed with this score
/// * `Err(SiteSageError)` - The crawl failed or the store rejected an update
pub async fn run_audit<S: ReportStore + ?Sized>(
    coordinator: &Coordinator,
    store: &mut S,
    narrative: Option<&dyn NarrativeGenerator>,
    id: ReportId,
) -> Result<ScoreBreakdown, SiteSageError> {
    let report = store.get_report(id)?;
    store.set_status(id, ReportStatus::Processing)?;

    tracing::info!("Processing report {} for {}", id, report.url);

    match process_report(coordinator, store, narrative, id, &report.url).await {
        Ok(scored) => {
            tracing::info!(
                "Report {} completed: {:.2} ({})",
                id,
                scored.overall_score,
                scored.grade
            );
            Ok(scored)
        }
        Err(e) => {
            let message = match &e {
                SiteSageError::Crawl(crawl_error) => crawl_error.to_string(),
                other => other.to_string(),
            };
            tracing::warn!("Report {} failed: {}", id, message);

            if let Err(mark_error) = store.mark_failed(id, &message) {
                tracing::error!("Could not mark report {} as failed: {}", id, mark_error);
            }

            Err(e)
        }
    }
}

/// Crawls, scores and stores a report that is already processing
async fn process_report<S: ReportStore + ?Sized>(
    coordinator: &Coordinator,
    store: &mut S,
    narrative: Option<&dyn NarrativeGenerator>,
    id: ReportId,
    url: &str,
) -> Result<ScoreBreakdown, SiteSageError> {
    let crawl = coordinator.crawl(url).await?;

    let scored = score(&crawl);
    store.save_results(id, &crawl, &scored)?;

    if let Some(generator) = narrative {
        let summary = AuditSummary::from(&crawl);
        match generator.generate(&summary, &scored).await {
            Ok(insights) => store.save_insights(id, insights)?,
            Err(e) => tracing::warn!("Insights unavailable for report {}: {}", id, e),
        }
    }

    store.set_status(id, ReportStatus::Completed)?;

    Ok(scored)
}
