//! Output module for rendering audit reports
//!
//! This module handles:
//! - Rendering completed reports as markdown or JSON
//! - Writing rendered reports to disk
//! - Formatting the one-line score summary printed after a run

mod json;
mod markdown;
mod traits;

pub use json::JsonRenderer;
pub use markdown::{format_markdown_report, MarkdownRenderer};
pub use traits::{OutputError, OutputResult, ReportRenderer, ReportView};

use crate::config::ReportFormat;
use crate::report::StoredReport;
use std::fs;
use std::path::Path;

/// Returns the renderer for a report format
pub fn renderer_for(format: ReportFormat) -> Box<dyn ReportRenderer> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownRenderer),
        ReportFormat::Json => Box::new(JsonRenderer),
    }
}

/// Renders a stored report
///
/// # Arguments
///
/// * `report` - The report to render
/// * `format` - Output format
///
/// # Returns
///
/// * `Ok(String)` - The rendered report
/// * `Err(OutputError::NotCompleted)` - The report has not completed
pub fn render_report(report: &StoredReport, format: ReportFormat) -> OutputResult<String> {
    let view = ReportView::from_report(report)?;
    renderer_for(format).render(&view)
}

/// Renders a stored report and writes it to a file
///
/// # Arguments
///
/// * `report` - The report to render
/// * `format` - Output format
/// * `path` - Destination file; parent directories are created as needed
pub fn write_report(report: &StoredReport, format: ReportFormat, path: &Path) -> OutputResult<()> {
    let rendered = render_report(report, format)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, rendered)?;

    tracing::info!("Report written to: {}", path.display());

    Ok(())
}

/// One-line summary of a report's outcome
pub fn summary_line(report: &StoredReport) -> String {
    match (&report.score, &report.error_message) {
        (Some(score), _) => format!(
            "{}: {:.2}/100 (grade {}, {} issues)",
            report.url,
            score.overall_score,
            score.grade,
            score.issues.len()
        ),
        (None, Some(message)) => format!("{}: {} ({})", report.url, report.status, message),
        (None, None) => format!("{}: {}", report.url, report.status),
    }
}
