//! JSON report generation

use crate::output::traits::{OutputError, OutputResult, ReportRenderer, ReportView};

/// Renders reports as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, view: &ReportView<'_>) -> OutputResult<String> {
        serde_json::to_string_pretty(view).map_err(|e| OutputError::Format(e.to_string()))
    }
}
