/// Report status definitions for tracking audit progress
///
/// This module defines the states a report moves through while its page is
/// crawled and scored.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the current state of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Report has been created but the audit has not started
    Pending,

    /// The page is being crawled and scored
    Processing,

    /// Crawl and score were stored
    Completed,

    /// The crawl failed; the report carries an error message
    Failed,
}

impl ReportStatus {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns true if moving from this status to `next` is allowed
    ///
    /// Allowed transitions:
    /// - Pending → Processing
    /// - Pending → Failed
    /// - Processing → Completed
    /// - Processing → Failed
    pub fn can_transition_to(&self, next: ReportStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Processing)
                | (Self::Pending, Self::Failed)
                | (Self::Processing, Self::Completed)
                | (Self::Processing, Self::Failed)
        )
    }

    /// Converts the status to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Parses a status from its string representation
    ///
    /// Returns None if the string doesn't match any known status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
