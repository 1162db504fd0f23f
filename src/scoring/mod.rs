//! SEO scoring engine
//!
//! Turns a [`CrawlResult`] into six category scores, a weighted overall
//! score, a letter grade, and a list of issues. Scoring is pure and total:
//! it does no I/O and accepts any crawl result.

mod categories;
mod grade;
mod issues;

pub use categories::{
    score_headings, score_images, score_links, score_meta_description, score_performance,
    score_title,
};
pub use grade::Grade;
pub use issues::identify_issues;

use crate::crawler::CrawlResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scored aspect of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Title,
    MetaDescription,
    Headings,
    Images,
    Links,
    Performance,
}

impl Category {
    /// All categories, in report order
    pub const ALL: [Category; 6] = [
        Self::Title,
        Self::MetaDescription,
        Self::Headings,
        Self::Images,
        Self::Links,
        Self::Performance,
    ];

    /// Weight of this category in the overall score; weights sum to 100
    pub fn weight(&self) -> u32 {
        match self {
            Self::Title => 15,
            Self::MetaDescription => 15,
            Self::Headings => 20,
            Self::Images => 20,
            Self::Links => 15,
            Self::Performance => 15,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::MetaDescription => "Meta Description",
            Self::Headings => "Headings",
            Self::Images => "Images",
            Self::Links => "Links",
            Self::Performance => "Performance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-category scores, each in [0, 100]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub title: f64,
    pub meta_description: f64,
    pub headings: f64,
    pub images: f64,
    pub links: f64,
    pub performance: f64,
}

impl CategoryScores {
    /// Returns the score of one category
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Title => self.title,
            Category::MetaDescription => self.meta_description,
            Category::Headings => self.headings,
            Category::Images => self.images,
            Category::Links => self.links,
            Category::Performance => self.performance,
        }
    }

    /// Weighted sum of the category scores, in [0, 100]
    pub fn weighted_total(&self) -> f64 {
        let total: f64 = Category::ALL
            .iter()
            .map(|c| self.get(*c) * f64::from(c.weight()) / 100.0)
            .sum();
        total.clamp(0.0, 100.0)
    }
}

/// Complete scoring output for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Weighted overall score, rounded to two decimals
    pub overall_score: f64,
    pub breakdown: CategoryScores,
    pub grade: Grade,
    pub issues: Vec<String>,
}

/// Scores a crawl result
///
/// # Example
///
/// ```
/// use sitesage::crawler::CrawlResult;
/// use sitesage::scoring::{score, Grade};
///
/// let result = CrawlResult::default();
/// let scored = score(&result);
/// assert_eq!(scored.breakdown.images, 70.0);
/// assert_eq!(scored.grade, Grade::F);
/// ```
pub fn score(result: &CrawlResult) -> ScoreBreakdown {
    let breakdown = categories::score_categories(result);
    let overall_score = round2(breakdown.weighted_total());

    ScoreBreakdown {
        overall_score,
        breakdown,
        grade: Grade::from_score(overall_score),
        issues: identify_issues(result),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
