//! Markdown report generation
//!
//! This module renders a human-readable markdown report of an audit,
//! including the score breakdown, issues, page signals and broken links.

use crate::output::traits::{OutputResult, ReportRenderer, ReportView};
use crate::scoring::Category;

/// Broken links listed before the table is cut short
const MAX_LISTED_BROKEN_LINKS: usize = 50;

/// Renders reports as markdown
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl ReportRenderer for MarkdownRenderer {
    fn extension(&self) -> &'static str {
        "md"
    }

    fn render(&self, view: &ReportView<'_>) -> OutputResult<String> {
        Ok(format_markdown_report(view))
    }
}

/// Formats a report as markdown
///
/// # Arguments
///
/// * `view` - The completed report
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_report(view: &ReportView<'_>) -> String {
    let crawl = view.crawl;
    let score = view.score;
    let mut md = String::new();

    // Title
    md.push_str("# SiteSage SEO Report\n\n");

    // Report metadata
    md.push_str("## Report Information\n\n");
    md.push_str(&format!("- **Report ID**: {}\n", view.id));
    md.push_str(&format!("- **URL**: {}\n", view.url));
    if crawl.final_url != crawl.url && !crawl.final_url.is_empty() {
        md.push_str(&format!("- **Final URL**: {}\n", crawl.final_url));
    }
    md.push_str(&format!("- **HTTP Status**: {}\n", crawl.status_code));
    md.push_str(&format!(
        "- **Created**: {}\n",
        view.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if let Some(completed) = view.completed_at {
        md.push_str(&format!(
            "- **Completed**: {}\n",
            completed.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    md.push('\n');

    // Score
    md.push_str("## Score\n\n");
    md.push_str(&format!(
        "**{:.2} / 100** (Grade **{}**)\n\n",
        score.overall_score, score.grade
    ));
    md.push_str("| Category | Score | Weight |\n");
    md.push_str("|----------|-------|--------|\n");
    for category in Category::ALL {
        md.push_str(&format!(
            "| {} | {:.2} | {}% |\n",
            category,
            score.breakdown.get(category),
            category.weight()
        ));
    }
    md.push('\n');

    // Issues
    md.push_str("## Issues\n\n");
    if score.issues.is_empty() {
        md.push_str("No issues found.\n\n");
    } else {
        for issue in &score.issues {
            md.push_str(&format!("- {}\n", issue));
        }
        md.push('\n');
    }

    // Page signals
    md.push_str("## Page Details\n\n");
    md.push_str(&format!(
        "- **Title**: {}\n",
        crawl.title.as_deref().unwrap_or("Missing")
    ));
    md.push_str(&format!(
        "- **Meta Description**: {}\n",
        crawl.meta_description.as_deref().unwrap_or("Missing")
    ));
    md.push_str(&format!("- **H1 Headings**: {}\n", crawl.h1_tags.len()));
    md.push_str(&format!("- **H2 Headings**: {}\n", crawl.h2_tags.len()));
    md.push_str(&format!(
        "- **Images**: {} ({} missing alt text)\n",
        crawl.total_images, crawl.images_without_alt
    ));
    md.push_str(&format!(
        "- **Links**: {} ({} internal, {} external)\n",
        crawl.total_links,
        crawl.internal_links.len(),
        crawl.external_links.len()
    ));
    md.push_str(&format!("- **Load Time**: {:.2}s\n", crawl.load_time));
    md.push_str(&format!(
        "- **Page Size**: {:.1} KB\n\n",
        crawl.page_size as f64 / 1024.0
    ));

    if !crawl.h1_tags.is_empty() {
        md.push_str("### H1 Headings\n\n");
        for heading in &crawl.h1_tags {
            md.push_str(&format!("- {}\n", heading));
        }
        md.push('\n');
    }

    // Broken links
    if !crawl.broken_links.is_empty() {
        md.push_str("## Broken Links\n\n");
        md.push_str("| URL | Result |\n");
        md.push_str("|-----|--------|\n");
        for broken in crawl.broken_links.iter().take(MAX_LISTED_BROKEN_LINKS) {
            md.push_str(&format!("| {} | {} |\n", broken.link.url, broken.outcome));
        }
        if crawl.broken_links.len() > MAX_LISTED_BROKEN_LINKS {
            md.push_str(&format!(
                "\n... and {} more\n",
                crawl.broken_links.len() - MAX_LISTED_BROKEN_LINKS
            ));
        }
        md.push('\n');
    }

    // Insights
    if let Some(insights) = view.insights {
        md.push_str("## Insights\n\n");
        md.push_str(&insights.summary);
        md.push_str("\n\n");

        if !insights.recommendations.is_empty() {
            md.push_str("### Recommendations\n\n");
            for (i, recommendation) in insights.recommendations.iter().enumerate() {
                md.push_str(&format!("{}. {}\n", i + 1, recommendation));
            }
            md.push('\n');
        }
    }

    md
}
