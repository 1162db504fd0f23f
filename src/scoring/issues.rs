use crate::crawler::CrawlResult;
use crate::scoring::categories::{present, SLOW_LOAD_SECS, TITLE_MAX_CHARS};

/// Lists the concrete problems found on a page
///
/// Every check runs; the order of the returned issues is fixed.
pub fn identify_issues(result: &CrawlResult) -> Vec<String> {
    let mut issues = Vec::new();

    match present(&result.title) {
        None => issues.push("Missing page title".to_string()),
        Some(title) if title.chars().count() > TITLE_MAX_CHARS => {
            issues.push(format!(
                "Page title too long (>{} characters)",
                TITLE_MAX_CHARS
            ));
        }
        Some(_) => {}
    }

    if present(&result.meta_description).is_none() {
        issues.push("Missing meta description".to_string());
    }

    match result.h1_tags.len() {
        0 => issues.push("Missing H1 heading".to_string()),
        1 => {}
        count => issues.push(format!("Multiple H1 headings found ({})", count)),
    }

    if result.images_without_alt > 0 {
        issues.push(format!(
            "{} images missing alt text",
            result.images_without_alt
        ));
    }

    if !result.broken_links.is_empty() {
        issues.push(format!(
            "{} broken links detected",
            result.broken_links.len()
        ));
    }

    if result.load_time > SLOW_LOAD_SECS {
        issues.push(format!("Slow load time ({:.2}s)", result.load_time));
    }

    issues
}
