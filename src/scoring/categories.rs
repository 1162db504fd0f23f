//! Per-category scoring rules
//!
//! Each function returns a value in [0, 100].

use crate::crawler::CrawlResult;

/// Title length below which a title is too short
pub const TITLE_MIN_CHARS: usize = 30;
/// Title length above which a title is too long
pub const TITLE_MAX_CHARS: usize = 60;
/// Meta description length below which it is too short
pub const META_MIN_CHARS: usize = 120;
/// Meta description length above which it is too long
pub const META_MAX_CHARS: usize = 160;
/// Load time above which a page counts as slow (seconds)
pub const SLOW_LOAD_SECS: f64 = 3.0;

const NO_IMAGES_SCORE: f64 = 70.0;
const NO_LINKS_SCORE: f64 = 50.0;
const INTERNAL_LINK_BONUS: f64 = 10.0;
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

fn clamp(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

/// Returns the text if it is present and non-empty
pub(crate) fn present(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|s| !s.is_empty())
}

/// Scores the page title
pub fn score_title(title: Option<&str>) -> f64 {
    let Some(title) = title.filter(|t| !t.is_empty()) else {
        return 0.0;
    };

    let length = title.chars().count();
    let mut score = 100.0;

    if length < TITLE_MIN_CHARS {
        score -= 30.0;
    }
    if length > TITLE_MAX_CHARS {
        score -= 20.0;
    }

    clamp(score)
}

/// Scores the meta description
pub fn score_meta_description(description: Option<&str>) -> f64 {
    let Some(description) = description.filter(|d| !d.is_empty()) else {
        return 0.0;
    };

    let length = description.chars().count();
    let mut score = 100.0;

    if length < META_MIN_CHARS {
        score -= 30.0;
    }
    if length > META_MAX_CHARS {
        score -= 20.0;
    }

    clamp(score)
}

/// Scores the heading structure
///
/// A missing H1 costs 50 and a page with several H1s costs 20; the two
/// cannot both apply. A missing H2 costs another 30.
pub fn score_headings(h1_count: usize, h2_count: usize) -> f64 {
    let mut score = 100.0;

    match h1_count {
        0 => score -= 50.0,
        1 => {}
        _ => score -= 20.0,
    }

    if h2_count == 0 {
        score -= 30.0;
    }

    clamp(score)
}

/// Scores alt text coverage
pub fn score_images(total_images: usize, images_without_alt: usize) -> f64 {
    if total_images == 0 {
        return NO_IMAGES_SCORE;
    }

    let with_alt = total_images.saturating_sub(images_without_alt);
    clamp(with_alt as f64 / total_images as f64 * 100.0)
}

/// Scores link health, with a bonus for internal linking
pub fn score_links(total_links: usize, broken_count: usize, has_internal: bool) -> f64 {
    if total_links == 0 {
        return NO_LINKS_SCORE;
    }

    let working = total_links.saturating_sub(broken_count);
    let mut score = working as f64 / total_links as f64 * 100.0;

    if has_internal {
        score = (score + INTERNAL_LINK_BONUS).min(100.0);
    }

    clamp(score)
}

/// Scores load time and page weight
///
/// Only the largest load time penalty applies. The page size penalty is
/// added on top of it.
pub fn score_performance(load_time: f64, page_size: usize) -> f64 {
    let mut score = 100.0;

    if load_time > SLOW_LOAD_SECS {
        score -= 40.0;
    } else if load_time > 2.0 {
        score -= 20.0;
    } else if load_time > 1.0 {
        score -= 10.0;
    }

    let size_mb = page_size as f64 / BYTES_PER_MB;
    if size_mb > 2.0 {
        score -= 30.0;
    } else if size_mb > 1.5 {
        score -= 15.0;
    }

    clamp(score)
}

/// Scores every category of a crawl result
pub(crate) fn score_categories(result: &CrawlResult) -> super::CategoryScores {
    super::CategoryScores {
        title: score_title(present(&result.title)),
        meta_description: score_meta_description(present(&result.meta_description)),
        headings: score_headings(result.h1_tags.len(), result.h2_tags.len()),
        images: score_images(result.total_images, result.images_without_alt),
        links: score_links(
            result.total_links,
            result.broken_links.len(),
            !result.internal_links.is_empty(),
        ),
        performance: score_performance(result.load_time, result.page_size),
    }
}
