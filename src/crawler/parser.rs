//! HTML parser for extracting SEO signals
//!
//! This module handles parsing HTML content to extract:
//! - Page title and meta description
//! - H1 and H2 headings
//! - Images and their alt text
//! - Links, split into internal and external

use crate::crawler::types::{ImageRecord, LinkRecord, PageSignals};
use crate::url::{classify_link, extract_domain, is_ignored_href, resolve_href, LinkScope};
use crate::ExtractError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Parses HTML content and extracts the page's SEO signals
///
/// Extraction is deterministic: the same input always yields the same
/// output, with document order preserved in every list.
///
/// # Extraction Rules
///
/// - **Title**: first `<title>`, trimmed; missing or empty → `None`
/// - **Meta description**: `content` of `meta[name=description]`, falling back
///   to `meta[property=og:description]` only when the former is absent
/// - **Headings**: every `<h1>` / `<h2>`, trimmed; empty ones are skipped
/// - **Images**: every `<img>` with a non-empty `src`, resolved to an absolute URL
/// - **Links**: every `<a href>` except `#fragment` and `javascript:` hrefs,
///   resolved and classified by exact (case-insensitive) host match
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The page URL, used to resolve relative references
///
/// # Example
///
/// ```
/// use sitesage::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let signals = parse_html(html, &base_url).unwrap();
/// assert_eq!(signals.title, Some("Test".to_string()));
/// assert_eq!(signals.internal_links.len(), 1);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> Result<PageSignals, ExtractError> {
    let document = Html::parse_document(html);

    let title = extract_title(&document)?;
    let meta_description = extract_meta_description(&document)?;
    let h1_tags = extract_headings(&document, "h1")?;
    let h2_tags = extract_headings(&document, "h2")?;
    let images = extract_images(&document, base_url)?;
    let (internal_links, external_links) = extract_links(&document, base_url)?;

    Ok(PageSignals {
        title,
        meta_description,
        h1_tags,
        h2_tags,
        images,
        internal_links,
        external_links,
    })
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// Collects an element's text nodes and trims the result
fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Result<Option<String>, ExtractError> {
    let title_selector = selector("title")?;

    Ok(document
        .select(&title_selector)
        .next()
        .map(|element| element_text(&element))
        .filter(|s| !s.is_empty()))
}

/// Extracts the meta description, falling back to Open Graph
fn extract_meta_description(document: &Html) -> Result<Option<String>, ExtractError> {
    let name_selector = selector(r#"meta[name="description"]"#)?;
    let og_selector = selector(r#"meta[property="og:description"]"#)?;

    let meta = document
        .select(&name_selector)
        .next()
        .or_else(|| document.select(&og_selector).next());

    Ok(meta
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Extracts the non-empty text of every heading with the given tag
fn extract_headings(document: &Html, tag: &str) -> Result<Vec<String>, ExtractError> {
    let heading_selector = selector(tag)?;

    Ok(document
        .select(&heading_selector)
        .map(|element| element_text(&element))
        .filter(|text| !text.is_empty())
        .collect())
}

/// Extracts every image with a usable `src`
fn extract_images(document: &Html, base_url: &Url) -> Result<Vec<ImageRecord>, ExtractError> {
    let img_selector = selector("img")?;
    let mut images = Vec::new();

    for element in document.select(&img_selector) {
        let src = match element.value().attr("src") {
            Some(src) if !src.is_empty() => src,
            _ => continue,
        };

        // A blank src still counts as an image and points back at the page
        let resolved = if src.trim().is_empty() {
            base_url.join("").ok()
        } else {
            resolve_href(src, base_url)
        };

        if let Some(absolute_src) = resolved {
            let alt = element.value().attr("alt").unwrap_or_default().to_string();
            images.push(ImageRecord::new(absolute_src.to_string(), alt));
        }
    }

    Ok(images)
}

/// Extracts all links, split into internal and external
fn extract_links(
    document: &Html,
    base_url: &Url,
) -> Result<(Vec<LinkRecord>, Vec<LinkRecord>), ExtractError> {
    let a_selector = selector("a[href]")?;
    let base_domain = extract_domain(base_url).unwrap_or_default();

    let mut internal = Vec::new();
    let mut external = Vec::new();

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if is_ignored_href(href) {
            continue;
        }

        let Some(absolute_url) = resolve_href(href, base_url) else {
            continue;
        };

        let scope = classify_link(&absolute_url, &base_domain);
        let record = LinkRecord {
            url: absolute_url.to_string(),
            text: element_text(&element),
            scope,
        };

        match scope {
            LinkScope::Internal => internal.push(record),
            LinkScope::External => external.push(record),
        }
    }

    Ok((internal, external))
}
