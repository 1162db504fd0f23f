use url::Url;

/// Returns true if an href should never become a link record
///
/// Empty hrefs, same-page fragments (`#...`) and script pseudo-URLs
/// (`javascript:...`) are dropped before resolution.
pub fn is_ignored_href(href: &str) -> bool {
    let href = href.trim();

    href.is_empty()
        || href.starts_with('#')
        || href
            .get(..11)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("javascript:"))
}

/// Resolves an href or src attribute against the page URL
///
/// Returns None if the value is empty or cannot be joined onto the base.
/// Any scheme is kept; filtering by scheme is the caller's concern.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitesage::url::resolve_href;
///
/// let base = Url::parse("https://example.com/blog/post").unwrap();
/// assert_eq!(
///     resolve_href("../about", &base).map(|u| u.to_string()),
///     Some("https://example.com/about".to_string())
/// );
/// ```
pub fn resolve_href(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => Some(absolute_url),
        Err(e) => {
            tracing::debug!("Skipping unresolvable reference '{}': {}", href, e);
            None
        }
    }
}
