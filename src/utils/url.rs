// src/utils/url.rs

//! URL manipulation utilities.

/// Extract the origin (scheme + host) from a URL.
///
/// # Examples
/// ```
/// use ketep_watch::utils::url::origin_of;
///
/// assert_eq!(
///     origin_of("https://example.com/board?page=1"),
///     Some("https://example.com".to_string())
/// );
/// ```
pub fn origin_of(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    Some(parsed.origin().ascii_serialization())
}

/// Resolve a board href against the board's origin.
///
/// Absolute URLs and empty hrefs pass through untouched; anything else
/// is prefixed with the origin, matching how the board renders its
/// root-relative detail links.
pub fn resolve_against_origin(origin: &str, href: &str) -> String {
    if href.is_empty() || href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    format!("{}{}", origin.trim_end_matches('/'), href)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_of() {
        assert_eq!(
            origin_of("https://www.ketep.re.kr/board?boardId=BOARD00022"),
            Some("https://www.ketep.re.kr".to_string())
        );
        assert_eq!(origin_of("not a url"), None);
    }

    #[test]
    fn test_resolve_absolute_url_passthrough() {
        assert_eq!(
            resolve_against_origin("https://example.com", "https://other.com/page"),
            "https://other.com/page"
        );
    }

    #[test]
    fn test_resolve_root_relative_path() {
        assert_eq!(
            resolve_against_origin("https://example.com", "/board/view?seq=1"),
            "https://example.com/board/view?seq=1"
        );
    }

    #[test]
    fn test_resolve_empty_href() {
        assert_eq!(resolve_against_origin("https://example.com", ""), "");
    }
}
