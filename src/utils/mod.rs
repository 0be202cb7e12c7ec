//! Utility functions and helpers.

pub mod clock;
pub mod http;

use url::Url;

/// Resolve a potentially relative link against the page it appeared on.
///
/// Returns `None` for in-page anchors, non-HTTP schemes and unparsable links.
/// The fragment is stripped so `page#a` and `page#b` are the same URL.
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let mut url = base.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);
    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_link() {
        let base = Url::parse("https://example.com/path/").unwrap();
        assert_eq!(
            resolve_link(&base, "page.html"),
            Some("https://example.com/path/page.html".to_string())
        );
        assert_eq!(
            resolve_link(&base, "/root.html"),
            Some("https://example.com/root.html".to_string())
        );
        assert_eq!(
            resolve_link(&base, "https://other.com/x"),
            Some("https://other.com/x".to_string())
        );
    }

    #[test]
    fn test_resolve_strips_fragment() {
        let base = Url::parse("https://example.com/").unwrap();
        assert_eq!(
            resolve_link(&base, "/docs#install"),
            Some("https://example.com/docs".to_string())
        );
    }

    #[test]
    fn test_skip_anchor_and_special_schemes() {
        let base = Url::parse("https://example.com/page").unwrap();
        assert_eq!(resolve_link(&base, "#section"), None);
        assert_eq!(resolve_link(&base, "mailto:test@example.com"), None);
        assert_eq!(resolve_link(&base, "javascript:void(0)"), None);
        assert_eq!(resolve_link(&base, "   "), None);
    }
}
