//! Regex extraction of tokens embedded in portal HTML.
//!
//! Scraping markup is fragile, so all patterns live behind this one module
//! and both binaries share the same tested implementation.

use std::sync::LazyLock;

use regex::Regex;

static CSRF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"name="_csrf" value="([^"]+)""#).expect("valid pattern"));

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"name="_t"\s+content="([^"]+)""#).expect("valid pattern"));

static TOKEN_JWT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"name="_t" content="(eyJ[^"]+)""#).expect("valid pattern"));

static META_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"name="([^"]+)"\s+content="([^"]+)""#).expect("valid pattern"));

/// Hidden `_csrf` form field on the login page.
pub fn csrf_token(html: &str) -> Option<String> {
    CSRF_RE.captures(html).map(|c| c[1].to_string())
}

/// `_t` meta tag on the trámites page.
///
/// Two patterns are tried in order: a general one, then one anchored to the
/// JWT prefix, to tolerate minor markup variance.
pub fn access_token(html: &str) -> Option<String> {
    let token = TOKEN_RE
        .captures(html)
        .or_else(|| TOKEN_JWT_RE.captures(html))
        .map(|c| c[1].trim().to_string())?;

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Content attribute of an arbitrary named meta tag (`_ca`, `_nd`).
pub fn meta_content(html: &str, name: &str) -> Option<String> {
    META_RE
        .captures_iter(html)
        .find(|c| &c[1] == name)
        .map(|c| c[2].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csrf_token_extraction() {
        let html = r#"<form><input type="hidden" name="_csrf" value="abc-123"/></form>"#;
        assert_eq!(csrf_token(html), Some("abc-123".to_string()));
    }

    #[test]
    fn test_csrf_token_missing() {
        assert_eq!(csrf_token("<html></html>"), None);
    }

    #[test]
    fn test_access_token_general_pattern() {
        let html = r#"<meta name="_t"   content="eyJhbGciOiJIUzI1NiJ9.x.y"/>"#;
        assert_eq!(
            access_token(html),
            Some("eyJhbGciOiJIUzI1NiJ9.x.y".to_string())
        );
    }

    #[test]
    fn test_access_token_single_space_markup() {
        let html = r#"<meta name="_t" content="eyJ0b2tlbg.abc.def">"#;
        assert_eq!(access_token(html), Some("eyJ0b2tlbg.abc.def".to_string()));
    }

    #[test]
    fn test_access_token_empty_content_is_absent() {
        let html = r#"<meta name="_t" content=""/>"#;
        assert_eq!(access_token(html), None);
    }

    #[test]
    fn test_access_token_whitespace_only_is_absent() {
        let html = r#"<meta name="_t" content="   "/>"#;
        assert_eq!(access_token(html), None);
    }

    #[test]
    fn test_meta_content_auxiliary_identifiers() {
        let html = r#"
            <meta name="_t" content="eyJhbGciOiJIUzI1NiJ9.x.y"/>
            <meta name="_ca" content="20210001"/>
            <meta name="_nd" content="71234567"/>
        "#;
        assert_eq!(meta_content(html, "_ca"), Some("20210001".to_string()));
        assert_eq!(meta_content(html, "_nd"), Some("71234567".to_string()));
        assert_eq!(meta_content(html, "_xx"), None);
    }

    #[test]
    fn test_extraction_is_stable_across_repeated_calls() {
        let html = r#"<meta name="_t" content="eyJhbGciOiJIUzI1NiJ9.x.y"/>"#;
        for _ in 0..3 {
            assert_eq!(
                access_token(html),
                Some("eyJhbGciOiJIUzI1NiJ9.x.y".to_string())
            );
        }
    }
}
