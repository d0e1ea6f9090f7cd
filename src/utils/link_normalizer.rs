//! Validation and scheme normalization for submitted links.
//!
//! The scheme rule is a substring heuristic: if the raw input contains `http://`
//! anywhere (including inside a path or query), the stored link uses `http://`;
//! otherwise it uses `https://`. Every `http://` and `https://` occurrence is stripped
//! before the chosen scheme is prepended. Inputs with embedded URLs are therefore
//! rewritten too, e.g. `https://a.com/?next=http://b.com` becomes
//! `http://a.com/?next=b.com`.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::AppError;

/// Shape a link must contain: optional scheme, a domain-like token with a 2-6 letter
/// TLD, then permitted path/query characters. Matched anywhere in the input.
static LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((http|https)://)?[a-zA-Z0-9./?:@\-_=#]+\.([a-zA-Z]){2,6}([a-zA-Z0-9.&/?:@\-_=#])*")
        .unwrap()
});

pub const MISSING_LINK_MESSAGE: &str = "Please provide a link.";
pub const INVALID_LINK_MESSAGE: &str = "Please provide a valid URL";

/// Checks that a link is present, non-empty and URL-shaped.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with a user-facing message otherwise.
pub fn validate_link(raw: Option<&str>) -> Result<&str, AppError> {
    let link = match raw {
        Some(link) if !link.is_empty() => link,
        _ => return Err(AppError::bad_request(MISSING_LINK_MESSAGE)),
    };

    if !LINK_REGEX.is_match(link) {
        return Err(AppError::bad_request(INVALID_LINK_MESSAGE));
    }

    Ok(link)
}

/// Applies the scheme heuristic described in the module docs.
pub fn normalize_link(raw: &str) -> String {
    let scheme = if raw.contains("http://") {
        "http://"
    } else {
        "https://"
    };

    let stripped = raw.replace("http://", "").replace("https://", "");
    format!("{}{}", scheme, stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_domain_gets_https() {
        assert_eq!(normalize_link("example.com/path"), "https://example.com/path");
    }

    #[test]
    fn test_http_is_preserved() {
        assert_eq!(normalize_link("http://example.com"), "http://example.com");
    }

    #[test]
    fn test_https_is_kept() {
        assert_eq!(
            normalize_link("https://example.com/a?b=c"),
            "https://example.com/a?b=c"
        );
    }

    #[test]
    fn test_embedded_http_switches_scheme() {
        assert_eq!(
            normalize_link("https://a.com/?next=http://b.com"),
            "http://a.com/?next=b.com"
        );
    }

    #[test]
    fn test_validate_missing_link() {
        let err = validate_link(None).unwrap_err();
        assert_eq!(err.to_string(), MISSING_LINK_MESSAGE);

        let err = validate_link(Some("")).unwrap_err();
        assert_eq!(err.to_string(), MISSING_LINK_MESSAGE);
    }

    #[test]
    fn test_validate_accepts_url_shapes() {
        for link in [
            "example.com",
            "example.com/path",
            "http://example.com",
            "https://sub.example.co.uk/a/b?c=d&e=f#frag",
            "user@mail.example.org",
        ] {
            assert!(validate_link(Some(link)).is_ok(), "{link} should be valid");
        }
    }

    #[test]
    fn test_validate_rejects_non_urls() {
        for link in ["hello", "not a url", "localhost:3000", "a.b", "1234.56"] {
            let err = validate_link(Some(link)).unwrap_err();
            assert_eq!(err.to_string(), INVALID_LINK_MESSAGE, "{link} should be invalid");
        }
    }
}
