//! Custom assertions for Safe Links testing.
//!
//! Provides domain-specific assertions that make tests more readable
//! and provide better error messages.

use safelinks::{classify, SAFE_LINKS_BASE_DOMAIN};

/// Asserts that no Safe Links URL remains in `text`.
///
/// # Panics
/// Panics if the Safe Links base domain is still present.
pub fn assert_fully_decoded(text: &str) {
    assert!(
        !text.contains(SAFE_LINKS_BASE_DOMAIN),
        "Text should contain no Safe Links URLs but still has one:\n{}",
        text
    );
}

/// Asserts that `candidate` has the faux Safe Links shape and wraps
/// `destination`.
///
/// # Panics
/// Panics if the URL does not parse, is not a Safe Link, or wraps a
/// different destination.
pub fn assert_faux_safe_link(candidate: &str, destination: &str) {
    let parsed = classify(candidate)
        .unwrap_or_else(|e| panic!("'{}' should parse as a URL: {}", candidate, e));

    assert!(
        parsed.is_safe_link(),
        "'{}' should be recognized as a Safe Links URL",
        candidate
    );

    let wrapped = safelinks::domain::original_url(&parsed.url).expect("url parameter present");
    assert_eq!(
        wrapped, destination,
        "'{}' wraps the wrong destination",
        candidate
    );

    let query = parsed.url.query().unwrap_or_default();
    for key in ["url=", "data=", "sdata=", "reserved=0"] {
        assert!(query.contains(key), "'{}' is missing '{}'", candidate, key);
    }
}

/// Asserts that `text` keeps the line structure of `original`: same number
/// of lines and the same terminator on each.
pub fn assert_same_line_endings(original: &str, text: &str) {
    assert_eq!(
        original.matches("\r\n").count(),
        text.matches("\r\n").count(),
        "CRLF count changed"
    );
    assert_eq!(
        original.matches('\n').count(),
        text.matches('\n').count(),
        "LF count changed"
    );
}
