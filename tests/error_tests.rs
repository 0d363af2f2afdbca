//! Error taxonomy tests: display text, classification helpers and sources.

use safelinks::{LinkTransformer, SafeLinksError, SelectionMode};
use std::error::Error;
use std::io;

#[test]
fn test_nothing_found_display() {
    assert_eq!(SafeLinksError::NoUrlsFound.to_string(), "no URLs found in input");
    assert_eq!(
        SafeLinksError::NoSafeLinkUrlsFound.to_string(),
        "no Safe Links URLs found in input"
    );
    assert_eq!(
        SafeLinksError::NoPlainUrlsFound.to_string(),
        "no non-Safe Links URLs found in input"
    );
}

#[test]
fn test_invalid_url_display_names_candidate() {
    let err = SafeLinksError::InvalidUrl {
        url: "https://".to_string(),
        reason: "empty host".to_string(),
    };
    let message = err.to_string();
    assert!(message.contains("'https://'"));
    assert!(message.contains("empty host"));
}

#[test]
fn test_parameter_missing_display() {
    let err = SafeLinksError::ParameterMissing {
        url: "https://nam01.safelinks.protection.outlook.com/".to_string(),
        parameter: "url".to_string(),
    };
    assert!(err.to_string().contains("missing required parameter 'url'"));
}

#[test]
fn test_helper_classification() {
    let nothing = [
        SafeLinksError::NoUrlsFound,
        SafeLinksError::NoSafeLinkUrlsFound,
        SafeLinksError::NoPlainUrlsFound,
    ];
    for err in &nothing {
        assert!(err.is_nothing_found(), "{:?}", err);
        assert!(!err.is_no_op(), "{:?}", err);
    }

    for err in [SafeLinksError::EncodingNoOp, SafeLinksError::EscapingNoOp] {
        assert!(err.is_no_op());
        assert!(!err.is_nothing_found());
    }

    let hard = SafeLinksError::NoInput {
        source_name: "standard input".to_string(),
    };
    assert!(!hard.is_nothing_found());
    assert!(!hard.is_no_op());
}

#[test]
fn test_io_error_keeps_source() {
    let err: SafeLinksError = io::Error::new(io::ErrorKind::UnexpectedEof, "truncated").into();

    assert!(err.to_string().contains("truncated"));
    let source = err.source().expect("io error should be the source");
    assert_eq!(source.to_string(), "truncated");
}

#[test]
fn test_errors_convert_to_anyhow() {
    let err = anyhow::Error::from(SafeLinksError::NoInput {
        source_name: "notes.txt".to_string(),
    });
    assert_eq!(err.to_string(), "no input found in notes.txt");
}

#[test]
fn test_operations_report_expected_errors() {
    let transformer = LinkTransformer::default();

    let err = transformer.decode("no links at all").unwrap_err();
    assert!(matches!(err, SafeLinksError::NoUrlsFound));

    let err = transformer.decode("https://example.com").unwrap_err();
    assert!(matches!(err, SafeLinksError::NoSafeLinkUrlsFound));

    let err = transformer
        .query_escape("no links at all", SelectionMode::All)
        .unwrap_err();
    assert!(matches!(err, SafeLinksError::NoPlainUrlsFound));

    let err = transformer.urls("https://", false).unwrap_err();
    assert!(matches!(err, SafeLinksError::NoUrlsFound));
}
