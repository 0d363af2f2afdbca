//! URL pattern extraction.
//!
//! Finds substrings that look like URLs, i.e. runs of non-whitespace starting
//! with `https://` (and optionally `http://`). Matches are raw: enclosing
//! punctuation is left in place for [`super::normalize`] to deal with.
//!
//! Three interchangeable strategies are provided. [`RegexExtractor`] is the
//! default; the others exist so extraction can be cross-checked.

use super::{HTTPS_PREFIX, HTTP_PREFIX};
use crate::error::{SafeLinksError, SafeLinksResult};
use once_cell::sync::Lazy;
use regex::Regex;

/// An unvalidated URL-like substring and its byte offsets in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMatch<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> RawMatch<'a> {
    fn new(input: &'a str, start: usize, end: usize) -> Self {
        Self {
            text: &input[start..end],
            start,
            end,
        }
    }
}

/// Strategy for locating URL-like substrings in text.
pub trait ExtractionStrategy: Send + Sync {
    /// Returns all non-overlapping matches, left to right.
    ///
    /// `include_plain_http` widens the accepted prefixes from `https://`
    /// alone to `https://` and `http://`.
    fn find_all<'a>(&self, text: &'a str, include_plain_http: bool) -> Vec<RawMatch<'a>>;

    /// Returns a human-readable name for this strategy.
    fn name(&self) -> &str;
}

/// Returns true when `text` contains at least one accepted prefix.
pub fn has_url_prefix(text: &str, include_plain_http: bool) -> bool {
    text.contains(HTTPS_PREFIX) || (include_plain_http && text.contains(HTTP_PREFIX))
}

/// Runs `strategy` over `text`.
///
/// Fails with [`SafeLinksError::NoUrlsFound`] without invoking the strategy
/// when no accepted prefix occurs in `text`, and when the strategy finds
/// nothing.
pub fn extract_patterns<'a>(
    strategy: &dyn ExtractionStrategy,
    text: &'a str,
    include_plain_http: bool,
) -> SafeLinksResult<Vec<RawMatch<'a>>> {
    if !has_url_prefix(text, include_plain_http) {
        return Err(SafeLinksError::NoUrlsFound);
    }

    let matches = strategy.find_all(text, include_plain_http);
    if matches.is_empty() {
        return Err(SafeLinksError::NoUrlsFound);
    }

    Ok(matches)
}

/// Regular expression strategy.
///
/// Matches an optional `<`, the scheme prefix, then everything up to the
/// next whitespace or `>`, then an optional `>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexExtractor;

impl RegexExtractor {
    /// Creates a new regex extractor.
    pub fn new() -> Self {
        Self
    }

    /// Returns the pattern for the requested scheme set.
    pub fn pattern(include_plain_http: bool) -> &'static Regex {
        static HTTPS_ONLY: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"<?https://[^\s>]+>?").expect("Valid URL regex"));
        static HTTP_OR_HTTPS: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"<?https?://[^\s>]+>?").expect("Valid URL regex"));

        if include_plain_http {
            &HTTP_OR_HTTPS
        } else {
            &HTTPS_ONLY
        }
    }
}

impl ExtractionStrategy for RegexExtractor {
    fn find_all<'a>(&self, text: &'a str, include_plain_http: bool) -> Vec<RawMatch<'a>> {
        Self::pattern(include_plain_http)
            .find_iter(text)
            .map(|m| RawMatch::new(text, m.start(), m.end()))
            .collect()
    }

    fn name(&self) -> &str {
        "regex"
    }
}

/// Index scanning strategy.
///
/// Finds the next prefix occurrence, then walks forward to the first
/// whitespace character or `>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexScanExtractor;

impl IndexScanExtractor {
    /// Creates a new index scan extractor.
    pub fn new() -> Self {
        Self
    }

    fn next_prefix(text: &str, from: usize, include_plain_http: bool) -> Option<(usize, usize)> {
        let rest = &text[from..];
        let https = rest.find(HTTPS_PREFIX).map(|i| (from + i, HTTPS_PREFIX.len()));
        let http = if include_plain_http {
            rest.find(HTTP_PREFIX).map(|i| (from + i, HTTP_PREFIX.len()))
        } else {
            None
        };

        match (https, http) {
            (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
            (a, b) => a.or(b),
        }
    }

    fn end_position(text: &str, from: usize) -> usize {
        text[from..]
            .char_indices()
            .find(|&(_, c)| c.is_whitespace() || c == '>')
            .map_or(text.len(), |(i, _)| from + i)
    }
}

impl ExtractionStrategy for IndexScanExtractor {
    fn find_all<'a>(&self, text: &'a str, include_plain_http: bool) -> Vec<RawMatch<'a>> {
        let mut matches = Vec::new();
        let mut position = 0;

        while let Some((start, prefix_len)) = Self::next_prefix(text, position, include_plain_http)
        {
            let body = start + prefix_len;
            let end = Self::end_position(text, body);

            // A bare prefix with nothing after it is not a URL pattern.
            if end > body {
                matches.push(RawMatch::new(text, start, end));
            }

            position = end.max(body);
            if position >= text.len() {
                break;
            }
        }

        matches
    }

    fn name(&self) -> &str {
        "index-scan"
    }
}

/// Whitespace field strategy.
///
/// Splits on whitespace and keeps fields that start with a prefix, or with
/// `<` followed by a prefix. A prefix that is not at the start of a field
/// (for example `(https://...` or `url=https://...`) is not found; this is a
/// known limitation of the approach.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldSplitExtractor;

impl FieldSplitExtractor {
    /// Creates a new field split extractor.
    pub fn new() -> Self {
        Self
    }

    fn is_candidate(field: &str, include_plain_http: bool) -> bool {
        let field = field.strip_prefix('<').unwrap_or(field);
        field.starts_with(HTTPS_PREFIX) || (include_plain_http && field.starts_with(HTTP_PREFIX))
    }
}

impl ExtractionStrategy for FieldSplitExtractor {
    fn find_all<'a>(&self, text: &'a str, include_plain_http: bool) -> Vec<RawMatch<'a>> {
        let base = text.as_ptr() as usize;

        text.split_whitespace()
            .filter(|field| Self::is_candidate(field, include_plain_http))
            .map(|field| {
                let start = field.as_ptr() as usize - base;
                RawMatch::new(text, start, start + field.len())
            })
            .collect()
    }

    fn name(&self) -> &str {
        "field-split"
    }
}
