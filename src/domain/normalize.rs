//! Candidate URL clean-up.
//!
//! Matched text frequently carries punctuation that belongs to the
//! surrounding prose or markup rather than to the URL: quoting, `<...>`
//! delimiters from e-mail bodies, Markdown-style parentheses, sentence-final
//! periods and HTML entity escaping. This module strips those artifacts.

use std::borrow::Cow;

const QUOTES: &[char] = &['\'', '"'];

/// Cleans a candidate URL for parsing.
///
/// Steps, in order:
/// 1. remove straight single and double quotes anywhere
/// 2. trim enclosing angle brackets
/// 3. trim enclosing parentheses
/// 4. trim leading/trailing periods
/// 5. decode HTML entities (`&amp;` becomes `&`)
///
/// Steps 2-4 repeat until nothing more is trimmed, so nested shells such as
/// `<https://example.com>.` are fully removed.
pub fn normalize(candidate: &str) -> String {
    let unquoted: Cow<'_, str> = if candidate.contains(QUOTES) {
        Cow::Owned(candidate.replace(QUOTES, ""))
    } else {
        Cow::Borrowed(candidate)
    };

    let trimmed = trim_shell(&unquoted);

    html_escape::decode_html_entities(trimmed).into_owned()
}

/// Trims enclosing punctuation without touching interior bytes.
///
/// Unlike [`normalize`], quotes are only removed from the edges and entities
/// are left escaped. The result is always a substring of `candidate`, which
/// makes it the text to search for when substituting in the source.
pub fn trim_enclosing(candidate: &str) -> &str {
    let mut current = candidate;
    loop {
        let next = trim_shell_once(current.trim_matches(QUOTES));
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

fn trim_shell(candidate: &str) -> &str {
    let mut current = candidate;
    loop {
        let next = trim_shell_once(current);
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

fn trim_shell_once(s: &str) -> &str {
    let s = trim_angle_brackets(s);
    let s = trim_parentheses(s);
    s.trim_matches('.')
}

fn trim_angle_brackets(s: &str) -> &str {
    let s = s.strip_prefix('<').unwrap_or(s);
    s.strip_suffix('>').unwrap_or(s)
}

// Parentheses are legal inside URL paths (`/wiki/Rust_(language)`), so a
// trailing `)` is only dropped when it has no opening partner.
fn trim_parentheses(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('(') && s.ends_with(')') {
        return &s[1..s.len() - 1];
    }

    let opening = s.matches('(').count();
    let closing = s.matches(')').count();

    if closing > opening {
        if let Some(inner) = s.strip_suffix(')') {
            return inner;
        }
    }
    if opening > closing {
        if let Some(inner) = s.strip_prefix('(') {
            return inner;
        }
    }

    s
}
