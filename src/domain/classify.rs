//! URL validation and Safe Links detection.

use super::normalize::{normalize, trim_enclosing};
use super::{SAFE_LINKS_BASE_DOMAIN, SAFE_LINKS_URL_PARAM};
use crate::error::{SafeLinksError, SafeLinksResult};
use std::collections::BTreeMap;
use url::Url;

/// A candidate that survived normalization and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    /// Raw matched text, as found in the input.
    pub original: String,
    /// Normalized text that was parsed.
    pub trimmed: String,
    /// Structured form of `trimmed`.
    pub url: Url,
}

impl ParsedUrl {
    /// Text to search for when substituting this URL in its source.
    ///
    /// This is `original` with enclosing punctuation removed. Interior bytes,
    /// including HTML entities, are untouched so it is found verbatim.
    pub fn replace_target(&self) -> &str {
        trim_enclosing(&self.original)
    }

    /// Returns true if this URL is a Safe Links URL.
    pub fn is_safe_link(&self) -> bool {
        is_safe_link(&self.url)
    }
}

/// A confirmed Safe Links URL and the destination recovered from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedLink {
    /// Raw matched text of the Safe Links URL.
    pub encoded_url: String,
    /// Cleaned destination URL.
    pub decoded_url: String,
}

/// Normalizes and validates a raw candidate.
///
/// Fails with [`SafeLinksError::InvalidUrl`] when the candidate does not
/// parse or lacks a scheme or host.
pub fn classify(raw: &str) -> SafeLinksResult<ParsedUrl> {
    let trimmed = normalize(raw);

    let url = Url::parse(&trimmed).map_err(|e| SafeLinksError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme().is_empty() {
        return Err(SafeLinksError::InvalidUrl {
            url: raw.to_string(),
            reason: "missing scheme".to_string(),
        });
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(SafeLinksError::InvalidUrl {
            url: raw.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(ParsedUrl {
        original: raw.to_string(),
        trimmed,
        url,
    })
}

/// Returns true if `url` is hosted by the Safe Links service and carries a
/// non-empty `url` query parameter. A matching host alone is not enough.
pub fn is_safe_link(url: &Url) -> bool {
    let host_matches = url
        .host_str()
        .is_some_and(|host| host.to_ascii_lowercase().contains(SAFE_LINKS_BASE_DOMAIN));

    host_matches && url_parameter(url).is_some()
}

/// Recovers the destination URL wrapped by a Safe Links URL.
///
/// The parameter value is normalized again since the wrapped destination
/// can carry its own enclosing punctuation.
pub fn original_url(url: &Url) -> SafeLinksResult<String> {
    url_parameter(url)
        .map(|value| normalize(&value))
        .ok_or_else(|| SafeLinksError::ParameterMissing {
            url: url.to_string(),
            parameter: SAFE_LINKS_URL_PARAM.to_string(),
        })
}

/// Builds the wrapped link record for a parsed Safe Links URL.
pub fn wrapped_link(parsed: &ParsedUrl) -> SafeLinksResult<WrappedLink> {
    Ok(WrappedLink {
        encoded_url: parsed.original.clone(),
        decoded_url: original_url(&parsed.url)?,
    })
}

/// Returns every query parameter of a Safe Links URL plus its `host`,
/// ordered by key. Only the first value of a repeated key is kept.
pub fn expanded_values(url: &Url) -> SafeLinksResult<BTreeMap<String, String>> {
    if !is_safe_link(url) {
        return Err(SafeLinksError::ParameterMissing {
            url: url.to_string(),
            parameter: SAFE_LINKS_URL_PARAM.to_string(),
        });
    }

    let mut values = BTreeMap::new();
    for (key, value) in url.query_pairs() {
        values
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    values.insert("host".to_string(), url.host_str().unwrap_or_default().to_string());

    Ok(values)
}

fn url_parameter(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == SAFE_LINKS_URL_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WRAPPED: &str = "https://nam01.safelinks.protection.outlook.com/?url=https%3A%2F%2Fexample.com%2Fpage&data=x&sdata=y&reserved=0";

    #[test]
    fn test_classify_valid_url() {
        let parsed = classify("<https://example.com/a>").unwrap();
        assert_eq!(parsed.trimmed, "https://example.com/a");
        assert_eq!(parsed.url.host_str(), Some("example.com"));
        assert!(!parsed.is_safe_link());
    }

    #[test]
    fn test_classify_rejects_missing_host() {
        assert!(matches!(
            classify("https://"),
            Err(SafeLinksError::InvalidUrl { .. })
        ));
        assert!(matches!(
            classify("not a url"),
            Err(SafeLinksError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_safe_link_detection() {
        let parsed = classify(WRAPPED).unwrap();
        assert!(parsed.is_safe_link());
        assert_eq!(original_url(&parsed.url).unwrap(), "https://example.com/page");
    }

    #[test]
    fn test_host_match_without_url_parameter_is_not_safe_link() {
        let parsed =
            classify("https://nam01.safelinks.protection.outlook.com/?data=x&reserved=0").unwrap();
        assert!(!parsed.is_safe_link());
        assert!(matches!(
            original_url(&parsed.url),
            Err(SafeLinksError::ParameterMissing { .. })
        ));
    }

    #[test]
    fn test_empty_url_parameter_is_not_safe_link() {
        let parsed = classify("https://nam01.safelinks.protection.outlook.com/?url=&data=x").unwrap();
        assert!(!parsed.is_safe_link());
    }

    #[test]
    fn test_url_parameter_on_other_host_is_not_safe_link() {
        let parsed = classify("https://example.com/?url=https%3A%2F%2Fother.example").unwrap();
        assert!(!parsed.is_safe_link());
    }

    #[test]
    fn test_wrapped_link_keeps_original_text() {
        let raw = format!("<{}>", WRAPPED);
        let link = wrapped_link(&classify(&raw).unwrap()).unwrap();
        assert_eq!(link.encoded_url, raw);
        assert_eq!(link.decoded_url, "https://example.com/page");
    }

    #[test]
    fn test_expanded_values_include_host() {
        let parsed = classify(WRAPPED).unwrap();
        let values = expanded_values(&parsed.url).unwrap();
        let keys: Vec<&str> = values.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["data", "host", "reserved", "sdata", "url"]);
        assert_eq!(values["host"], "nam01.safelinks.protection.outlook.com");
    }
}
