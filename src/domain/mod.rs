//! Extraction, clean-up and classification of URLs found in text.
//!
//! Data flows one way: [`extract`] finds raw candidates, [`normalize`]
//! strips surrounding punctuation and escaping, and [`classify`] validates
//! the result and recognizes Safe Links URLs.

pub mod classify;
pub mod extract;
pub mod normalize;

pub use classify::{
    classify, expanded_values, is_safe_link, original_url, wrapped_link, ParsedUrl, WrappedLink,
};
pub use extract::{
    extract_patterns, ExtractionStrategy, FieldSplitExtractor, IndexScanExtractor, RawMatch,
    RegexExtractor,
};
pub use normalize::{normalize, trim_enclosing};

/// Required prefix for all Safe Links URLs.
pub const HTTPS_PREFIX: &str = "https://";

/// Additional prefix accepted when plain URLs are wanted.
pub const HTTP_PREFIX: &str = "http://";

/// Host suffix used by the Safe Links service.
pub const SAFE_LINKS_BASE_DOMAIN: &str = "safelinks.protection.outlook.com";

/// Query parameter carrying the wrapped destination URL.
pub const SAFE_LINKS_URL_PARAM: &str = "url";
