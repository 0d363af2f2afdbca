//! Error types for the Safe Links library.
//!
//! Errors fall into three groups: "nothing found" outcomes that callers
//! usually treat as "pass the input through unchanged", per-candidate
//! validation failures, and I/O failures reading input.

use std::io;
use thiserror::Error;

/// Result type alias for Safe Links operations.
pub type SafeLinksResult<T> = Result<T, SafeLinksError>;

/// Error type for all extraction, classification and transform operations.
#[derive(Debug, Error)]
pub enum SafeLinksError {
    /// No scheme-prefixed substring (or no valid URL) was found in the input.
    #[error("no URLs found in input")]
    NoUrlsFound,

    /// URLs were found, but none of them are Safe Links.
    #[error("no Safe Links URLs found in input")]
    NoSafeLinkUrlsFound,

    /// URLs were found, but all of them are already Safe Links.
    #[error("no non-Safe Links URLs found in input")]
    NoPlainUrlsFound,

    /// A candidate failed to parse or lacks a scheme or host.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A candidate is missing a query parameter it needs.
    #[error("URL '{url}' is missing required parameter '{parameter}'")]
    ParameterMissing { url: String, parameter: String },

    /// Eligible URLs were found but none were encoded.
    #[error("encoding produced no changes to input")]
    EncodingNoOp,

    /// Eligible URLs were found but none were query escaped.
    #[error("query escaping produced no changes to input")]
    EscapingNoOp,

    /// An input source held nothing but blank lines.
    #[error("no input found in {source_name}")]
    NoInput { source_name: String },

    /// Reading from an input source failed.
    #[error("IO error reading {source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: io::Error,
    },
}

impl SafeLinksError {
    /// Returns true for outcomes that mean "nothing to do" rather than a
    /// failure. Interactive callers echo their input unchanged for these.
    pub fn is_nothing_found(&self) -> bool {
        matches!(
            self,
            Self::NoUrlsFound | Self::NoSafeLinkUrlsFound | Self::NoPlainUrlsFound
        )
    }

    /// Returns true when eligible URLs existed but none were rewritten.
    pub fn is_no_op(&self) -> bool {
        matches!(self, Self::EncodingNoOp | Self::EscapingNoOp)
    }
}

impl From<io::Error> for SafeLinksError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            source_name: "input".to_string(),
            source: err,
        }
    }
}
