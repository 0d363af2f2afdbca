//! Decode, encode and query escape operations over free-form text.
//!
//! Every operation follows the same pipeline: extract candidates, classify
//! them, keep the ones the operation applies to, then substitute each in the
//! source text. Substitution replaces the first remaining occurrence of a
//! candidate only, so a URL repeated verbatim is handled by its own match.

pub mod random;
pub mod synthesize;

pub use random::{FallbackRandom, RandomSource, SeededRandom, SystemRandom};
pub use synthesize::{faux_safe_link, query_escape, SAFE_LINKS_SUBDOMAINS};

use crate::domain::{
    classify, extract_patterns, original_url, wrapped_link, ExtractionStrategy, ParsedUrl,
    RegexExtractor, WrappedLink,
};
use crate::error::{SafeLinksError, SafeLinksResult};

/// Default log target for engine diagnostics.
pub const DEFAULT_LOG_TARGET: &str = "safelinks";

/// Which eligible URLs an encode or escape operation rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Rewrite every eligible URL.
    #[default]
    All,

    /// Flip a fair coin for each eligible URL.
    Random,
}

impl SelectionMode {
    /// Maps a "randomly" flag to a mode.
    pub fn from_random_flag(randomly: bool) -> Self {
        if randomly {
            Self::Random
        } else {
            Self::All
        }
    }

    fn selects(self, rng: &mut dyn RandomSource) -> bool {
        match self {
            Self::All => true,
            Self::Random => rng.coin_flip(),
        }
    }
}

/// Transform service coordinating extraction and substitution.
///
/// The service holds no mutable state; each call works on its own copy of
/// the input and may be made concurrently from several threads.
pub struct LinkTransformer {
    strategy: Box<dyn ExtractionStrategy>,
    log_target: String,
}

impl LinkTransformer {
    /// Creates a transformer using the given extraction strategy.
    pub fn new(strategy: Box<dyn ExtractionStrategy>) -> Self {
        Self {
            strategy,
            log_target: DEFAULT_LOG_TARGET.to_string(),
        }
    }

    /// Creates a transformer using regex extraction.
    pub fn with_regex_strategy() -> Self {
        Self::new(Box::new(RegexExtractor::new()))
    }

    /// Routes diagnostics to `target` instead of [`DEFAULT_LOG_TARGET`].
    pub fn with_log_target(mut self, target: impl Into<String>) -> Self {
        self.log_target = target.into();
        self
    }

    /// Returns the name of the extraction strategy in use.
    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Returns every valid URL found in `text`, in order of appearance.
    ///
    /// Fails with [`SafeLinksError::NoUrlsFound`] when no candidate survives
    /// validation.
    pub fn urls(&self, text: &str, include_plain_http: bool) -> SafeLinksResult<Vec<ParsedUrl>> {
        let urls = self.candidates(text, include_plain_http)?;
        if urls.is_empty() {
            return Err(SafeLinksError::NoUrlsFound);
        }
        Ok(urls)
    }

    /// Returns a record for every Safe Links URL in `text`. Duplicates are
    /// kept.
    pub fn safe_links(&self, text: &str) -> SafeLinksResult<Vec<WrappedLink>> {
        let links = self
            .candidates(text, false)?
            .iter()
            .filter(|parsed| parsed.is_safe_link())
            .map(wrapped_link)
            .collect::<SafeLinksResult<Vec<_>>>()?;

        if links.is_empty() {
            return Err(SafeLinksError::NoSafeLinkUrlsFound);
        }
        Ok(links)
    }

    /// Replaces every Safe Links URL in `text` with its destination.
    ///
    /// Fails with [`SafeLinksError::NoUrlsFound`] when nothing URL-like is
    /// present and [`SafeLinksError::NoSafeLinkUrlsFound`] when none of the
    /// URLs found are Safe Links.
    pub fn decode(&self, text: &str) -> SafeLinksResult<String> {
        let safe_links: Vec<ParsedUrl> = self
            .candidates(text, false)?
            .into_iter()
            .filter(ParsedUrl::is_safe_link)
            .collect();

        log::debug!(
            target: self.log_target.as_str(),
            "{} Safe Links URL(s) to decode",
            safe_links.len()
        );

        if safe_links.is_empty() {
            return Err(SafeLinksError::NoSafeLinkUrlsFound);
        }

        let mut output = text.to_string();
        for parsed in &safe_links {
            let decoded = original_url(&parsed.url)?;
            self.substitute(&mut output, parsed, &decoded);
        }

        Ok(output)
    }

    /// Wraps plain URLs in `text` in faux Safe Links URLs.
    pub fn encode(&self, text: &str, mode: SelectionMode) -> SafeLinksResult<String> {
        self.encode_with(text, mode, &mut SystemRandom::new())
    }

    /// Like [`encode`](Self::encode), drawing randomness from `rng`.
    pub fn encode_with(
        &self,
        text: &str,
        mode: SelectionMode,
        rng: &mut dyn RandomSource,
    ) -> SafeLinksResult<String> {
        self.rewrite_plain_urls(text, mode, rng, SafeLinksError::EncodingNoOp, |parsed, rng| {
            faux_safe_link(&parsed.trimmed, rng)
        })
    }

    /// Replaces plain URLs in `text` with their query escaped form.
    pub fn query_escape(&self, text: &str, mode: SelectionMode) -> SafeLinksResult<String> {
        self.query_escape_with(text, mode, &mut SystemRandom::new())
    }

    /// Like [`query_escape`](Self::query_escape), drawing randomness from
    /// `rng`.
    pub fn query_escape_with(
        &self,
        text: &str,
        mode: SelectionMode,
        rng: &mut dyn RandomSource,
    ) -> SafeLinksResult<String> {
        self.rewrite_plain_urls(text, mode, rng, SafeLinksError::EscapingNoOp, |parsed, _| {
            query_escape(&parsed.trimmed)
        })
    }

    fn candidates(&self, text: &str, include_plain_http: bool) -> SafeLinksResult<Vec<ParsedUrl>> {
        let matches = extract_patterns(self.strategy.as_ref(), text, include_plain_http)?;
        log::trace!(
            target: self.log_target.as_str(),
            "{} strategy found {} URL pattern(s)",
            self.strategy.name(),
            matches.len()
        );

        let parsed = matches
            .iter()
            .filter_map(|m| match classify(m.text) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    log::debug!(target: self.log_target.as_str(), "skipping candidate: {}", err);
                    None
                }
            })
            .collect::<Vec<_>>();

        log::trace!(
            target: self.log_target.as_str(),
            "{} of {} candidate(s) are valid URLs",
            parsed.len(),
            matches.len()
        );

        Ok(parsed)
    }

    // Substitutions are counted rather than inferred by comparing the output
    // to the input, since a rewrite can legitimately yield identical text.
    fn rewrite_plain_urls<F>(
        &self,
        text: &str,
        mode: SelectionMode,
        rng: &mut dyn RandomSource,
        no_op: SafeLinksError,
        mut payload: F,
    ) -> SafeLinksResult<String>
    where
        F: FnMut(&ParsedUrl, &mut dyn RandomSource) -> String,
    {
        let plain: Vec<ParsedUrl> = match self.candidates(text, true) {
            Ok(candidates) => candidates
                .into_iter()
                .filter(|parsed| !parsed.is_safe_link())
                .collect(),
            Err(SafeLinksError::NoUrlsFound) => Vec::new(),
            Err(err) => return Err(err),
        };

        if plain.is_empty() {
            return Err(SafeLinksError::NoPlainUrlsFound);
        }

        let mut output = text.to_string();
        let mut substitutions = 0;
        let fallback_before = rng.fallback_draws();

        for parsed in &plain {
            if !mode.selects(rng) {
                log::trace!(target: self.log_target.as_str(), "not selected: {}", parsed.trimmed);
                continue;
            }

            let replacement = payload(parsed, &mut *rng);
            if self.substitute(&mut output, parsed, &replacement) {
                substitutions += 1;
            }
        }

        let fallback_draws = rng.fallback_draws().saturating_sub(fallback_before);
        if fallback_draws > 0 {
            log::debug!(
                target: self.log_target.as_str(),
                "primary random source failed, {} draw(s) served by fallback",
                fallback_draws
            );
        }

        log::debug!(
            target: self.log_target.as_str(),
            "{} of {} plain URL(s) rewritten",
            substitutions,
            plain.len()
        );

        if substitutions == 0 {
            return Err(no_op);
        }

        Ok(output)
    }

    fn substitute(&self, output: &mut String, parsed: &ParsedUrl, replacement: &str) -> bool {
        let target = parsed.replace_target();
        let replaced = replace_first(output, target, replacement);
        if !replaced {
            log::warn!(
                target: self.log_target.as_str(),
                "could not locate {} in input for substitution",
                target
            );
        }
        replaced
    }
}

impl Default for LinkTransformer {
    fn default() -> Self {
        Self::with_regex_strategy()
    }
}

/// Replaces the first occurrence of `needle` in `haystack`.
///
/// Returns false, leaving `haystack` untouched, when `needle` is empty or
/// absent.
pub fn replace_first(haystack: &mut String, needle: &str, replacement: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    match haystack.find(needle) {
        Some(pos) => {
            haystack.replace_range(pos..pos + needle.len(), replacement);
            true
        }
        None => false,
    }
}
