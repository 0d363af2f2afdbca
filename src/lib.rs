//! Find, decode and synthesize Safe Links URLs in free-form text.
//!
//! Microsoft Safe Links rewrites every URL in a message into a redirect
//! through `*.safelinks.protection.outlook.com`, carrying the original
//! destination percent-encoded in a `url` query parameter. This library
//! recognizes those URLs in arbitrary text (e-mail bodies, lists, prose)
//! and rewrites them in place.
//!
//! # Features
//!
//! - **Decode**: replace each Safe Links URL with its original destination
//! - **Encode**: wrap plain URLs in realistic faux Safe Links URLs, for
//!   building test fixtures
//! - **Query escape**: replace plain URLs with their percent-encoded form
//! - **Extraction**: list the valid URLs or Safe Links found in text
//!
//! URLs are only recognized and rewritten as text; nothing is fetched.
//!
//! # Architecture
//!
//! - [`domain`]: extraction strategies, candidate clean-up, classification
//! - [`transform`]: the [`LinkTransformer`] service, faux URL synthesis and
//!   randomness
//! - [`input`]: line-oriented reading for files and standard input
//! - [`error`]: error taxonomy
//!
//! # Quick Start
//!
//! ```
//! use safelinks::LinkTransformer;
//!
//! let transformer = LinkTransformer::default();
//! let text = "Click here: https://nam01.safelinks.protection.outlook.com/\
//!     ?url=https%3A%2F%2Fexample.com%2Fpage&data=x&sdata=y&reserved=0 today";
//!
//! assert_eq!(
//!     transformer.decode(text).unwrap(),
//!     "Click here: https://example.com/page today"
//! );
//! ```
//!
//! ## Encoding
//!
//! ```
//! use safelinks::{LinkTransformer, SeededRandom, SelectionMode};
//!
//! let transformer = LinkTransformer::default();
//! let mut rng = SeededRandom::seeded(1);
//! let encoded = transformer
//!     .encode_with("Visit https://example.com", SelectionMode::All, &mut rng)
//!     .unwrap();
//!
//! assert!(encoded.contains(".safelinks.protection.outlook.com/?url="));
//! assert_eq!(transformer.decode(&encoded).unwrap(), "Visit https://example.com");
//! ```

pub mod domain;
pub mod error;
pub mod input;
pub mod transform;

pub use domain::{
    classify, normalize, ExtractionStrategy, FieldSplitExtractor, IndexScanExtractor, ParsedUrl,
    RawMatch, RegexExtractor, WrappedLink, SAFE_LINKS_BASE_DOMAIN,
};
pub use error::{SafeLinksError, SafeLinksResult};
pub use transform::{
    LinkTransformer, RandomSource, SeededRandom, SelectionMode, SystemRandom,
};
