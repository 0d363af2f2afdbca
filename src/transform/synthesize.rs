//! Faux Safe Links URL synthesis.
//!
//! Produces URLs shaped like real Safe Links output for use as test
//! fixtures. The `data` and `sdata` values are fixed placeholders; nothing
//! here is derived from the real service.

use super::random::RandomSource;
use crate::domain::{SAFE_LINKS_BASE_DOMAIN, SAFE_LINKS_URL_PARAM};

/// Subdomain labels observed on real Safe Links URLs.
pub const SAFE_LINKS_SUBDOMAINS: &[&str] = &[
    "nam01", "nam02", "nam03", "nam04", "nam05", "nam06", "nam07", "nam08", "nam09", "nam10",
    "nam11", "nam12", "eur01", "eur02", "eur03", "eur04", "eur05", "eur06", "gbr01", "aus01",
    "apc01", "can01", "jpn01", "ind01",
];

/// Placeholder for the `data` query parameter.
pub const FAUX_DATA_PLACEHOLDER: &str = "05%7C02%7Cuser%40example.com%7C00000000000000000000000000000000%7C0%7C0%7C000000000000000000%7CUnknown";

/// Placeholder for the `sdata` query parameter.
pub const FAUX_SDATA_PLACEHOLDER: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA%3D";

/// Picks a subdomain uniformly from [`SAFE_LINKS_SUBDOMAINS`].
pub fn random_subdomain(rng: &mut dyn RandomSource) -> &'static str {
    SAFE_LINKS_SUBDOMAINS[rng.index(SAFE_LINKS_SUBDOMAINS.len())]
}

/// Query escapes `url` for use as a query string value.
pub fn query_escape(url: &str) -> String {
    urlencoding::encode(url).into_owned()
}

/// Wraps `url` in a faux Safe Links URL.
pub fn faux_safe_link(url: &str, rng: &mut dyn RandomSource) -> String {
    format!(
        "https://{}.{}/?{}={}&data={}&sdata={}&reserved=0",
        random_subdomain(rng),
        SAFE_LINKS_BASE_DOMAIN,
        SAFE_LINKS_URL_PARAM,
        query_escape(url),
        FAUX_DATA_PLACEHOLDER,
        FAUX_SDATA_PLACEHOLDER,
    )
}
