//! # Address Normalization
//!
//! Geocoders disagree about county suffixes and state spellings, so every
//! address passes through an [`AddressNormalizer`] before any catalog
//! lookup. Normalization also decides coverage: an address in a state the
//! engine does not support normalizes to `None`, and the resolver returns
//! an empty resolution without touching the catalog.

use std::fmt;

use placard_core::Address;

/// An address after normalization, ready for catalog filters and overlay
/// rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAddress {
    /// Two-letter state code.
    pub state: String,
    /// County with any trailing "County" suffix removed.
    pub county: String,
    /// Trimmed city name.
    pub city: String,
    /// Trimmed postal code.
    pub zip: String,
    /// Lowercased street + city, for overlay keyword matching.
    pub haystack: String,
}

/// Strategy seam for per-region normalization rules.
pub trait AddressNormalizer: Send + Sync + fmt::Debug {
    /// Normalize an address, or return `None` when the address is outside
    /// this normalizer's coverage. `None` means "fail closed": no catalog
    /// queries, empty resolution.
    fn normalize(&self, address: &Address) -> Option<NormalizedAddress>;
}

/// The California normalizer. Accepts `CA` or `California` in any case and
/// rejects everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaNormalizer;

impl CaNormalizer {
    fn strip_county_suffix(county: &str) -> &str {
        let trimmed = county.trim();
        // Byte-offset slicing would panic on multibyte county names, so cut
        // at a verified char boundary only.
        match trimmed.len().checked_sub(6) {
            Some(cut)
                if trimmed.is_char_boundary(cut)
                    && trimmed[cut..].eq_ignore_ascii_case("county") =>
            {
                trimmed[..cut].trim_end()
            }
            _ => trimmed,
        }
    }
}

impl AddressNormalizer for CaNormalizer {
    fn normalize(&self, address: &Address) -> Option<NormalizedAddress> {
        let state = address.state.trim();
        if !state.eq_ignore_ascii_case("CA") && !state.eq_ignore_ascii_case("California") {
            return None;
        }
        let haystack = format!("{} {}", address.street, address.city).to_lowercase();
        Some(NormalizedAddress {
            state: "CA".to_string(),
            county: Self::strip_county_suffix(&address.county).to_string(),
            city: address.city.trim().to_string(),
            zip: address.zip.trim().to_string(),
            haystack,
        })
    }
}
