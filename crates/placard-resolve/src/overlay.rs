//! # Federal Overlay Rules
//!
//! Federal facilities (national parks, military bases) answer to a federal
//! authority stacked on top of the local layers. Overlay matching is pure
//! in-memory rule evaluation: a rule fires when the address falls inside
//! the rule's area (zip or county) AND its street/city text contains one of
//! the rule's keywords. The area check alone is deliberately insufficient —
//! a taqueria in Mariposa County is not a park concession.

use placard_core::Jurisdiction;

use crate::normalize::NormalizedAddress;

/// One federal overlay rule.
#[derive(Debug, Clone)]
pub struct OverlayRule {
    /// Zip codes inside the federal area.
    pub zips: Vec<String>,
    /// Counties (normalized, no suffix) the area spans.
    pub counties: Vec<String>,
    /// Lowercase keywords that identify a federal facility address.
    pub keywords: Vec<String>,
    /// The federal jurisdiction to attach when the rule fires.
    pub jurisdiction: Jurisdiction,
}

impl OverlayRule {
    fn applies(&self, address: &NormalizedAddress) -> bool {
        let in_area = self.zips.iter().any(|z| z == &address.zip)
            || self
                .counties
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&address.county));
        if !in_area {
            return false;
        }
        self.keywords
            .iter()
            .any(|kw| address.haystack.contains(kw.to_lowercase().as_str()))
    }
}

/// The set of configured overlay rules. At most one rule fires per
/// resolution; rules are checked in registration order.
#[derive(Debug, Clone, Default)]
pub struct OverlayRegistry {
    rules: Vec<OverlayRule>,
}

impl OverlayRegistry {
    /// A registry with no rules. Overlay matching becomes a no-op.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a registry from configured rules.
    pub fn new(rules: Vec<OverlayRule>) -> Self {
        Self { rules }
    }

    /// Return the jurisdiction of the first rule that applies, if any.
    pub fn check(&self, address: &NormalizedAddress) -> Option<&Jurisdiction> {
        self.rules
            .iter()
            .find(|rule| rule.applies(address))
            .map(|rule| &rule.jurisdiction)
    }
}
