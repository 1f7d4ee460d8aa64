//! # Restrictiveness Policy
//!
//! Which authority "drives the grade" when a facility answers to several is
//! a product decision, not matching logic, so it is injected rather than
//! baked into the resolver. The default marks the food-safety layer: the
//! health department's placard is what the public sees on the door.

use std::fmt;

use placard_core::Layer;

use crate::resolver::JurisdictionMatch;

/// Picks at most one match per resolution as most restrictive.
pub trait RestrictivenessPolicy: Send + Sync + fmt::Debug {
    /// Return the index of the most-restrictive match, or `None` when no
    /// match should carry the flag.
    fn pick(&self, matches: &[JurisdictionMatch]) -> Option<usize>;
}

/// Default policy: the food-primary match is always most restrictive when
/// present.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoodPrimaryPolicy;

impl RestrictivenessPolicy for FoodPrimaryPolicy {
    fn pick(&self, matches: &[JurisdictionMatch]) -> Option<usize> {
        matches.iter().position(|m| m.layer == Layer::FoodPrimary)
    }
}
