//! # Address Model and Jurisdiction Layers
//!
//! A facility address as this engine consumes it: already geocoded into
//! discrete components. The engine never parses free-text addresses — that
//! happens upstream, before resolution.

use serde::{Deserialize, Serialize};

/// A geocoded facility address.
///
/// All components arrive pre-split. `county` is the raw county name as
/// geocoded and may carry a trailing "County" suffix; normalization is the
/// resolver's job, not the caller's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street line, used only for overlay keyword matching.
    pub street: String,
    /// City name.
    pub city: String,
    /// County name, possibly suffixed ("Los Angeles County").
    pub county: String,
    /// State name or two-letter code.
    pub state: String,
    /// Postal code.
    pub zip: String,
}

/// The three independent layers a jurisdiction match can occupy.
///
/// A facility commonly answers to authorities on more than one layer at
/// once: a county health department for food safety, a city fire marshal
/// for facility safety, and occasionally a federal authority stacked on
/// top. Layers never merge; a resolution carries at most one match per
/// layer plus any federal overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Primary food-safety authority (health department).
    FoodPrimary,
    /// Primary facility-safety authority (fire marshal).
    FirePrimary,
    /// Federal authority stacked on top of local layers.
    FederalOverlay,
}

impl Layer {
    /// Stable string form, matching the wire and database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::FoodPrimary => "food_primary",
            Layer::FirePrimary => "fire_primary",
            Layer::FederalOverlay => "federal_overlay",
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a jurisdiction record has authority over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JurisdictionType {
    /// Food-safety authority only.
    FoodSafety,
    /// Facility-safety (fire) authority only.
    FacilitySafety,
    /// Both food and facility safety under one roof.
    Both,
}

impl JurisdictionType {
    /// Whether this authority can serve the food-safety layer.
    pub fn covers_food(&self) -> bool {
        matches!(self, JurisdictionType::FoodSafety | JurisdictionType::Both)
    }

    /// Whether this authority can serve the facility-safety layer.
    pub fn covers_facility(&self) -> bool {
        matches!(
            self,
            JurisdictionType::FacilitySafety | JurisdictionType::Both
        )
    }
}
