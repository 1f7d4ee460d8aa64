//! # Impact Targeting
//!
//! Maps an alert's source scope to the customer locations it affects.
//! Federal code and industry standards apply everywhere; state rules stop
//! at the state line; a county ordinance stops at the county line.

use serde::{Deserialize, Serialize};

use placard_core::LocationId;

/// The regulatory scope a change applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum SourceScope {
    /// Federal regulation (FDA Food Code). Affects every location.
    Federal,
    /// Industry standard (NFPA). Adopted broadly; affects every location.
    Industry,
    /// State regulation (CalCode, Cal/OSHA). Affects locations in the
    /// named state.
    State(String),
    /// County ordinance. Affects locations in the named county.
    County(String),
}

/// The slice of a customer location the targeting logic needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationProfile {
    /// Location identifier.
    pub id: LocationId,
    /// Display name.
    pub name: String,
    /// Two-letter state code.
    pub state: String,
    /// Normalized county name.
    pub county: String,
}

/// Return the locations a scope affects.
pub fn affected_locations<'a>(
    scope: &SourceScope,
    locations: &'a [LocationProfile],
) -> Vec<&'a LocationProfile> {
    locations
        .iter()
        .filter(|location| match scope {
            SourceScope::Federal | SourceScope::Industry => true,
            SourceScope::State(state) => location.state.eq_ignore_ascii_case(state),
            SourceScope::County(county) => location.county.eq_ignore_ascii_case(county),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet() -> Vec<LocationProfile> {
        vec![
            LocationProfile {
                id: LocationId::new(),
                name: "Downtown Kitchen".to_string(),
                state: "CA".to_string(),
                county: "Fresno".to_string(),
            },
            LocationProfile {
                id: LocationId::new(),
                name: "Airport Cafe".to_string(),
                state: "CA".to_string(),
                county: "Merced".to_string(),
            },
            LocationProfile {
                id: LocationId::new(),
                name: "Reno Commissary".to_string(),
                state: "NV".to_string(),
                county: "Washoe".to_string(),
            },
        ]
    }

    #[test]
    fn federal_scope_hits_every_location() {
        let locations = fleet();
        assert_eq!(
            affected_locations(&SourceScope::Federal, &locations).len(),
            3
        );
        assert_eq!(
            affected_locations(&SourceScope::Industry, &locations).len(),
            3
        );
    }

    #[test]
    fn state_scope_stops_at_the_state_line() {
        let locations = fleet();
        let affected = affected_locations(&SourceScope::State("CA".to_string()), &locations);
        assert_eq!(affected.len(), 2);
        assert!(affected.iter().all(|l| l.state == "CA"));
    }

    #[test]
    fn county_scope_stops_at_the_county_line() {
        let locations = fleet();
        let affected = affected_locations(&SourceScope::County("Fresno".to_string()), &locations);
        assert_eq!(affected.len(), 1);
        assert_eq!(affected[0].name, "Downtown Kitchen");
    }

    #[test]
    fn county_matching_ignores_case() {
        let locations = fleet();
        let affected = affected_locations(&SourceScope::County("fresno".to_string()), &locations);
        assert_eq!(affected.len(), 1);
    }

    #[test]
    fn scope_serde_is_tagged() {
        let json = serde_json::to_string(&SourceScope::County("Fresno".to_string())).unwrap();
        assert!(json.contains("\"kind\":\"county\""));
        let back: SourceScope = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SourceScope::County("Fresno".to_string()));
    }
}
