//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers. Each identifier is a distinct
//! type — you cannot pass a [`LocationId`] where a [`JurisdictionId`] is
//! expected. Both are UUID-backed and valid by construction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for a regulatory jurisdiction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JurisdictionId(Uuid);

impl JurisdictionId {
    /// Create a new random jurisdiction identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a jurisdiction identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for JurisdictionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JurisdictionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a physical facility location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(Uuid);

impl LocationId {
    /// Create a new random location identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a location identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
