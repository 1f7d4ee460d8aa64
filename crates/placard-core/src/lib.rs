#![deny(missing_docs)]

//! # placard-core — Foundational Types for the Placard Compliance Engine
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `thiserror`,
//! and `uuid` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type. You cannot pass a [`LocationId`] where a
//!    [`JurisdictionId`] is expected.
//!
//! 2. **Single [`GradingSchema`] enum.** One closed definition of every
//!    grading system a health authority can use, exhaustive `match`
//!    everywhere. Adding a variant is a compile error at every site that
//!    interprets grades. An unknown schema tag fails at deserialization,
//!    never at read time.
//!
//! 3. **Validate at load, trust at read.** [`Jurisdiction::validate`] runs
//!    once when a record enters the system; classification and scoring
//!    never re-check configuration invariants.
//!
//! 4. **Structured errors with `thiserror`.** No `Box<dyn Error>`, no
//!    `.unwrap()` outside tests.

pub mod address;
pub mod error;
pub mod grading;
pub mod identity;
pub mod jurisdiction;
pub mod status;
pub mod weights;

// Re-export primary types at crate root for ergonomic imports.
pub use address::{Address, JurisdictionType, Layer};
pub use error::{ConfigError, ValidationError};
pub use grading::{GradeBracket, GradingSchema, PlacardColor, Tier};
pub use identity::{JurisdictionId, LocationId};
pub use jurisdiction::Jurisdiction;
pub use status::NormalizedStatus;
pub use weights::PillarWeights;
