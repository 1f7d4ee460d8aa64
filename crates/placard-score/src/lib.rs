#![deny(missing_docs)]

//! # placard-score — Grade Interpretation & Composite Scoring
//!
//! Two halves:
//!
//! - [`classify`] turns a raw inspection value (a number or a posted label)
//!   plus the jurisdiction's [`GradingSchema`](placard_core::GradingSchema)
//!   into a [`Classification`]. The function is **total**: every input
//!   yields a status, and the match over the schema union is exhaustive, so
//!   a new grading system cannot ship without an interpretation.
//!
//! - [`score`] blends the three compliance pillars into a 0–100 composite
//!   using the jurisdiction's weight profile, then grades the composite
//!   through the food-safety jurisdiction's own numeric schema when it has
//!   one, or the built-in default scale when it does not.

pub mod classify;
pub mod composite;

pub use classify::{classify, Classification, RawGrade};
pub use composite::{
    classify_composite, score, ComplianceInputs, CompositeScore, PillarContribution,
};
