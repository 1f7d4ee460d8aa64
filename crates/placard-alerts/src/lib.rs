#![deny(missing_docs)]

//! # placard-alerts — Regulatory Change Alerts
//!
//! Models regulatory-change alerts surfaced to kitchen operators: a change
//! is ingested with an immutable impact level, then moves through a
//! strictly forward review lifecycle (`new → reviewed → action_taken`).
//! Who reviewed an alert and when is an audit fact: it is recorded exactly
//! once and no public operation can rewrite or erase it.
//!
//! Impact targeting maps an alert's source scope to the customer locations
//! it affects: federal and industry sources hit every location, state
//! sources hit in-state locations, county sources hit locations in the
//! named county.

pub mod alert;
pub mod impact;

pub use alert::{
    AlertError, AlertId, AlertStatus, ImpactLevel, RegulatoryAlert, ReviewRecord,
};
pub use impact::{affected_locations, LocationProfile, SourceScope};
