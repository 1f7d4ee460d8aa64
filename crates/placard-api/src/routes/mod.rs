//! # API Route Modules
//!
//! - `resolution` — jurisdiction resolution for a street address, with
//!   background persistence of the resolved links.
//! - `admin` — the regulatory change review console: a single dispatch
//!   endpoint covering stats, list, publish, reject, unpublish, edit,
//!   and create.

pub mod admin;
pub mod resolution;
