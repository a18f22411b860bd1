//! Domain types shared across Wayfinder crates.
//!
//! This crate contains only pure types with no framework dependencies.

pub mod email;
pub mod location;
pub mod user;
