//! Domain types shared across all Lori services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Services map their rows onto these types in `infra/` and pass them upward.

pub mod id;
pub mod report;
