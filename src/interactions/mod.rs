//! Residue-level interaction classification.
//!
//! Each chemistry lives in its own module; [`classify`] applies them in a fixed
//! priority order.
pub mod aromatic;
pub mod complex;
pub mod hydrophobic;
pub mod ionic;
pub mod structs;

// Re-exports
pub use complex::{classify, classify_codes, INTERACTION_CUTOFF};
pub use structs::*;
