//! Per-request authentication: admin key, key index, bounded fallback scan.

pub mod budget;
pub mod gatekeeper;

pub use budget::ScanBudget;
pub use gatekeeper::{Gatekeeper, Principal};
