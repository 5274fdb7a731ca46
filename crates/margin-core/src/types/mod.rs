//! # Kernel Value Types
//!
//! Transient inputs to the risk and conversion calculations.

pub mod curve;
pub mod fee_tier;

pub use curve::*;
pub use fee_tier::*;
