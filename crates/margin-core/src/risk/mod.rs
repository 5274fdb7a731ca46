//! # Risk Calculations
//!
//! Leverage, withdrawal headroom, interest accrual and weighting over scaled
//! integers supplied by the valuation layer.

pub mod interest;
pub mod leverage;
pub mod weights;

pub use interest::*;
pub use leverage::*;
pub use weights::*;
