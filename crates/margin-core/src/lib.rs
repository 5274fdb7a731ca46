//! # Margin Core - Shared Risk Math
//!
//! Fixed-point math kernel shared between valuation services and clients of the
//! margin protocol. Every quantity is a scaled integer (`value / 10^decimals`)
//! so results match the contract's integer arithmetic exactly. It provides:
//!
//! - Scaled-integer primitives (rounding mul/div, fixed-point power and logarithm)
//! - Two's-complement decoding of chain integers
//! - Sqrt-price decoding and tick/price conversion for concentrated liquidity
//! - Leverage, withdrawal, interest and weighting calculations
//!
//! ## Feature Flags
//!
//! - `client`: Enables serde serialization of the public value types

pub mod config;
pub mod constants;
pub mod errors;
pub mod math;
pub mod risk;
pub mod types;

// Re-export commonly used items
pub use config::PrecisionConfig;
pub use errors::{CoreResult, MarginCoreError};
pub use math::Rounding;
pub use types::*;
