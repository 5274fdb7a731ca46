//! # Mathematical Functions
//!
//! Scaled-integer primitives and the chain-value decoders built on them.

pub mod big_int;
pub mod conversion;
pub mod fixed_point;
pub mod sqrt_price;
pub mod tick_math;
pub mod twos_complement;

// Re-export commonly used functions
pub use big_int::*;
pub use conversion::*;
pub use fixed_point::*;
pub use sqrt_price::*;
pub use tick_math::*;
pub use twos_complement::*;
