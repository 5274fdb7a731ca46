//! # Kernel Constants
//!
//! Fixed values shared by the conversion and risk modules:
//! - Tick base and the fee-tier table
//! - Time constants for interest accrual
//! - Working precision for power and logarithm evaluation

use crate::math::Rounding;
use crate::types::FeeTier;

// ============================================================================
// Tick Constants
// ============================================================================

/// Numerator of the per-tick price step (1.0001 = 10001 / 10000)
pub const TICK_BASE_NUMERATOR: u64 = 10_001;

/// Denominator of the per-tick price step
pub const TICK_BASE_DENOMINATOR: u64 = 10_000;

/// Decimal scale at which the tick base is exact
pub const TICK_BASE_DECIMALS: u32 = 4;

/// Binary precision of the memoized `ln(1.0001)`
pub const TICK_BASE_LOG_BITS: u64 = 512;

/// Largest tick magnitude of any fee tier
pub const MAX_TICK_MAGNITUDE: u32 = 443_636;

/// Fee tiers indexed by their on-chain tier number
pub const FEE_TIERS: [FeeTier; 6] = [
    FeeTier::new(0, 1, -443_636, 443_636),
    FeeTier::new(1, 5, -443_630, 443_630),
    FeeTier::new(2, 60, -443_580, 443_580),
    FeeTier::new(3, 200, -443_600, 443_600),
    FeeTier::new(4, 20, -443_620, 443_620),
    FeeTier::new(5, 50, -443_600, 443_600),
];

// ============================================================================
// Sqrt Price Constants
// ============================================================================

/// Fractional bits of a Q64.64 square-root price
pub const Q64_BITS: u32 = 64;

// ============================================================================
// Interest Constants
// ============================================================================

/// Seconds in a 365-day year (no leap-year adjustment)
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 3600;

/// Decimal places kept for human-facing ratios (leverage, weighted rates)
pub const DISPLAY_DECIMALS: u32 = 2;

// ============================================================================
// Precision Defaults
// ============================================================================

/// Rounding used for price outputs; matches the contract's banker's rounding
pub const DEFAULT_PRICE_ROUNDING: Rounding = Rounding::HalfEven;

/// Extra decimal digits carried through fixed-point powers
pub const DEFAULT_POW_GUARD_DIGITS: u32 = 40;

/// Extra binary digits carried through logarithms beyond the caller's scale
pub const DEFAULT_LOG_GUARD_BITS: u64 = 96;

/// Minimum accepted logarithm guard
pub const MIN_LOG_GUARD_BITS: u64 = 96;

/// Decimal places used when real-valued ratios enter integer arithmetic
pub const DEFAULT_RATIO_DECIMALS: u32 = 18;
