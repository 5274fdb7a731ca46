//! # Tick Math
//!
//! Conversions between concentrated-liquidity ticks and decimal-scaled prices.
//!
//! price = 1.0001^tick * 10^(decimals_a - decimals_b)
//!
//! `ln(1.0001)` is computed once per process at [`TICK_BASE_LOG_BITS`] bits and
//! shared by every `price_to_tick` call.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};
use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::config::PrecisionConfig;
use crate::constants::{
    MAX_TICK_MAGNITUDE, TICK_BASE_DECIMALS, TICK_BASE_DENOMINATOR, TICK_BASE_LOG_BITS,
    TICK_BASE_NUMERATOR,
};
use crate::errors::{CoreResult, MarginCoreError};
use crate::math::big_int::{clamp, mul_div, pow10, round_to_step, Rounding};
use crate::math::fixed_point::{ln_q_positive, pow_fixed_with_guard};
use crate::types::FeeTier;

/// `ln(1.0001)` with `TICK_BASE_LOG_BITS` fractional bits
static LN_TICK_BASE: Lazy<BigInt> = Lazy::new(|| {
    let ratio = (BigInt::from(TICK_BASE_NUMERATOR) << TICK_BASE_LOG_BITS)
        / BigInt::from(TICK_BASE_DENOMINATOR);
    ln_q_positive(&ratio, TICK_BASE_LOG_BITS)
});

/// Memoized `ln(1.0001)` in binary fixed point
pub fn ln_tick_base() -> &'static BigInt {
    &LN_TICK_BASE
}

/// Tick for a price, snapped to the fee tier's spacing and clamped to its range
///
/// `price` is scaled by `10^scale`. Returns `None` for non-positive prices,
/// which have no tick.
pub fn price_to_tick(
    price: &BigInt,
    fee_tier_index: usize,
    decimals_a: u32,
    decimals_b: u32,
    scale: u32,
) -> CoreResult<Option<i32>> {
    price_to_tick_with_config(
        price,
        fee_tier_index,
        decimals_a,
        decimals_b,
        scale,
        &PrecisionConfig::default(),
    )
}

/// [`price_to_tick`] with explicit working precision
///
/// The logarithm runs at `scale` plus `config.log_guard_bits` bits, but never
/// below the [`TICK_BASE_LOG_BITS`] used for the memoized `ln(1.0001)`.
pub fn price_to_tick_with_config(
    price: &BigInt,
    fee_tier_index: usize,
    decimals_a: u32,
    decimals_b: u32,
    scale: u32,
    config: &PrecisionConfig,
) -> CoreResult<Option<i32>> {
    config.validate()?;
    let tier = FeeTier::from_index(fee_tier_index)?;

    if !price.is_positive() {
        debug!(%price, "non-positive price has no tick");
        return Ok(None);
    }

    // price * 10^(decimals_b - decimals_a) / 10^scale as one exact ratio
    let (numerator, denominator) = if decimals_b >= decimals_a {
        (price * pow10(decimals_b - decimals_a), pow10(scale))
    } else {
        (price.clone(), pow10(scale + (decimals_a - decimals_b)))
    };

    let frac_bits = TICK_BASE_LOG_BITS.max(denominator.bits() + config.log_guard_bits);
    let ratio = (numerator << frac_bits) / &denominator;
    let ln_price = ln_q_positive(&ratio, frac_bits);

    // Change of base; BigInt division truncates towards zero
    let tick_raw = (ln_price << TICK_BASE_LOG_BITS) / (ln_tick_base() << frac_bits);

    let snapped = round_to_step(&tick_raw, &BigInt::from(tier.spacing()), Rounding::HalfUp)?;
    let clamped = clamp(
        snapped.clone(),
        BigInt::from(tier.min_tick()),
        BigInt::from(tier.max_tick()),
    );
    if clamped != snapped {
        trace!(%snapped, tier = tier.index(), "tick clamped to fee tier range");
    }

    clamped.to_i32().map(Some).ok_or_else(|| {
        MarginCoreError::invalid_argument("price_to_tick", format!("tick {} out of range", clamped))
    })
}

/// Price at a tick, scaled by `10^scale`
///
/// `tick` is already signed; decode raw chain words with
/// [`decode_tick`](crate::math::decode_tick) first.
pub fn tick_to_price(
    tick: i32,
    decimals_a: u32,
    decimals_b: u32,
    scale: u32,
) -> CoreResult<BigInt> {
    tick_to_price_with_config(
        tick,
        decimals_a,
        decimals_b,
        scale,
        &PrecisionConfig::default(),
    )
}

/// [`tick_to_price`] with explicit rounding and working precision
pub fn tick_to_price_with_config(
    tick: i32,
    decimals_a: u32,
    decimals_b: u32,
    scale: u32,
    config: &PrecisionConfig,
) -> CoreResult<BigInt> {
    config.validate()?;
    if tick.unsigned_abs() > MAX_TICK_MAGNITUDE {
        return Err(MarginCoreError::invalid_argument(
            "tick_to_price",
            format!("tick {} outside ±{}", tick, MAX_TICK_MAGNITUDE),
        ));
    }

    // 1.0001^tick at working scale, guard digits included
    let guard_digits = config.pow_guard_digits.max(TICK_BASE_DECIMALS);
    let working_scale = scale + guard_digits;
    let base = BigInt::from(TICK_BASE_NUMERATOR) * pow10(working_scale - TICK_BASE_DECIMALS);
    let raw = pow_fixed_with_guard(&base, tick as i64, working_scale, 0, Rounding::HalfEven)?;

    // Decimal adjustment and drop of the guard digits in one rounding step
    let (factor, divisor) = if decimals_a >= decimals_b {
        (pow10(decimals_a - decimals_b), pow10(guard_digits))
    } else {
        (BigInt::from(1u8), pow10(guard_digits + (decimals_b - decimals_a)))
    };
    mul_div(&raw, &factor, &divisor, config.rounding)
}
