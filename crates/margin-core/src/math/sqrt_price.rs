//! # Sqrt Price Decoding
//!
//! Converts an AMM's QN.N square-root price into a decimal-scaled price.
//!
//! price = sqrt_q^2 / 2^(2N) * 10^(decimals_a - decimals_b) * 10^out_scale
//!
//! The whole expression is one multiply-divide so that it rounds exactly once,
//! matching the pool program's own computation.

use num_bigint::BigInt;
use num_traits::Signed;

use crate::config::PrecisionConfig;
use crate::constants::{DEFAULT_PRICE_ROUNDING, Q64_BITS};
use crate::errors::{CoreResult, MarginCoreError};
use crate::math::big_int::{mul_div, pow10, pow2, Rounding};

/// Price of token A in token B from a QN.N sqrt price, scaled by `10^out_scale`
pub fn price_from_sqrt_q(
    sqrt_q: &BigInt,
    bits: u32,
    decimals_a: u32,
    decimals_b: u32,
    out_scale: u32,
    rounding: Rounding,
) -> CoreResult<BigInt> {
    let decimals_delta = decimals_a as i64 - decimals_b as i64;
    price_from_sqrt_q_delta(sqrt_q, bits, decimals_delta, out_scale, rounding)
}

/// [`price_from_sqrt_q`] using the rounding of `config`
pub fn price_from_sqrt_q_with_config(
    sqrt_q: &BigInt,
    bits: u32,
    decimals_a: u32,
    decimals_b: u32,
    out_scale: u32,
    config: &PrecisionConfig,
) -> CoreResult<BigInt> {
    price_from_sqrt_q(sqrt_q, bits, decimals_a, decimals_b, out_scale, config.rounding)
}

/// Q64.64 specialization taking the decimal difference directly
pub fn big_price_from_sqrt_q64(
    sqrt_q: &BigInt,
    decimals_delta: i64,
    out_scale: u32,
    rounding: Rounding,
) -> CoreResult<BigInt> {
    price_from_sqrt_q_delta(sqrt_q, Q64_BITS, decimals_delta, out_scale, rounding)
}

/// Q64.64 decoding with banker's rounding
pub fn price_from_sqrt_q64(
    sqrt_q: &BigInt,
    decimals_delta: i64,
    out_scale: u32,
) -> CoreResult<BigInt> {
    big_price_from_sqrt_q64(sqrt_q, decimals_delta, out_scale, DEFAULT_PRICE_ROUNDING)
}

fn price_from_sqrt_q_delta(
    sqrt_q: &BigInt,
    bits: u32,
    decimals_delta: i64,
    out_scale: u32,
    rounding: Rounding,
) -> CoreResult<BigInt> {
    if bits == 0 {
        return Err(MarginCoreError::invalid_argument(
            "price_from_sqrt_q",
            "bits must be a positive integer",
        ));
    }
    if sqrt_q.is_negative() {
        return Err(MarginCoreError::invalid_argument(
            "price_from_sqrt_q",
            format!("sqrt price must be non-negative, got {}", sqrt_q),
        ));
    }

    let squared = sqrt_q * sqrt_q;
    let q_squared = pow2(2 * bits as u64);
    let exponent = decimals_delta + out_scale as i64;

    let (factor, denominator) = if exponent >= 0 {
        (pow10(exponent as u32), q_squared)
    } else {
        (pow10(out_scale), q_squared * pow10(decimals_delta.unsigned_abs() as u32))
    };

    mul_div(&squared, &factor, &denominator, rounding)
}
