//! # Fixed-Point Power and Logarithm
//!
//! Integer-exponent powers over decimal scaled integers and natural logarithms
//! over binary fixed-point values. Both carry guard precision internally and
//! round once on the way out.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::constants::{DEFAULT_LOG_GUARD_BITS, DEFAULT_POW_GUARD_DIGITS};
use crate::errors::{CoreResult, MarginCoreError};
use crate::math::big_int::{div_round, mul_div, pow10, pow2, Rounding};

/// Bits carried below the requested precision inside `ln_q`
const LN_INTERNAL_GUARD_BITS: u64 = 64;

// ============================================================================
// Power
// ============================================================================

/// `(base / 10^scale)^exponent` as a scaled integer at `scale`
pub fn pow_fixed(
    base: &BigInt,
    exponent: i64,
    scale: u32,
    rounding: Rounding,
) -> CoreResult<BigInt> {
    pow_fixed_with_guard(base, exponent, scale, DEFAULT_POW_GUARD_DIGITS, rounding)
}

/// [`pow_fixed`] with an explicit number of guard digits
pub fn pow_fixed_with_guard(
    base: &BigInt,
    exponent: i64,
    scale: u32,
    guard_digits: u32,
    rounding: Rounding,
) -> CoreResult<BigInt> {
    if exponent == 0 {
        return Ok(pow10(scale));
    }
    if base.is_zero() {
        if exponent < 0 {
            return Err(MarginCoreError::invalid_argument(
                "pow_fixed",
                "zero base with negative exponent",
            ));
        }
        return Ok(BigInt::zero());
    }

    let guard = pow10(guard_digits);
    let one = pow10(scale + guard_digits);

    // Square-and-multiply at working precision
    let mut result = one.clone();
    let mut power = base * &guard;
    let mut remaining = exponent.unsigned_abs();
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = mul_div(&result, &power, &one, Rounding::HalfEven)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            power = mul_div(&power, &power, &one, Rounding::HalfEven)?;
        }
    }

    if exponent < 0 {
        if result.is_zero() {
            return Err(MarginCoreError::invalid_argument(
                "pow_fixed",
                "power underflows working precision, reciprocal is unbounded",
            ));
        }
        result = mul_div(&one, &one, &result, Rounding::HalfEven)?;
    }

    div_round(&result, &guard, rounding)
}

// ============================================================================
// Logarithm
// ============================================================================

/// Natural logarithm of `x / 2^frac_bits`, returned with `frac_bits` fractional bits
///
/// Reduces `x = m * 2^k` with `m` in `[1, 2)` and evaluates
/// `ln(m) = 2 * atanh((m - 1) / (m + 1))`.
pub fn ln_q(x: &BigInt, frac_bits: u64) -> CoreResult<BigInt> {
    if !x.is_positive() {
        return Err(MarginCoreError::invalid_argument(
            "ln_q",
            format!("logarithm of non-positive value {}", x),
        ));
    }

    Ok(ln_q_positive(x, frac_bits))
}

/// [`ln_q`] for an input already known to be positive
pub(crate) fn ln_q_positive(x: &BigInt, frac_bits: u64) -> BigInt {
    let bits = frac_bits + LN_INTERNAL_GUARD_BITS;
    let one = pow2(bits);
    let value = x << LN_INTERNAL_GUARD_BITS;

    let exponent = value.bits() as i64 - 1 - bits as i64;
    let mantissa = if exponent >= 0 {
        &value >> (exponent as u64)
    } else {
        &value << exponent.unsigned_abs()
    };

    let z = ((&mantissa - &one) << bits) / (&mantissa + &one);
    let ln_mantissa = atanh_q(&z, bits) << 1u32;
    let ln2 = atanh_q(&(&one / 3u32), bits) << 1u32;

    // Floor drop of the guard bits, far below the requested precision
    (ln2 * exponent + ln_mantissa) >> LN_INTERNAL_GUARD_BITS
}

/// `atanh(z)` for `0 <= z <= 1/3` in binary fixed point
fn atanh_q(z: &BigInt, bits: u64) -> BigInt {
    let z_squared = (z * z) >> bits;
    let mut sum = z.clone();
    let mut power = z.clone();
    let mut denominator = 1u64;
    loop {
        power = (&power * &z_squared) >> bits;
        if power.is_zero() {
            break;
        }
        denominator += 2;
        sum += &power / denominator;
    }
    sum
}

/// Binary fixed-point image of `numerator / denominator` with `frac_bits` bits
pub fn ratio_to_q(numerator: &BigInt, denominator: &BigInt, frac_bits: u64) -> CoreResult<BigInt> {
    div_round(&(numerator << frac_bits), denominator, Rounding::Down)
}

/// Natural logarithm of `x / 10^scale` as a scaled integer at `scale`
pub fn ln_fixed(x: &BigInt, scale: u32, rounding: Rounding) -> CoreResult<BigInt> {
    ln_fixed_with_guard(x, scale, DEFAULT_LOG_GUARD_BITS, rounding)
}

/// [`ln_fixed`] with `guard_bits` binary digits carried beyond `10^scale`
pub fn ln_fixed_with_guard(
    x: &BigInt,
    scale: u32,
    guard_bits: u64,
    rounding: Rounding,
) -> CoreResult<BigInt> {
    if !x.is_positive() {
        return Err(MarginCoreError::invalid_argument(
            "ln_fixed",
            format!("logarithm of non-positive value {}", x),
        ));
    }
    let unit = pow10(scale);
    let frac_bits = unit.bits() + guard_bits;
    let ln_x = ln_q(&ratio_to_q(x, &unit, frac_bits)?, frac_bits)?;
    mul_div(&ln_x, &unit, &pow2(frac_bits), rounding)
}

/// Logarithm of `x` in base `base`, both scaled by `10^scale`
pub fn log_fixed(x: &BigInt, base: &BigInt, scale: u32, rounding: Rounding) -> CoreResult<BigInt> {
    log_fixed_with_guard(x, base, scale, DEFAULT_LOG_GUARD_BITS, rounding)
}

/// [`log_fixed`] with `guard_bits` binary digits carried beyond `10^scale`
pub fn log_fixed_with_guard(
    x: &BigInt,
    base: &BigInt,
    scale: u32,
    guard_bits: u64,
    rounding: Rounding,
) -> CoreResult<BigInt> {
    if !x.is_positive() || !base.is_positive() {
        return Err(MarginCoreError::invalid_argument(
            "log_fixed",
            "logarithm arguments must be positive",
        ));
    }
    let unit = pow10(scale);
    if *base == unit {
        return Err(MarginCoreError::invalid_argument("log_fixed", "base must not be one"));
    }

    let frac_bits = unit.bits() + guard_bits;
    let ln_x = ln_q(&ratio_to_q(x, &unit, frac_bits)?, frac_bits)?;
    let ln_base = ln_q(&ratio_to_q(base, &unit, frac_bits)?, frac_bits)?;
    if ln_base.is_zero() {
        return Err(MarginCoreError::invalid_argument(
            "log_fixed",
            "base is indistinguishable from one",
        ));
    }
    mul_div(&ln_x, &unit, &ln_base, rounding)
}
