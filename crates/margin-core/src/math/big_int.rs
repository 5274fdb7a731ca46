//! Big integer operations for scaled arithmetic
//!
//! Every division in the kernel goes through [`div_round`] so that a
//! multiply-then-divide rounds exactly once.

use std::cmp::Ordering;

use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed, Zero};

use crate::errors::{CoreResult, MarginCoreError};

/// Rounding mode for division operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Truncate towards zero
    Down,
    /// Away from zero whenever a remainder exists
    Up,
    /// Nearest, ties away from zero
    HalfUp,
    /// Nearest, ties to even (banker's rounding)
    HalfEven,
}

/// 10^exponent as a big integer
pub fn pow10(exponent: u32) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exponent as usize)
}

/// Divide `numerator` by `denominator` with the given rounding
pub fn div_round(
    numerator: &BigInt,
    denominator: &BigInt,
    rounding: Rounding,
) -> CoreResult<BigInt> {
    if denominator.is_zero() {
        return Err(MarginCoreError::invalid_argument(
            "div_round",
            "denominator must be non-zero",
        ));
    }

    // BigInt division truncates towards zero
    let quotient = numerator / denominator;
    let remainder = numerator - &quotient * denominator;
    if remainder.is_zero() {
        return Ok(quotient);
    }

    let negative = (numerator.sign() == Sign::Minus) != (denominator.sign() == Sign::Minus);
    let away = if negative {
        &quotient - 1u32
    } else {
        &quotient + 1u32
    };

    let twice_remainder = remainder.magnitude() << 1usize;
    let half_cmp = twice_remainder.cmp(denominator.magnitude());

    let round_away = match rounding {
        Rounding::Down => false,
        Rounding::Up => true,
        Rounding::HalfUp => half_cmp != Ordering::Less,
        Rounding::HalfEven => match half_cmp {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => (quotient.magnitude() % 2u32).is_one(),
        },
    };

    Ok(if round_away { away } else { quotient })
}

/// Multiply two values and divide by a third with a single rounding step
/// result = (a * b) / denominator
pub fn mul_div(
    a: &BigInt,
    b: &BigInt,
    denominator: &BigInt,
    rounding: Rounding,
) -> CoreResult<BigInt> {
    div_round(&(a * b), denominator, rounding)
}

/// Move a scaled integer from `from_decimals` to `to_decimals`
pub fn rescale(
    value: &BigInt,
    from_decimals: u32,
    to_decimals: u32,
    rounding: Rounding,
) -> CoreResult<BigInt> {
    match to_decimals.cmp(&from_decimals) {
        Ordering::Equal => Ok(value.clone()),
        Ordering::Greater => Ok(value * pow10(to_decimals - from_decimals)),
        Ordering::Less => div_round(value, &pow10(from_decimals - to_decimals), rounding),
    }
}

/// Round `value` to a multiple of `step`
pub fn round_to_step(value: &BigInt, step: &BigInt, rounding: Rounding) -> CoreResult<BigInt> {
    if !step.is_positive() {
        return Err(MarginCoreError::invalid_argument(
            "round_to_step",
            format!("step must be positive, got {}", step),
        ));
    }
    Ok(div_round(value, step, rounding)? * step)
}

/// Clamp `value` into `[lower, upper]`
pub fn clamp<T: PartialOrd>(value: T, lower: T, upper: T) -> T {
    if value < lower {
        lower
    } else if value > upper {
        upper
    } else {
        value
    }
}

/// 2^exponent as a big integer
pub fn pow2(exponent: u64) -> BigInt {
    BigInt::one() << exponent
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(value: i64) -> BigInt {
        BigInt::from(value)
    }

    #[test]
    fn test_div_round_modes() {
        // 7 / 2 = 3.5
        assert_eq!(div_round(&big(7), &big(2), Rounding::Down).unwrap(), big(3));
        assert_eq!(div_round(&big(7), &big(2), Rounding::Up).unwrap(), big(4));
        assert_eq!(div_round(&big(7), &big(2), Rounding::HalfUp).unwrap(), big(4));
        assert_eq!(div_round(&big(7), &big(2), Rounding::HalfEven).unwrap(), big(4));

        // 5 / 2 = 2.5, ties to even go down
        assert_eq!(div_round(&big(5), &big(2), Rounding::HalfEven).unwrap(), big(2));
        assert_eq!(div_round(&big(5), &big(2), Rounding::HalfUp).unwrap(), big(3));

        // 10 / 4 = 2.5 vs 10 / 3 = 3.33
        assert_eq!(div_round(&big(10), &big(3), Rounding::Up).unwrap(), big(4));
        assert_eq!(div_round(&big(10), &big(3), Rounding::HalfUp).unwrap(), big(3));
    }

    #[test]
    fn test_div_round_negative_is_symmetric() {
        assert_eq!(div_round(&big(-7), &big(2), Rounding::Down).unwrap(), big(-3));
        assert_eq!(div_round(&big(-7), &big(2), Rounding::Up).unwrap(), big(-4));
        assert_eq!(div_round(&big(-7), &big(2), Rounding::HalfUp).unwrap(), big(-4));
        assert_eq!(div_round(&big(7), &big(-2), Rounding::HalfUp).unwrap(), big(-4));
        assert_eq!(div_round(&big(-5), &big(2), Rounding::HalfEven).unwrap(), big(-2));
        assert_eq!(div_round(&big(-7), &big(-2), Rounding::HalfEven).unwrap(), big(4));
    }

    #[test]
    fn test_div_round_by_zero() {
        assert!(div_round(&big(1), &big(0), Rounding::Down).is_err());
        assert!(mul_div(&big(1), &big(2), &big(0), Rounding::Up).is_err());
    }

    #[test]
    fn test_mul_div_rounds_once() {
        // 10 * 3 / 4 = 7.5
        assert_eq!(mul_div(&big(10), &big(3), &big(4), Rounding::Down).unwrap(), big(7));
        assert_eq!(mul_div(&big(10), &big(3), &big(4), Rounding::Up).unwrap(), big(8));
        // Exact division needs no rounding
        assert_eq!(mul_div(&big(10), &big(4), &big(5), Rounding::Up).unwrap(), big(8));

        // Products beyond 128 bits
        let large = BigInt::from(u128::MAX);
        let result = mul_div(&large, &large, &large, Rounding::Down).unwrap();
        assert_eq!(result, large);
    }

    #[test]
    fn test_rescale() {
        // 1.2345 -> 3 decimals
        assert_eq!(rescale(&big(12345), 4, 3, Rounding::HalfUp).unwrap(), big(1235));
        assert_eq!(rescale(&big(12344), 4, 3, Rounding::HalfUp).unwrap(), big(1234));
        assert_eq!(rescale(&big(123), 2, 5, Rounding::Down).unwrap(), big(123000));
        assert_eq!(rescale(&big(12345), 5, 5, Rounding::Down).unwrap(), big(12345));
    }

    #[test]
    fn test_round_to_step() {
        assert_eq!(round_to_step(&big(29), &big(60), Rounding::HalfUp).unwrap(), big(0));
        assert_eq!(round_to_step(&big(30), &big(60), Rounding::HalfUp).unwrap(), big(60));
        assert_eq!(round_to_step(&big(-30), &big(60), Rounding::HalfUp).unwrap(), big(-60));
        assert_eq!(round_to_step(&big(-89), &big(60), Rounding::HalfUp).unwrap(), big(-60));
        assert!(round_to_step(&big(1), &big(0), Rounding::HalfUp).is_err());
    }

    #[test]
    fn test_clamp_and_powers() {
        assert_eq!(clamp(5, 0, 3), 3);
        assert_eq!(clamp(-1.5, -1.0, 1.0), -1.0);
        assert_eq!(pow10(3), big(1000));
        assert_eq!(pow2(64), BigInt::from(1u128 << 64));
    }
}
