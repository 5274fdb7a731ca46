//! # Value Conversions
//!
//! Normalization of integer-like inputs into [`BigInt`], and exact conversions
//! between scaled integers and `f64`.

use num_bigint::BigInt;
use num_traits::{FromPrimitive, Zero};

use crate::errors::{CoreResult, MarginCoreError};

// ============================================================================
// Canonical Integer Normalization
// ============================================================================

/// Integer-like values accepted at the kernel boundary
///
/// Native integers convert exactly, floats and decimal strings truncate
/// towards zero, and strings may carry a `0x` prefix for hex.
pub trait ToCanonicalInt {
    fn to_canonical_int(&self) -> CoreResult<BigInt>;
}

macro_rules! canonical_from_primitive {
    ($($type:ty),*) => {
        $(
            impl ToCanonicalInt for $type {
                fn to_canonical_int(&self) -> CoreResult<BigInt> {
                    Ok(BigInt::from(*self))
                }
            }
        )*
    };
}

canonical_from_primitive!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl ToCanonicalInt for BigInt {
    fn to_canonical_int(&self) -> CoreResult<BigInt> {
        Ok(self.clone())
    }
}

impl ToCanonicalInt for f64 {
    fn to_canonical_int(&self) -> CoreResult<BigInt> {
        if !self.is_finite() {
            return Err(MarginCoreError::invalid_argument(
                "to_canonical_int",
                format!("{} is not a finite number", self),
            ));
        }
        // Every finite f64 is an exact dyadic value, so truncation is lossless
        BigInt::from_f64(self.trunc()).ok_or_else(|| {
            MarginCoreError::invalid_argument(
                "to_canonical_int",
                format!("cannot convert {}", self),
            )
        })
    }
}

impl ToCanonicalInt for str {
    fn to_canonical_int(&self) -> CoreResult<BigInt> {
        parse_integer_str(self)
    }
}

impl ToCanonicalInt for String {
    fn to_canonical_int(&self) -> CoreResult<BigInt> {
        parse_integer_str(self)
    }
}

impl<T: ToCanonicalInt + ?Sized> ToCanonicalInt for &T {
    fn to_canonical_int(&self) -> CoreResult<BigInt> {
        (**self).to_canonical_int()
    }
}

fn parse_integer_str(input: &str) -> CoreResult<BigInt> {
    let invalid = || {
        MarginCoreError::invalid_argument(
            "to_canonical_int",
            format!("'{}' is not an integer literal", input),
        )
    };

    let trimmed = input.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let magnitude = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        BigInt::parse_bytes(hex.as_bytes(), 16).ok_or_else(invalid)?
    } else {
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let digits_ok = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !digits_ok(whole) || !digits_ok(fraction) {
            return Err(invalid());
        }
        // Fractional digits are dropped: truncation towards zero
        if whole.is_empty() {
            BigInt::zero()
        } else {
            BigInt::parse_bytes(whole.as_bytes(), 10).ok_or_else(invalid)?
        }
    };

    Ok(if negative { -magnitude } else { magnitude })
}

// ============================================================================
// Scaled Integer <-> f64
// ============================================================================

/// Convert `value / 10^decimals` to the nearest f64
pub fn to_f64_scaled(value: &BigInt, decimals: u32) -> f64 {
    let digits = value.magnitude().to_string();
    let decimals = decimals as usize;

    let mut text = String::with_capacity(digits.len() + decimals + 3);
    if value.sign() == num_bigint::Sign::Minus {
        text.push('-');
    }
    if decimals == 0 {
        text.push_str(&digits);
    } else if digits.len() > decimals {
        let (whole, fraction) = digits.split_at(digits.len() - decimals);
        text.push_str(whole);
        text.push('.');
        text.push_str(fraction);
    } else {
        text.push_str("0.");
        text.extend(std::iter::repeat('0').take(decimals - digits.len()));
        text.push_str(&digits);
    }

    // Decimal parsing is correctly rounded, unlike dividing two floats
    text.parse::<f64>().unwrap_or(f64::NAN)
}

/// Convert an f64 to a scaled integer with `decimals` places, rounding the
/// exact binary value half to even
pub fn from_f64_scaled(value: f64, decimals: u32) -> CoreResult<BigInt> {
    if !value.is_finite() {
        return Err(MarginCoreError::invalid_argument(
            "from_f64_scaled",
            format!("{} is not a finite number", value),
        ));
    }
    let text = format!("{:.*}", decimals as usize, value).replace('.', "");
    parse_integer_str(&text)
}

/// Round to `places` decimal places, ties away from zero
pub fn round_to_decimals(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_from_native_and_big() {
        assert_eq!((-5i64).to_canonical_int().unwrap(), BigInt::from(-5));
        assert_eq!(u128::MAX.to_canonical_int().unwrap(), BigInt::from(u128::MAX));
        let big = BigInt::from(7) << 200usize;
        assert_eq!(big.to_canonical_int().unwrap(), big);
    }

    #[test]
    fn test_canonical_from_strings() {
        assert_eq!("123".to_canonical_int().unwrap(), BigInt::from(123));
        assert_eq!(" -42 ".to_canonical_int().unwrap(), BigInt::from(-42));
        assert_eq!("+9".to_canonical_int().unwrap(), BigInt::from(9));
        assert_eq!("0xFFFFFFFF".to_canonical_int().unwrap(), BigInt::from(0xFFFF_FFFFu64));
        assert_eq!(
            "18446744073709551617".to_canonical_int().unwrap(),
            BigInt::from(u64::MAX) + 2u32
        );
        assert!("".to_canonical_int().is_err());
        assert!("12a".to_canonical_int().is_err());
        assert!("1e5".to_canonical_int().is_err());
    }

    #[test]
    fn test_fractions_truncate_towards_zero() {
        assert_eq!("12.7".to_canonical_int().unwrap(), BigInt::from(12));
        assert_eq!("-12.7".to_canonical_int().unwrap(), BigInt::from(-12));
        assert_eq!("-0.5".to_canonical_int().unwrap(), BigInt::from(0));
        assert_eq!((-3.9f64).to_canonical_int().unwrap(), BigInt::from(-3));
        assert_eq!(2f64.powi(60).to_canonical_int().unwrap(), BigInt::from(1u64 << 60));
        assert!(f64::NAN.to_canonical_int().is_err());
        assert!(f64::INFINITY.to_canonical_int().is_err());
    }

    #[test]
    fn test_to_f64_scaled() {
        assert_eq!(to_f64_scaled(&BigInt::from(12345), 2), 123.45);
        assert_eq!(to_f64_scaled(&BigInt::from(-5), 3), -0.005);
        assert_eq!(to_f64_scaled(&BigInt::from(42), 0), 42.0);
        assert_eq!(to_f64_scaled(&BigInt::from(0), 8), 0.0);
    }

    #[test]
    fn test_from_f64_scaled() {
        let one_and_half = BigInt::from(15u64) * BigInt::from(10u64).pow(17);
        assert_eq!(from_f64_scaled(1.5, 18).unwrap(), one_and_half);
        assert_eq!(from_f64_scaled(2.25, 2).unwrap(), BigInt::from(225));
        assert_eq!(from_f64_scaled(-0.125, 3).unwrap(), BigInt::from(-125));
        assert!(from_f64_scaled(f64::NAN, 2).is_err());
    }

    #[test]
    fn test_round_to_decimals() {
        assert_eq!(round_to_decimals(1.006, 2), 1.01);
        assert_eq!(round_to_decimals(2.5, 0), 3.0);
        assert!(round_to_decimals(f64::NAN, 2).is_nan());
        assert_eq!(round_to_decimals(f64::INFINITY, 2), f64::INFINITY);
    }
}
