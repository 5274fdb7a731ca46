//! # Two's-Complement Codec
//!
//! Reinterprets integers as N-bit two's-complement words, the way the chain's
//! virtual machine stores them. Reduction is exact for any width; there is no
//! floating-point intermediate.

use num_bigint::BigInt;
use num_traits::Signed;

use crate::errors::{CoreResult, MarginCoreError};
use crate::math::big_int::pow2;
use crate::math::conversion::ToCanonicalInt;

fn check_bits(operation: &'static str, bits: u32) -> CoreResult<()> {
    if bits == 0 {
        return Err(MarginCoreError::invalid_argument(
            operation,
            "bits must be a positive integer",
        ));
    }
    Ok(())
}

/// Reduce `x` into `[0, 2^bits - 1]`
pub fn to_unsigned_n<T: ToCanonicalInt + ?Sized>(x: &T, bits: u32) -> CoreResult<BigInt> {
    check_bits("to_unsigned_n", bits)?;
    let value = x.to_canonical_int()?;
    let modulus = pow2(bits as u64);

    // Remainder keeps the dividend's sign; shift negatives into range
    let reduced = &value % &modulus;
    Ok(if reduced.is_negative() {
        reduced + modulus
    } else {
        reduced
    })
}

/// Reduce `x` into `[-2^(bits-1), 2^(bits-1) - 1]`
pub fn to_signed_n<T: ToCanonicalInt + ?Sized>(x: &T, bits: u32) -> CoreResult<BigInt> {
    check_bits("to_signed_n", bits)?;
    let unsigned = to_unsigned_n(x, bits)?;
    if unsigned >= pow2(bits as u64 - 1) {
        Ok(unsigned - pow2(bits as u64))
    } else {
        Ok(unsigned)
    }
}

/// 32-bit unsigned reinterpretation of a native integer
pub fn to_unsigned_int32(x: i64) -> u32 {
    x as u32
}

/// 32-bit signed reinterpretation of a native integer
pub fn to_int32(x: i64) -> i32 {
    x as i32
}

/// Decode a raw 32-bit chain word into a signed tick index
pub fn decode_tick(raw: u32) -> i32 {
    raw as i32
}

/// `true` when the N-bit word has its sign bit set
pub fn is_negative_n<T: ToCanonicalInt + ?Sized>(x: &T, bits: u32) -> CoreResult<bool> {
    Ok(to_signed_n(x, bits)?.is_negative())
}
