//! Interest accrual and rate curves.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use tracing::trace;

use crate::constants::{DISPLAY_DECIMALS, SECONDS_PER_YEAR};
use crate::errors::{CoreResult, MarginCoreError};
use crate::math::{mul_div, pow10, round_to_decimals, Rounding};
use crate::types::{Debt, Kink};

// ============================================================================
// Accrual
// ============================================================================

/// Interest owed on `debt` over `period_seconds` at an annual `interest_rate`
///
/// `interest_rate` is scaled by `10^interest_decimals`; the result has the
/// same scale as `debt`. Truncates towards zero so interest is never
/// over-credited.
pub fn calc_interest_for_time(
    debt: &BigInt,
    interest_rate: &BigInt,
    period_seconds: i64,
    interest_decimals: u32,
) -> CoreResult<BigInt> {
    if !debt.is_positive() || period_seconds <= 0 {
        return Ok(BigInt::zero());
    }

    let denominator = BigInt::from(SECONDS_PER_YEAR) * pow10(interest_decimals);
    mul_div(
        &(debt * interest_rate),
        &BigInt::from(period_seconds),
        &denominator,
        Rounding::Down,
    )
}

// ============================================================================
// Rate Curves
// ============================================================================

/// Borrow rate at `utilization` on a piecewise-linear curve
///
/// The curve is sorted on a private copy. Utilization outside the curve is
/// clamped to its ends. A utilization sitting on a jump (two kinks with the
/// same `util`) takes the rate of the first bracket that contains it in
/// ascending order, i.e. the value from the left.
pub fn calc_piecewise_rate(utilization: f64, kinks: &[Kink]) -> CoreResult<f64> {
    if kinks.is_empty() {
        return Err(MarginCoreError::invalid_argument(
            "calc_piecewise_rate",
            "rate curve needs at least one kink",
        ));
    }
    if utilization.is_nan() || kinks.iter().any(|kink| !kink.util.is_finite()) {
        return Err(MarginCoreError::invalid_argument(
            "calc_piecewise_rate",
            "utilization values must be finite",
        ));
    }

    let mut sorted = kinks.to_vec();
    sorted.sort_by(|a, b| a.util.total_cmp(&b.util));

    let first = sorted[0];
    let last = sorted[sorted.len() - 1];
    let util = utilization.clamp(first.util, last.util);
    if util != utilization {
        trace!(utilization, clamped = util, "utilization clamped to curve");
    }

    if sorted.len() == 1 || util <= first.util {
        return Ok(first.rate);
    }
    if util >= last.util {
        return Ok(last.rate);
    }

    for pair in sorted.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        if util >= lower.util && util <= upper.util {
            if upper.util == lower.util {
                return Ok(lower.rate);
            }
            let t = (util - lower.util) / (upper.util - lower.util);
            return Ok(lower.rate + t * (upper.rate - lower.rate));
        }
    }

    Ok(last.rate)
}

/// Debt-weighted average of the rates, rounded to two decimals
pub fn calc_weighted_interest_rate(debts: &[Debt]) -> f64 {
    let total: f64 = debts.iter().map(|debt| debt.debt_usd).sum();
    if debts.is_empty() || total == 0.0 {
        return 0.0;
    }

    let weighted: f64 = debts
        .iter()
        .filter(|debt| debt.debt_usd != 0.0)
        .map(|debt| debt.debt_usd / total * debt.interest_rate)
        .sum();
    round_to_decimals(weighted, DISPLAY_DECIMALS)
}

// ============================================================================
// Pool Rates
// ============================================================================

/// `borrowed / supplied` scaled by `10^decimals`, zero for an empty pool
pub fn calc_utilization(borrowed: &BigInt, supplied: &BigInt, decimals: u32) -> CoreResult<BigInt> {
    if supplied.is_zero() {
        return Ok(BigInt::zero());
    }
    mul_div(borrowed, &pow10(decimals), supplied, Rounding::HalfUp)
}

/// Rate earned by suppliers: `utilization * borrow_rate * (1 - reserve_factor)`
pub fn calc_deposit_rate(
    utilization: f64,
    borrow_rate: f64,
    reserve_factor: f64,
) -> CoreResult<f64> {
    if !(0.0..=1.0).contains(&reserve_factor) {
        return Err(MarginCoreError::invalid_argument(
            "calc_deposit_rate",
            format!("reserve factor must be within [0, 1], got {}", reserve_factor),
        ));
    }
    if utilization == 0.0 {
        return Ok(0.0);
    }
    Ok(utilization * borrow_rate * (1.0 - reserve_factor))
}
