//! Leverage and maximum safe withdrawal.
//!
//! Zero equity is the liquidation boundary, so it is answered without a
//! division: NaN when the account is empty (0/0), +inf otherwise.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use tracing::debug;

use crate::config::PrecisionConfig;
use crate::constants::DISPLAY_DECIMALS;
use crate::errors::{CoreResult, MarginCoreError};
use crate::math::{from_f64_scaled, mul_div, pow10, round_to_decimals, to_f64_scaled, Rounding};

/// `account_value / (account_value - debt)`, rounded to two decimals
///
/// Both amounts are scaled by `10^decimals`.
pub fn calc_leverage(account_value: &BigInt, debt: &BigInt, decimals: u32) -> CoreResult<f64> {
    let equity = account_value - debt;

    if equity.is_zero() {
        if account_value.is_zero() {
            debug!("leverage undefined for an empty account");
            return Ok(f64::NAN);
        }
        debug!(%account_value, "zero equity, account at liquidation boundary");
        return Ok(f64::INFINITY);
    }
    if debt.is_zero() {
        return Ok(1.0);
    }

    let leverage = mul_div(account_value, &pow10(decimals), &equity, Rounding::HalfUp)?;
    Ok(round_to_decimals(to_f64_scaled(&leverage, decimals), DISPLAY_DECIMALS))
}

/// Largest amount that can leave the account while leverage stays at or
/// below `max_leverage`
pub fn calc_max_withdrawable(
    account_value: &BigInt,
    debt_value: &BigInt,
    max_leverage: f64,
    decimals: u32,
) -> CoreResult<BigInt> {
    calc_max_withdrawable_with_config(
        account_value,
        debt_value,
        max_leverage,
        decimals,
        &PrecisionConfig::default(),
    )
}

/// [`calc_max_withdrawable`] with an explicit ratio precision
pub fn calc_max_withdrawable_with_config(
    account_value: &BigInt,
    debt_value: &BigInt,
    max_leverage: f64,
    decimals: u32,
    config: &PrecisionConfig,
) -> CoreResult<BigInt> {
    if debt_value.is_zero() {
        return Ok(account_value.clone());
    }
    if max_leverage.is_nan() || max_leverage.is_infinite() {
        return Err(MarginCoreError::invalid_argument(
            "calc_max_withdrawable",
            format!("max leverage must be finite, got {}", max_leverage),
        ));
    }
    if max_leverage <= 1.0 {
        return Ok(BigInt::zero());
    }

    let current = calc_leverage(account_value, debt_value, decimals)?;
    if current >= max_leverage {
        debug!(current, max_leverage, "account already at max leverage");
        return Ok(BigInt::zero());
    }

    // min_account_value = L * debt / (L - 1), rounded against the borrower
    let one = pow10(config.ratio_decimals);
    let leverage = from_f64_scaled(max_leverage, config.ratio_decimals)?;
    let min_account_value = mul_div(&leverage, debt_value, &(&leverage - &one), Rounding::Up)?;

    let withdrawable = account_value - min_account_value;
    Ok(if withdrawable.is_negative() {
        BigInt::zero()
    } else {
        withdrawable
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(value: i64) -> BigInt {
        BigInt::from(value) * pow10(6)
    }

    #[test]
    fn test_leverage_regular() {
        assert_eq!(calc_leverage(&usd(1000), &usd(500), 6).unwrap(), 2.0);
        assert_eq!(calc_leverage(&usd(300), &usd(100), 6).unwrap(), 1.5);
        // 1000 / 667 = 1.49925...
        assert_eq!(calc_leverage(&usd(1000), &usd(333), 6).unwrap(), 1.5);
    }

    #[test]
    fn test_leverage_boundaries() {
        assert_eq!(calc_leverage(&usd(1000), &usd(0), 6).unwrap(), 1.0);
        assert_eq!(calc_leverage(&usd(1000), &usd(1000), 6).unwrap(), f64::INFINITY);
        assert!(calc_leverage(&usd(0), &usd(0), 6).unwrap().is_nan());
    }

    #[test]
    fn test_leverage_underwater_account() {
        // Debt above collateral gives negative equity
        assert_eq!(calc_leverage(&usd(100), &usd(200), 6).unwrap(), -1.0);
    }

    #[test]
    fn test_max_withdrawable_without_debt() {
        assert_eq!(calc_max_withdrawable(&usd(1000), &usd(0), 3.0, 6).unwrap(), usd(1000));
        assert_eq!(calc_max_withdrawable(&usd(1000), &usd(0), 0.5, 6).unwrap(), usd(1000));
    }

    #[test]
    fn test_max_withdrawable_low_max_leverage() {
        assert_eq!(calc_max_withdrawable(&usd(1000), &usd(10), 1.0, 6).unwrap(), BigInt::zero());
        assert_eq!(calc_max_withdrawable(&usd(1000), &usd(10), 0.2, 6).unwrap(), BigInt::zero());
    }

    #[test]
    fn test_max_withdrawable_regular() {
        // min account value = 3 * 500 / 2 = 750
        assert_eq!(calc_max_withdrawable(&usd(1000), &usd(500), 3.0, 6).unwrap(), usd(250));

        // Fractional limit: 2.5 * 500 / 1.5 = 833.333334 after rounding up
        let withdrawable = calc_max_withdrawable(&usd(1000), &usd(500), 2.5, 6).unwrap();
        assert_eq!(withdrawable, BigInt::from(166_666_666));
    }

    #[test]
    fn test_max_withdrawable_already_levered() {
        assert_eq!(calc_max_withdrawable(&usd(1000), &usd(800), 3.0, 6).unwrap(), BigInt::zero());
        assert_eq!(calc_max_withdrawable(&usd(1000), &usd(1000), 3.0, 6).unwrap(), BigInt::zero());
    }

    #[test]
    fn test_max_withdrawable_rejects_nan() {
        assert!(calc_max_withdrawable(&usd(1000), &usd(500), f64::NAN, 6).is_err());
    }
}
