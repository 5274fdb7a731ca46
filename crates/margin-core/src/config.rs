//! # Precision Configuration
//!
//! Working-precision knobs for the conversion routines. The plain entry points
//! use [`PrecisionConfig::default`]; the `*_with_config` variants take one
//! explicitly.

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_LOG_GUARD_BITS, DEFAULT_POW_GUARD_DIGITS, DEFAULT_PRICE_ROUNDING,
    DEFAULT_RATIO_DECIMALS, MIN_LOG_GUARD_BITS,
};
use crate::errors::{CoreResult, MarginCoreError};
use crate::math::Rounding;

/// Precision settings for power, logarithm and ratio conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "client", serde(default))]
pub struct PrecisionConfig {
    /// Rounding applied to price outputs
    pub rounding: Rounding,
    /// Extra decimal digits carried through `pow_fixed`
    pub pow_guard_digits: u32,
    /// Extra binary digits carried through logarithms
    ///
    /// Tick conversions never work below the 512 bits of the memoized
    /// `ln(1.0001)`, so there this only widens large scales.
    pub log_guard_bits: u64,
    /// Decimal places used when converting real-valued ratios
    pub ratio_decimals: u32,
}

impl Default for PrecisionConfig {
    fn default() -> Self {
        Self {
            rounding: DEFAULT_PRICE_ROUNDING,
            pow_guard_digits: DEFAULT_POW_GUARD_DIGITS,
            log_guard_bits: DEFAULT_LOG_GUARD_BITS,
            ratio_decimals: DEFAULT_RATIO_DECIMALS,
        }
    }
}

impl PrecisionConfig {
    /// Same configuration with a different output rounding
    pub fn with_rounding(self, rounding: Rounding) -> Self {
        Self { rounding, ..self }
    }

    /// Reject settings that would break the logarithm accuracy guarantee
    pub fn validate(&self) -> CoreResult<()> {
        if self.log_guard_bits < MIN_LOG_GUARD_BITS {
            return Err(MarginCoreError::invalid_argument(
                "PrecisionConfig",
                format!(
                    "log_guard_bits must be at least {}, got {}",
                    MIN_LOG_GUARD_BITS, self.log_guard_bits
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_bankers_rounding() {
        let config = PrecisionConfig::default();
        assert_eq!(config.rounding, Rounding::HalfEven);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_thin_log_guard() {
        let config = PrecisionConfig {
            log_guard_bits: 32,
            ..PrecisionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "client")]
    #[test]
    fn test_partial_config_from_json() {
        let config: PrecisionConfig =
            serde_json::from_str(r#"{ "rounding": "HalfUp", "pow_guard_digits": 60 }"#).unwrap();
        assert_eq!(config.rounding, Rounding::HalfUp);
        assert_eq!(config.pow_guard_digits, 60);
        assert_eq!(config.log_guard_bits, DEFAULT_LOG_GUARD_BITS);
    }
}
