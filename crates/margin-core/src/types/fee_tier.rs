//! Fee tiers of the concentrated-liquidity pools.

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

use crate::constants::FEE_TIERS;
use crate::errors::{CoreResult, MarginCoreError};

/// Tick spacing and valid tick range of one fee tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct FeeTier {
    index: u8,
    spacing: i32,
    min_tick: i32,
    max_tick: i32,
}

impl FeeTier {
    pub(crate) const fn new(index: u8, spacing: i32, min_tick: i32, max_tick: i32) -> Self {
        Self {
            index,
            spacing,
            min_tick,
            max_tick,
        }
    }

    /// Look up a tier by its on-chain index
    pub fn from_index(index: usize) -> CoreResult<Self> {
        FEE_TIERS.get(index).copied().ok_or_else(|| {
            MarginCoreError::invalid_argument(
                "FeeTier::from_index",
                format!("unknown fee tier {} (expected 0..{})", index, FEE_TIERS.len()),
            )
        })
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    /// Lowest usable tick
    pub fn min_tick(&self) -> i32 {
        self.min_tick
    }

    /// Highest usable tick
    pub fn max_tick(&self) -> i32 {
        self.max_tick
    }

    /// Clamp a tick into this tier's range
    pub fn clamp_tick(&self, tick: i32) -> i32 {
        tick.clamp(self.min_tick, self.max_tick)
    }

    /// Check if a tick is inside the range and on the spacing grid
    pub fn is_valid_tick(&self, tick: i32) -> bool {
        tick >= self.min_tick && tick <= self.max_tick && tick % self.spacing == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_tier_table() {
        let expected = [
            (1, -443_636, 443_636),
            (5, -443_630, 443_630),
            (60, -443_580, 443_580),
            (200, -443_600, 443_600),
            (20, -443_620, 443_620),
            (50, -443_600, 443_600),
        ];
        for (index, (spacing, lowest, highest)) in expected.iter().enumerate() {
            let tier = FeeTier::from_index(index).unwrap();
            assert_eq!(tier.index() as usize, index);
            assert_eq!(tier.spacing(), *spacing);
            assert_eq!(tier.min_tick(), *lowest);
            assert_eq!(tier.max_tick(), *highest);
            // Bounds sit on the spacing grid
            assert!(tier.is_valid_tick(tier.min_tick()));
            assert!(tier.is_valid_tick(tier.max_tick()));
        }
    }

    #[test]
    fn test_unknown_tier() {
        assert!(FeeTier::from_index(6).is_err());
    }

    #[test]
    fn test_clamp_tick() {
        let tier = FeeTier::from_index(2).unwrap();
        assert_eq!(tier.clamp_tick(500_000), 443_580);
        assert_eq!(tier.clamp_tick(-500_000), -443_580);
        assert_eq!(tier.clamp_tick(120), 120);
    }
}
