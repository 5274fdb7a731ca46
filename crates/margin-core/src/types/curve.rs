//! Interest-curve and debt inputs.

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

/// Control point of a piecewise-linear interest curve
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct Kink {
    /// Utilization at this point
    pub util: f64,
    /// Borrow rate at this point
    pub rate: f64,
}

impl Kink {
    pub const fn new(util: f64, rate: f64) -> Self {
        Self { util, rate }
    }
}

/// One position's contribution to a debt-weighted average rate
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct Debt {
    /// Outstanding debt valued in USD
    pub debt_usd: f64,
    /// Rate charged on that debt
    pub interest_rate: f64,
}

impl Debt {
    pub const fn new(debt_usd: f64, interest_rate: f64) -> Self {
        Self {
            debt_usd,
            interest_rate,
        }
    }
}
