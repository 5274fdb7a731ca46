//! Percentage weights over non-negative amounts.

use tracing::debug;

use crate::errors::{CoreResult, MarginCoreError};

/// Each amount as a percentage of the total
///
/// A zero total (including an empty input) yields all-zero weights rather
/// than NaN.
pub fn calc_weights(amounts: &[f64]) -> CoreResult<Vec<f64>> {
    if let Some(negative) = amounts.iter().find(|amount| **amount < 0.0) {
        return Err(MarginCoreError::invalid_argument(
            "calc_weights",
            format!("amounts must be non-negative, got {}", negative),
        ));
    }

    // Normalize by the largest amount so the sum cannot overflow
    let largest = amounts.iter().copied().fold(0.0f64, f64::max);
    if largest == 0.0 {
        debug!(count = amounts.len(), "zero total, weights are all zero");
        return Ok(vec![0.0; amounts.len()]);
    }
    let total: f64 = amounts.iter().map(|amount| amount / largest).sum();

    Ok(amounts
        .iter()
        .map(|amount| {
            let weight = amount / largest / total * 100.0;
            if weight.is_finite() {
                weight
            } else {
                0.0
            }
        })
        .collect())
}
