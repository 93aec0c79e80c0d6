//! Average calculations over cost observations
//!
//! - Arithmetic mean over every observation
//! - Fixed-divisor window average (the divisor does not shrink with the data)

use crate::{MathError, Result};
use statrs::statistics::Statistics;

/// Arithmetic mean of the given values.
///
/// No weighting and no outlier rejection. Fails on an empty slice.
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot average an empty series".to_string(),
        ));
    }

    Ok(values.iter().mean())
}

/// Sum of `values` divided by a constant `divisor`.
///
/// A window holding fewer values than `divisor` is deflated rather than
/// rejected, so an empty window averages to zero.
pub fn window_average(values: &[f64], divisor: usize) -> Result<f64> {
    if divisor == 0 {
        return Err(MathError::InvalidInput(
            "Window divisor must be greater than zero".to_string(),
        ));
    }

    Ok(values.iter().sum::<f64>() / divisor as f64)
}
