//! Regression metrics.

use super::check_lengths;
use crate::core::error::Result;
use ndarray::{ArrayView1, Zip};

/// Mean of squared differences.
pub fn mean_squared_error(predictions: &ArrayView1<'_, f64>, targets: &ArrayView1<'_, f64>) -> Result<f64> {
    check_lengths(predictions, targets)?;
    let sum = Zip::from(predictions)
        .and(targets)
        .fold(0.0, |acc, &p, &t| acc + (p - t) * (p - t));
    Ok(sum / predictions.len() as f64)
}

/// Square root of [`mean_squared_error`].
pub fn root_mean_squared_error(
    predictions: &ArrayView1<'_, f64>,
    targets: &ArrayView1<'_, f64>,
) -> Result<f64> {
    Ok(mean_squared_error(predictions, targets)?.sqrt())
}

/// Mean of absolute differences.
pub fn mean_absolute_error(predictions: &ArrayView1<'_, f64>, targets: &ArrayView1<'_, f64>) -> Result<f64> {
    check_lengths(predictions, targets)?;
    let sum = Zip::from(predictions)
        .and(targets)
        .fold(0.0, |acc, &p, &t| acc + (p - t).abs());
    Ok(sum / predictions.len() as f64)
}
