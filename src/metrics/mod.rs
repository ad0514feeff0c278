//! Evaluation metrics for trained models.
//!
//! Plain functions over prediction and target views. Every function checks
//! that both inputs have the same length.

pub mod classification;
pub mod regression;

pub use classification::{accuracy, misclassification_count, DEFAULT_DECISION_THRESHOLD};
pub use regression::{mean_absolute_error, mean_squared_error, root_mean_squared_error};

use crate::core::error::{GbtError, Result};
use ndarray::ArrayView1;

pub(crate) fn check_lengths(predictions: &ArrayView1<'_, f64>, targets: &ArrayView1<'_, f64>) -> Result<()> {
    if predictions.len() != targets.len() {
        return Err(GbtError::dimension_mismatch(
            format!("{} predictions", targets.len()),
            format!("{} predictions", predictions.len()),
        ));
    }
    if predictions.is_empty() {
        return Err(GbtError::dataset("Cannot evaluate a metric on zero rows"));
    }
    Ok(())
}
