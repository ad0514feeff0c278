//! Binary classification metrics over probabilities.

use super::check_lengths;
use crate::core::error::Result;
use ndarray::{ArrayView1, Zip};

/// Probability above which a row is classified as positive.
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.5;

/// Number of rows whose thresholded probability disagrees with the label.
///
/// A row is predicted positive when its probability is strictly greater than
/// `threshold`.
pub fn misclassification_count(
    probabilities: &ArrayView1<'_, f64>,
    labels: &ArrayView1<'_, f64>,
    threshold: f64,
) -> Result<usize> {
    check_lengths(probabilities, labels)?;
    let count = Zip::from(probabilities).and(labels).fold(0usize, |acc, &p, &y| {
        let predicted = if p > threshold { 1.0 } else { 0.0 };
        if predicted != y {
            acc + 1
        } else {
            acc
        }
    });
    Ok(count)
}

/// Fraction of correctly classified rows.
pub fn accuracy(probabilities: &ArrayView1<'_, f64>, labels: &ArrayView1<'_, f64>, threshold: f64) -> Result<f64> {
    let wrong = misclassification_count(probabilities, labels, threshold)?;
    Ok(1.0 - wrong as f64 / labels.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_misclassification_count() {
        let probabilities = array![0.9, 0.2, 0.5, 0.7];
        let labels = array![1.0, 0.0, 1.0, 0.0];
        let count =
            misclassification_count(&probabilities.view(), &labels.view(), DEFAULT_DECISION_THRESHOLD)
                .unwrap();
        // 0.5 is not above the threshold, 0.7 is a false positive.
        assert_eq!(count, 2);
        let acc = accuracy(&probabilities.view(), &labels.view(), DEFAULT_DECISION_THRESHOLD).unwrap();
        assert_eq!(acc, 0.5);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let empty = ndarray::Array1::<f64>::zeros(0);
        assert!(misclassification_count(&empty.view(), &empty.view(), 0.5).is_err());
    }
}
