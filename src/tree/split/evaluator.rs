//! Node scores, split gains and leaf weights.
//!
//! The gain of a candidate split is `score(parent) - score(left) - score(right)`,
//! where the node score is selected by [`GainFormula`].

use crate::core::error::{GbtError, Result};
use crate::core::types::{GainFormula, GradientSums, Score};

/// Scores nodes and candidate splits for one set of hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitEvaluator {
    formula: GainFormula,
    lambda: f64,
}

impl SplitEvaluator {
    /// Creates an evaluator for the given node score and L2 regularization.
    pub fn new(formula: GainFormula, lambda: f64) -> Self {
        SplitEvaluator { formula, lambda }
    }

    /// Node score, or `None` when it is undefined for these sums.
    pub fn node_score(&self, sums: GradientSums) -> Option<f64> {
        let g = sums.gradient;
        let denominator = sums.hessian + self.lambda;
        match self.formula {
            GainFormula::Multiplicative => Some(-(g * g / 2.0) * denominator),
            GainFormula::Standard => {
                if denominator <= 0.0 {
                    None
                } else {
                    Some(-(g * g) / (2.0 * denominator))
                }
            }
        }
    }

    /// Gain of splitting `parent` into `left` and `right`.
    ///
    /// Returns `None` when any score is undefined or the gain is not finite,
    /// which makes the candidate inadmissible.
    pub fn split_gain(
        &self,
        parent: GradientSums,
        left: GradientSums,
        right: GradientSums,
    ) -> Option<f64> {
        let gain = self.node_score(parent)? - self.node_score(left)? - self.node_score(right)?;
        gain.is_finite().then_some(gain)
    }

    /// Regularized Newton step `-G / (H + lambda)`.
    pub fn leaf_weight(&self, sums: GradientSums) -> Result<Score> {
        let denominator = sums.hessian + self.lambda;
        if denominator <= 0.0 {
            return Err(GbtError::numerical(format!(
                "leaf hessian sum plus lambda is {} (hessian {}, lambda {})",
                denominator, sums.hessian, self.lambda
            )));
        }

        let weight = -sums.gradient / denominator;
        if !weight.is_finite() {
            return Err(GbtError::numerical(format!(
                "leaf weight is not finite (gradient {}, hessian {})",
                sums.gradient, sums.hessian
            )));
        }

        Ok(weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_standard_gain() {
        let evaluator = SplitEvaluator::new(GainFormula::Standard, 0.0);
        let parent = GradientSums::new(-44.0, 8.0);
        let left = GradientSums::new(-4.0, 4.0);
        let right = parent - left;
        assert_abs_diff_eq!(evaluator.split_gain(parent, left, right).unwrap(), 81.0);
    }

    #[test]
    fn test_multiplicative_gain() {
        let evaluator = SplitEvaluator::new(GainFormula::Multiplicative, 0.0);
        let parent = GradientSums::new(-44.0, 8.0);
        let left = GradientSums::new(-4.0, 4.0);
        let right = parent - left;
        // -(968 * 8) + (8 * 4) + (800 * 4)
        assert_abs_diff_eq!(evaluator.split_gain(parent, left, right).unwrap(), -4512.0);
    }

    #[test]
    fn test_standard_zero_denominator_is_inadmissible() {
        let evaluator = SplitEvaluator::new(GainFormula::Standard, 0.0);
        let parent = GradientSums::new(1.0, 1.0);
        let left = GradientSums::new(1.0, 1.0);
        let right = GradientSums::new(0.0, 0.0);
        assert!(evaluator.split_gain(parent, left, right).is_none());
    }

    #[test]
    fn test_leaf_weight_degenerate_denominator() {
        let evaluator = SplitEvaluator::new(GainFormula::Standard, 0.0);
        let err = evaluator
            .leaf_weight(GradientSums::new(1.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, GbtError::Numerical { .. }));
    }

    proptest! {
        #[test]
        fn leaf_weight_is_regularized_newton_step(
            g in -1.0e3f64..1.0e3,
            h in 1.0e-3f64..1.0e3,
            lambda in 0.0f64..10.0,
        ) {
            let evaluator = SplitEvaluator::new(GainFormula::Multiplicative, lambda);
            let weight = evaluator.leaf_weight(GradientSums::new(g, h)).unwrap();
            prop_assert_eq!(weight, -g / (h + lambda));
        }
    }
}
