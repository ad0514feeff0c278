//! Exact greedy split search.
//!
//! For every feature the node's rows are stable-sorted by value and every
//! boundary between two distinct values is scored. The first
//! (feature, position) reaching the highest strictly positive gain wins.

use crate::config::TreeParams;
use crate::core::types::{FeatureIndex, FeatureValue, GradientSums, ThresholdMode};
use crate::tree::sample::NodeSample;
use crate::tree::split::evaluator::SplitEvaluator;

/// The best split found for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitInfo {
    /// Feature the split tests
    pub feature: FeatureIndex,
    /// Boundary position in the sorted order; rows `..=position` go left
    pub position: usize,
    /// Recorded threshold, chosen by [`ThresholdMode`]
    pub threshold: FeatureValue,
    /// Split gain
    pub gain: f64,
    /// Left child statistics
    pub left_sums: GradientSums,
    pub left_count: usize,
    /// Right child statistics
    pub right_sums: GradientSums,
    pub right_count: usize,
    /// Node-local rows sorted by the split feature
    pub ordering: Vec<usize>,
}

impl SplitInfo {
    /// Node-local rows routed to the left child.
    pub fn left_rows(&self) -> &[usize] {
        &self.ordering[..=self.position]
    }

    /// Node-local rows routed to the right child.
    pub fn right_rows(&self) -> &[usize] {
        &self.ordering[self.position + 1..]
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    feature: FeatureIndex,
    position: usize,
    gain: f64,
    left_sums: GradientSums,
}

/// Exhaustive split finder over unbinned feature values.
#[derive(Debug, Clone, Copy)]
pub struct SplitFinder<'a> {
    params: &'a TreeParams,
    evaluator: SplitEvaluator,
}

impl<'a> SplitFinder<'a> {
    /// Creates a finder for the given hyperparameters.
    pub fn new(params: &'a TreeParams) -> Self {
        SplitFinder {
            params,
            evaluator: SplitEvaluator::new(params.gain_formula, params.lambda),
        }
    }

    /// Scores every boundary of every feature and returns the best admissible
    /// one, if any.
    pub fn find_best_split(&self, sample: &NodeSample) -> Option<SplitInfo> {
        let n = sample.len();
        if n < 2 {
            return None;
        }

        let features = sample.features();
        let gradients = sample.gradients();
        let hessians = sample.hessians();
        let total = sample.sums();

        let mut best: Option<Candidate> = None;
        let mut best_ordering = Vec::new();

        for feature in 0..sample.num_features() {
            let column = features.column(feature);
            let mut ordering: Vec<usize> = (0..n).collect();
            ordering.sort_by(|&a, &b| column[a].total_cmp(&column[b]));

            let mut improved = false;
            let mut left = GradientSums::default();

            for position in 0..n - 1 {
                let row = ordering[position];
                left.add(gradients[row], hessians[row]);

                // Equal values cannot be separated by a `<=` threshold.
                if column[row] == column[ordering[position + 1]] {
                    continue;
                }

                let gain = match self.evaluator.split_gain(total, left, total - left) {
                    Some(gain) if gain > 0.0 => gain,
                    _ => continue,
                };

                if best.map_or(true, |b| gain > b.gain) {
                    best = Some(Candidate {
                        feature,
                        position,
                        gain,
                        left_sums: left,
                    });
                    improved = true;
                }
            }

            if improved {
                best_ordering = ordering;
            }
        }

        let best = best?;
        let threshold = match self.params.threshold_mode {
            ThresholdMode::ScanRow => features[[best.position, best.feature]],
            ThresholdMode::SortedBoundary => features[[best_ordering[best.position], best.feature]],
        };

        Some(SplitInfo {
            feature: best.feature,
            position: best.position,
            threshold,
            gain: best.gain,
            left_sums: best.left_sums,
            left_count: best.position + 1,
            right_sums: total - best.left_sums,
            right_count: n - best.position - 1,
            ordering: best_ordering,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::GainFormula;
    use ndarray::{array, Array1, Array2};

    fn params(formula: GainFormula, mode: ThresholdMode) -> TreeParams {
        TreeParams {
            max_depth: 1,
            min_split_gain: 0.0,
            min_node_size: 1,
            lambda: 0.0,
            gain_formula: formula,
            threshold_mode: mode,
        }
    }

    fn squared_gradients(labels: &Array1<f64>) -> (Array1<f64>, Array1<f64>) {
        (labels.mapv(|y| -2.0 * y), Array1::from_elem(labels.len(), 2.0))
    }

    #[test]
    fn test_regression_scenario_split() {
        let features = array![[1.0], [2.0], [3.0], [4.0]];
        let (g, h) = squared_gradients(&array![1.0, 1.0, 10.0, 10.0]);
        let sample = NodeSample::new(features.view(), g, h).unwrap();

        let params = params(GainFormula::Standard, ThresholdMode::SortedBoundary);
        let split = SplitFinder::new(&params).find_best_split(&sample).unwrap();

        assert_eq!(split.feature, 0);
        assert_eq!(split.position, 1);
        assert_eq!(split.threshold, 2.0);
        assert_eq!(split.gain, 81.0);
        assert_eq!(split.left_rows(), &[0, 1]);
        assert_eq!(split.right_rows(), &[2, 3]);
        assert_eq!(split.left_count, 2);
        assert_eq!(split.right_count, 2);
    }

    #[test]
    fn test_multiplicative_rejects_regression_scenario() {
        let features = array![[1.0], [2.0], [3.0], [4.0]];
        let (g, h) = squared_gradients(&array![1.0, 1.0, 10.0, 10.0]);
        let sample = NodeSample::new(features.view(), g, h).unwrap();

        let params = params(GainFormula::Multiplicative, ThresholdMode::ScanRow);
        assert!(SplitFinder::new(&params).find_best_split(&sample).is_none());
    }

    #[test]
    fn test_identical_values_have_no_candidate() {
        let features = Array2::from_elem((5, 2), 3.0);
        let (g, h) = squared_gradients(&array![1.0, 5.0, -2.0, 0.0, 7.0]);
        let sample = NodeSample::new(features.view(), g, h).unwrap();

        let params = params(GainFormula::Standard, ThresholdMode::ScanRow);
        assert!(SplitFinder::new(&params).find_best_split(&sample).is_none());
    }

    #[test]
    fn test_threshold_modes_differ_on_unsorted_rows() {
        let features = array![[4.0], [3.0], [2.0], [1.0]];
        let (g, h) = squared_gradients(&array![10.0, 10.0, 1.0, 1.0]);

        let scan = params(GainFormula::Standard, ThresholdMode::ScanRow);
        let sample = NodeSample::new(features.view(), g.clone(), h.clone()).unwrap();
        let split = SplitFinder::new(&scan).find_best_split(&sample).unwrap();
        assert_eq!(split.position, 1);
        assert_eq!(split.left_rows(), &[3, 2]);
        // Row 1 of the unsorted node holds 3.0.
        assert_eq!(split.threshold, 3.0);

        let sorted = params(GainFormula::Standard, ThresholdMode::SortedBoundary);
        let sample = NodeSample::new(features.view(), g, h).unwrap();
        let split = SplitFinder::new(&sorted).find_best_split(&sample).unwrap();
        assert_eq!(split.threshold, 2.0);
    }

    #[test]
    fn test_first_feature_wins_ties() {
        let features = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]];
        let (g, h) = squared_gradients(&array![1.0, 1.0, 10.0, 10.0]);
        let sample = NodeSample::new(features.view(), g, h).unwrap();

        let params = params(GainFormula::Standard, ThresholdMode::SortedBoundary);
        let split = SplitFinder::new(&params).find_best_split(&sample).unwrap();
        assert_eq!(split.feature, 0);
    }

    #[test]
    fn test_ties_in_values_keep_original_order() {
        let features = array![[2.0], [1.0], [2.0], [1.0]];
        let (g, h) = squared_gradients(&array![5.0, 0.0, 5.0, 0.0]);
        let sample = NodeSample::new(features.view(), g, h).unwrap();

        let params = params(GainFormula::Standard, ThresholdMode::SortedBoundary);
        let split = SplitFinder::new(&params).find_best_split(&sample).unwrap();
        assert_eq!(split.left_rows(), &[1, 3]);
        assert_eq!(split.right_rows(), &[0, 2]);
        assert_eq!(split.threshold, 1.0);
    }
}
