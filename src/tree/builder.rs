//! Recursive exact-greedy tree construction.
//!
//! A node becomes a leaf when it is deeper than `max_depth`, holds fewer than
//! `min_node_size` rows, has no admissible split, or its best gain is below
//! `min_split_gain`. Otherwise it splits and both children are built, left
//! first, each from its own copy of the rows.

use crate::config::TreeParams;
use crate::core::error::{GbtError, Result};
use crate::core::types::NodeIndex;
use crate::tree::node::TreeNode;
use crate::tree::sample::NodeSample;
use crate::tree::split::{SplitEvaluator, SplitFinder};
use crate::tree::tree::Tree;
use log::{debug, trace};

/// Builds one regression tree from gradients and hessians.
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder<'a> {
    params: &'a TreeParams,
    finder: SplitFinder<'a>,
    evaluator: SplitEvaluator,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(params: &'a TreeParams) -> Self {
        TreeBuilder {
            params,
            finder: SplitFinder::new(params),
            evaluator: SplitEvaluator::new(params.gain_formula, params.lambda),
        }
    }

    /// Grows a full tree over `sample`, tagging it with `shrinkage`.
    pub fn build(&self, sample: NodeSample, shrinkage: f64) -> Result<Tree> {
        let mut nodes = Vec::new();
        self.grow(&mut nodes, sample, 0, None)?;

        let tree = Tree::from_nodes(nodes, shrinkage);
        debug!(
            "Built tree with {} nodes, {} leaves, depth {}",
            tree.num_nodes(),
            tree.num_leaves(),
            tree.depth()
        );
        Ok(tree)
    }

    fn grow(
        &self,
        nodes: &mut Vec<TreeNode>,
        sample: NodeSample,
        depth: usize,
        parent: Option<NodeIndex>,
    ) -> Result<NodeIndex> {
        assert!(!sample.is_empty(), "tree node at depth {} received no rows", depth);

        let index = nodes.len();
        let sums = sample.sums();

        let split = if depth > self.params.max_depth || sample.len() < self.params.min_node_size {
            None
        } else {
            self.finder
                .find_best_split(&sample)
                .filter(|split| split.gain >= self.params.min_split_gain)
        };

        let split = match split {
            Some(split) => split,
            None => {
                let weight = self.evaluator.leaf_weight(sums).map_err(|e| match e {
                    GbtError::Numerical { message } => GbtError::numerical(format!(
                        "leaf at depth {} with {} rows: {}",
                        depth,
                        sample.len(),
                        message
                    )),
                    other => other,
                })?;
                nodes.push(TreeNode::new_leaf(depth, parent, sums, sample.into_rows(), weight));
                return Ok(index);
            }
        };

        trace!(
            "Split node {} at depth {} on feature {} <= {} (gain {:.6}, {} | {} rows)",
            index,
            depth,
            split.feature,
            split.threshold,
            split.gain,
            split.left_count,
            split.right_count
        );

        nodes.push(TreeNode::new_split(
            depth,
            parent,
            sums,
            sample.rows().to_vec(),
            split.feature,
            split.threshold,
            split.gain,
        ));

        let (left_sample, right_sample) = sample.split(split.left_rows(), split.right_rows());
        let left = self.grow(nodes, left_sample, depth + 1, Some(index))?;
        let right = self.grow(nodes, right_sample, depth + 1, Some(index))?;
        nodes[index].set_children(left, right);

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{GainFormula, ThresholdMode};
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, Array2};

    fn params(max_depth: usize, formula: GainFormula) -> TreeParams {
        TreeParams {
            max_depth,
            min_split_gain: 0.0,
            min_node_size: 1,
            lambda: 0.0,
            gain_formula: formula,
            threshold_mode: ThresholdMode::SortedBoundary,
        }
    }

    fn squared_sample(features: Array2<f64>, labels: Array1<f64>) -> NodeSample {
        let gradients = labels.mapv(|y| -2.0 * y);
        let hessians = Array1::from_elem(labels.len(), 2.0);
        NodeSample::new(features.view(), gradients, hessians).unwrap()
    }

    #[test]
    fn test_regression_scenario_tree() {
        let sample = squared_sample(array![[1.0], [2.0], [3.0], [4.0]], array![1.0, 1.0, 10.0, 10.0]);
        let params = params(1, GainFormula::Standard);
        let tree = TreeBuilder::new(&params).build(sample, 1.0).unwrap();

        assert_eq!(tree.num_nodes(), 3);
        assert_eq!(tree.node(1).unwrap().rows(), &[0, 1]);
        assert_eq!(tree.node(2).unwrap().rows(), &[2, 3]);
        assert_abs_diff_eq!(tree.node(1).unwrap().leaf_weight().unwrap(), 1.0);
        assert_abs_diff_eq!(tree.node(2).unwrap().leaf_weight().unwrap(), 10.0);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_min_node_size_forces_leaf() {
        let sample = squared_sample(array![[1.0], [2.0], [3.0], [4.0]], array![1.0, 1.0, 10.0, 10.0]);
        let mut params = params(3, GainFormula::Standard);
        params.min_node_size = 5;
        let tree = TreeBuilder::new(&params).build(sample, 1.0).unwrap();
        assert_eq!(tree.num_nodes(), 1);
        assert_abs_diff_eq!(tree.root().leaf_weight().unwrap(), 5.5);
    }

    #[test]
    fn test_min_split_gain_forces_leaf() {
        let sample = squared_sample(array![[1.0], [2.0], [3.0], [4.0]], array![1.0, 1.0, 10.0, 10.0]);
        let mut params = params(3, GainFormula::Standard);
        params.min_split_gain = 100.0;
        let tree = TreeBuilder::new(&params).build(sample, 1.0).unwrap();
        assert!(tree.root().is_leaf());
    }

    #[test]
    fn test_leaves_may_sit_below_max_depth() {
        // Each level separates one more row, so every depth can split.
        let features = array![[1.0], [2.0], [3.0], [4.0], [5.0], [6.0], [7.0], [8.0]];
        let labels = array![0.0, 10.0, 0.0, 10.0, 0.0, 10.0, 0.0, 10.0];
        let sample = squared_sample(features, labels);
        let params = params(1, GainFormula::Standard);
        let tree = TreeBuilder::new(&params).build(sample, 1.0).unwrap();

        for node in tree.nodes() {
            if node.is_leaf() {
                assert!(node.depth() <= 2);
            } else {
                assert!(node.depth() <= 1);
            }
        }
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_zero_denominator_leaf_is_numerical_error() {
        let features = array![[1.0], [1.0]];
        let sample = NodeSample::new(features.view(), array![1.0, -3.0], array![0.0, 0.0]).unwrap();
        let params = params(2, GainFormula::Standard);
        let err = TreeBuilder::new(&params).build(sample, 1.0).unwrap_err();
        match err {
            GbtError::Numerical { message } => {
                assert!(message.starts_with("leaf at depth 0 with 2 rows: leaf hessian sum"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    #[should_panic(expected = "received no rows")]
    fn test_empty_node_sample_panics() {
        let features = Array2::<f64>::zeros((0, 1));
        let sample = NodeSample::new(features.view(), Array1::zeros(0), Array1::zeros(0)).unwrap();
        let params = params(2, GainFormula::Standard);
        let builder = TreeBuilder::new(&params);
        let _ = builder.grow(&mut Vec::new(), sample, 0, None);
    }
}
