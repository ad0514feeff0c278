//! Row subsets owned by tree nodes during construction.

use crate::core::error::{GbtError, Result};
use crate::core::types::{FeatureValue, GradientSums, Score};
use ndarray::{Array1, Array2, ArrayView2, Axis};

/// The rows reaching one node while a tree is being built.
///
/// Every node owns its own copy of the feature rows, gradients and hessians;
/// children are produced by copying, so siblings never share storage.
/// `rows` keeps the original training-row id of each local row.
#[derive(Debug, Clone)]
pub struct NodeSample {
    features: Array2<FeatureValue>,
    gradients: Array1<Score>,
    hessians: Array1<Score>,
    rows: Vec<usize>,
}

impl NodeSample {
    /// Creates the root sample over a whole feature matrix.
    pub fn new(
        features: ArrayView2<'_, FeatureValue>,
        gradients: Array1<Score>,
        hessians: Array1<Score>,
    ) -> Result<Self> {
        let n = features.nrows();
        if gradients.len() != n || hessians.len() != n {
            return Err(GbtError::dimension_mismatch(
                format!("{} gradients and hessians", n),
                format!("{} gradients, {} hessians", gradients.len(), hessians.len()),
            ));
        }

        Ok(NodeSample {
            features: features.to_owned(),
            gradients,
            hessians,
            rows: (0..n).collect(),
        })
    }

    /// Number of rows in the sample.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no rows reached the node.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of feature columns.
    pub fn num_features(&self) -> usize {
        self.features.ncols()
    }

    /// Node-local feature matrix.
    pub fn features(&self) -> &Array2<FeatureValue> {
        &self.features
    }

    /// Node-local gradients.
    pub fn gradients(&self) -> &Array1<Score> {
        &self.gradients
    }

    /// Node-local hessians.
    pub fn hessians(&self) -> &Array1<Score> {
        &self.hessians
    }

    /// Original training-row ids, aligned with the local rows.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Gradient and hessian totals of the sample.
    pub fn sums(&self) -> GradientSums {
        GradientSums::new(self.gradients.sum(), self.hessians.sum())
    }

    /// Copies the given local rows, in the given order, into a new sample.
    pub fn select(&self, local: &[usize]) -> NodeSample {
        NodeSample {
            features: self.features.select(Axis(0), local),
            gradients: self.gradients.select(Axis(0), local),
            hessians: self.hessians.select(Axis(0), local),
            rows: local.iter().map(|&i| self.rows[i]).collect(),
        }
    }

    /// Consumes the sample and returns independent copies of the two sides.
    pub fn split(self, left: &[usize], right: &[usize]) -> (NodeSample, NodeSample) {
        (self.select(left), self.select(right))
    }

    /// Gives up the original row ids, dropping the copied data.
    pub fn into_rows(self) -> Vec<usize> {
        self.rows
    }
}
