//! Append-only tree ensemble.
//!
//! The ensemble score of a row is the sum, in insertion order and starting
//! from 0.0, of every tree's output for that row.

use crate::core::types::{FeatureValue, Score, ShrinkageMode};
use crate::tree::Tree;
use ndarray::{Array1, ArrayView1, ArrayView2, Axis, Zip};
use serde::{Deserialize, Serialize};

/// Ordered collection of trees built by the boosting driver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ensemble {
    trees: Vec<Tree>,
    shrinkage_mode: ShrinkageMode,
}

impl Ensemble {
    /// Creates an empty ensemble.
    pub fn new(shrinkage_mode: ShrinkageMode) -> Self {
        Ensemble {
            trees: Vec::new(),
            shrinkage_mode,
        }
    }

    /// Appends a tree. Trees are never removed.
    pub fn push(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn shrinkage_mode(&self) -> ShrinkageMode {
        self.shrinkage_mode
    }

    /// Raw score of one row; 0.0 for an empty ensemble.
    pub fn predict(&self, row: &ArrayView1<'_, FeatureValue>) -> Score {
        let mut score = 0.0;
        for tree in &self.trees {
            score += tree.output(row, self.shrinkage_mode);
        }
        score
    }

    /// Raw scores of every row of a matrix.
    pub fn predict_batch(&self, features: &ArrayView2<'_, FeatureValue>) -> Array1<Score> {
        features
            .axis_iter(Axis(0))
            .map(|row| self.predict(&row))
            .collect()
    }

    /// Adds `tree`'s output for every row to a running score vector.
    ///
    /// Applying this once per appended tree yields the same values as
    /// `predict_batch` over the whole ensemble.
    pub fn accumulate(
        &self,
        tree: &Tree,
        features: &ArrayView2<'_, FeatureValue>,
        scores: &mut Array1<Score>,
    ) {
        Zip::from(scores)
            .and(features.rows())
            .for_each(|score, row| *score += tree.output(&row, self.shrinkage_mode));
    }
}
