//! Tree node representation.
//!
//! A node is either a leaf holding a weight or an interior split routing rows
//! to two children. Nodes live in their tree's arena and refer to each other
//! by index.

use crate::core::types::{FeatureIndex, FeatureValue, GradientSums, NodeIndex, Score};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Leaf or split payload of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Terminal node
    Leaf {
        /// Regularized Newton step for the node's rows
        weight: Score,
    },
    /// Interior node; rows with `row[feature] <= threshold` go left
    Split {
        feature: FeatureIndex,
        threshold: FeatureValue,
        gain: f64,
        left: NodeIndex,
        right: NodeIndex,
    },
}

/// One entry of a tree's node arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    depth: usize,
    parent: Option<NodeIndex>,
    sums: GradientSums,
    /// Original training-row ids that reached the node
    rows: Vec<usize>,
    kind: NodeKind,
}

impl TreeNode {
    /// Creates a leaf node.
    pub fn new_leaf(
        depth: usize,
        parent: Option<NodeIndex>,
        sums: GradientSums,
        rows: Vec<usize>,
        weight: Score,
    ) -> Self {
        TreeNode {
            depth,
            parent,
            sums,
            rows,
            kind: NodeKind::Leaf { weight },
        }
    }

    /// Creates an interior node whose children are not yet known.
    ///
    /// Child indices are filled in by [`TreeNode::set_children`] once both
    /// subtrees have been built.
    pub fn new_split(
        depth: usize,
        parent: Option<NodeIndex>,
        sums: GradientSums,
        rows: Vec<usize>,
        feature: FeatureIndex,
        threshold: FeatureValue,
        gain: f64,
    ) -> Self {
        TreeNode {
            depth,
            parent,
            sums,
            rows,
            kind: NodeKind::Split {
                feature,
                threshold,
                gain,
                left: 0,
                right: 0,
            },
        }
    }

    /// Records the arena indices of the children of a split node.
    pub fn set_children(&mut self, left_child: NodeIndex, right_child: NodeIndex) {
        if let NodeKind::Split { left, right, .. } = &mut self.kind {
            *left = left_child;
            *right = right_child;
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    pub fn sums(&self) -> GradientSums {
        self.sums
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn data_count(&self) -> usize {
        self.rows.len()
    }

    /// Leaf weight, `None` for split nodes.
    pub fn leaf_weight(&self) -> Option<Score> {
        match self.kind {
            NodeKind::Leaf { weight } => Some(weight),
            NodeKind::Split { .. } => None,
        }
    }

    /// `(left, right)` child indices, `None` for leaves.
    pub fn children(&self) -> Option<(NodeIndex, NodeIndex)> {
        match self.kind {
            NodeKind::Split { left, right, .. } => Some((left, right)),
            NodeKind::Leaf { .. } => None,
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Leaf { weight } => write!(
                f,
                "Leaf(weight={:.4}, data_count={}, sum_gradients={:.4}, sum_hessians={:.4})",
                weight,
                self.rows.len(),
                self.sums.gradient,
                self.sums.hessian
            ),
            NodeKind::Split {
                feature,
                threshold,
                gain,
                ..
            } => write!(
                f,
                "Split(feature={}, threshold={:.4}, gain={:.4}, data_count={})",
                feature,
                threshold,
                gain,
                self.rows.len()
            ),
        }
    }
}
