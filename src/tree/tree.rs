//! Regression tree produced by one boosting round.
//!
//! Nodes are stored in a contiguous arena in strict pre-order: the root sits
//! at index 0 and every split node is followed by its complete left subtree,
//! then its right subtree.

use crate::core::types::{FeatureValue, NodeIndex, Score, ShrinkageMode};
use crate::tree::node::{NodeKind, TreeNode};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Immutable regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// Node arena (index 0 is always the root)
    nodes: Vec<TreeNode>,
    /// Number of leaf nodes
    num_leaves: usize,
    /// Nominal shrink factor of the round that built the tree
    shrinkage: f64,
    /// Deepest node depth (root is depth 0)
    max_depth: usize,
}

impl Tree {
    /// Wraps a finished node arena.
    pub fn from_nodes(nodes: Vec<TreeNode>, shrinkage: f64) -> Self {
        let num_leaves = nodes.iter().filter(|n| n.is_leaf()).count();
        let max_depth = nodes.iter().map(TreeNode::depth).max().unwrap_or(0);
        Tree {
            nodes,
            num_leaves,
            shrinkage,
            max_depth,
        }
    }

    /// Returns the number of nodes in the tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of leaf nodes in the tree.
    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    /// Returns the depth of the deepest node.
    pub fn depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the recorded shrink factor.
    pub fn shrinkage(&self) -> f64 {
        self.shrinkage
    }

    /// Returns a reference to the node at the given index.
    pub fn node(&self, index: NodeIndex) -> Option<&TreeNode> {
        self.nodes.get(index)
    }

    /// All nodes in pre-order.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Returns the root node of the tree.
    pub fn root(&self) -> &TreeNode {
        &self.nodes[0]
    }

    /// Arena index of the leaf a row is routed to.
    ///
    /// Goes left when `row[feature] <= threshold`. Panics if the row is
    /// narrower than a split feature index.
    pub fn leaf_index(&self, row: &ArrayView1<'_, FeatureValue>) -> NodeIndex {
        let mut index = 0;
        loop {
            match self.nodes[index].kind() {
                NodeKind::Leaf { .. } => return index,
                NodeKind::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    index = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Leaf weight reached by a row.
    pub fn predict(&self, row: &ArrayView1<'_, FeatureValue>) -> Score {
        self.nodes[self.leaf_index(row)]
            .leaf_weight()
            .unwrap_or(0.0)
    }

    /// Contribution of this tree to a row's ensemble score.
    pub fn output(&self, row: &ArrayView1<'_, FeatureValue>, mode: ShrinkageMode) -> Score {
        match mode {
            ShrinkageMode::Recorded => self.predict(row),
            ShrinkageMode::Applied => self.predict(row) * self.shrinkage,
        }
    }

    /// Creates a string representation of the tree structure.
    pub fn to_string_representation(&self) -> String {
        if self.nodes.is_empty() {
            return "Empty tree".to_string();
        }

        let mut result = String::new();
        self.tree_to_string_recursive(0, "", true, &mut result);
        result
    }

    fn tree_to_string_recursive(
        &self,
        node_index: NodeIndex,
        prefix: &str,
        is_last: bool,
        result: &mut String,
    ) {
        let node = match self.nodes.get(node_index) {
            Some(node) => node,
            None => return,
        };

        let connector = if is_last { "└── " } else { "├── " };
        result.push_str(&format!("{}{}{}\n", prefix, connector, node));

        if let Some((left, right)) = node.children() {
            let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
            self.tree_to_string_recursive(left, &child_prefix, false, result);
            self.tree_to_string_recursive(right, &child_prefix, true, result);
        }
    }

    /// Validates the tree structure.
    ///
    /// Checks pre-order layout, parent links, child depths and that every
    /// split partitions its rows into two non-empty disjoint sets whose union
    /// is the parent's rows.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.nodes.is_empty() {
            return Err(anyhow::anyhow!("Tree has no nodes"));
        }

        if self.nodes[0].parent().is_some() {
            return Err(anyhow::anyhow!("Root node should not have a parent"));
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if node.rows().is_empty() {
                return Err(anyhow::anyhow!("Node {} has no rows", i));
            }

            let (left, right) = match node.children() {
                Some(children) => children,
                None => continue,
            };

            if left != i + 1 || right <= left || right >= self.nodes.len() {
                return Err(anyhow::anyhow!(
                    "Node {} children ({}, {}) break pre-order layout",
                    i,
                    left,
                    right
                ));
            }

            for child in [left, right] {
                let child_node = &self.nodes[child];
                if child_node.parent() != Some(i) {
                    return Err(anyhow::anyhow!("Child {} parent mismatch", child));
                }
                if child_node.depth() != node.depth() + 1 {
                    return Err(anyhow::anyhow!("Child {} depth mismatch", child));
                }
            }

            let left_rows: HashSet<usize> = self.nodes[left].rows().iter().copied().collect();
            let right_rows: HashSet<usize> = self.nodes[right].rows().iter().copied().collect();
            let parent_rows: HashSet<usize> = node.rows().iter().copied().collect();

            if !left_rows.is_disjoint(&right_rows) {
                return Err(anyhow::anyhow!("Children of node {} share rows", i));
            }
            let union: HashSet<usize> = left_rows.union(&right_rows).copied().collect();
            if union != parent_rows || left_rows.len() + right_rows.len() != node.rows().len() {
                return Err(anyhow::anyhow!(
                    "Children of node {} do not partition its rows",
                    i
                ));
            }
        }

        let leaf_count = self.nodes.iter().filter(|n| n.is_leaf()).count();
        if leaf_count != self.num_leaves {
            return Err(anyhow::anyhow!(
                "Leaf count mismatch: expected {}, found {}",
                self.num_leaves,
                leaf_count
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tree(nodes={}, leaves={}, depth={}, shrinkage={})",
            self.num_nodes(),
            self.num_leaves(),
            self.depth(),
            self.shrinkage()
        )
    }
}
