//! Regression tree construction and evaluation.
//!
//! [`TreeBuilder`] grows one tree per boosting round from a [`NodeSample`]
//! using exact greedy split search; the resulting [`Tree`] is an immutable,
//! index-addressed arena of [`TreeNode`]s.

pub mod builder;
pub mod node;
pub mod sample;
pub mod split;
pub mod tree;

pub use builder::TreeBuilder;
pub use node::{NodeKind, TreeNode};
pub use sample::NodeSample;
pub use split::{SplitEvaluator, SplitFinder, SplitInfo};
pub use tree::Tree;
