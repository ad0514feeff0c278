//! Split scoring and exact greedy split search.

pub mod evaluator;
pub mod finder;

pub use evaluator::SplitEvaluator;
pub use finder::{SplitFinder, SplitInfo};
