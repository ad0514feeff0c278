//! # newton-gbt
//!
//! Second-order (Newton) gradient boosted regression trees with exact greedy
//! split search, in pure Rust.
//!
//! Each boosting round evaluates the loss at the current ensemble's
//! predictions, grows one regression tree on the resulting gradients and
//! hessians, and appends it to the ensemble. Leaf values are the regularized
//! Newton step `-G / (H + lambda)`.
//!
//! ## Features
//!
//! - **Exact greedy splits**: every boundary between distinct feature values
//!   is scored; no histograms or binning.
//! - **Squared and logistic loss** selected at configuration time.
//! - **Reference-compatible defaults**: the node score, threshold recording
//!   and shrinkage behavior of the reference trainer are reproduced by
//!   default and can each be switched to the conventional variant.
//! - **Deterministic**: two runs on the same data build identical trees.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use newton_gbt::{ConfigBuilder, Dataset, GainFormula, GBDT};
//! use ndarray::{array, Array2};
//!
//! # fn main() -> newton_gbt::Result<()> {
//! let features = array![[1.0], [2.0], [3.0], [4.0]];
//! let labels = array![1.0, 1.0, 10.0, 10.0];
//! let dataset = Dataset::new(features, labels)?;
//!
//! let config = ConfigBuilder::new()
//!     .num_rounds(10)
//!     .max_depth(2)
//!     .gain_formula(GainFormula::Standard)
//!     .build()?;
//!
//! let mut model = GBDT::new(config)?;
//! let history = model.train(&dataset)?;
//! println!("final loss: {:?}", history.final_loss());
//!
//! let test = Array2::from_shape_vec((1, 1), vec![3.5]).unwrap();
//! println!("{:?}", model.predict_batch(&test.view())?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`core`]: error type, numeric aliases, strategy enums and defaults
//! - [`config`]: hyperparameters, validation, file and environment loading
//! - [`objective`]: loss functions (gradients, hessians, mean loss)
//! - [`tree`]: split search and recursive tree construction
//! - [`boosting`]: the boosting driver and the tree ensemble
//! - [`dataset`]: validated training data and the delimited-file loader
//! - [`metrics`]: post-training evaluation

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod boosting;
pub mod config;
pub mod core;
pub mod dataset;
pub mod metrics;
pub mod objective;
pub mod tree;

pub use boosting::{Ensemble, RoundRecord, TrainingHistory, GBDT};
pub use config::{Config, ConfigBuilder, TreeParams};
pub use self::core::{
    constants::*,
    error::{DatasetError, GbtError, Result},
    types::*,
};
pub use dataset::Dataset;
#[cfg(feature = "csv")]
pub use dataset::{CsvLoader, LoaderConfig};
pub use objective::{sigmoid, LossEvaluation};
pub use tree::{NodeKind, Tree, TreeBuilder, TreeNode};

pub use self::core::constants::NEWTON_GBT_VERSION as VERSION;

/// Initialize `env_logger` for the library's `log` output.
///
/// Safe to call multiple times; only the first call installs a logger.
pub fn init_logging() {
    self::core::initialize_logging();
}
