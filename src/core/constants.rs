//! Default hyperparameters for newton-gbt.
//!
//! Numeric hyperparameter defaults only. The loss is chosen separately and
//! defaults to [`LossType::Squared`](crate::core::types::LossType::Squared).

/// Crate version string.
pub const NEWTON_GBT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of boosting rounds.
pub const DEFAULT_NUM_ROUNDS: usize = 100;

/// Default maximum splitting depth. Leaves may sit one level deeper.
pub const DEFAULT_MAX_DEPTH: usize = 6;

/// Default nominal shrinkage rate for rounds after the first.
pub const DEFAULT_SHRINKAGE_RATE: f64 = 0.3;

/// Default minimum gain required to keep a split.
pub const DEFAULT_MIN_SPLIT_GAIN: f64 = 0.0;

/// Default minimum number of rows a node needs before split search.
pub const DEFAULT_MIN_NODE_SIZE: usize = 1;

/// Default L2 leaf regularization.
pub const DEFAULT_LAMBDA: f64 = 0.1;

/// Prefix of environment variables read by `Config::apply_environment_overrides`.
pub const ENV_PREFIX: &str = "NEWTON_GBT_";
