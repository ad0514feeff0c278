//! Configuration management for newton-gbt.
//!
//! Hyperparameters are validated once, up front, and then handed to the
//! boosting driver. The tree builder only ever sees the immutable
//! [`TreeParams`] subset.

pub mod core;

pub use self::core::{Config, ConfigBuilder, TreeParams};
