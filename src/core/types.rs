//! Core data types for newton-gbt.
//!
//! Numeric aliases used across the crate and the closed-set strategy enums
//! selected at configuration time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Feature value type stored in the sample matrix.
pub type FeatureValue = f64;

/// Prediction, gradient and leaf weight type.
pub type Score = f64;

/// Target value type.
pub type Label = f64;

/// Feature index type for identifying columns of the sample matrix.
pub type FeatureIndex = usize;

/// Tree node identifier type (index into a tree's node arena).
pub type NodeIndex = usize;

/// Boosting round number type.
pub type IterationIndex = usize;

/// Loss function used to derive gradients and hessians.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    /// Squared error, `(pred - y)^2`
    #[default]
    Squared,
    /// Logistic loss on log-odds predictions, labels in {0, 1}
    Logistic,
}

impl fmt::Display for LossType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LossType::Squared => write!(f, "squared"),
            LossType::Logistic => write!(f, "logistic"),
        }
    }
}

impl std::str::FromStr for LossType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "squared" | "mse" | "regression" => Ok(LossType::Squared),
            "logistic" | "binary" => Ok(LossType::Logistic),
            other => Err(format!("unknown loss '{}'", other)),
        }
    }
}

/// Node score used by split gain computation.
///
/// `Multiplicative` reproduces the reference trainer, which multiplies by the
/// regularized hessian: `-(g^2 / 2) * (h + lambda)`. `Standard` is the
/// conventional second-order score `-g^2 / (2 * (h + lambda))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GainFormula {
    /// `-(g^2 / 2) * (h + lambda)`
    #[default]
    Multiplicative,
    /// `-g^2 / (2 * (h + lambda))`
    Standard,
}

impl fmt::Display for GainFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GainFormula::Multiplicative => write!(f, "multiplicative"),
            GainFormula::Standard => write!(f, "standard"),
        }
    }
}

impl std::str::FromStr for GainFormula {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "multiplicative" => Ok(GainFormula::Multiplicative),
            "standard" => Ok(GainFormula::Standard),
            other => Err(format!("unknown gain formula '{}'", other)),
        }
    }
}

/// Which feature value is recorded as the split threshold.
///
/// The reference trainer records the value of the node-local row sitting at
/// the scan position in the node's *unsorted* order (`ScanRow`). The
/// `SortedBoundary` variant records the value of the last sorted row on the
/// left side of the boundary, so routing reproduces the training partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMode {
    /// Value of the unsorted row at the scan position
    #[default]
    ScanRow,
    /// Value of the sorted row at the boundary
    SortedBoundary,
}

impl fmt::Display for ThresholdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdMode::ScanRow => write!(f, "scan_row"),
            ThresholdMode::SortedBoundary => write!(f, "sorted_boundary"),
        }
    }
}

impl std::str::FromStr for ThresholdMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scan_row" => Ok(ThresholdMode::ScanRow),
            "sorted_boundary" => Ok(ThresholdMode::SortedBoundary),
            other => Err(format!("unknown threshold mode '{}'", other)),
        }
    }
}

/// How the per-tree shrink factor takes part in prediction.
///
/// Each tree records a nominal shrink factor (1.0 for the first round, the
/// configured rate afterwards). `Recorded` keeps it as metadata only, matching
/// the reference trainer; `Applied` multiplies every leaf output by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShrinkageMode {
    /// Shrink factor is stored on each tree but never scales outputs
    #[default]
    Recorded,
    /// Leaf outputs are multiplied by the tree's shrink factor
    Applied,
}

impl fmt::Display for ShrinkageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShrinkageMode::Recorded => write!(f, "recorded"),
            ShrinkageMode::Applied => write!(f, "applied"),
        }
    }
}

impl std::str::FromStr for ShrinkageMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "recorded" => Ok(ShrinkageMode::Recorded),
            "applied" => Ok(ShrinkageMode::Applied),
            other => Err(format!("unknown shrinkage mode '{}'", other)),
        }
    }
}

/// Sums of gradients and hessians over a set of rows.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GradientSums {
    /// Sum of first derivatives
    pub gradient: f64,
    /// Sum of second derivatives
    pub hessian: f64,
}

impl GradientSums {
    /// Creates a new pair of sums.
    pub fn new(gradient: f64, hessian: f64) -> Self {
        GradientSums { gradient, hessian }
    }

    /// Adds one row's gradient and hessian.
    pub fn add(&mut self, gradient: f64, hessian: f64) {
        self.gradient += gradient;
        self.hessian += hessian;
    }
}

impl std::ops::Sub for GradientSums {
    type Output = GradientSums;

    fn sub(self, rhs: GradientSums) -> GradientSums {
        GradientSums {
            gradient: self.gradient - rhs.gradient,
            hessian: self.hessian - rhs.hessian,
        }
    }
}
