//! Training data for newton-gbt.
//!
//! A [`Dataset`] is an immutable sample matrix with one aligned label per row.
//! It is validated once at construction; nothing downstream re-checks shape
//! or finiteness.

#[cfg(feature = "csv")]
pub mod loader;

#[cfg(feature = "csv")]
pub use loader::{CsvLoader, LoaderConfig};

use crate::core::error::{DatasetError, GbtError, Result};
use crate::core::types::{FeatureValue, Label};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Feature matrix plus aligned labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Array2<FeatureValue>,
    labels: Array1<Label>,
    feature_names: Option<Vec<String>>,
}

impl Dataset {
    /// Creates a dataset, rejecting empty, misaligned or non-finite input.
    pub fn new(features: Array2<FeatureValue>, labels: Array1<Label>) -> Result<Self> {
        if features.nrows() == 0 || labels.is_empty() {
            return Err(DatasetError::Empty.into());
        }
        if features.ncols() == 0 {
            return Err(DatasetError::NoFeatures.into());
        }
        if features.nrows() != labels.len() {
            return Err(DatasetError::RowCountMismatch {
                features: features.nrows(),
                labels: labels.len(),
            }
            .into());
        }

        for ((row, column), &value) in features.indexed_iter() {
            if !value.is_finite() {
                return Err(DatasetError::NonFiniteFeature { row, column, value }.into());
            }
        }
        for (row, &value) in labels.iter().enumerate() {
            if !value.is_finite() {
                return Err(DatasetError::NonFiniteLabel { row, value }.into());
            }
        }

        Ok(Dataset {
            features,
            labels,
            feature_names: None,
        })
    }

    /// Attaches column names, one per feature.
    pub fn with_feature_names(mut self, names: Vec<String>) -> Result<Self> {
        if names.len() != self.num_features() {
            return Err(GbtError::dimension_mismatch(
                format!("{} feature names", self.num_features()),
                format!("{} feature names", names.len()),
            ));
        }
        self.feature_names = Some(names);
        Ok(self)
    }

    /// Number of rows.
    pub fn num_data(&self) -> usize {
        self.features.nrows()
    }

    /// Number of feature columns.
    pub fn num_features(&self) -> usize {
        self.features.ncols()
    }

    pub fn features(&self) -> ArrayView2<'_, FeatureValue> {
        self.features.view()
    }

    pub fn labels(&self) -> ArrayView1<'_, Label> {
        self.labels.view()
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}
