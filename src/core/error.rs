//! Error handling and error types for newton-gbt.
//!
//! All fallible operations in the crate return [`Result`], built on the single
//! [`GbtError`] enum. Configuration-class failures (bad hyperparameters,
//! malformed datasets) are fatal and surface at construction or at train
//! entry; numerical failures carry enough context to locate the offending
//! node.

use std::io;
use thiserror::Error;

/// Main error type for the newton-gbt library.
#[derive(Error, Debug)]
pub enum GbtError {
    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid hyperparameter values
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Dataset-related errors
    #[error("Dataset error: {message}")]
    Dataset { message: String },

    /// Dimension mismatch errors
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Numerical computation errors (zero denominators, non-finite weights)
    #[error("Numerical error: {message}")]
    Numerical { message: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// CSV parsing errors
    #[cfg(feature = "csv")]
    #[error("CSV parsing error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// TOML parsing errors
    #[error("TOML parsing error: {source}")]
    TomlDe {
        #[from]
        source: toml::de::Error,
    },

    /// TOML serialization errors
    #[error("TOML serialization error: {source}")]
    TomlSer {
        #[from]
        source: toml::ser::Error,
    },
}

/// Dataset validation failures, converted into [`GbtError::Dataset`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    #[error("Empty dataset provided")]
    Empty,

    #[error("Dataset has no feature columns")]
    NoFeatures,

    #[error("Row count mismatch: features have {features} rows, labels have {labels}")]
    RowCountMismatch { features: usize, labels: usize },

    #[error("Feature {column} of row {row} is not finite: {value}")]
    NonFiniteFeature { row: usize, column: usize, value: f64 },

    #[error("Label of row {row} is not finite: {value}")]
    NonFiniteLabel { row: usize, value: f64 },

    #[error("Label of row {row} must be 0 or 1 for logistic loss, got {value}")]
    NonBinaryLabel { row: usize, value: f64 },
}

/// Type alias for Results using GbtError
pub type Result<T> = std::result::Result<T, GbtError>;

impl GbtError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        GbtError::Config {
            message: message.into(),
        }
    }

    /// Create a dataset error
    pub fn dataset<S: Into<String>>(message: S) -> Self {
        GbtError::Dataset {
            message: message.into(),
        }
    }

    /// Create a numerical error
    pub fn numerical<S: Into<String>>(message: S) -> Self {
        GbtError::Numerical {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        GbtError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        GbtError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// True for the configuration class of failures: bad hyperparameters,
    /// empty or misaligned datasets. These are raised before any tree is built.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            GbtError::Config { .. }
                | GbtError::InvalidParameter { .. }
                | GbtError::Dataset { .. }
                | GbtError::DimensionMismatch { .. }
        )
    }
}

impl From<DatasetError> for GbtError {
    fn from(err: DatasetError) -> Self {
        match err {
            DatasetError::RowCountMismatch { features, labels } => GbtError::DimensionMismatch {
                expected: format!("{} labels", features),
                actual: format!("{} labels", labels),
            },
            other => GbtError::Dataset {
                message: other.to_string(),
            },
        }
    }
}

/// Convenience macros for error creation
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::GbtError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::GbtError::config(format!($fmt, $($arg)*))
    };
}
