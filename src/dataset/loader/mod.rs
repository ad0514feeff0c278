//! Delimited text file loading.
//!
//! Training files are plain text with one row per line, one numeric label
//! column and the remaining columns as features. Tab is the default
//! delimiter.

pub mod csv;

pub use self::csv::CsvLoader;

use serde::{Deserialize, Serialize};

/// Data loader configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Field delimiter
    pub delimiter: char,
    /// Zero-based index of the label column
    pub label_column: usize,
    /// Whether the first line holds column names
    pub has_header: bool,
    /// Maximum rows to read
    pub max_rows: Option<usize>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            delimiter: '\t',
            label_column: 0,
            has_header: false,
            max_rows: None,
        }
    }
}
