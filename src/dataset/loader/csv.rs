//! CSV/TSV loader built on the `csv` crate.

use super::LoaderConfig;
use crate::core::error::{GbtError, Result};
use crate::dataset::Dataset;
use ::csv::{ReaderBuilder, StringRecord};
use ndarray::{Array1, Array2};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads a [`Dataset`] from a delimited text file.
#[derive(Debug, Clone, Default)]
pub struct CsvLoader {
    config: LoaderConfig,
}

impl CsvLoader {
    /// Creates a loader with the default tab-separated layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader from an explicit configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        CsvLoader { config }
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Set the label column index
    pub fn with_label_column(mut self, column: usize) -> Self {
        self.config.label_column = column;
        self
    }

    /// Set whether the first line is a header
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.config.has_header = has_header;
        self
    }

    /// Stop after this many data rows
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.config.max_rows = Some(max_rows);
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a dataset from a file path.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        log::info!("Loading dataset from {}", path.display());
        let file = File::open(path)?;
        self.load_from_reader(file)
    }

    /// Load a dataset from any reader.
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Dataset> {
        if !self.config.delimiter.is_ascii() {
            return Err(GbtError::config(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.config.delimiter
            )));
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter as u8)
            .has_headers(self.config.has_header)
            .trim(::csv::Trim::All)
            .from_reader(reader);

        let headers = if self.config.has_header {
            Some(reader.headers()?.clone())
        } else {
            None
        };

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            // Blank trailing lines show up as a single empty field.
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            records.push(record);
            if self.config.max_rows.map_or(false, |max| records.len() >= max) {
                break;
            }
        }

        if records.is_empty() {
            return Err(GbtError::dataset("File contains no data rows"));
        }

        let dataset = self.convert_to_dataset(&records, headers.as_ref())?;
        log::info!(
            "Loaded {} rows with {} features",
            dataset.num_data(),
            dataset.num_features()
        );
        Ok(dataset)
    }

    fn convert_to_dataset(
        &self,
        records: &[StringRecord],
        headers: Option<&StringRecord>,
    ) -> Result<Dataset> {
        let num_columns = records[0].len();
        let label_column = self.config.label_column;
        if label_column >= num_columns {
            return Err(GbtError::invalid_parameter(
                "label_column",
                label_column.to_string(),
                format!("file has only {} columns", num_columns),
            ));
        }

        let num_features = num_columns - 1;
        let mut features = Array2::zeros((records.len(), num_features));
        let mut labels = Array1::zeros(records.len());

        for (row, record) in records.iter().enumerate() {
            if record.len() != num_columns {
                return Err(GbtError::dataset(format!(
                    "Inconsistent column count at row {}: expected {}, got {}",
                    row,
                    num_columns,
                    record.len()
                )));
            }

            let mut feature = 0;
            for (column, field) in record.iter().enumerate() {
                let value: f64 = field.parse().map_err(|_| {
                    GbtError::dataset(format!(
                        "Cannot parse '{}' at row {}, column {} as a number",
                        field, row, column
                    ))
                })?;

                if column == label_column {
                    labels[row] = value;
                } else {
                    features[[row, feature]] = value;
                    feature += 1;
                }
            }
        }

        let dataset = Dataset::new(features, labels)?;
        match headers {
            Some(headers) => {
                let names = headers
                    .iter()
                    .enumerate()
                    .filter(|(column, _)| *column != label_column)
                    .map(|(_, name)| name.to_string())
                    .collect();
                dataset.with_feature_names(names)
            }
            None => Ok(dataset),
        }
    }
}
