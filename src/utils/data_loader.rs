//! CSV loading and saving

use crate::error::{PrepError, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Tokens read as missing values, in addition to empty fields
pub const DEFAULT_NULL_VALUES: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// CSV data loader
#[derive(Debug, Clone)]
pub struct DataLoader {
    /// Rows scanned for schema inference; `None` scans the whole file
    infer_schema_length: Option<usize>,
    /// Field values parsed as null
    null_values: Vec<String>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    /// Create a new data loader
    pub fn new() -> Self {
        Self {
            infer_schema_length: None,
            null_values: DEFAULT_NULL_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Limit schema inference to the first `n` rows (`None` for all rows)
    pub fn with_infer_schema_length(mut self, n: Option<usize>) -> Self {
        self.infer_schema_length = n;
        self
    }

    /// Replace the set of null tokens
    pub fn with_null_values(mut self, values: Vec<String>) -> Self {
        self.null_values = values;
        self
    }

    /// Load a CSV file with a header row.
    ///
    /// The path is checked before parsing so a missing file is reported as
    /// [`PrepError::NotFound`] rather than a parser failure.
    pub fn load_csv(&self, path: impl AsRef<Path>) -> Result<DataFrame> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading data");

        if !path.exists() {
            return Err(PrepError::NotFound(path.to_path_buf()));
        }

        let null_values = NullValues::AllColumns(
            self.null_values.iter().map(|s| s.as_str().into()).collect(),
        );

        let parse_options = CsvParseOptions::default().with_null_values(Some(null_values));

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(self.infer_schema_length)
            .with_parse_options(parse_options)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;

        info!(rows = df.height(), columns = df.width(), "Data loaded");
        Ok(df)
    }
}

/// Save DataFrames to disk
pub struct DataSaver;

impl DataSaver {
    /// Save to CSV with a header row, creating the parent directory if needed
    pub fn save_csv(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                info!(dir = %parent.display(), "Created output directory");
            }
        }

        let mut file = File::create(path)?;
        CsvWriter::new(&mut file).include_header(true).finish(df)?;

        info!(path = %path.display(), rows = df.height(), "Data saved");
        Ok(())
    }
}

/// Load a CSV file with the default loader
pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    DataLoader::new().load_csv(path)
}

/// Save a frame to CSV with the default saver
pub fn save_csv(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<()> {
    DataSaver::save_csv(df, path)
}
