//! Preprocessing configuration

use crate::error::{PrepError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reference year used to derive `car_age`
pub const DEFAULT_CURRENT_YEAR: i32 = 2024;

/// Column holding the regression target
pub const DEFAULT_TARGET_COLUMN: &str = "selling_price";

/// Fraction of rows held out by the splitter
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Seed for the splitter shuffle
pub const DEFAULT_RANDOM_STATE: u64 = 42;

/// Categorical columns that get label-encoded when present
pub const CATEGORICAL_COLUMNS: [&str; 4] = ["fuel", "seller_type", "transmission", "owner"];

/// Numeric columns that get standardized when present
pub const SCALE_COLUMNS: [&str; 2] = ["km_driven", "car_age"];

/// Columns removed after `car_age` is derived
pub const DROP_COLUMNS: [&str; 2] = ["name", "year"];

/// Configuration for the preprocessing pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessingConfig {
    /// Reference year for `car_age = current_year - year`
    pub current_year: i32,

    /// Target column, never scaled and used as the split label
    pub target_column: String,

    /// Fraction of rows placed in the test split
    pub test_size: f64,

    /// Random seed for reproducible splits
    pub random_state: u64,

    /// Columns to label-encode
    pub categorical_columns: Vec<String>,

    /// Columns to standardize
    pub scale_columns: Vec<String>,

    /// Columns dropped by the feature deriver
    pub drop_columns: Vec<String>,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            current_year: DEFAULT_CURRENT_YEAR,
            target_column: DEFAULT_TARGET_COLUMN.to_string(),
            test_size: DEFAULT_TEST_SIZE,
            random_state: DEFAULT_RANDOM_STATE,
            categorical_columns: CATEGORICAL_COLUMNS.iter().map(|s| s.to_string()).collect(),
            scale_columns: SCALE_COLUMNS.iter().map(|s| s.to_string()).collect(),
            drop_columns: DROP_COLUMNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PreprocessingConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PrepError::NotFound(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Builder method to set the reference year
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    /// Builder method to set the target column
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target_column = target.into();
        self
    }

    /// Builder method to set the test fraction
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    /// Builder method to set the split seed
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    /// Check every parameter, including the split settings
    pub fn validate(&self) -> Result<()> {
        self.validate_transform()?;
        validate_test_size(self.test_size)
    }

    /// Check only the parameters the preprocessing stages read
    pub fn validate_transform(&self) -> Result<()> {
        if self.target_column.is_empty() {
            return Err(PrepError::InvalidParameter {
                name: "target_column".to_string(),
                value: String::new(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn categorical_refs(&self) -> Vec<&str> {
        self.categorical_columns.iter().map(|s| s.as_str()).collect()
    }

    pub(crate) fn scale_refs(&self) -> Vec<&str> {
        self.scale_columns.iter().map(|s| s.as_str()).collect()
    }

    pub(crate) fn drop_refs(&self) -> Vec<&str> {
        self.drop_columns.iter().map(|s| s.as_str()).collect()
    }
}

pub(crate) fn validate_test_size(test_size: f64) -> Result<()> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(PrepError::InvalidParameter {
            name: "test_size".to_string(),
            value: test_size.to_string(),
            reason: "must be strictly between 0 and 1".to_string(),
        });
    }
    Ok(())
}
