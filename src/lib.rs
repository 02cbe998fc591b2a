//! carprep - Used-car listings preprocessing
//!
//! Turns a raw CSV of used-car listings into a cleaned, feature-engineered,
//! label-encoded and standardized CSV ready for a price regression model.
//!
//! # Modules
//!
//! - [`preprocessing`] - Cleaning, feature derivation, encoding, scaling, splitting
//! - [`utils`] - CSV loading and saving
//! - [`cli`] - Command-line interface

// Core error handling
pub mod error;

pub mod preprocessing;
pub mod utils;

// Services
pub mod cli;

pub use error::{PrepError, Result};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{PrepError, Result};

    // Preprocessing
    pub use crate::preprocessing::{
        clean_data, encode_features, feature_engineering, normalize_features, preprocess_data,
        train_test_split, transform_frame, CleaningReport, FittedArtifacts, LabelEncoder,
        PipelineReport, PreprocessOutcome, PreprocessingConfig, SplitResult, StandardScaler,
    };

    // I/O
    pub use crate::utils::{load_csv, save_csv, DataLoader};
}
