//! Data preprocessing module
//!
//! Stages applied to a raw listings frame, in order:
//! - Cleaning: duplicate and missing-value removal
//! - Feature derivation: `car_age` from the model year
//! - Label encoding of categorical columns
//! - Standard scaling of numeric columns
//!
//! The train/test splitter is a separate utility run on processed data.

pub mod cleaner;
pub mod config;
pub mod encoder;
pub mod features;
pub mod pipeline;
pub mod scaler;
pub mod split;

pub use cleaner::{clean_data, CleaningReport};
pub use config::PreprocessingConfig;
pub use encoder::{encode_features, LabelEncoder, MISSING_CATEGORY};
pub use features::{feature_engineering, feature_engineering_with, CAR_AGE};
pub use pipeline::{
    preprocess_data, transform_frame, FittedArtifacts, PipelineReport, PreprocessOutcome,
};
pub use scaler::{normalize_features, ScalerParams, StandardScaler};
pub use split::{split_indices, train_test_split, SplitResult};
