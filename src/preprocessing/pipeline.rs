//! End-to-end preprocessing pipeline

use crate::error::{PrepError, Result};
use crate::utils::{column_names, load_csv, save_csv};
use super::{
    cleaner::{clean_data, CleaningReport},
    config::PreprocessingConfig,
    encoder::{encode_features, LabelEncoder},
    features::feature_engineering_with,
    scaler::{normalize_features, StandardScaler},
};
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Fit state produced by a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FittedArtifacts {
    /// One label encoder per encoded column
    pub encoders: BTreeMap<String, LabelEncoder>,
    pub scaler: StandardScaler,
}

impl FittedArtifacts {
    /// Re-apply the fitted encoders and scaler to a frame that has already
    /// been cleaned and had `car_age` derived.
    ///
    /// Values unseen at fit time fail with [`PrepError::UnknownCategory`].
    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut result = df.clone();
        for encoder in self.encoders.values() {
            if result.column(encoder.column()).is_ok() {
                result = encoder.transform_column(&result)?;
            }
        }
        self.scaler.transform(&result)
    }

    /// Save as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), "Artifacts saved");
        Ok(())
    }

    /// Load from JSON written by [`FittedArtifacts::save`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PrepError::NotFound(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Summary of a pipeline run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineReport {
    pub cleaning: CleaningReport,
    /// (rows, columns) as loaded
    pub input_shape: (usize, usize),
    /// (rows, columns) as written
    pub output_shape: (usize, usize),
    pub columns: Vec<String>,
    pub elapsed_secs: f64,
}

/// Everything a pipeline run produces besides the CSV file
#[derive(Debug, Clone)]
pub struct PreprocessOutcome {
    pub data: DataFrame,
    pub artifacts: FittedArtifacts,
    pub report: PipelineReport,
}

/// Run the in-memory stages: clean, derive `car_age`, encode, scale
pub fn transform_frame(
    df: &DataFrame,
    config: &PreprocessingConfig,
) -> Result<(DataFrame, FittedArtifacts, CleaningReport)> {
    config.validate_transform()?;

    let (cleaned, cleaning) = clean_data(df)?;
    let derived = feature_engineering_with(&cleaned, config.current_year, &config.drop_refs())?;
    let (encoded, encoders) = encode_features(&derived, &config.categorical_refs())?;
    let (scaled, scaler) =
        normalize_features(&encoded, &config.target_column, &config.scale_refs())?;

    debug!(
        encoders = encoders.len(),
        scaled = ?scaler.columns(),
        "Frame transformed"
    );
    Ok((scaled, FittedArtifacts { encoders, scaler }, cleaning))
}

/// Load `input`, run every stage, and write the result to `output`.
///
/// Nothing is written unless all stages succeed.
pub fn preprocess_data(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &PreprocessingConfig,
) -> Result<PreprocessOutcome> {
    let start = Instant::now();
    info!(
        started = %Local::now().format("%Y-%m-%d %H:%M:%S"),
        "Starting data preprocessing"
    );

    let raw = load_csv(input)?;
    let input_shape = raw.shape();

    let (mut data, artifacts, cleaning) = transform_frame(&raw, config)?;
    save_csv(&mut data, output)?;

    let report = PipelineReport {
        cleaning,
        input_shape,
        output_shape: data.shape(),
        columns: column_names(&data),
        elapsed_secs: start.elapsed().as_secs_f64(),
    };
    info!(
        rows = report.output_shape.0,
        columns = report.output_shape.1,
        names = ?report.columns,
        elapsed_secs = report.elapsed_secs,
        "Preprocessing complete"
    );

    Ok(PreprocessOutcome { data, artifacts, report })
}
