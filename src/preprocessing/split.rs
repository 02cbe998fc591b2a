//! Seeded train/test split

use crate::error::{PrepError, Result};
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use super::config::validate_test_size;

/// Train/test partition of a frame into features and labels
#[derive(Debug, Clone)]
pub struct SplitResult {
    pub x_train: DataFrame,
    pub x_test: DataFrame,
    pub y_train: Series,
    pub y_test: Series,
    /// Source row indices of the training rows, in output order
    pub train_indices: Vec<usize>,
    /// Source row indices of the test rows, in output order
    pub test_indices: Vec<usize>,
}

/// Shuffle `0..n_samples` with a seeded RNG and cut off `ceil(test_size * n)`
/// test indices. Returns `(train, test)`.
pub fn split_indices(
    n_samples: usize,
    test_size: f64,
    random_state: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    validate_test_size(test_size)?;

    let n_test = (test_size * n_samples as f64).ceil() as usize;
    let n_train = n_samples.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(PrepError::InvalidParameter {
            name: "test_size".to_string(),
            value: test_size.to_string(),
            reason: format!(
                "with {} samples gives {} train and {} test rows; both must be non-empty",
                n_samples, n_train, n_test
            ),
        });
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(random_state);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok((train, indices))
}

/// Split `df` into features (every column but `target_col`) and labels, then
/// into train and test rows.
pub fn train_test_split(
    df: &DataFrame,
    target_col: &str,
    test_size: f64,
    random_state: u64,
) -> Result<SplitResult> {
    let labels = df
        .column(target_col)
        .map_err(|_| PrepError::FeatureNotFound(target_col.to_string()))?
        .as_materialized_series()
        .clone();
    let features = df.drop(target_col)?;

    let (train_indices, test_indices) = split_indices(df.height(), test_size, random_state)?;
    let train_idx = to_idx(&train_indices);
    let test_idx = to_idx(&test_indices);

    let result = SplitResult {
        x_train: features.take(&train_idx)?,
        x_test: features.take(&test_idx)?,
        y_train: labels.take(&train_idx)?,
        y_test: labels.take(&test_idx)?,
        train_indices,
        test_indices,
    };

    info!(
        samples = result.x_train.height(),
        percent = format!("{:.0}%", (1.0 - test_size) * 100.0),
        "Training set"
    );
    info!(
        samples = result.x_test.height(),
        percent = format!("{:.0}%", test_size * 100.0),
        "Testing set"
    );

    Ok(result)
}

fn to_idx(indices: &[usize]) -> IdxCa {
    IdxCa::from_vec(
        "idx".into(),
        indices.iter().map(|&i| i as IdxSize).collect(),
    )
}
