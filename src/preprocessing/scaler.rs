//! Standard scaling (z-score normalization)

use crate::error::{PrepError, Result};
use crate::utils::present_columns;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Fitted mean and standard deviation of one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    pub column: String,
    pub mean: f64,
    /// Population standard deviation; 1.0 for constant columns
    pub std: f64,
}

/// Standard scaler: `z = (x - mean) / std` per column.
///
/// Parameters are kept in fit order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    params: Vec<ScalerParams>,
}

impl StandardScaler {
    /// Fit the scaler on the given columns of `df`
    pub fn fit(df: &DataFrame, columns: &[&str]) -> Result<Self> {
        let params = columns
            .iter()
            .map(|name| {
                let values = float_column(df, name)?;
                compute_params(name, &values)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { params })
    }

    /// Fit and transform in one step
    pub fn fit_transform(df: &DataFrame, columns: &[&str]) -> Result<(DataFrame, Self)> {
        let scaler = Self::fit(df, columns)?;
        let result = scaler.transform(df)?;
        Ok((result, scaler))
    }

    /// Standardize the fitted columns of `df`. Fitted columns missing from
    /// `df` are skipped.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        self.apply(df, |v, p| (v - p.mean) / p.std)
    }

    /// Undo the standardization
    pub fn inverse_transform(&self, df: &DataFrame) -> Result<DataFrame> {
        self.apply(df, |v, p| v * p.std + p.mean)
    }

    /// Fitted parameters of a column
    pub fn params(&self, column: &str) -> Option<&ScalerParams> {
        self.params.iter().find(|p| p.column == column)
    }

    /// Fitted columns, in fit order
    pub fn columns(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.column.as_str()).collect()
    }

    /// True when no column was fitted
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Builds every replacement column first, then applies them in one pass
    fn apply(&self, df: &DataFrame, f: impl Fn(f64, &ScalerParams) -> f64) -> Result<DataFrame> {
        let replacements: Vec<Series> = self
            .params
            .iter()
            .filter(|p| df.column(&p.column).is_ok())
            .map(|p| -> Result<Series> {
                let values = float_column(df, &p.column)?;
                let scaled: Float64Chunked = values
                    .f64()?
                    .into_iter()
                    .map(|opt| opt.map(|v| f(v, p)))
                    .collect();
                Ok(scaled.with_name(p.column.as_str().into()).into_series())
            })
            .collect::<Result<Vec<_>>>()?;

        let mut result = df.clone();
        for series in replacements {
            result.with_column(series)?;
        }
        Ok(result)
    }
}

fn float_column(df: &DataFrame, name: &str) -> Result<Series> {
    let column = df
        .column(name)
        .map_err(|_| PrepError::FeatureNotFound(name.to_string()))?;
    Ok(column.as_materialized_series().cast(&DataType::Float64)?)
}

fn compute_params(name: &str, values: &Series) -> Result<ScalerParams> {
    let ca = values.f64()?;
    let mean = ca
        .mean()
        .ok_or_else(|| {
            PrepError::EmptyData(format!("cannot scale column '{}' without values", name))
        })?;
    let std = ca.std(0).unwrap_or(0.0);

    Ok(ScalerParams {
        column: name.to_string(),
        mean,
        std: if std == 0.0 { 1.0 } else { std },
    })
}

/// Standardize the configured numeric columns present in `df`, never the
/// target. Returns the frame unchanged with an empty scaler when no
/// candidate is present.
pub fn normalize_features(
    df: &DataFrame,
    target_col: &str,
    columns: &[&str],
) -> Result<(DataFrame, StandardScaler)> {
    let to_scale: Vec<&str> = present_columns(df, columns)
        .into_iter()
        .filter(|name| *name != target_col)
        .collect();

    if to_scale.is_empty() {
        info!("No numeric columns to normalize");
        return Ok((df.clone(), StandardScaler::default()));
    }

    let (result, scaler) = StandardScaler::fit_transform(df, &to_scale)?;
    info!(columns = ?to_scale, "Numeric columns normalized");
    Ok((result, scaler))
}
