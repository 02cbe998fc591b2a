//! Feature derivation: `car_age` from the model year

use crate::error::{PrepError, Result};
use crate::utils::{column_names, present_columns};
use polars::prelude::*;
use tracing::info;

use super::config::DROP_COLUMNS;

/// Name of the derived age column
pub const CAR_AGE: &str = "car_age";

/// Name of the model-year column
pub const YEAR: &str = "year";

/// Add `car_age = current_year - year`, then drop `name` and `year`.
///
/// `year` must exist. The dropped columns are optional: an absent one is
/// skipped.
pub fn feature_engineering(df: &DataFrame, current_year: i32) -> Result<DataFrame> {
    feature_engineering_with(df, current_year, &DROP_COLUMNS)
}

/// Same as [`feature_engineering`] with an explicit drop list
pub fn feature_engineering_with(
    df: &DataFrame,
    current_year: i32,
    drop_columns: &[&str],
) -> Result<DataFrame> {
    let mut result = df.clone();
    result.with_column(derive_car_age(df, current_year)?)?;
    info!(current_year, "Feature 'car_age' added");

    let to_drop = present_columns(&result, drop_columns);
    for name in &to_drop {
        result = result.drop(name)?;
    }
    info!(dropped = ?to_drop, "Columns dropped");
    info!(columns = ?column_names(&result), "Feature engineering complete");

    Ok(result)
}

/// Compute the `car_age` series. Negative ages are kept.
pub fn derive_car_age(df: &DataFrame, current_year: i32) -> Result<Series> {
    let column = df
        .column(YEAR)
        .map_err(|_| PrepError::FeatureNotFound(YEAR.to_string()))?;
    let years = column
        .as_materialized_series()
        .strict_cast(&DataType::Int64)
        .map_err(|e| {
            PrepError::DataError(format!("column '{}' is not an integer year: {}", YEAR, e))
        })?;

    let reference = current_year as i64;
    let ages: Int64Chunked = years
        .i64()?
        .into_iter()
        .map(|opt| opt.map(|year| reference - year))
        .collect();

    Ok(ages.with_name(CAR_AGE.into()).into_series())
}
