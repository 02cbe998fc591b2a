//! Duplicate and missing-value removal

use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Row counts observed while cleaning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub initial_rows: usize,
    pub duplicates_removed: usize,
    pub missing_removed: usize,
    pub final_rows: usize,
}

/// Drop exact duplicate rows (first occurrence kept), then every row with a
/// null in any column.
pub fn clean_data(df: &DataFrame) -> Result<(DataFrame, CleaningReport)> {
    let initial_rows = df.height();

    let deduped = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
    let after_dedup = deduped.height();
    info!(removed = initial_rows - after_dedup, "Duplicate rows removed");

    let cleaned = deduped.drop_nulls::<String>(None)?;
    let after_na = cleaned.height();
    info!(removed = after_dedup - after_na, "Rows with missing values removed");

    let report = CleaningReport {
        initial_rows,
        duplicates_removed: initial_rows - after_dedup,
        missing_removed: after_dedup - after_na,
        final_rows: after_na,
    };
    info!(rows = cleaned.height(), columns = cleaned.width(), "Data cleaned");

    Ok((cleaned, report))
}
