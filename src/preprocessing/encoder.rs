//! Label encoding of categorical columns

use crate::error::{PrepError, Result};
use crate::utils::present_columns;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// String form given to nulls before encoding
pub const MISSING_CATEGORY: &str = "nan";

/// Fitted label encoder for a single column.
///
/// Classes are kept sorted; a value's code is its index in `classes`, so the
/// codes of a fitted column are exactly `0..n_classes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    column: String,
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit an encoder on the distinct values of a column
    pub fn fit<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classes: BTreeSet<String> = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect();

        Self {
            column: column.into(),
            classes: classes.into_iter().collect(),
        }
    }

    /// Fit and encode in one step
    pub fn fit_transform<S: AsRef<str>>(
        column: impl Into<String>,
        values: &[S],
    ) -> Result<(Self, Vec<i64>)> {
        let encoder = Self::fit(column, values.iter().map(|v| v.as_ref()));
        let codes = encoder.transform(values)?;
        Ok((encoder, codes))
    }

    /// Column this encoder was fitted on
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Sorted distinct categories
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of categories
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Code of a single value
    pub fn code(&self, value: &str) -> Result<i64> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(value))
            .map(|idx| idx as i64)
            .map_err(|_| PrepError::UnknownCategory {
                column: self.column.clone(),
                value: value.to_string(),
            })
    }

    /// Encode values with the fitted mapping
    pub fn transform<S: AsRef<str>>(&self, values: &[S]) -> Result<Vec<i64>> {
        values.iter().map(|v| self.code(v.as_ref())).collect()
    }

    /// Map codes back to their categories
    pub fn inverse_transform(&self, codes: &[i64]) -> Result<Vec<String>> {
        codes
            .iter()
            .map(|&code| {
                usize::try_from(code)
                    .ok()
                    .and_then(|idx| self.classes.get(idx))
                    .cloned()
                    .ok_or_else(|| PrepError::InvalidParameter {
                        name: self.column.clone(),
                        value: code.to_string(),
                        reason: format!("code out of range 0..{}", self.classes.len()),
                    })
            })
            .collect()
    }

    /// Replace this encoder's column in `df` with its codes
    pub fn transform_column(&self, df: &DataFrame) -> Result<DataFrame> {
        let values = stringify_column(df, &self.column)?;
        let codes = self.transform(&values)?;

        let mut result = df.clone();
        result.with_column(Series::new(self.column.as_str().into(), codes))?;
        Ok(result)
    }

    /// Replace this encoder's code column in `df` with the original categories
    pub fn inverse_transform_column(&self, df: &DataFrame) -> Result<DataFrame> {
        let column = df
            .column(&self.column)
            .map_err(|_| PrepError::FeatureNotFound(self.column.clone()))?;
        let codes: Vec<i64> = column
            .as_materialized_series()
            .strict_cast(&DataType::Int64)?
            .i64()?
            .into_iter()
            .map(|opt| opt.unwrap_or(-1))
            .collect();
        let categories = self.inverse_transform(&codes)?;

        let mut result = df.clone();
        result.with_column(Series::new(self.column.as_str().into(), categories))?;
        Ok(result)
    }
}

/// Read a column as strings. Non-string values take their string form and
/// nulls become [`MISSING_CATEGORY`].
pub fn stringify_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let column = df
        .column(name)
        .map_err(|_| PrepError::FeatureNotFound(name.to_string()))?;
    let as_text = column.cast(&DataType::String)?;

    Ok(as_text
        .str()?
        .into_iter()
        .map(|opt| opt.unwrap_or(MISSING_CATEGORY).to_string())
        .collect())
}

/// Label-encode every configured column present in `df`.
///
/// Absent columns are skipped. Returns the encoded frame and one fitted
/// encoder per encoded column.
pub fn encode_features(
    df: &DataFrame,
    columns: &[&str],
) -> Result<(DataFrame, BTreeMap<String, LabelEncoder>)> {
    let mut result = df.clone();
    let mut encoders = BTreeMap::new();

    for name in present_columns(df, columns) {
        let values = stringify_column(&result, name)?;
        let (encoder, codes) = LabelEncoder::fit_transform(name, &values)?;
        result.with_column(Series::new(name.into(), codes))?;

        info!(column = name, categories = encoder.n_classes(), "Categorical column encoded");
        encoders.insert(name.to_string(), encoder);
    }

    info!(encoded = encoders.len(), "Encoding complete");
    Ok((result, encoders))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::config::CATEGORICAL_COLUMNS;

    fn categorical_df() -> DataFrame {
        df!(
            "fuel" => &["Petrol", "Diesel", "Petrol", "CNG"],
            "owner" => &["First Owner", "Second Owner", "First Owner", "First Owner"],
            "km_driven" => &[70000i64, 50000, 100000, 46000],
        )
        .unwrap()
    }

    #[test]
    fn test_classes_sorted() {
        let encoder = LabelEncoder::fit("fuel", ["Petrol", "Diesel", "Petrol", "CNG"]);
        assert_eq!(encoder.classes(), &["CNG", "Diesel", "Petrol"]);
        assert_eq!(encoder.n_classes(), 3);
    }

    #[test]
    fn test_encode_features_codes() {
        let (encoded, encoders) = encode_features(&categorical_df(), &CATEGORICAL_COLUMNS).unwrap();

        let fuel: Vec<Option<i64>> = encoded
            .column("fuel")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(fuel, vec![Some(2), Some(1), Some(2), Some(0)]);

        // seller_type and transmission are absent and skipped
        assert_eq!(encoders.len(), 2);
        assert!(encoders.contains_key("fuel"));
        assert!(encoders.contains_key("owner"));
        assert!(encoded.column("km_driven").unwrap().i64().is_ok());
    }

    #[test]
    fn test_codes_cover_zero_to_k() {
        let (encoded, encoders) = encode_features(&categorical_df(), &CATEGORICAL_COLUMNS).unwrap();

        for (name, encoder) in &encoders {
            let codes: BTreeSet<i64> = encoded
                .column(name)
                .unwrap()
                .i64()
                .unwrap()
                .into_iter()
                .flatten()
                .collect();
            let expected: BTreeSet<i64> = (0..encoder.n_classes() as i64).collect();
            assert_eq!(codes, expected);
        }
    }

    #[test]
    fn test_numeric_values_use_string_form() {
        let df = df!("owner" => &[3i64, 1, 10, 1]).unwrap();
        let (encoded, encoders) = encode_features(&df, &["owner"]).unwrap();

        // lexicographic: "1" < "10" < "3"
        assert_eq!(encoders["owner"].classes(), &["1", "10", "3"]);
        let codes: Vec<Option<i64>> = encoded
            .column("owner")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(codes, vec![Some(2), Some(0), Some(1), Some(0)]);
    }

    #[test]
    fn test_nulls_become_a_category() {
        let df = df!("fuel" => &[Some("Petrol"), None]).unwrap();
        let (_, encoders) = encode_features(&df, &["fuel"]).unwrap();
        assert_eq!(encoders["fuel"].classes(), &["Petrol", MISSING_CATEGORY]);
    }

    #[test]
    fn test_refit_on_codes_is_consistent() {
        let (encoded, _) = encode_features(&categorical_df(), &["fuel"]).unwrap();
        let (reencoded, encoders) = encode_features(&encoded, &["fuel"]).unwrap();

        let first: Vec<Option<i64>> = encoded
            .column("fuel")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        let second: Vec<Option<i64>> = reencoded
            .column("fuel")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();

        // Same partition of rows, mapping first -> second is a bijection
        let mut mapping = BTreeMap::new();
        for (a, b) in first.iter().zip(second.iter()) {
            let prev = mapping.insert(a.unwrap(), b.unwrap());
            assert!(prev.is_none() || prev == Some(b.unwrap()));
        }
        let targets: BTreeSet<i64> = mapping.values().copied().collect();
        assert_eq!(targets.len(), mapping.len());
        assert_eq!(encoders["fuel"].n_classes(), 3);
    }

    #[test]
    fn test_unknown_category() {
        let encoder = LabelEncoder::fit("fuel", ["Petrol", "Diesel"]);
        let err = encoder.transform(&["Electric"]).unwrap_err();
        assert!(matches!(err, PrepError::UnknownCategory { ref value, .. } if value == "Electric"));
    }

    #[test]
    fn test_inverse_transform() {
        let encoder = LabelEncoder::fit("fuel", ["Petrol", "Diesel", "CNG"]);
        let restored = encoder.inverse_transform(&[2, 0, 1]).unwrap();
        assert_eq!(restored, vec!["Petrol", "CNG", "Diesel"]);
        assert!(encoder.inverse_transform(&[3]).is_err());
        assert!(encoder.inverse_transform(&[-1]).is_err());
    }

    #[test]
    fn test_inverse_transform_column() {
        let df = categorical_df();
        let (encoded, encoders) = encode_features(&df, &["fuel"]).unwrap();
        let restored = encoders["fuel"].inverse_transform_column(&encoded).unwrap();

        let original: Vec<Option<&str>> = df
            .column("fuel")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        let back: Vec<Option<&str>> = restored
            .column("fuel")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(original, back);
    }
}
