//! Utility functions and types

pub mod data_loader;

pub use data_loader::{load_csv, save_csv, DataLoader, DataSaver, DEFAULT_NULL_VALUES};

use polars::prelude::DataFrame;

/// Keep the configured columns that exist in `df`, in configured order
pub fn present_columns<'a>(df: &DataFrame, columns: &[&'a str]) -> Vec<&'a str> {
    columns
        .iter()
        .copied()
        .filter(|name| df.column(name).is_ok())
        .collect()
}

/// Column names of `df` as owned strings
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_present_columns_keeps_order() {
        let df = df!(
            "owner" => &["First"],
            "fuel" => &["Petrol"],
        )
        .unwrap();

        let present = present_columns(&df, &["fuel", "seller_type", "owner"]);
        assert_eq!(present, vec!["fuel", "owner"]);
    }

    #[test]
    fn test_column_names() {
        let df = df!("a" => &[1i64], "b" => &[2i64]).unwrap();
        assert_eq!(column_names(&df), vec!["a", "b"]);
    }
}
