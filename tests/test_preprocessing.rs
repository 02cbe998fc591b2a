//! Integration test: Individual preprocessing stages on loaded CSV data

use carprep::preprocessing::{
    clean_data, encode_features, feature_engineering, normalize_features, train_test_split,
    PreprocessingConfig,
};
use carprep::utils::{load_csv, save_csv, DataLoader};
use polars::prelude::*;
use std::collections::BTreeSet;

fn load_from(text: &str) -> DataFrame {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    std::fs::write(&path, text).unwrap();
    load_csv(&path).unwrap()
}

fn listings_df() -> DataFrame {
    df!(
        "name" => &["A", "B", "C", "D", "E", "F"],
        "year" => &[2010i64, 2012, 2014, 2016, 2018, 2020],
        "selling_price" => &[100i64, 200, 300, 400, 500, 600],
        "km_driven" => &[90000i64, 70000, 60000, 40000, 20000, 5000],
        "fuel" => &["Petrol", "Diesel", "Petrol", "CNG", "Diesel", "Petrol"],
        "owner" => &[
            "First Owner",
            "First Owner",
            "Second Owner",
            "First Owner",
            "Third Owner",
            "First Owner",
        ],
    )
    .unwrap()
}

#[test]
fn test_null_tokens_are_missing() {
    let df = load_from("name,year,fuel\nA,2015,Petrol\nB,NA,Diesel\nC,2016,null\nD,2017,\n");
    assert_eq!(df.column("year").unwrap().null_count(), 1);
    assert_eq!(df.column("fuel").unwrap().null_count(), 2);

    let (cleaned, report) = clean_data(&df).unwrap();
    assert_eq!(cleaned.height(), 1);
    assert_eq!(report.missing_removed, 3);
}

#[test]
fn test_custom_null_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "fuel\nPetrol\n?\n").unwrap();

    let df = DataLoader::new()
        .with_null_values(vec!["?".to_string()])
        .load_csv(&path)
        .unwrap();
    assert_eq!(df.column("fuel").unwrap().null_count(), 1);
}

#[test]
fn test_stages_in_sequence() {
    let config = PreprocessingConfig::default();
    let (cleaned, _) = clean_data(&listings_df()).unwrap();
    let derived = feature_engineering(&cleaned, config.current_year).unwrap();

    let ages: Vec<i64> = derived
        .column("car_age")
        .unwrap()
        .i64()
        .unwrap()
        .into_no_null_iter()
        .collect();
    assert_eq!(ages, vec![14, 12, 10, 8, 6, 4]);

    let cats: Vec<&str> = config.categorical_columns.iter().map(|s| s.as_str()).collect();
    let (encoded, encoders) = encode_features(&derived, &cats).unwrap();
    assert_eq!(encoders["fuel"].classes(), &["CNG", "Diesel", "Petrol"]);

    for (name, encoder) in &encoders {
        let codes: BTreeSet<i64> = encoded
            .column(name)
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(codes, (0..encoder.n_classes() as i64).collect::<BTreeSet<_>>());
    }

    let scale: Vec<&str> = config.scale_columns.iter().map(|s| s.as_str()).collect();
    let (scaled, scaler) = normalize_features(&encoded, &config.target_column, &scale).unwrap();
    assert_eq!(scaler.columns(), vec!["km_driven", "car_age"]);

    for name in ["km_driven", "car_age"] {
        let ca = scaled.column(name).unwrap().f64().unwrap().clone();
        assert!(ca.mean().unwrap().abs() < 1e-10);
        assert!((ca.std(0).unwrap() - 1.0).abs() < 1e-10);
    }
}

#[test]
fn test_split_properties() {
    let df = listings_df();
    let a = train_test_split(&df, "selling_price", 0.5, 3).unwrap();
    let b = train_test_split(&df, "selling_price", 0.5, 3).unwrap();

    assert_eq!(a.test_indices, b.test_indices);
    assert_eq!(a.x_test.height(), 3);
    assert_eq!(a.x_train.height(), 3);

    let mut all: Vec<usize> = a
        .train_indices
        .iter()
        .chain(a.test_indices.iter())
        .copied()
        .collect();
    all.sort();
    assert_eq!(all, (0..6).collect::<Vec<_>>());
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("out.csv");
    let mut df = listings_df();

    save_csv(&mut df, &path).unwrap();
    let back = load_csv(&path).unwrap();
    assert_eq!(back.shape(), df.shape());
    assert!(back.equals(&df));
}
