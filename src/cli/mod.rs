//! carprep CLI Module
//!
//! Command-line interface for preprocessing, splitting and inspecting data.

use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::*;

use crate::error::Result;
use crate::preprocessing::features::YEAR;
use crate::preprocessing::{clean_data, preprocess_data, train_test_split, PreprocessingConfig};
use crate::utils::{load_csv, save_csv};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString    { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn step_ok(msg: &str) {
    println!("  {} {}", ok("✓"), msg);
}

fn step_run(msg: &str) {
    println!("  {} {}...", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("    {} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "carprep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Preprocess used-car listings for price regression")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean, derive features, encode and scale a raw listings CSV
    Preprocess(PreprocessArgs),

    /// Split a processed CSV into train and test sets
    Split(SplitArgs),

    /// Profile a listings CSV against the preprocessing configuration
    Info {
        /// Input data file
        #[arg(short, long)]
        data: PathBuf,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PreprocessArgs {
    /// Raw listings CSV
    #[arg(short, long, env = "CARPREP_INPUT")]
    pub input: PathBuf,

    /// Processed CSV to write
    #[arg(short, long, env = "CARPREP_OUTPUT")]
    pub output: PathBuf,

    /// Reference year for car_age
    #[arg(long)]
    pub current_year: Option<i32>,

    /// Target column, never scaled
    #[arg(short, long)]
    pub target: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write fitted encoders and scaler as JSON
    #[arg(long)]
    pub artifacts: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    /// Processed CSV
    #[arg(short, long)]
    pub data: PathBuf,

    /// Directory receiving X_train.csv, X_test.csv, y_train.csv, y_test.csv
    #[arg(long)]
    pub out_dir: PathBuf,

    /// Label column
    #[arg(short, long)]
    pub target: Option<String>,

    /// Fraction of rows held out for testing
    #[arg(long)]
    pub test_size: Option<f64>,

    /// Shuffle seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Start from the config file (or defaults) and let flags override it
fn base_config(path: Option<&Path>) -> Result<PreprocessingConfig> {
    match path {
        Some(path) => PreprocessingConfig::from_json_file(path),
        None => Ok(PreprocessingConfig::default()),
    }
}

impl PreprocessArgs {
    pub fn resolve_config(&self) -> Result<PreprocessingConfig> {
        let mut config = base_config(self.config.as_deref())?;
        if let Some(year) = self.current_year {
            config = config.with_current_year(year);
        }
        if let Some(target) = &self.target {
            config = config.with_target(target.clone());
        }
        config.validate_transform()?;
        Ok(config)
    }
}

impl SplitArgs {
    pub fn resolve_config(&self) -> Result<PreprocessingConfig> {
        let mut config = base_config(self.config.as_deref())?;
        if let Some(target) = &self.target {
            config = config.with_target(target.clone());
        }
        if let Some(test_size) = self.test_size {
            config = config.with_test_size(test_size);
        }
        if let Some(seed) = self.seed {
            config = config.with_random_state(seed);
        }
        config.validate()?;
        Ok(config)
    }
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_preprocess(args: &PreprocessArgs) -> anyhow::Result<()> {
    section("Preprocess");

    let config = args.resolve_config()?;
    println!("  {:<14} {}", muted("Input"), args.input.display());
    println!("  {:<14} {}", muted("Current year"), config.current_year);
    println!("  {:<14} {}", muted("Target"), config.target_column);
    println!();

    step_run("Processing");
    let outcome = preprocess_data(&args.input, &args.output, &config)?;
    let report = &outcome.report;
    step_done(&format!("{:.2}s", report.elapsed_secs));

    step_ok(&format!(
        "{} duplicates and {} incomplete rows removed",
        report.cleaning.duplicates_removed, report.cleaning.missing_removed
    ));
    step_ok(&format!(
        "Saved → {} ({} rows × {} cols)",
        args.output.display(),
        report.output_shape.0,
        report.output_shape.1
    ));

    if let Some(path) = &args.artifacts {
        outcome.artifacts.save(path)?;
        step_ok(&format!("Artifacts → {}", path.display()));
    }

    println!();
    Ok(())
}

pub fn cmd_split(args: &SplitArgs) -> anyhow::Result<()> {
    section("Split");

    let config = args.resolve_config()?;

    step_run("Loading data");
    let df = load_csv(&args.data)?;
    step_done(&format!("{} rows × {} cols", df.height(), df.width()));

    step_run("Splitting");
    let start = Instant::now();
    let split = train_test_split(
        &df,
        &config.target_column,
        config.test_size,
        config.random_state,
    )?;
    step_done(&format!("{:?}", start.elapsed()));

    let mut outputs = [
        ("X_train.csv", split.x_train),
        ("X_test.csv", split.x_test),
        ("y_train.csv", split.y_train.into_frame()),
        ("y_test.csv", split.y_test.into_frame()),
    ];
    for (file_name, frame) in outputs.iter_mut() {
        let path = args.out_dir.join(file_name);
        save_csv(frame, &path)?;
        step_ok(&format!("{} ({} rows)", path.display(), frame.height()));
    }

    println!();
    Ok(())
}

/// What the pipeline does with a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Target,
    Year,
    Categorical,
    Scaled,
    Dropped,
    Passthrough,
}

impl ColumnRole {
    fn label(self) -> &'static str {
        match self {
            ColumnRole::Target => "target",
            ColumnRole::Year => "-> car_age",
            ColumnRole::Categorical => "encode",
            ColumnRole::Scaled => "scale",
            ColumnRole::Dropped => "drop",
            ColumnRole::Passthrough => "keep",
        }
    }
}

/// Per-column profile shown by `info`
#[derive(Debug, Clone)]
pub struct ColumnProfile {
    pub name: String,
    pub role: ColumnRole,
    pub dtype: DataType,
    pub nulls: usize,
    pub distinct: usize,
    /// (min, max) for numeric columns
    pub range: Option<(f64, f64)>,
}

pub fn column_role(name: &str, config: &PreprocessingConfig) -> ColumnRole {
    let listed = |list: &[String]| list.iter().any(|c| c == name);

    if name == config.target_column {
        ColumnRole::Target
    } else if name == YEAR {
        ColumnRole::Year
    } else if listed(&config.categorical_columns) {
        ColumnRole::Categorical
    } else if listed(&config.scale_columns) {
        ColumnRole::Scaled
    } else if listed(&config.drop_columns) {
        ColumnRole::Dropped
    } else {
        ColumnRole::Passthrough
    }
}

pub fn profile_columns(
    df: &DataFrame,
    config: &PreprocessingConfig,
) -> Result<Vec<ColumnProfile>> {
    df.get_columns()
        .iter()
        .map(|col| -> Result<ColumnProfile> {
            let range = match col.dtype() {
                DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 |
                DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 |
                DataType::Float32 | DataType::Float64 => {
                    let values = col.cast(&DataType::Float64)?;
                    let ca = values.f64()?;
                    ca.min().zip(ca.max())
                }
                _ => None,
            };
            Ok(ColumnProfile {
                name: col.name().to_string(),
                role: column_role(col.name(), config),
                dtype: col.dtype().clone(),
                nulls: col.null_count(),
                distinct: col.n_unique()?,
                range,
            })
        })
        .collect()
}

pub fn cmd_info(data_path: &Path, config_path: Option<&Path>) -> anyhow::Result<()> {
    section("Data Info");

    let config = base_config(config_path)?;
    let df = load_csv(data_path)?;
    let (_, cleaning) = clean_data(&df)?;

    println!("  {:<12} {}", muted("File"), data_path.display());
    println!("  {:<12} {} × {}", muted("Shape"), df.height(), df.width());
    println!("  {:<12} {}", muted("Duplicates"), cleaning.duplicates_removed);
    println!("  {:<12} {}", muted("Incomplete"), cleaning.missing_removed);
    println!("  {:<12} {}", muted("Kept rows"), cleaning.final_rows);
    println!();

    println!(
        "  {:<16} {:<11} {:<8} {:>6} {:>8}  {}",
        muted("Column"),
        muted("Role"),
        muted("Type"),
        muted("Nulls"),
        muted("Distinct"),
        muted("Range")
    );
    println!("  {}", dim(&"─".repeat(64)));

    let profiles = profile_columns(&df, &config)?;
    for p in &profiles {
        let range = p
            .range
            .map(|(lo, hi)| format!("{} .. {}", lo, hi))
            .unwrap_or_default();
        println!(
            "  {:<16} {:<11} {:<8} {:>6} {:>8}  {}",
            p.name,
            accent(p.role.label()),
            muted(&p.dtype.to_string()),
            p.nulls,
            p.distinct,
            dim(&range)
        );
    }

    match profiles.iter().find(|p| p.role == ColumnRole::Year).and_then(|p| p.range) {
        Some((first, last)) => step_ok(&format!(
            "car_age spans {} .. {} for current year {}",
            config.current_year as f64 - last,
            config.current_year as f64 - first,
            config.current_year
        )),
        None => println!("  {} no usable '{}' column, preprocess will fail", ok("!"), YEAR),
    }
    if !profiles.iter().any(|p| p.role == ColumnRole::Target) {
        println!("  {} target '{}' not present", ok("!"), config.target_column);
    }

    println!();
    Ok(())
}
