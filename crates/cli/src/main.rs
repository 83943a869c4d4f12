use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use polars::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use yayp::files::{file_exists, split_filepath};
use yayp::report::{format_general, write_unequal_values, PRECISION};
use yayp::strings::to_lower;
use yayp::testing::is_soft_container_equal_tol;
use yayp::{SoftEqual, SoftFloat};

#[derive(Parser)]
#[command(name = "yayp")]
#[command(about = "Soft floating point comparison of numeric data files")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Compare two numeric sequences (.csv, .parquet or .json arrays)
    Compare {
        #[arg(long)]
        expected: PathBuf,
        #[arg(long)]
        actual: PathBuf,
        /// Column to read from tabular inputs (default: first column)
        #[arg(long)]
        column: Option<String>,
        #[arg(long)]
        rel_tol: Option<f64>,
        /// Absolute tolerance (default: scaled from the relative one)
        #[arg(long)]
        abs_tol: Option<f64>,
        /// Print a JSON summary instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Print the path, base name and extension of a file path as JSON
    SplitPath { path: String },
    /// Print version, contract level and default tolerances as JSON
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Compare {
            expected,
            actual,
            column,
            rel_tol,
            abs_tol,
            json,
        } => compare(&expected, &actual, column.as_deref(), rel_tol, abs_tol, json),
        Action::SplitPath { path } => split_path(&path),
        Action::Report => report(),
    }
}

/// Outcome of `compare`, also its `--json` output.
#[derive(Debug, Serialize)]
struct CompareSummary {
    expected: String,
    actual: String,
    expected_len: usize,
    actual_len: usize,
    rel_tol: f64,
    abs_tol: f64,
    mismatches: Vec<usize>,
    equal: bool,
    message: Option<String>,
}

fn compare(
    expected: &Path,
    actual: &Path,
    column: Option<&str>,
    rel_tol: Option<f64>,
    abs_tol: Option<f64>,
    as_json: bool,
) -> Result<()> {
    tracing::info!(
        expected = %expected.display(),
        actual = %actual.display(),
        column,
        rel_tol,
        abs_tol,
        "compare"
    );
    let expected_values = load_values(expected, column)?;
    let actual_values = load_values(actual, column)?;
    let summary = compare_values(
        &expected.display().to_string(),
        &actual.display().to_string(),
        &expected_values,
        &actual_values,
        rel_tol,
        abs_tol,
    )?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if let Some(message) = &summary.message {
        println!("{message}");
    } else {
        println!("ok");
    }

    if !summary.equal {
        bail!(
            "{} and {} differ ({} mismatching of {} values)",
            summary.expected,
            summary.actual,
            summary.mismatches.len(),
            summary.expected_len
        );
    }
    Ok(())
}

/// Build the comparator from user tolerances, rejecting invalid ones.
fn comparator(rel_tol: Option<f64>, abs_tol: Option<f64>) -> Result<SoftEqual<f64>> {
    let rel = rel_tol.unwrap_or(f64::DEFAULT_REL_TOL);
    let abs = abs_tol.unwrap_or(f64::DEFAULT_ABS_TOL / f64::DEFAULT_REL_TOL * rel);
    SoftEqual::try_new(rel, abs).context("invalid tolerance")
}

fn compare_values(
    expected_label: &str,
    actual_label: &str,
    expected: &[f64],
    actual: &[f64],
    rel_tol: Option<f64>,
    abs_tol: Option<f64>,
) -> Result<CompareSummary> {
    let se = comparator(rel_tol, abs_tol)?;
    let same_len = expected.len() == actual.len();
    let mismatches = if same_len {
        se.mismatches(expected, actual)
    } else {
        Vec::new()
    };

    let message = if abs_tol.is_none() || !same_len {
        is_soft_container_equal_tol(expected_label, actual_label, expected, actual, se.rel_tol())
            .err()
            .map(|failure| failure.to_string())
    } else if mismatches.is_empty() {
        None
    } else {
        Some(format!(
            "Expected soft equality between two containers which differ in {} element(s)\n{}\n  tested with relative tolerance {} and absolute tolerance {}",
            mismatches.len(),
            write_unequal_values(&mismatches, expected_label, actual_label, expected, actual),
            format_general(se.rel_tol(), PRECISION),
            format_general(se.abs_tol(), PRECISION),
        ))
    };
    tracing::debug!(mismatches = mismatches.len(), same_len, "compared");

    Ok(CompareSummary {
        expected: expected_label.to_string(),
        actual: actual_label.to_string(),
        expected_len: expected.len(),
        actual_len: actual.len(),
        rel_tol: se.rel_tol(),
        abs_tol: se.abs_tol(),
        equal: message.is_none(),
        mismatches,
        message,
    })
}

/// Read a numeric sequence. Tabular files yield one column (nulls become NaN);
/// JSON files hold a flat array of numbers.
fn load_values(path: &Path, column: Option<&str>) -> Result<Vec<f64>> {
    let extension = to_lower(&split_filepath(&path.to_string_lossy()).extension);
    let lf = match extension.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            return serde_json::from_str(&text)
                .with_context(|| format!("parsing {} as a JSON array of numbers", path.display()));
        }
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(100))
            .finish()?,
        "parquet" => LazyFrame::scan_parquet(path, ScanArgsParquet::default())?,
        other => bail!("unsupported input format '{other}' for {}", path.display()),
    };
    let df = lf
        .collect()
        .with_context(|| format!("loading {}", path.display()))?;

    let series = match column {
        Some(name) => df.column(name)?.clone(),
        None => df
            .select_at_idx(0)
            .cloned()
            .with_context(|| format!("{} has no columns", path.display()))?,
    };
    tracing::info!(rows = df.height(), column = %series.name(), "loaded");
    let values = series.cast(&DataType::Float64)?;
    Ok(values
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

fn split_path(path: &str) -> Result<()> {
    tracing::info!(path, "split-path");
    println!("{}", serde_json::to_string_pretty(&split_path_json(path))?);
    Ok(())
}

fn split_path_json(path: &str) -> serde_json::Value {
    let parts = split_filepath(path);
    json!({
        "path": parts.path,
        "basename": parts.basename,
        "extension": parts.extension,
        "exists": file_exists(path),
    })
}

fn report() -> Result<()> {
    tracing::info!("report");
    println!("{}", serde_json::to_string_pretty(&report_json())?);
    Ok(())
}

fn report_json() -> serde_json::Value {
    json!({
        "version": yayp::VERSION,
        "dbc_level": yayp::dbc::DBC_LEVEL,
        "checks": {
            "require": yayp::dbc::REQUIRE_ON,
            "ensure": yayp::dbc::ENSURE_ON,
            "check": yayp::dbc::CHECK_ON,
        },
        "default_tolerances": {
            "f64": { "abs": f64::DEFAULT_ABS_TOL, "rel": f64::DEFAULT_REL_TOL },
            "f32": { "abs": f32::DEFAULT_ABS_TOL, "rel": f32::DEFAULT_REL_TOL },
        },
    })
}
