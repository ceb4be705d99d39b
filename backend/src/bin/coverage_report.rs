//! Coverage Report Binary
//!
//! Analyzes a patient file against the configured clinics and writes the
//! strategic XLSX report.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin coverage-report -- --input patients.csv --radius 8 --output reports/
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use coverage_backend::config::CoverageConfig;
use coverage_backend::algorithms::analyze;
use coverage_backend::io::PatientLoader;
use coverage_backend::services::{build_report, write_xlsx};

#[derive(Parser, Debug)]
#[command(name = "coverage-report")]
#[command(about = "Write a health coverage report for a patient file", long_about = None)]
struct Args {
    /// Patient file (.csv, .xlsx, .xls, .xlsm or .ods)
    #[arg(short, long)]
    input: PathBuf,

    /// Service radius in miles; the configured default when omitted
    #[arg(short, long)]
    radius: Option<f64>,

    /// Output directory or file path
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Configuration file
    #[arg(short, long, env = "COVERAGE_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let config =
        CoverageConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let clinics = config.clinic_set()?;
    let radius = config.radius_options()?.resolve(args.radius)?;

    let loaded = PatientLoader::load_from_file(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    let analysis = analyze(&loaded.table.records, &clinics, radius)?;
    let summary = &analysis.summary;
    info!(
        "Radius {} mi: {} of {} patients covered ({}%)",
        radius.value(),
        summary.covered_count,
        summary.total_count,
        summary.coverage_percent
    );
    for entry in &summary.bracket_counts {
        info!("  {:<14} {}", entry.label, entry.count);
    }

    let report = build_report(&loaded.table, &analysis)?;
    let bytes = write_xlsx(&report)?;

    let target = if args.output.is_dir() {
        args.output.join(&report.file_name)
    } else {
        args.output.clone()
    };
    fs::write(&target, bytes).with_context(|| format!("Failed to write {}", target.display()))?;
    info!("Report written to {}", target.display());

    Ok(())
}
