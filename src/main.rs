//! Cross-year orchestrator: runs the three census datasets, checks the expected
//! output artifacts, and writes an inventory plus a cross-year summary.
//!
//! Usage: `census-simplify [raw_dir] [out_dir]` (defaults `data/raw` and
//! `data/processed/cleaned_files`). Each year's run is independent; a failing year is
//! logged and the others continue.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::{env, fs};

use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use census_simplify::pipeline::{
    DatasetRun, RunOptions, RunReport, TracingObserver, expected_outputs,
};

const DATASETS: [&str; 3] = ["ec98_shrid", "ec05_shrid", "ec13_shrid"];

#[derive(Serialize)]
struct InventoryRow {
    file: String,
    status: &'static str,
    size_bytes: Option<u64>,
}

#[derive(Serialize)]
struct SummaryRow {
    dataset: String,
    filename: String,
    records: usize,
    columns: usize,
    total_employment: i64,
    total_firms: i64,
}

fn main() -> Result<ExitCode> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let mut args = env::args().skip(1);
    let raw_dir = PathBuf::from(args.next().unwrap_or_else(|| "data/raw".to_string()));
    let out_dir = PathBuf::from(
        args.next()
            .unwrap_or_else(|| "data/processed/cleaned_files".to_string()),
    );
    fs::create_dir_all(&out_dir)?;
    info!(raw_dir = %raw_dir.display(), out_dir = %out_dir.display(), "startup");

    let observer = Arc::new(TracingObserver);
    let runs: Vec<DatasetRun> = DATASETS
        .iter()
        .map(|dataset| DatasetRun {
            dataset: (*dataset).to_string(),
            input: raw_dir.join(format!("{dataset}.csv")),
            out_dir: out_dir.clone(),
            options: RunOptions {
                observer: Some(observer.clone()),
                ..Default::default()
            },
        })
        .collect();

    // The three years are independent; run them in parallel. The observer logs each
    // outcome as it lands.
    let reports: Vec<Option<RunReport>> = runs
        .par_iter()
        .map(|run| match run.run() {
            Ok(report) => Some(report),
            Err(err) => {
                error!(dataset = %run.dataset, %err, "continuing with remaining datasets");
                None
            }
        })
        .collect();

    let ok_count = reports.iter().flatten().count();
    info!(ok = ok_count, total = DATASETS.len(), "dataset runs finished");

    let all_outputs_present = write_inventory(&out_dir)?;
    write_summary(&out_dir, &reports)?;

    if ok_count == DATASETS.len() && all_outputs_present {
        info!("all datasets cleaned");
        Ok(ExitCode::SUCCESS)
    } else {
        error!("some datasets failed or outputs are missing");
        Ok(ExitCode::FAILURE)
    }
}

/// Check every expected artifact and write the inventory CSV. Returns whether all
/// artifacts exist.
fn write_inventory(out_dir: &std::path::Path) -> Result<bool> {
    let mut all_present = true;
    let mut wtr = csv::Writer::from_path(out_dir.join("cleaning_output_inventory.csv"))?;

    for dataset in DATASETS {
        for path in expected_outputs(dataset, out_dir) {
            let file = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            match fs::metadata(&path) {
                Ok(meta) => {
                    info!(file = %file, size_bytes = meta.len(), "output present");
                    wtr.serialize(InventoryRow {
                        file,
                        status: "OK",
                        size_bytes: Some(meta.len()),
                    })?;
                }
                Err(_) => {
                    error!(file = %file, "output missing");
                    all_present = false;
                    wtr.serialize(InventoryRow {
                        file,
                        status: "MISSING",
                        size_bytes: None,
                    })?;
                }
            }
        }
    }
    wtr.flush()?;
    Ok(all_present)
}

/// Write the cross-year summary from the in-memory run reports.
fn write_summary(out_dir: &std::path::Path, reports: &[Option<RunReport>]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out_dir.join("economic_census_summary.csv"))?;
    for report in reports.iter().flatten() {
        wtr.serialize(SummaryRow {
            dataset: report.dataset.clone(),
            filename: format!("{}_simplified.csv", report.dataset),
            records: report.rows,
            columns: report.columns,
            total_employment: report.total_employment,
            total_firms: report.total_firms,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
