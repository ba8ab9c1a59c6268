//! Per-dataset pipeline: ingest the raw extract, simplify it, and write the three
//! report artifacts.
//!
//! Each [`DatasetRun`] is independent and re-runnable; a failing year never affects
//! another. Failure severities: I/O problems are [`RunSeverity::Critical`], bad data
//! (missing core column, unparseable value) is [`RunSeverity::Error`].

mod observability;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::error::{SimplifyError, SimplifyResult};
use crate::ingestion::{IngestOptions, read_raw_csv_from_path};
use crate::report::{write_column_documentation, write_simplified, write_summary_stats};
use crate::simplify::{COL_COUNT_ALL, COL_EMP_ALL, simplify};
use crate::stats::describe;
use crate::types::Table;

pub use observability::{
    CompositeObserver, FileObserver, RunContext, RunObserver, RunSeverity, RunStats,
    TracingObserver,
};

/// Options controlling a dataset run.
#[derive(Clone, Default)]
pub struct RunOptions {
    /// Ingestion options (chunked-read sizing).
    pub ingest: IngestOptions,
    /// Optional observer for success/failure reporting.
    pub observer: Option<Arc<dyn RunObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: RunSeverity,
}

impl std::fmt::Debug for RunOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunOptions")
            .field("ingest", &self.ingest)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

/// One dataset's cleaning run.
#[derive(Debug, Clone)]
pub struct DatasetRun {
    /// Dataset name, used to form output file names (e.g. `ec05_shrid`).
    pub dataset: String,
    /// Raw input CSV.
    pub input: PathBuf,
    /// Output directory for the three artifacts.
    pub out_dir: PathBuf,
    /// Run options.
    pub options: RunOptions,
}

/// Summary of a successful run, consumed by the orchestrator's cross-year report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Dataset name.
    pub dataset: String,
    /// Rows in the simplified table.
    pub rows: usize,
    /// Columns in the simplified table.
    pub columns: usize,
    /// Industry groups with zero present codes for this dataset.
    pub skipped_groups: Vec<&'static str>,
    /// Sum of the total-employment column.
    pub total_employment: i64,
    /// Sum of the total-firm-count column.
    pub total_firms: i64,
    /// The three written artifacts, in simplified/stats/documentation order.
    pub outputs: [PathBuf; 3],
}

/// The three artifact paths a run of `dataset` writes under `out_dir`.
pub fn expected_outputs(dataset: &str, out_dir: &Path) -> [PathBuf; 3] {
    [
        out_dir.join(format!("{dataset}_simplified.csv")),
        out_dir.join(format!("{dataset}_summary_stats.csv")),
        out_dir.join(format!("{dataset}_column_documentation.csv")),
    ]
}

impl DatasetRun {
    /// Execute the run, reporting the outcome to the configured observer.
    pub fn run(&self) -> SimplifyResult<RunReport> {
        let ctx = RunContext {
            dataset: self.dataset.clone(),
            input: self.input.clone(),
        };

        let result = self.run_inner();

        if let Some(obs) = self.options.observer.as_ref() {
            match &result {
                Ok(report) => obs.on_success(
                    &ctx,
                    RunStats {
                        rows: report.rows,
                        columns: report.columns,
                        skipped_groups: report.skipped_groups.len(),
                    },
                ),
                Err(e) => {
                    let sev = severity_for_error(e);
                    obs.on_failure(&ctx, sev, e);
                    if sev >= self.options.alert_at_or_above {
                        obs.on_alert(&ctx, sev, e);
                    }
                }
            }
        }

        result
    }

    fn run_inner(&self) -> SimplifyResult<RunReport> {
        info!(dataset = %self.dataset, input = %self.input.display(), "loading raw extract");
        let raw = read_raw_csv_from_path(&self.input, &self.options.ingest)?;
        info!(
            dataset = %self.dataset,
            rows = raw.row_count(),
            columns = raw.schema.fields.len(),
            "raw extract loaded"
        );

        let simplified = simplify(&raw)?;
        let stats = describe(&simplified.table);

        let outputs = expected_outputs(&self.dataset, &self.out_dir);
        write_simplified(&outputs[0], &simplified.table)?;
        write_summary_stats(&outputs[1], &stats)?;
        write_column_documentation(&outputs[2], &simplified)?;

        Ok(RunReport {
            dataset: self.dataset.clone(),
            rows: simplified.table.row_count(),
            columns: simplified.table.schema.fields.len(),
            skipped_groups: simplified.skipped_groups,
            total_employment: column_sum(&simplified.table, COL_EMP_ALL),
            total_firms: column_sum(&simplified.table, COL_COUNT_ALL),
            outputs,
        })
    }
}

/// Computed severity for a run failure.
pub fn severity_for_error(e: &SimplifyError) -> RunSeverity {
    match e {
        SimplifyError::Io(_) => RunSeverity::Critical,
        SimplifyError::Csv(err) => match err.kind() {
            csv::ErrorKind::Io(_) => RunSeverity::Critical,
            _ => RunSeverity::Error,
        },
        SimplifyError::MissingColumn { .. } => RunSeverity::Error,
        SimplifyError::DataType { .. } => RunSeverity::Error,
    }
}

fn column_sum(table: &Table, column: &str) -> i64 {
    match table.column_index(column) {
        Some(idx) => table.rows.iter().map(|row| row[idx].as_i64()).sum(),
        None => 0,
    }
}
