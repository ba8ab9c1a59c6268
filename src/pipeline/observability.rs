//! Observer hooks for per-dataset runs.
//!
//! The orchestrator (or any embedding caller) can attach a [`RunObserver`] to receive
//! success/failure callbacks per dataset, with an alert threshold for the severities
//! it cares about.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::SimplifyError;

/// Severity classification for run failures.
///
/// The default is [`RunSeverity::Critical`], matching the default alert threshold in
/// [`crate::pipeline::RunOptions`]: only infrastructure failures alert unless the
/// caller lowers the bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunSeverity {
    /// Warning-level event (non-fatal).
    Warning,
    /// Run failed (bad data: missing column, unparseable value).
    Error,
    /// Run failed on infrastructure (input unreadable, output unwritable).
    #[default]
    Critical,
}

/// Context about one dataset run.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Dataset name (e.g. `ec05_shrid`).
    pub dataset: String,
    /// Input path.
    pub input: PathBuf,
}

/// Stats reported on a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Rows in the simplified table.
    pub rows: usize,
    /// Columns in the simplified table.
    pub columns: usize,
    /// Industry groups skipped for this dataset.
    pub skipped_groups: usize,
}

/// Observer interface for run outcomes.
pub trait RunObserver: Send + Sync {
    /// Called when a dataset run succeeds.
    fn on_success(&self, _ctx: &RunContext, _stats: RunStats) {}

    /// Called when a dataset run fails.
    fn on_failure(&self, _ctx: &RunContext, _severity: RunSeverity, _error: &SimplifyError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &RunContext, severity: RunSeverity, error: &SimplifyError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn RunObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn RunObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl RunObserver for CompositeObserver {
    fn on_success(&self, ctx: &RunContext, stats: RunStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &RunContext, severity: RunSeverity, error: &SimplifyError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &RunContext, severity: RunSeverity, error: &SimplifyError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs run outcomes through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn on_success(&self, ctx: &RunContext, stats: RunStats) {
        tracing::info!(
            dataset = %ctx.dataset,
            rows = stats.rows,
            columns = stats.columns,
            skipped_groups = stats.skipped_groups,
            "dataset simplified"
        );
    }

    fn on_failure(&self, ctx: &RunContext, severity: RunSeverity, error: &SimplifyError) {
        tracing::error!(
            dataset = %ctx.dataset,
            input = %ctx.input.display(),
            ?severity,
            %error,
            "dataset run failed"
        );
    }

    fn on_alert(&self, ctx: &RunContext, severity: RunSeverity, error: &SimplifyError) {
        tracing::error!(
            dataset = %ctx.dataset,
            input = %ctx.input.display(),
            ?severity,
            %error,
            "ALERT: dataset run failed"
        );
    }
}

/// Appends run outcomes to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl RunObserver for FileObserver {
    fn on_success(&self, ctx: &RunContext, stats: RunStats) {
        self.append_line(&format!(
            "{} ok dataset={} rows={} columns={} skipped_groups={}",
            unix_ts(),
            ctx.dataset,
            stats.rows,
            stats.columns,
            stats.skipped_groups
        ));
    }

    fn on_failure(&self, ctx: &RunContext, severity: RunSeverity, error: &SimplifyError) {
        self.append_line(&format!(
            "{} fail severity={:?} dataset={} input={} err={}",
            unix_ts(),
            severity,
            ctx.dataset,
            ctx.input.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &RunContext, severity: RunSeverity, error: &SimplifyError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} dataset={} input={} err={}",
            unix_ts(),
            severity,
            ctx.dataset,
            ctx.input.display(),
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
