use thiserror::Error;

/// Convenience result type for simplification operations.
pub type SimplifyResult<T> = Result<T, SimplifyError>;

/// Error type returned across ingestion, simplification, and report writing.
///
/// All variants are fatal for the dataset being processed; other datasets in the same
/// orchestrator run are unaffected. Industry groups that cannot be aggregated because no
/// industry-code column is present are a logged warning, not an error.
#[derive(Debug, Error)]
pub enum SimplifyError {
    /// Underlying I/O error (e.g. input unreadable, output unwritable).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A required core column is absent from the raw table.
    #[error("missing required column '{column}'")]
    MissingColumn { column: String },

    /// Non-numeric value in a numeric column. Surfaced to the caller, never coerced.
    #[error("bad value at row {row} column '{column}': {message} (raw='{raw}')")]
    DataType {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}
