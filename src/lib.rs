//! `census-simplify` transforms raw economic census survey extracts (one row per
//! small-area geographic unit, keyed by a spatial identifier) into simplified,
//! analysis-ready tables for downstream market segmentation.
//!
//! The raw extracts are wide CSVs: core identifier/aggregate columns plus roughly 90
//! per-industry-code employment columns (`industry_emp_<code>`). A run:
//!
//! 1. ingests the file into an in-memory [`types::Table`] ([`ingestion`]),
//! 2. aggregates the fine-grained codes into 14 coarse industry groups ([`groups`])
//!    and computes the derived market-segmentation indicators ([`simplify`]),
//! 3. writes the simplified table, per-column summary statistics ([`stats`]), and
//!    column documentation as three CSV artifacts ([`report`]).
//!
//! The [`pipeline`] module ties the stages together per dataset; the `census-simplify`
//! binary orchestrates the three census years (ec98, ec05, ec13) and writes a
//! cross-year inventory and summary.
//!
//! ## Quick example
//!
//! ```no_run
//! use census_simplify::pipeline::{DatasetRun, RunOptions};
//!
//! # fn main() -> Result<(), census_simplify::SimplifyError> {
//! let run = DatasetRun {
//!     dataset: "ec05_shrid".to_string(),
//!     input: "data/raw/ec05_shrid.csv".into(),
//!     out_dir: "data/processed/cleaned_files".into(),
//!     options: RunOptions::default(),
//! };
//! let report = run.run()?;
//! println!("rows={} skipped_groups={:?}", report.rows, report.skipped_groups);
//! # Ok(())
//! # }
//! ```
//!
//! ## Transformation contract
//!
//! - Missing core columns abort the dataset with [`SimplifyError::MissingColumn`].
//! - Missing `industry_emp_<code>` columns are tolerated: the code contributes
//!   nothing. A group with zero present codes produces no column and is recorded in
//!   [`simplify::SimplifiedTable::skipped_groups`] (and logged at warn level).
//! - Non-numeric text in a numeric column is [`SimplifyError::DataType`], never
//!   silently coerced.
//! - Every derived ratio is zero-guarded through [`simplify::safe_ratio`]: a zero (or
//!   missing) denominator yields exactly 0, not an error or NaN.
//!
//! ## Modules
//!
//! - [`groups`]: the static 14-group industry classifier
//! - [`ingestion`]: chunked raw-CSV ingestion
//! - [`simplify`]: core selection, group aggregation, derived indicators
//! - [`stats`]: descriptive statistics
//! - [`report`]: the three CSV artifacts
//! - [`pipeline`]: per-dataset runs with success/failure observability
//! - [`error`]: error types used across the crate

pub mod error;
pub mod groups;
pub mod ingestion;
pub mod pipeline;
pub mod report;
pub mod simplify;
pub mod stats;
pub mod types;

pub use error::{SimplifyError, SimplifyResult};
