//! Ingestion of raw census extracts.
//!
//! The raw files are wide CSVs (~137 columns) of which only the core
//! identifier/aggregate columns and the per-industry-code employment columns are
//! loaded; everything else is dropped at read time. See [`csv`].

pub mod csv;

pub use csv::{IngestOptions, read_raw_csv_from_path, read_raw_csv_from_reader};
