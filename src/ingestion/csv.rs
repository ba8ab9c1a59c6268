//! Raw census CSV ingestion.

use std::path::Path;

use tracing::debug;

use crate::error::{SimplifyError, SimplifyResult};
use crate::simplify::{COL_SHRID, CORE_COLUMNS};
use crate::types::{DataType, Field, Schema, Table, Value};

/// Options controlling raw-CSV ingestion.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Number of records buffered per read chunk.
    ///
    /// The whole table still ends up in memory; chunking only bounds the size of the
    /// intermediate allocations while reading.
    pub chunk_size: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { chunk_size: 10_000 }
    }
}

/// Ingest a raw census CSV file into an in-memory [`Table`].
///
/// Rules:
///
/// - The CSV must have a header row.
/// - Core columns (see [`CORE_COLUMNS`]) and `industry_emp_<code>` columns are loaded;
///   all other columns are dropped. Absent columns are tolerated here; the simplifier
///   enforces core-column presence.
/// - The identifier column is read as text, everything else as integers. Empty cells
///   become [`Value::Null`]; non-numeric text in a numeric column is a
///   [`SimplifyError::DataType`] error.
pub fn read_raw_csv_from_path(
    path: impl AsRef<Path>,
    options: &IngestOptions,
) -> SimplifyResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    read_raw_csv_from_reader(&mut rdr, options)
}

/// Ingest raw census data from an existing CSV reader.
pub fn read_raw_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    options: &IngestOptions,
) -> SimplifyResult<Table> {
    let headers = rdr.headers()?.clone();

    // Classify headers once: keep (csv index, typed field) for loaded columns only.
    let mut loaded: Vec<(usize, Field)> = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        if let Some(field) = classify_header(header) {
            loaded.push((idx, field));
        }
    }
    debug!(
        loaded = loaded.len(),
        dropped = headers.len() - loaded.len(),
        "classified raw headers"
    );

    let chunk_size = options.chunk_size.max(1);
    let mut rows: Vec<Vec<Value>> = Vec::new();
    let mut chunk: Vec<Vec<Value>> = Vec::with_capacity(chunk_size);

    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(loaded.len());
        for (csv_idx, field) in &loaded {
            let raw = record.get(*csv_idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        chunk.push(row);

        if chunk.len() == chunk_size {
            rows.append(&mut chunk);
        }
    }
    rows.append(&mut chunk);

    let fields = loaded.into_iter().map(|(_, f)| f).collect();
    Ok(Table::new(Schema::new(fields), rows))
}

/// Map a raw header to a loaded field, or `None` for columns we drop.
fn classify_header(header: &str) -> Option<Field> {
    if header == COL_SHRID {
        return Some(Field::new(header, DataType::Utf8));
    }
    if CORE_COLUMNS.contains(&header) {
        return Some(Field::new(header, DataType::Int64));
    }
    if let Some(suffix) = header.strip_prefix("industry_emp_") {
        if suffix.parse::<u16>().is_ok() {
            return Some(Field::new(header, DataType::Int64));
        }
    }
    None
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: DataType,
    raw: &str,
) -> SimplifyResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => {
            trimmed
                .parse::<i64>()
                .map(Value::Int64)
                .map_err(|e| SimplifyError::DataType {
                    row,
                    column: column.to_owned(),
                    raw: raw.to_owned(),
                    message: e.to_string(),
                })
        }
        DataType::Float64 => {
            trimmed
                .parse::<f64>()
                .map(Value::Float64)
                .map_err(|e| SimplifyError::DataType {
                    row,
                    column: column.to_owned(),
                    raw: raw.to_owned(),
                    message: e.to_string(),
                })
        }
    }
}
