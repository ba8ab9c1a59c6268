//! Report writers: the simplified table, summary statistics, and column
//! documentation, each as an independent CSV artifact.
//!
//! No transformation logic lives here. Column names and row order of the simplified
//! table are written exactly as produced by [`crate::simplify`]. Each writer has a
//! `*_to_writer` form for in-memory assertions plus a path-based wrapper.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::SimplifyResult;
use crate::groups::{INDUSTRY_GROUPS, group_column};
use crate::simplify::SimplifiedTable;
use crate::stats::ColumnStats;
use crate::types::{Table, Value};

/// One row of the column-documentation artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDoc {
    /// Documented column name.
    pub column_name: String,
    /// Human-readable description.
    pub description: String,
    /// Source industry codes, or `"Derived feature"`.
    pub codes_included: String,
    /// Coarse documentation category.
    pub variable_type: String,
}

/// Write the full row-level simplified table.
pub fn write_simplified(path: impl AsRef<Path>, table: &Table) -> SimplifyResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    write_simplified_to(&mut wtr, table)
}

/// Write the simplified table to any [`Write`] sink.
pub fn write_simplified_to<W: Write>(wtr: &mut csv::Writer<W>, table: &Table) -> SimplifyResult<()> {
    wtr.write_record(table.schema.field_names())?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(format_value))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write per-column summary statistics, one statistic per row.
pub fn write_summary_stats(path: impl AsRef<Path>, stats: &[ColumnStats]) -> SimplifyResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    write_summary_stats_to(&mut wtr, stats)
}

/// Write summary statistics to any [`Write`] sink.
///
/// Layout follows the conventional describe-table shape: a `statistic` label column,
/// then one column per summarized table column. Undefined statistics are empty cells.
pub fn write_summary_stats_to<W: Write>(
    wtr: &mut csv::Writer<W>,
    stats: &[ColumnStats],
) -> SimplifyResult<()> {
    let mut header = vec!["statistic".to_string()];
    header.extend(stats.iter().map(|s| s.column.clone()));
    wtr.write_record(&header)?;

    let rows: [(&str, fn(&ColumnStats) -> String); 8] = [
        ("count", |s| s.count.to_string()),
        ("mean", |s| opt(s.mean)),
        ("std", |s| opt(s.std)),
        ("min", |s| opt(s.min)),
        ("25%", |s| opt(s.q25)),
        ("50%", |s| opt(s.median)),
        ("75%", |s| opt(s.q75)),
        ("max", |s| opt(s.max)),
    ];
    for (label, cell) in rows {
        let mut record = vec![label.to_string()];
        record.extend(stats.iter().map(cell));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the column-documentation artifact.
pub fn write_column_documentation(
    path: impl AsRef<Path>,
    simplified: &SimplifiedTable,
) -> SimplifyResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    write_column_documentation_to(&mut wtr, simplified)
}

/// Write column documentation to any [`Write`] sink.
pub fn write_column_documentation_to<W: Write>(
    wtr: &mut csv::Writer<W>,
    simplified: &SimplifiedTable,
) -> SimplifyResult<()> {
    for doc in column_documentation(simplified) {
        wtr.serialize(doc)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Documentation entries: all 14 group columns (skipped groups flagged in the
/// description) followed by the derived indicators.
pub fn column_documentation(simplified: &SimplifiedTable) -> Vec<ColumnDoc> {
    let mut docs = Vec::with_capacity(INDUSTRY_GROUPS.len() + DERIVED_DOCS.len());

    for group in &INDUSTRY_GROUPS {
        let mut description = format!(
            "Total employment in {} sector",
            group.name.replace('_', " ")
        );
        if simplified.skipped_groups.contains(&group.name) {
            description.push_str(" (not present in this dataset)");
        }
        docs.push(ColumnDoc {
            column_name: group_column(group.name),
            description,
            codes_included: group
                .codes
                .iter()
                .map(u16::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            variable_type: "Industry Group Employment".to_string(),
        });
    }

    for (column, description, variable_type) in DERIVED_DOCS {
        docs.push(ColumnDoc {
            column_name: column.to_string(),
            description: description.to_string(),
            codes_included: "Derived feature".to_string(),
            variable_type: variable_type.to_string(),
        });
    }

    docs
}

const DERIVED_DOCS: [(&str, &str, &str); 8] = [
    (
        "economic_diversity_score",
        "Number of industry groups with employment > 0",
        "Economic Diversity",
    ),
    (
        "non_farm_employment_ratio",
        "Non-farm employment as % of total employment",
        "Economic Structure",
    ),
    (
        "firm_density",
        "Number of firms per 1000 employees",
        "Business Density",
    ),
    (
        "employment_per_firm",
        "Average employees per firm",
        "Firm Size",
    ),
    (
        "retail_diversity",
        "Number of retail/trade sectors present",
        "Market Sophistication",
    ),
    (
        "service_sophistication_score",
        "Number of sophisticated service sectors",
        "Service Economy",
    ),
    (
        "female_employment_ratio",
        "Female employment as % of total",
        "Gender Equality",
    ),
    (
        "formal_employment_ratio",
        "Formal sector employment as % of total",
        "Economic Formalization",
    ),
];

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Int64(v) => v.to_string(),
        Value::Float64(v) => v.to_string(),
        Value::Utf8(s) => s.clone(),
    }
}

fn opt(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}
