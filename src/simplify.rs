//! Table simplification: core-column selection, industry-group aggregation, and the
//! derived market-segmentation indicators.
//!
//! This is the whole transformation contract of the crate. Input is the raw [`Table`]
//! produced by ingestion; output is a [`SimplifiedTable`] with, in order:
//!
//! 1. the 15 core identifier/aggregate columns ([`CORE_COLUMNS`]),
//! 2. one summed `emp_<group>` column per industry group with at least one
//!    `industry_emp_<code>` column present in the raw table,
//! 3. the derived indicator columns, computed elementwise with uniform zero-guarded
//!    division ([`safe_ratio`]).
//!
//! Groups with zero present codes produce no column; they are recorded in
//! [`SimplifiedTable::skipped_groups`] and logged at warn level, never failed.

use tracing::{debug, warn};

use crate::error::SimplifyResult;
use crate::groups::{INDUSTRY_GROUPS, group_column, industry_column};
use crate::types::{DataType, Field, Table, Value};

/// Geographic unit identifier column.
pub const COL_SHRID: &str = "shrid";
/// Total employment column.
pub const COL_EMP_ALL: &str = "emp_all";
/// Female employment column.
pub const COL_EMP_F: &str = "emp_f";
/// Government employment column.
pub const COL_EMP_GOV: &str = "emp_gov";
/// Private employment column.
pub const COL_EMP_PRIV: &str = "emp_priv";
/// Total firm count column.
pub const COL_COUNT_ALL: &str = "count_all";

/// Core identifier/aggregate columns retained unchanged from the raw table.
///
/// Any absence is fatal for the dataset (`MissingColumn`).
pub const CORE_COLUMNS: [&str; 15] = [
    COL_SHRID,
    COL_EMP_ALL,
    COL_EMP_F,
    "emp_m",
    "emp_hired",
    "emp_unhired",
    COL_EMP_GOV,
    COL_EMP_PRIV,
    "emp_inf",
    COL_COUNT_ALL,
    "count_gov",
    "count_priv",
    "count_inf",
    "emp_manuf",
    "emp_services",
];

/// Metadata for one produced industry-group column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupColumn {
    /// Group name from the static classifier.
    pub group: &'static str,
    /// Output column name (`emp_<group>`).
    pub column: String,
    /// Codes whose raw columns were actually present and summed.
    pub codes_used: Vec<u16>,
}

/// Result of a simplification run: the table plus what was (and was not) aggregated.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplifiedTable {
    /// The simplified table (core + group + derived columns).
    pub table: Table,
    /// One entry per produced group column, in output order.
    pub group_columns: Vec<GroupColumn>,
    /// Groups with zero present codes for this dataset. Logged, not fatal.
    pub skipped_groups: Vec<&'static str>,
}

/// Zero-guarded division: `numerator / denominator`, or 0 when the denominator is 0.
///
/// Applied uniformly to every derived ratio so that rows with zero employment or zero
/// firms come out as 0 rather than an error or NaN.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Simplify a raw census table.
///
/// Fails with `MissingColumn` if any of [`CORE_COLUMNS`] is absent, or propagates
/// nothing else: industry-code columns absent from the raw table merely reduce (or
/// skip) their group's contribution.
pub fn simplify(raw: &Table) -> SimplifyResult<SimplifiedTable> {
    let mut table = raw.select(&CORE_COLUMNS)?;

    let (group_columns, skipped_groups) = aggregate_groups(raw, &mut table);
    derive_indicators(&mut table, &group_columns);

    debug!(
        rows = table.row_count(),
        columns = table.schema.fields.len(),
        groups = group_columns.len(),
        skipped = skipped_groups.len(),
        "simplified table"
    );

    Ok(SimplifiedTable {
        table,
        group_columns,
        skipped_groups,
    })
}

/// Append one summed `emp_<group>` column per group with at least one present code.
fn aggregate_groups(
    raw: &Table,
    table: &mut Table,
) -> (Vec<GroupColumn>, Vec<&'static str>) {
    let mut group_columns = Vec::with_capacity(INDUSTRY_GROUPS.len());
    let mut skipped = Vec::new();

    for group in &INDUSTRY_GROUPS {
        // Explicit lookup per code, by exact column name. Codes without a column for
        // this census year contribute nothing.
        let mut codes_used = Vec::new();
        let mut col_idxs = Vec::new();
        for &code in group.codes {
            if let Some(idx) = raw.column_index(&industry_column(code)) {
                codes_used.push(code);
                col_idxs.push(idx);
            }
        }

        if col_idxs.is_empty() {
            warn!(group = group.name, "no industry-code columns present; group skipped");
            skipped.push(group.name);
            continue;
        }

        let sums = raw
            .rows
            .iter()
            .map(|row| Value::Int64(col_idxs.iter().map(|&i| row[i].as_i64()).sum()))
            .collect();

        let column = group_column(group.name);
        table.append_column(Field::new(column.clone(), DataType::Int64), sums);
        group_columns.push(GroupColumn {
            group: group.name,
            column,
            codes_used,
        });
    }

    (group_columns, skipped)
}

/// Append the derived indicator columns, in their fixed order.
fn derive_indicators(table: &mut Table, group_columns: &[GroupColumn]) {
    // Core columns are at their CORE_COLUMNS positions by construction of `select`,
    // and group columns were appended just above.
    let lookup = |name: &str| {
        table
            .column_index(name)
            .expect("column appended before indicators are derived")
    };
    let emp_all = lookup(COL_EMP_ALL);
    let emp_f = lookup(COL_EMP_F);
    let emp_gov = lookup(COL_EMP_GOV);
    let emp_priv = lookup(COL_EMP_PRIV);
    let count_all = lookup(COL_COUNT_ALL);

    let group_idxs: Vec<usize> = group_columns.iter().map(|g| lookup(&g.column)).collect();
    let group_idx_of = |name: &'static str| {
        group_columns
            .iter()
            .position(|g| g.group == name)
            .map(|i| group_idxs[i])
    };
    let primary = group_idx_of("primary_industries");
    let retail_idxs: Vec<usize> = ["wholesale_trade", "retail_consumer"]
        .into_iter()
        .filter_map(|n| group_idx_of(n))
        .collect();
    let service_idxs: Vec<usize> = [
        "financial_services",
        "business_services",
        "communication_digital",
        "social_services",
        "entertainment_culture",
    ]
    .into_iter()
    .filter_map(|n| group_idx_of(n))
    .collect();

    // Number of industry groups with employment > 0. Pinned to the group columns:
    // core aggregates and later indicators never count toward diversity.
    append_int(table, "economic_diversity_score", |row| {
        group_idxs.iter().filter(|&&i| row[i].is_positive()).count() as i64
    });

    // A skipped primary-industries group subtracts nothing.
    append_int(table, "non_farm_employment", |row| {
        row[emp_all].as_i64() - primary.map_or(0, |i| row[i].as_i64())
    });
    let non_farm = table
        .column_index("non_farm_employment")
        .expect("appended above");

    append_float(table, "non_farm_employment_ratio", |row| {
        safe_ratio(row[non_farm].as_f64(), row[emp_all].as_f64())
    });

    // Firms per 1000 employees.
    append_float(table, "firm_density", |row| {
        safe_ratio(row[count_all].as_f64(), row[emp_all].as_f64() / 1000.0)
    });

    append_float(table, "employment_per_firm", |row| {
        safe_ratio(row[emp_all].as_f64(), row[count_all].as_f64())
    });

    // Range 0-2: wholesale and retail presence.
    append_int(table, "retail_diversity", |row| {
        retail_idxs.iter().filter(|&&i| row[i].is_positive()).count() as i64
    });

    // Range 0-5: sophisticated service sectors present.
    append_int(table, "service_sophistication_score", |row| {
        service_idxs.iter().filter(|&&i| row[i].is_positive()).count() as i64
    });

    append_float(table, "female_employment_ratio", |row| {
        safe_ratio(row[emp_f].as_f64(), row[emp_all].as_f64())
    });

    append_float(table, "formal_employment_ratio", |row| {
        safe_ratio(
            (row[emp_gov].as_i64() + row[emp_priv].as_i64()) as f64,
            row[emp_all].as_f64(),
        )
    });
}

fn append_int<F>(table: &mut Table, name: &str, mut f: F)
where
    F: FnMut(&[Value]) -> i64,
{
    let values = table.rows.iter().map(|row| Value::Int64(f(row))).collect();
    table.append_column(Field::new(name, DataType::Int64), values);
}

fn append_float<F>(table: &mut Table, name: &str, mut f: F)
where
    F: FnMut(&[Value]) -> f64,
{
    let values = table
        .rows
        .iter()
        .map(|row| Value::Float64(f(row)))
        .collect();
    table.append_column(Field::new(name, DataType::Float64), values);
}
