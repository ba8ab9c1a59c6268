//! Descriptive statistics over a simplified table.
//!
//! Produces the standard per-column summary (count, mean, sample standard deviation,
//! min, quartiles, max) for every numeric column, in table column order. Text columns
//! (the identifier) are excluded. Null cells are excluded from a column's statistics.

use crate::types::{DataType, Table, Value};

/// Summary statistics for one numeric column.
///
/// `count` is the number of non-null cells. Every other statistic is `None` when it is
/// undefined for the column (empty column, or `std` with fewer than two values).
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    /// Column name.
    pub column: String,
    /// Non-null cell count.
    pub count: u64,
    /// Arithmetic mean.
    pub mean: Option<f64>,
    /// Sample standard deviation (n-1 denominator).
    pub std: Option<f64>,
    /// Minimum.
    pub min: Option<f64>,
    /// 25% quantile (linear interpolation).
    pub q25: Option<f64>,
    /// Median.
    pub median: Option<f64>,
    /// 75% quantile (linear interpolation).
    pub q75: Option<f64>,
    /// Maximum.
    pub max: Option<f64>,
}

/// Compute [`ColumnStats`] for every numeric column of `table`, in column order.
pub fn describe(table: &Table) -> Vec<ColumnStats> {
    table
        .schema
        .fields
        .iter()
        .enumerate()
        .filter(|(_, field)| field.data_type != DataType::Utf8)
        .map(|(idx, field)| {
            let mut values: Vec<f64> = table
                .rows
                .iter()
                .filter_map(|row| match &row[idx] {
                    Value::Null | Value::Utf8(_) => None,
                    v => Some(v.as_f64()),
                })
                .collect();
            values.sort_by(f64::total_cmp);
            column_stats(&field.name, &values)
        })
        .collect()
}

fn column_stats(name: &str, sorted: &[f64]) -> ColumnStats {
    let n = sorted.len();
    if n == 0 {
        return ColumnStats {
            column: name.to_string(),
            count: 0,
            mean: None,
            std: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
        };
    }

    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std = if n > 1 {
        let ss = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        Some((ss / (n - 1) as f64).sqrt())
    } else {
        None
    };

    ColumnStats {
        column: name.to_string(),
        count: n as u64,
        mean: Some(mean),
        std,
        min: Some(sorted[0]),
        q25: Some(quantile(sorted, 0.25)),
        median: Some(quantile(sorted, 0.5)),
        q75: Some(quantile(sorted, 0.75)),
        max: Some(sorted[n - 1]),
    }
}

/// Quantile of a sorted slice with linear interpolation between order statistics.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

#[cfg(test)]
mod tests {
    use super::{describe, quantile};
    use crate::types::{DataType, Field, Schema, Table, Value};

    fn table_one_column(values: Vec<Value>) -> Table {
        let schema = Schema::new(vec![
            Field::new("shrid", DataType::Utf8),
            Field::new("emp_all", DataType::Int64),
        ]);
        let rows = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| vec![Value::Utf8(format!("unit-{i}")), v])
            .collect();
        Table::new(schema, rows)
    }

    #[test]
    fn quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 0.25), 1.75);
    }

    #[test]
    fn describe_skips_text_columns_and_nulls() {
        let table = table_one_column(vec![
            Value::Int64(10),
            Value::Null,
            Value::Int64(20),
            Value::Int64(30),
        ]);
        let stats = describe(&table);
        assert_eq!(stats.len(), 1);

        let s = &stats[0];
        assert_eq!(s.column, "emp_all");
        assert_eq!(s.count, 3);
        assert_eq!(s.mean, Some(20.0));
        assert_eq!(s.std, Some(10.0));
        assert_eq!(s.min, Some(10.0));
        assert_eq!(s.median, Some(20.0));
        assert_eq!(s.max, Some(30.0));
    }

    #[test]
    fn describe_handles_empty_and_single_value_columns() {
        let empty = describe(&table_one_column(vec![Value::Null]));
        assert_eq!(empty[0].count, 0);
        assert_eq!(empty[0].mean, None);

        let single = describe(&table_one_column(vec![Value::Int64(7)]));
        assert_eq!(single[0].count, 1);
        assert_eq!(single[0].mean, Some(7.0));
        assert_eq!(single[0].std, None);
        assert_eq!(single[0].q25, Some(7.0));
        assert_eq!(single[0].max, Some(7.0));
    }
}
