//! Core data model types.
//!
//! Raw census extracts are ingested into an in-memory [`Table`]: a [`Schema`] (ordered,
//! typed [`Field`]s) plus row-major [`Value`] storage. The simplifier builds a second,
//! narrower `Table` from the raw one by selecting core columns and appending computed
//! columns.

use crate::error::{SimplifyError, SimplifyResult};

/// Logical data type for a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer (employment/firm counts, diversity scores).
    Int64,
    /// 64-bit floating point number (derived ratios).
    Float64,
    /// UTF-8 string (the geographic identifier).
    Utf8,
}

/// A single named, typed column in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Column name.
    pub name: String,
    /// Column data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// An ordered list of fields describing the shape of a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value. Behaves as 0 in sums, comparisons, and denominators.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Numeric view as `i64`; `Null` and non-numeric values read as 0.
    pub fn as_i64(&self) -> i64 {
        match self {
            Value::Int64(v) => *v,
            Value::Float64(v) => *v as i64,
            _ => 0,
        }
    }

    /// Numeric view as `f64`; `Null` and non-numeric values read as 0.0.
    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Int64(v) => *v as f64,
            Value::Float64(v) => *v,
            _ => 0.0,
        }
    }

    /// True if the value is numeric and strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        match self {
            Value::Int64(v) => *v > 0,
            Value::Float64(v) => *v > 0.0,
            _ => false,
        }
    }
}

/// In-memory tabular dataset, row-major, in schema field order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the index of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.schema.index_of(name)
    }

    /// Create a new table containing exactly the named columns, in the given order.
    ///
    /// Errors with [`SimplifyError::MissingColumn`] naming the first absent column.
    pub fn select(&self, names: &[&str]) -> SimplifyResult<Table> {
        let mut idxs = Vec::with_capacity(names.len());
        for name in names {
            match self.schema.index_of(name) {
                Some(idx) => idxs.push(idx),
                None => {
                    return Err(SimplifyError::MissingColumn {
                        column: (*name).to_string(),
                    });
                }
            }
        }

        let fields = idxs
            .iter()
            .map(|&i| self.schema.fields[i].clone())
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| idxs.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(Table::new(Schema::new(fields), rows))
    }

    /// Append a computed column, one value per existing row.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` differs from the row count.
    pub fn append_column(&mut self, field: Field, values: Vec<Value>) {
        assert!(
            values.len() == self.rows.len(),
            "column '{}' has {} values for {} rows",
            field.name,
            values.len(),
            self.rows.len()
        );
        self.schema.fields.push(field);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DataType, Field, Schema, Table, Value};
    use crate::error::SimplifyError;

    fn sample_table() -> Table {
        let schema = Schema::new(vec![
            Field::new("shrid", DataType::Utf8),
            Field::new("emp_all", DataType::Int64),
            Field::new("count_all", DataType::Int64),
        ]);
        let rows = vec![
            vec![
                Value::Utf8("11-22-333".to_string()),
                Value::Int64(100),
                Value::Int64(10),
            ],
            vec![
                Value::Utf8("11-22-334".to_string()),
                Value::Int64(50),
                Value::Null,
            ],
        ];
        Table::new(schema, rows)
    }

    #[test]
    fn select_reorders_and_narrows() {
        let table = sample_table();
        let out = table.select(&["emp_all", "shrid"]).unwrap();
        assert_eq!(
            out.schema.field_names().collect::<Vec<_>>(),
            vec!["emp_all", "shrid"]
        );
        assert_eq!(out.rows[0][0], Value::Int64(100));
        assert_eq!(out.rows[1][1], Value::Utf8("11-22-334".to_string()));
    }

    #[test]
    fn select_names_first_missing_column() {
        let table = sample_table();
        let err = table.select(&["emp_all", "emp_f", "emp_gov"]).unwrap_err();
        match err {
            SimplifyError::MissingColumn { column } => assert_eq!(column, "emp_f"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn append_column_extends_every_row() {
        let mut table = sample_table();
        table.append_column(
            Field::new("emp_primary_industries", DataType::Int64),
            vec![Value::Int64(30), Value::Int64(0)],
        );
        assert_eq!(table.schema.fields.len(), 4);
        assert_eq!(table.rows[0][3], Value::Int64(30));
        assert_eq!(table.rows[1][3], Value::Int64(0));
    }

    #[test]
    #[should_panic(expected = "values for")]
    fn append_column_panics_on_length_mismatch() {
        let mut table = sample_table();
        table.append_column(Field::new("bad", DataType::Int64), vec![Value::Int64(1)]);
    }

    #[test]
    fn null_reads_as_zero_and_not_positive() {
        assert_eq!(Value::Null.as_i64(), 0);
        assert_eq!(Value::Null.as_f64(), 0.0);
        assert!(!Value::Null.is_positive());
        assert!(Value::Int64(1).is_positive());
        assert!(!Value::Int64(0).is_positive());
        assert!(Value::Float64(0.5).is_positive());
    }
}
