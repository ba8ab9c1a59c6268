use census_simplify::SimplifyError;
use census_simplify::ingestion::{IngestOptions, read_raw_csv_from_reader};
use census_simplify::report::write_simplified_to;
use census_simplify::simplify::{CORE_COLUMNS, SimplifiedTable, simplify};
use census_simplify::types::{Table, Value};

const CORE_HEADER: &str = "shrid,emp_all,emp_f,emp_m,emp_hired,emp_unhired,emp_gov,emp_priv,\
                           emp_inf,count_all,count_gov,count_priv,count_inf,emp_manuf,emp_services";

fn raw_from_csv(input: &str) -> Table {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());
    read_raw_csv_from_reader(&mut rdr, &IngestOptions::default()).unwrap()
}

fn cell(simplified: &SimplifiedTable, row: usize, column: &str) -> Value {
    let idx = simplified
        .table
        .column_index(column)
        .unwrap_or_else(|| panic!("column '{column}' missing"));
    simplified.table.rows[row][idx].clone()
}

/// One row: total employment 100, primary-industries codes summing to 30, wholesale
/// code present with value 10, retail absent.
fn worked_example() -> SimplifiedTable {
    let input = format!(
        "{CORE_HEADER},industry_emp_1,industry_emp_3,industry_emp_42\n\
         unit-1,100,40,60,70,30,10,50,40,10,1,6,3,20,60,20,10,10\n"
    );
    simplify(&raw_from_csv(&input)).unwrap()
}

#[test]
fn worked_example_matches_expected_indicators() {
    let s = worked_example();
    assert_eq!(cell(&s, 0, "emp_primary_industries"), Value::Int64(30));
    assert_eq!(cell(&s, 0, "emp_wholesale_trade"), Value::Int64(10));
    assert_eq!(cell(&s, 0, "non_farm_employment"), Value::Int64(70));
    assert_eq!(cell(&s, 0, "non_farm_employment_ratio"), Value::Float64(0.70));
    assert_eq!(cell(&s, 0, "retail_diversity"), Value::Int64(1));
}

#[test]
fn groups_without_present_codes_are_skipped_and_flagged() {
    let s = worked_example();
    // Only primary_industries and wholesale_trade have a present code.
    assert_eq!(
        s.group_columns
            .iter()
            .map(|g| g.group)
            .collect::<Vec<_>>(),
        vec!["primary_industries", "wholesale_trade"]
    );
    assert_eq!(s.skipped_groups.len(), 12);
    assert!(s.skipped_groups.contains(&"retail_consumer"));
    assert!(s.table.column_index("emp_retail_consumer").is_none());
}

#[test]
fn codes_actually_used_are_recorded() {
    let s = worked_example();
    let primary = &s.group_columns[0];
    assert_eq!(primary.codes_used, vec![1, 3]);
}

#[test]
fn zero_employment_rows_yield_zero_ratios_without_error() {
    let input = format!(
        "{CORE_HEADER},industry_emp_1\n\
         unit-1,0,0,0,0,0,0,0,0,4,0,0,0,0,0,0\n"
    );
    let s = simplify(&raw_from_csv(&input)).unwrap();
    for column in [
        "non_farm_employment_ratio",
        "firm_density",
        "employment_per_firm",
        "female_employment_ratio",
        "formal_employment_ratio",
    ] {
        assert_eq!(cell(&s, 0, column), Value::Float64(0.0), "{column}");
    }
}

#[test]
fn zero_firm_count_yields_zero_density_and_size() {
    let input = format!(
        "{CORE_HEADER},industry_emp_5\n\
         unit-1,50,20,30,10,40,0,0,50,0,0,0,0,5,30,12\n"
    );
    let s = simplify(&raw_from_csv(&input)).unwrap();
    assert_eq!(cell(&s, 0, "firm_density"), Value::Float64(0.0));
    assert_eq!(cell(&s, 0, "employment_per_firm"), Value::Float64(0.0));
}

#[test]
fn diversity_score_counts_positive_group_columns() {
    let input = format!(
        "{CORE_HEADER},industry_emp_1,industry_emp_42,industry_emp_47,industry_emp_65\n\
         unit-1,100,40,60,70,30,10,50,40,10,1,6,3,20,60,30,10,5,3\n\
         unit-2,100,40,60,70,30,10,50,40,10,1,6,3,20,60,30,0,5,0\n\
         unit-3,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0\n"
    );
    let s = simplify(&raw_from_csv(&input)).unwrap();

    assert_eq!(cell(&s, 0, "economic_diversity_score"), Value::Int64(4));
    assert_eq!(cell(&s, 1, "economic_diversity_score"), Value::Int64(2));
    assert_eq!(cell(&s, 2, "economic_diversity_score"), Value::Int64(0));

    // Bounds hold for every row.
    for row in 0..s.table.row_count() {
        let score = cell(&s, row, "economic_diversity_score").as_i64();
        assert!((0..=14).contains(&score));
    }
}

#[test]
fn group_sums_do_not_exceed_total_employment() {
    let input = format!(
        "{CORE_HEADER},industry_emp_1,industry_emp_13,industry_emp_47,industry_emp_80\n\
         unit-1,90,40,50,70,20,10,50,30,10,1,6,3,20,60,30,10,20,25\n\
         unit-2,40,10,30,10,30,0,0,40,4,0,2,2,5,30,10,0,15,\n"
    );
    let s = simplify(&raw_from_csv(&input)).unwrap();

    let group_idxs: Vec<usize> = s
        .group_columns
        .iter()
        .map(|g| s.table.column_index(&g.column).unwrap())
        .collect();
    let emp_all = s.table.column_index("emp_all").unwrap();
    for row in &s.table.rows {
        let total: i64 = group_idxs.iter().map(|&i| row[i].as_i64()).sum();
        assert!(total <= row[emp_all].as_i64());
    }
}

#[test]
fn uncategorized_codes_are_excluded_without_error() {
    let with_stray = format!(
        "{CORE_HEADER},industry_emp_1,industry_emp_95\n\
         unit-1,100,40,60,70,30,10,50,40,10,1,6,3,20,60,30,999\n"
    );
    let without = format!(
        "{CORE_HEADER},industry_emp_1\n\
         unit-1,100,40,60,70,30,10,50,40,10,1,6,3,20,60,30\n"
    );
    let a = simplify(&raw_from_csv(&with_stray)).unwrap();
    let b = simplify(&raw_from_csv(&without)).unwrap();
    // Code 95 belongs to no group; the simplified tables are identical.
    assert_eq!(a.table, b.table);
}

#[test]
fn missing_core_column_aborts_with_its_name() {
    let input = "shrid,emp_all,industry_emp_1\nunit-1,10,5\n";
    let err = simplify(&raw_from_csv(input)).unwrap_err();
    match err {
        SimplifyError::MissingColumn { column } => assert_eq!(column, "emp_f"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn simplified_columns_are_core_then_groups_then_indicators() {
    let s = worked_example();
    let names: Vec<&str> = s.table.schema.field_names().collect();
    assert_eq!(names[..15].to_vec(), CORE_COLUMNS.to_vec());
    assert_eq!(
        names[15..].to_vec(),
        vec![
            "emp_primary_industries",
            "emp_wholesale_trade",
            "economic_diversity_score",
            "non_farm_employment",
            "non_farm_employment_ratio",
            "firm_density",
            "employment_per_firm",
            "retail_diversity",
            "service_sophistication_score",
            "female_employment_ratio",
            "formal_employment_ratio",
        ]
    );
}

#[test]
fn simplification_is_byte_identical_across_runs() {
    let input = format!(
        "{CORE_HEADER},industry_emp_1,industry_emp_42,industry_emp_47\n\
         unit-1,100,40,60,70,30,10,50,40,10,1,6,3,20,60,30,10,5\n\
         unit-2,50,20,30,10,40,0,0,50,0,0,0,0,5,30,,25,8\n"
    );
    let raw = raw_from_csv(&input);

    let mut first = csv::Writer::from_writer(Vec::new());
    write_simplified_to(&mut first, &simplify(&raw).unwrap().table).unwrap();
    let mut second = csv::Writer::from_writer(Vec::new());
    write_simplified_to(&mut second, &simplify(&raw).unwrap().table).unwrap();

    assert_eq!(
        first.into_inner().unwrap(),
        second.into_inner().unwrap()
    );
}
