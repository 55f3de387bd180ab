#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::ExpenseMap;

fn sample_model() -> BudgetModel {
    BudgetModel::new(
        dec!(50000),
        ExpenseMap::from([("Rent", dec!(15000)), ("Loan Payments", dec!(5000))]),
        ExpenseMap::from([("Groceries", dec!(3000.50))]),
        Some(4),
        Some(2025),
    )
}

#[test]
fn test_write_and_read_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_JSON_FILE);
    let model = sample_model();

    write_json(&model, &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), model.to_json());

    let back = read_json(&path).unwrap();
    assert_eq!(back.summary(), model.summary());
}

#[test]
fn test_write_json_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deeper/summary.json");
    write_json(&sample_model(), &path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_read_json_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(read_json(&dir.path().join("absent.json")).is_err());
}

#[test]
fn test_read_json_not_a_summary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("other.json");
    std::fs::write(&path, r#"{"hello": "world"}"#).unwrap();
    let err = read_json(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Not a budget summary"));
}

#[test]
fn test_table_csv_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.csv");
    let rows = sample_model().to_table();

    let written = write_table_csv(&rows, &path).unwrap();
    assert_eq!(written, 5);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Category,Amount",
            "Income,50000",
            "Rent,15000",
            "Loan Payments,5000",
            "Groceries,3000.50",
            "Surplus,26999.50",
        ]
    );
}

#[test]
fn test_table_csv_quotes_commas_in_names() {
    let model = BudgetModel::new(
        dec!(10),
        ExpenseMap::from([("Phone, Internet", dec!(3))]),
        ExpenseMap::new(),
        Some(1),
        Some(2024),
    );
    let mut buf = Vec::new();
    write_table_csv_to(&model.to_table(), &mut buf).unwrap();
    let content = String::from_utf8(buf).unwrap();
    assert!(content.contains("\"Phone, Internet\",3"));
}
