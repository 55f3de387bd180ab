#![allow(clippy::unwrap_used)]

use chrono::{Datelike, Local};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn categories(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn filled_request() -> BudgetRequest {
    let mut req = BudgetRequest::with_categories(
        &categories(&["Rent", "Loan Payments", "Utilities"]),
        &categories(&["Groceries", "Leisure", "Transport"]),
    );
    req.month = "3".into();
    req.year = "2025".into();
    req.income = "50000".into();
    req.set_fixed("Rent", "15000");
    req.set_fixed("Loan Payments", "5000");
    req.set_fixed("Utilities", "2000");
    req.set_variable("Groceries", "3000");
    req.set_variable("Leisure", "1000");
    req.set_variable("Transport", "1500");
    req
}

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount_basic() {
    assert_eq!(parse_amount("100.50").unwrap(), dec!(100.50));
    assert_eq!(parse_amount("-42.99").unwrap(), dec!(-42.99));
    assert_eq!(parse_amount("42").unwrap(), dec!(42));
}

#[test]
fn test_parse_amount_separators() {
    assert_eq!(parse_amount("$1,234.56").unwrap(), dec!(1234.56));
    assert_eq!(parse_amount("50 000").unwrap(), dec!(50000));
    assert_eq!(parse_amount("1_000").unwrap(), dec!(1000));
}

#[test]
fn test_parse_amount_decimal_comma() {
    assert_eq!(parse_amount("1500,50").unwrap(), dec!(1500.50));
    assert_eq!(parse_amount("1500,5").unwrap(), dec!(1500.5));
    assert_eq!(parse_amount("1.500,50").unwrap(), dec!(1500.50));
    assert_eq!(parse_amount("12 345,67").unwrap(), dec!(12345.67));
    assert_eq!(parse_amount("-0,75").unwrap(), dec!(-0.75));
}

#[test]
fn test_parse_amount_comma_groups_thousands() {
    assert_eq!(parse_amount("1,500").unwrap(), dec!(1500));
    assert_eq!(parse_amount("1,234,567.89").unwrap(), dec!(1234567.89));
    assert_eq!(parse_amount("50\u{a0}000").unwrap(), dec!(50000));
}

#[test]
fn test_parse_amount_parentheses_negative() {
    assert_eq!(parse_amount("(500.00)").unwrap(), dec!(-500.00));
}

#[test]
fn test_parse_amount_blank_is_zero() {
    assert_eq!(parse_amount("").unwrap(), Decimal::ZERO);
    assert_eq!(parse_amount("   ").unwrap(), Decimal::ZERO);
}

#[test]
fn test_parse_amount_scientific() {
    assert_eq!(parse_amount("1e3").unwrap(), dec!(1000));
}

#[test]
fn test_parse_amount_invalid() {
    let err = parse_amount("lots").unwrap_err();
    assert!(err.contains("lots"));
}

// ── BudgetRequest ─────────────────────────────────────────────

#[test]
fn test_build_reference_budget() {
    let model = filled_request().build().unwrap();
    assert_eq!(model.total_expenses(), dec!(27500));
    assert_eq!(model.surplus(), dec!(22500));
    assert_eq!(model.period_label(), "3/2025");
}

#[test]
fn test_untouched_categories_default_to_zero() {
    let req = BudgetRequest::with_categories(&categories(&["Rent"]), &categories(&["Food"]));
    let model = req.build().unwrap();
    assert_eq!(model.income(), Decimal::ZERO);
    assert_eq!(model.fixed_expenses().get("Rent"), Some(Decimal::ZERO));
    assert_eq!(model.variable_expenses().get("Food"), Some(Decimal::ZERO));
    assert_eq!(model.to_table().len(), 4);
}

#[test]
fn test_blank_period_uses_current_date() {
    let mut req = filled_request();
    req.month.clear();
    req.year.clear();
    let model = req.build().unwrap();
    let now = Local::now();
    assert_eq!(model.month(), now.month());
    assert_eq!(model.year(), now.year());
}

#[test]
fn test_month_out_of_range_rejected() {
    for bad in ["0", "13", "-1"] {
        let mut req = filled_request();
        req.month = bad.into();
        let err = req.build().unwrap_err();
        let FormError::InvalidArgument { field, .. } = err;
        assert_eq!(field, "month", "month {bad} should be rejected");
    }
}

#[test]
fn test_month_not_a_number_rejected() {
    let mut req = filled_request();
    req.month = "March".into();
    assert!(req.build().is_err());
}

#[test]
fn test_year_not_a_number_rejected() {
    let mut req = filled_request();
    req.year = "20x5".into();
    let err = req.build().unwrap_err();
    assert_eq!(err.to_string(), "invalid year: '20x5' is not a number");
}

#[test]
fn test_non_numeric_income_rejected() {
    let mut req = filled_request();
    req.income = "plenty".into();
    let FormError::InvalidArgument { field, reason } = req.build().unwrap_err();
    assert_eq!(field, "income");
    assert!(reason.contains("plenty"));
}

#[test]
fn test_non_numeric_expense_names_category() {
    let mut req = filled_request();
    req.set_variable("Leisure", "a lot");
    let FormError::InvalidArgument { field, .. } = req.build().unwrap_err();
    assert_eq!(field, "Leisure");
}

#[test]
fn test_empty_category_name_rejected() {
    let mut req = filled_request();
    req.fixed.push(("  ".into(), "10".into()));
    assert!(req.build().is_err());
}

#[test]
fn test_negative_amounts_accepted() {
    let mut req = filled_request();
    req.income = "-100".into();
    req.set_fixed("Rent", "-5");
    let model = req.build().unwrap();
    assert_eq!(model.income(), dec!(-100));
    assert_eq!(model.fixed_expenses().get("Rent"), Some(dec!(-5)));
}

#[test]
fn test_set_adds_new_category_at_end() {
    let mut req = filled_request();
    req.set_fixed("Insurance", "700");
    req.set_fixed("Rent", "16000");
    let model = req.build().unwrap();
    let names: Vec<&str> = model.fixed_expenses().iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["Rent", "Loan Payments", "Utilities", "Insurance"]);
    assert_eq!(model.fixed_expenses().get("Rent"), Some(dec!(16000)));
}

#[test]
fn test_category_names_are_trimmed() {
    let mut req = BudgetRequest::default();
    req.fixed.push((" Rent ".into(), "10".into()));
    let model = req.build().unwrap();
    assert_eq!(model.fixed_expenses().get("Rent"), Some(dec!(10)));
}

#[test]
fn test_maximum_amount_is_accepted_alone() {
    let mut req = BudgetRequest::default();
    req.month = "1".into();
    req.year = "2024".into();
    req.income = Decimal::MAX.to_string();
    req.set_fixed("Rent", Decimal::MAX.to_string());
    let model = req.build().unwrap();
    assert_eq!(model.total_expenses(), Decimal::MAX);
    assert_eq!(model.surplus(), Decimal::ZERO);
}

#[test]
fn test_overflowing_totals_rejected() {
    let mut req = filled_request();
    req.set_fixed("Rent", "79228162514264337593543950335");
    req.set_fixed("Loan Payments", "1");
    let err = req.build().unwrap_err();
    assert_eq!(
        err,
        FormError::InvalidArgument {
            field: "amounts".into(),
            reason: "totals are too large to add up".into(),
        }
    );
}

#[test]
fn test_overflowing_surplus_rejected() {
    let mut req = BudgetRequest::default();
    req.income = Decimal::MIN.to_string();
    req.set_fixed("Rent", "1");
    assert!(req.build().is_err());
}
