#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Rent", 10), "Rent");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("Rent", 4), "Rent");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Loan Payments", 5), "Loan…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("Rent", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("Strøm og nett", 6), "Strøm…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56), "NOK"), "1,234.56 NOK");
}

#[test]
fn test_format_amount_no_currency() {
    assert_eq!(format_amount(dec!(999.99), ""), "999.99");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0), "NOK"), "0.00 NOK");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-4000), "NOK"), "-4,000.00 NOK");
}

#[test]
fn test_format_amount_large() {
    assert_eq!(format_amount(dec!(1234567.89), "EUR"), "1,234,567.89 EUR");
}

#[test]
fn test_format_amount_rounds_to_two_decimals() {
    assert_eq!(format_amount(dec!(1.5), "NOK"), "1.50 NOK");
    assert_eq!(format_amount(dec!(0.015), "NOK"), "0.02 NOK");
}

// ── progress_bar ──────────────────────────────────────────────

#[test]
fn test_progress_bar_half() {
    assert_eq!(progress_bar(0.5, 4), "[██░░]");
}

#[test]
fn test_progress_bar_clamps() {
    assert_eq!(progress_bar(1.7, 3), "[███]");
    assert_eq!(progress_bar(-0.2, 3), "[░░░]");
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!((index, scroll), (3, 1));
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (4, 2);
    scroll_down(&mut index, &mut scroll, 5, 3);
    assert_eq!((index, scroll), (4, 2));
}

#[test]
fn test_scroll_up_and_bounds() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

// ── shellexpand ───────────────────────────────────────────────

#[test]
fn test_shellexpand_leaves_plain_paths() {
    assert_eq!(shellexpand("/tmp/budget.json"), "/tmp/budget.json");
    assert_eq!(shellexpand("budget.json"), "budget.json");
}

#[test]
fn test_shellexpand_home() {
    let expanded = shellexpand("~/budget.json");
    assert!(expanded.ends_with("/budget.json"));
    assert!(!expanded.starts_with('~'));
}
