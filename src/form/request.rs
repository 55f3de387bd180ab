use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{BudgetModel, ExpenseMap};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: String, reason: String },
}

impl FormError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Raw form values as the user typed them, before any coercion.
///
/// Both front-ends (the TUI form and the CLI flags) fill one of these in and
/// call [`BudgetRequest::build`], so input handling is identical for both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetRequest {
    /// Blank means "current month".
    pub month: String,
    /// Blank means "current year".
    pub year: String,
    pub income: String,
    pub fixed: Vec<(String, String)>,
    pub variable: Vec<(String, String)>,
}

impl BudgetRequest {
    /// Request with every configured category present and blank.
    pub fn with_categories(fixed: &[String], variable: &[String]) -> Self {
        Self {
            fixed: fixed.iter().map(|c| (c.clone(), String::new())).collect(),
            variable: variable.iter().map(|c| (c.clone(), String::new())).collect(),
            ..Self::default()
        }
    }

    /// Set a fixed expense, adding the category if it isn't listed yet.
    pub fn set_fixed(&mut self, name: &str, amount: impl Into<String>) {
        upsert(&mut self.fixed, name, amount.into());
    }

    /// Set a variable expense, adding the category if it isn't listed yet.
    pub fn set_variable(&mut self, name: &str, amount: impl Into<String>) {
        upsert(&mut self.variable, name, amount.into());
    }

    /// Coerce every field and build the model.
    pub fn build(&self) -> Result<BudgetModel, FormError> {
        let month = parse_month(&self.month)?;
        let year = parse_year(&self.year)?;
        let income = parse_amount(&self.income).map_err(|reason| FormError::invalid("income", reason))?;
        let fixed = parse_expenses(&self.fixed)?;
        let variable = parse_expenses(&self.variable)?;

        let model = BudgetModel::new(income, fixed, variable, month, year);
        if model.checked_totals().is_none() {
            return Err(FormError::invalid(
                "amounts",
                "totals are too large to add up",
            ));
        }

        tracing::info!(
            month = ?month,
            year = ?year,
            fixed = model.fixed_expenses().len(),
            variable = model.variable_expenses().len(),
            "budget request accepted"
        );
        Ok(model)
    }
}

fn upsert(fields: &mut Vec<(String, String)>, name: &str, amount: String) {
    match fields.iter_mut().find(|(n, _)| n == name) {
        Some(field) => field.1 = amount,
        None => fields.push((name.to_string(), amount)),
    }
}

fn parse_expenses(fields: &[(String, String)]) -> Result<ExpenseMap, FormError> {
    let mut map = ExpenseMap::new();
    for (name, raw) in fields {
        let name = name.trim();
        if name.is_empty() {
            return Err(FormError::invalid("category", "name is empty"));
        }
        let amount = parse_amount(raw).map_err(|reason| FormError::invalid(name, reason))?;
        map.insert(name, amount);
    }
    Ok(map)
}

fn parse_month(raw: &str) -> Result<Option<u32>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let month: u32 = raw
        .parse()
        .map_err(|_| FormError::invalid("month", format!("'{raw}' is not a number")))?;
    if !(1..=12).contains(&month) {
        return Err(FormError::invalid("month", format!("{month} is outside 1-12")));
    }
    Ok(Some(month))
}

fn parse_year(raw: &str) -> Result<Option<i32>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| FormError::invalid("year", format!("'{raw}' is not a number")))
}

/// Coerce typed text to an amount. Blank is zero, like an untouched numeric
/// field. Currency symbols and spaces are ignored and `(500)` reads as `-500`.
/// A comma followed by one or two digits is a decimal comma (`1500,50`,
/// `1.500,50`); any other comma groups thousands.
pub fn parse_amount(s: &str) -> Result<Decimal, String> {
    let stripped: String = s
        .replace(['$', '_', ' ', '\u{a0}'], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    if stripped.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let cleaned = normalize_separators(&stripped);
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| format!("'{}' is not a number", s.trim()))
}

fn normalize_separators(s: &str) -> String {
    let decimal_comma = s.rfind(',').filter(|&pos| {
        let tail = &s[pos + 1..];
        (1..=2).contains(&tail.len())
            && tail.bytes().all(|b| b.is_ascii_digit())
            && !matches!(s.rfind('.'), Some(dot) if dot > pos)
    });
    match decimal_comma {
        Some(pos) => s
            .char_indices()
            .filter_map(|(i, c)| match c {
                ',' if i == pos => Some('.'),
                ',' | '.' => None,
                _ => Some(c),
            })
            .collect(),
        None => s.replace(',', ""),
    }
}
