use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::expenses::ExpenseMap;

static PERIOD_LABEL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[ \t]*([0-9]+)/(-?[0-9]+)[ \t]*$").ok());

/// Canonical summary record. Field order here is the key order of the JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Income")]
    pub income: Decimal,
    #[serde(rename = "Fixed Expenses")]
    pub fixed_expenses: ExpenseMap,
    #[serde(rename = "Variable Expenses")]
    pub variable_expenses: ExpenseMap,
    #[serde(rename = "Total Expenses")]
    pub total_expenses: Decimal,
    #[serde(rename = "Surplus")]
    pub surplus: Decimal,
}

impl BudgetSummary {
    /// Pretty-printed JSON with four-space indentation.
    pub fn to_json(&self) -> String {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        if let Err(e) = self.serialize(&mut ser) {
            tracing::error!(error = %e, "failed to serialize budget summary");
            return String::new();
        }
        String::from_utf8(buf).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse budget summary JSON")
    }

    /// Split the "M/YYYY" label back into month and year.
    pub fn period(&self) -> Result<(u32, i32)> {
        let re = PERIOD_LABEL
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Invalid period pattern"))?;
        let caps = re
            .captures(&self.month)
            .ok_or_else(|| anyhow::anyhow!("Invalid month label: '{}'", self.month))?;
        let month = caps[1]
            .parse()
            .with_context(|| format!("Invalid month in '{}'", self.month))?;
        let year = caps[2]
            .parse()
            .with_context(|| format!("Invalid year in '{}'", self.month))?;
        Ok((month, year))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Income,
    Fixed,
    Variable,
    Surplus,
}

impl RowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Fixed => "Fixed",
            Self::Variable => "Variable",
            Self::Surplus => "Surplus",
        }
    }
}

impl std::fmt::Display for RowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One (category, amount) line of the budget table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub category: String,
    pub amount: Decimal,
    pub kind: RowKind,
}

impl TableRow {
    pub fn new(category: impl Into<String>, amount: Decimal, kind: RowKind) -> Self {
        Self {
            category: category.into(),
            amount,
            kind,
        }
    }
}

/// A slice of the expense distribution chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseShare {
    pub category: String,
    pub amount: Decimal,
    /// 0–100, unrounded.
    pub percent: Decimal,
}
