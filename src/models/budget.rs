use chrono::{DateTime, Datelike, Local};
use rust_decimal::Decimal;

use super::expenses::ExpenseMap;
use super::summary::{BudgetSummary, ExpenseShare, RowKind, TableRow};

/// One month's budget snapshot. Immutable once built; every derived figure is
/// recomputed from the stored fields on each call.
#[derive(Debug, Clone)]
pub struct BudgetModel {
    income: Decimal,
    fixed_expenses: ExpenseMap,
    variable_expenses: ExpenseMap,
    month: u32,
    year: i32,
    created_at: DateTime<Local>,
}

impl BudgetModel {
    /// Missing `month`/`year` fall back to the construction date. Nothing is
    /// range-checked here; see `form::BudgetRequest` for the input boundary.
    pub fn new(
        income: Decimal,
        fixed_expenses: ExpenseMap,
        variable_expenses: ExpenseMap,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Self {
        Self::new_at(
            Local::now(),
            income,
            fixed_expenses,
            variable_expenses,
            month,
            year,
        )
    }

    pub(crate) fn new_at(
        created_at: DateTime<Local>,
        income: Decimal,
        fixed_expenses: ExpenseMap,
        variable_expenses: ExpenseMap,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Self {
        let model = Self {
            income,
            fixed_expenses,
            variable_expenses,
            month: month.unwrap_or_else(|| created_at.month()),
            year: year.unwrap_or_else(|| created_at.year()),
            created_at,
        };
        tracing::debug!(
            period = %model.period_label(),
            fixed = model.fixed_expenses.len(),
            variable = model.variable_expenses.len(),
            "budget model built"
        );
        model
    }

    pub fn income(&self) -> Decimal {
        self.income
    }

    pub fn fixed_expenses(&self) -> &ExpenseMap {
        &self.fixed_expenses
    }

    pub fn variable_expenses(&self) -> &ExpenseMap {
        &self.variable_expenses
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.created_at
    }

    /// "M/YYYY", e.g. "3/2025".
    pub fn period_label(&self) -> String {
        format!("{}/{}", self.month, self.year)
    }

    pub fn total_expenses(&self) -> Decimal {
        self.fixed_expenses
            .total()
            .saturating_add(self.variable_expenses.total())
    }

    /// Income minus total expenses. Negative means a deficit.
    pub fn surplus(&self) -> Decimal {
        self.income.saturating_sub(self.total_expenses())
    }

    /// `(total_expenses, surplus)`, or `None` when the amounts are too large
    /// to add up exactly. The plain getters saturate in that case.
    pub fn checked_totals(&self) -> Option<(Decimal, Decimal)> {
        let total = self
            .fixed_expenses
            .checked_total()?
            .checked_add(self.variable_expenses.checked_total()?)?;
        let surplus = self.income.checked_sub(total)?;
        Some((total, surplus))
    }

    pub fn summary(&self) -> BudgetSummary {
        BudgetSummary {
            month: self.period_label(),
            income: self.income,
            fixed_expenses: self.fixed_expenses.clone(),
            variable_expenses: self.variable_expenses.clone(),
            total_expenses: self.total_expenses(),
            surplus: self.surplus(),
        }
    }

    /// Income, fixed categories, variable categories, Surplus. Categories keep
    /// the order they were supplied in.
    pub fn to_table(&self) -> Vec<TableRow> {
        let mut rows = Vec::with_capacity(2 + self.fixed_expenses.len() + self.variable_expenses.len());
        rows.push(TableRow::new("Income", self.income, RowKind::Income));
        rows.extend(
            self.fixed_expenses
                .iter()
                .map(|(name, amount)| TableRow::new(name, amount, RowKind::Fixed)),
        );
        rows.extend(
            self.variable_expenses
                .iter()
                .map(|(name, amount)| TableRow::new(name, amount, RowKind::Variable)),
        );
        rows.push(TableRow::new("Surplus", self.surplus(), RowKind::Surplus));
        rows
    }

    pub fn to_json(&self) -> String {
        self.summary().to_json()
    }

    /// Share of each positive expense category, for the distribution chart.
    /// `None` when there is nothing meaningful to draw, or the positive
    /// amounts are too large to add up.
    pub fn expense_distribution(&self) -> Option<Vec<ExpenseShare>> {
        if self.total_expenses() <= Decimal::ZERO {
            return None;
        }

        let positive: Vec<(&str, Decimal)> = self
            .fixed_expenses
            .iter()
            .chain(self.variable_expenses.iter())
            .filter(|(_, amount)| *amount > Decimal::ZERO)
            .collect();
        let positive_total = positive
            .iter()
            .try_fold(Decimal::ZERO, |acc, (_, a)| acc.checked_add(*a))?;
        if positive_total <= Decimal::ZERO {
            return None;
        }

        Some(
            positive
                .into_iter()
                .map(|(name, amount)| ExpenseShare {
                    category: name.to_string(),
                    amount,
                    percent: amount / positive_total * Decimal::ONE_HUNDRED,
                })
                .collect(),
        )
    }

    /// Rebuild a model from a previously exported summary.
    pub fn from_summary(summary: BudgetSummary) -> anyhow::Result<Self> {
        let (month, year) = summary.period()?;
        let model = Self::new(
            summary.income,
            summary.fixed_expenses,
            summary.variable_expenses,
            Some(month),
            Some(year),
        );
        if model.checked_totals().is_none() {
            anyhow::bail!("Amounts in summary {} are too large to add up", summary.month);
        }
        Ok(model)
    }
}
