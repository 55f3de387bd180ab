use anyhow::Result;
use chrono::{Datelike, Local};
use std::path::PathBuf;

use crate::config::Config;
use crate::form::BudgetRequest;
use crate::models::BudgetModel;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up, shellexpand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Form,
    Summary,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Form, Self::Summary]
    }

    pub(crate) fn next(self) -> Screen {
        self.offset(1)
    }

    pub(crate) fn prev(self) -> Screen {
        self.offset(Self::all().len() - 1)
    }

    fn offset(self, by: usize) -> Screen {
        let screens = Self::all();
        let idx = screens.iter().position(|s| *s == self).unwrap_or(0);
        screens[(idx + by) % screens.len()]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Form => write!(f, "Form"),
            Self::Summary => write!(f, "Summary"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
        }
    }
}

/// One editable line of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Month,
    Year,
    Income,
    Fixed(usize),
    Variable(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExpenseKind {
    Fixed,
    Variable,
}

impl std::fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Variable => write!(f, "variable"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) currency: String,
    pub(crate) export_path: PathBuf,

    // Form
    pub(crate) request: BudgetRequest,
    pub(crate) defaults: BudgetRequest,
    pub(crate) field_index: usize,
    pub(crate) field_scroll: usize,

    // Summary
    pub(crate) model: Option<BudgetModel>,
    /// Form edited since the summary was generated.
    pub(crate) summary_stale: bool,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(config: &Config) -> Self {
        let now = Local::now();
        let mut defaults =
            BudgetRequest::with_categories(&config.fixed_categories, &config.variable_categories);
        defaults.month = now.month().to_string();
        defaults.year = now.year().to_string();
        defaults.income = config.default_income.to_string();

        Self {
            running: true,
            screen: Screen::Form,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            currency: config.currency.clone(),
            export_path: config.default_export_path(),

            request: defaults.clone(),
            defaults,
            field_index: 0,
            field_scroll: 0,

            model: None,
            summary_stale: false,

            visible_rows: 20,
        }
    }

    // ── Form fields ──────────────────────────────────────────

    pub(crate) fn fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::Month, Field::Year, Field::Income];
        fields.extend((0..self.request.fixed.len()).map(Field::Fixed));
        fields.extend((0..self.request.variable.len()).map(Field::Variable));
        fields
    }

    pub(crate) fn selected_field(&self) -> Field {
        self.fields()
            .get(self.field_index)
            .copied()
            .unwrap_or(Field::Month)
    }

    pub(crate) fn field_label(&self, field: Field) -> String {
        match field {
            Field::Month => "Month".into(),
            Field::Year => "Year".into(),
            Field::Income => format!("Monthly Income ({})", self.currency),
            Field::Fixed(i) => self
                .request
                .fixed
                .get(i)
                .map(|(name, _)| name.clone())
                .unwrap_or_default(),
            Field::Variable(i) => self
                .request
                .variable
                .get(i)
                .map(|(name, _)| name.clone())
                .unwrap_or_default(),
        }
    }

    pub(crate) fn field_value(&self, field: Field) -> &str {
        match field {
            Field::Month => &self.request.month,
            Field::Year => &self.request.year,
            Field::Income => &self.request.income,
            Field::Fixed(i) => self.request.fixed.get(i).map_or("", |(_, v)| v.as_str()),
            Field::Variable(i) => self.request.variable.get(i).map_or("", |(_, v)| v.as_str()),
        }
    }

    pub(crate) fn set_field_value(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Month => Some(&mut self.request.month),
            Field::Year => Some(&mut self.request.year),
            Field::Income => Some(&mut self.request.income),
            Field::Fixed(i) => self.request.fixed.get_mut(i).map(|(_, v)| v),
            Field::Variable(i) => self.request.variable.get_mut(i).map(|(_, v)| v),
        };
        if let Some(slot) = slot {
            *slot = value;
            self.mark_stale();
        }
    }

    pub(crate) fn begin_edit(&mut self) {
        self.command_input = self.field_value(self.selected_field()).to_string();
        self.input_mode = InputMode::Editing;
    }

    pub(crate) fn commit_edit(&mut self) {
        let value = std::mem::take(&mut self.command_input).trim().to_string();
        let field = self.selected_field();
        let label = self.field_label(field);
        self.set_field_value(field, value);
        self.input_mode = InputMode::Normal;
        self.set_status(format!("Updated {label}"));
    }

    pub(crate) fn cancel_edit(&mut self) {
        self.command_input.clear();
        self.input_mode = InputMode::Normal;
        self.set_status("Edit cancelled");
    }

    /// `+`/`-` on the month selector cycles 1–12; on the year it steps by one.
    pub(crate) fn adjust_field(&mut self, delta: i32) {
        match self.selected_field() {
            Field::Month => {
                let current = self
                    .request
                    .month
                    .trim()
                    .parse::<i32>()
                    .ok()
                    .filter(|m| (1..=12).contains(m))
                    .unwrap_or(1);
                let next = (current - 1 + delta.rem_euclid(12)) % 12 + 1;
                self.set_field_value(Field::Month, next.to_string());
            }
            Field::Year => {
                let current: i32 = self
                    .request
                    .year
                    .trim()
                    .parse()
                    .unwrap_or_else(|_| Local::now().year());
                self.set_field_value(Field::Year, current.saturating_add(delta).to_string());
            }
            _ => {}
        }
    }

    pub(crate) fn move_down(&mut self) {
        let len = self.fields().len();
        scroll_down(&mut self.field_index, &mut self.field_scroll, len, self.visible_rows.max(1));
    }

    pub(crate) fn move_up(&mut self) {
        scroll_up(&mut self.field_index, &mut self.field_scroll);
    }

    pub(crate) fn goto_top(&mut self) {
        scroll_to_top(&mut self.field_index, &mut self.field_scroll);
    }

    pub(crate) fn goto_bottom(&mut self) {
        let len = self.fields().len();
        scroll_to_bottom(&mut self.field_index, &mut self.field_scroll, len, self.visible_rows.max(1));
    }

    // ── Categories ───────────────────────────────────────────

    pub(crate) fn add_category(&mut self, kind: ExpenseKind, name: &str) -> bool {
        let name = name.trim();
        let list = match kind {
            ExpenseKind::Fixed => &mut self.request.fixed,
            ExpenseKind::Variable => &mut self.request.variable,
        };
        if name.is_empty() || list.iter().any(|(n, _)| n.eq_ignore_ascii_case(name)) {
            return false;
        }
        list.push((name.to_string(), String::new()));
        self.mark_stale();
        true
    }

    /// Remove a category from whichever list holds it (fixed first).
    pub(crate) fn remove_category(&mut self, name: &str) -> Option<ExpenseKind> {
        let kind = if remove_named(&mut self.request.fixed, name) {
            ExpenseKind::Fixed
        } else if remove_named(&mut self.request.variable, name) {
            ExpenseKind::Variable
        } else {
            return None;
        };
        let len = self.fields().len();
        if self.field_index >= len {
            self.field_index = len.saturating_sub(1);
        }
        self.field_scroll = self.field_scroll.min(self.field_index);
        self.mark_stale();
        Some(kind)
    }

    /// Set a category amount by name, case-insensitively, fixed first.
    pub(crate) fn set_category(&mut self, name: &str, amount: &str) -> Option<ExpenseKind> {
        let find = |list: &[(String, String)]| list.iter().position(|(n, _)| n.eq_ignore_ascii_case(name));
        let (field, kind) = if let Some(i) = find(&self.request.fixed) {
            (Field::Fixed(i), ExpenseKind::Fixed)
        } else if let Some(i) = find(&self.request.variable) {
            (Field::Variable(i), ExpenseKind::Variable)
        } else {
            return None;
        };
        self.set_field_value(field, amount.to_string());
        Some(kind)
    }

    pub(crate) fn reset_form(&mut self) {
        self.request = self.defaults.clone();
        self.field_index = 0;
        self.field_scroll = 0;
        self.model = None;
        self.summary_stale = false;
    }

    // ── Summary ──────────────────────────────────────────────

    /// Build the model from the current form. Validation errors land in the
    /// status line and leave the previous summary untouched.
    pub(crate) fn generate(&mut self) -> bool {
        match self.request.build() {
            Ok(model) => {
                self.set_status(format!(
                    "Summary generated for {} at {} ({} categories)",
                    model.period_label(),
                    model.timestamp().format("%H:%M"),
                    model.fixed_expenses().len() + model.variable_expenses().len()
                ));
                self.model = Some(model);
                self.summary_stale = false;
                self.screen = Screen::Summary;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "form rejected");
                self.set_status(format!("Error: {e}"));
                false
            }
        }
    }

    /// The current summary, generating it first if there is none or the form
    /// changed since. `None` if the form does not validate.
    pub(crate) fn current_model(&mut self) -> Option<&BudgetModel> {
        if (self.model.is_none() || self.summary_stale) && !self.generate() {
            return None;
        }
        self.model.as_ref()
    }

    pub(crate) fn export_json(&mut self, path: Option<&str>) -> Result<()> {
        let path = self.resolve_path(path);
        let Some(model) = self.current_model() else {
            return Ok(());
        };
        crate::export::write_json(model, &path)?;
        self.set_status(format!("Saved JSON summary to {}", path.display()));
        Ok(())
    }

    pub(crate) fn export_csv(&mut self, path: Option<&str>) -> Result<()> {
        let path = match path {
            Some(p) => self.resolve_path(Some(p)),
            None => self.export_path.with_extension("csv"),
        };
        let Some(model) = self.current_model() else {
            return Ok(());
        };
        let count = crate::export::write_table_csv(&model.to_table(), &path)?;
        self.set_status(format!("Saved {count} table rows to {}", path.display()));
        Ok(())
    }

    fn resolve_path(&self, path: Option<&str>) -> PathBuf {
        path.filter(|p| !p.trim().is_empty())
            .map(|p| PathBuf::from(shellexpand(p.trim())))
            .unwrap_or_else(|| self.export_path.clone())
    }

    fn mark_stale(&mut self) {
        if self.model.is_some() {
            self.summary_stale = true;
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

fn remove_named(list: &mut Vec<(String, String)>, name: &str) -> bool {
    match list.iter().position(|(n, _)| n.eq_ignore_ascii_case(name)) {
        Some(i) => {
            list.remove(i);
            true
        }
        None => false,
    }
}
