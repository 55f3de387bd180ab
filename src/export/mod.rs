use anyhow::{Context, Result};
use std::path::Path;

use crate::models::{BudgetModel, BudgetSummary, TableRow};

pub(crate) const DEFAULT_JSON_FILE: &str = "budget_summary.json";
pub(crate) const JSON_MIME: &str = "application/json";

/// Write the JSON summary to `path`, creating parent directories as needed.
pub(crate) fn write_json(model: &BudgetModel, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, model.to_json())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), mime = JSON_MIME, "exported budget summary");
    Ok(())
}

/// Load a previously exported summary and rebuild the model from it.
pub(crate) fn read_json(path: &Path) -> Result<BudgetModel> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let summary = BudgetSummary::from_json(&raw)
        .with_context(|| format!("Not a budget summary: {}", path.display()))?;
    BudgetModel::from_summary(summary)
}

/// Write table rows as `Category,Amount` CSV. Returns the number of rows written.
pub(crate) fn write_table_csv(rows: &[TableRow], path: &Path) -> Result<usize> {
    ensure_parent(path)?;
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_rows(&mut wtr, rows)?;
    wtr.flush()?;
    tracing::info!(path = %path.display(), rows = rows.len(), "exported budget table");
    Ok(rows.len())
}

/// Same CSV as [`write_table_csv`], to any writer (stdout for the CLI).
pub(crate) fn write_table_csv_to<W: std::io::Write>(rows: &[TableRow], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    write_rows(&mut wtr, rows)?;
    wtr.flush()?;
    Ok(())
}

fn write_rows<W: std::io::Write>(wtr: &mut csv::Writer<W>, rows: &[TableRow]) -> Result<()> {
    wtr.write_record(["Category", "Amount"])?;
    for row in rows {
        wtr.write_record([row.category.as_str(), &row.amount.to_string()])?;
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
