use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, ExpenseKind, Field, Screen};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("f", "Go to the form", cmd_form, r);
    register_command!("form", "Go to the form", cmd_form, r);
    register_command!("s", "Go to the summary", cmd_summary, r);
    register_command!("summary", "Go to the summary", cmd_summary, r);
    register_command!("g", "Generate budget summary", cmd_generate, r);
    register_command!("generate", "Generate budget summary", cmd_generate, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "export",
        "Save JSON summary (e.g. :export ~/budget_summary.json)",
        cmd_export,
        r
    );
    register_command!("e", "Save JSON summary", cmd_export, r);
    register_command!(
        "csv",
        "Save budget table as CSV (e.g. :csv ~/budget.csv)",
        cmd_csv,
        r
    );
    register_command!("month", "Set month (e.g. :month 3)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 3)", cmd_month, r);
    register_command!("year", "Set year (e.g. :year 2025)", cmd_year, r);
    register_command!("income", "Set income (e.g. :income 50000)", cmd_income, r);
    register_command!(
        "set",
        "Set a category amount (e.g. :set Loan Payments 5000)",
        cmd_set,
        r
    );
    register_command!(
        "add-fixed",
        "Add fixed expense category (e.g. :add-fixed Insurance)",
        cmd_add_fixed,
        r
    );
    register_command!(
        "add-variable",
        "Add variable expense category (e.g. :add-variable Dining)",
        cmd_add_variable,
        r
    );
    register_command!(
        "remove",
        "Remove expense category (e.g. :remove Leisure)",
        cmd_remove,
        r
    );
    register_command!("reset", "Reset the form to defaults", cmd_reset, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        tracing::debug!(command = cmd_name, "running command");
        (cmd.run)(args, app)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_form(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Form;
    Ok(())
}

fn cmd_summary(_args: &str, app: &mut App) -> anyhow::Result<()> {
    if app.model.is_some() {
        app.screen = Screen::Summary;
    } else {
        app.set_status("No summary yet. Use :generate");
    }
    Ok(())
}

fn cmd_generate(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.generate();
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_export(args: &str, app: &mut App) -> anyhow::Result<()> {
    if let Err(e) = app.export_json(Some(args)) {
        app.set_status(format!("Export failed: {e:#}"));
    }
    Ok(())
}

fn cmd_csv(args: &str, app: &mut App) -> anyhow::Result<()> {
    let path = if args.is_empty() { None } else { Some(args) };
    if let Err(e) = app.export_csv(path) {
        app.set_status(format!("CSV export failed: {e:#}"));
    }
    Ok(())
}

fn cmd_month(args: &str, app: &mut App) -> anyhow::Result<()> {
    match args.parse::<u32>() {
        Ok(m) if (1..=12).contains(&m) => {
            app.set_field_value(Field::Month, m.to_string());
            app.set_status(format!("Month set to {m}"));
        }
        _ => app.set_status("Usage: :month <1-12>"),
    }
    Ok(())
}

fn cmd_year(args: &str, app: &mut App) -> anyhow::Result<()> {
    match args.parse::<i32>() {
        Ok(y) => {
            app.set_field_value(Field::Year, y.to_string());
            app.set_status(format!("Year set to {y}"));
        }
        Err(_) => app.set_status("Usage: :year <YYYY>"),
    }
    Ok(())
}

fn cmd_income(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :income <amount>");
        return Ok(());
    }
    match crate::form::parse_amount(args) {
        Ok(_) => {
            app.set_field_value(Field::Income, args.to_string());
            app.set_status(format!("Income set to {args}"));
        }
        Err(reason) => app.set_status(format!("Invalid income: {reason}")),
    }
    Ok(())
}

fn cmd_set(args: &str, app: &mut App) -> anyhow::Result<()> {
    // Last token is the amount, everything before is the category name
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :set <category> <amount>");
        return Ok(());
    }

    let amount = parts[0];
    let category = parts[1].trim();

    if let Err(reason) = crate::form::parse_amount(amount) {
        app.set_status(format!("Invalid amount: {reason}"));
        return Ok(());
    }

    match app.set_category(category, amount) {
        Some(kind) => app.set_status(format!("Set {kind} expense {category} to {amount}")),
        None => app.set_status(format!(
            "Category '{category}' not found. Add it with :add-fixed or :add-variable"
        )),
    }
    Ok(())
}

fn cmd_add_fixed(args: &str, app: &mut App) -> anyhow::Result<()> {
    add_category(args, app, ExpenseKind::Fixed);
    Ok(())
}

fn cmd_add_variable(args: &str, app: &mut App) -> anyhow::Result<()> {
    add_category(args, app, ExpenseKind::Variable);
    Ok(())
}

fn add_category(name: &str, app: &mut App, kind: ExpenseKind) {
    if name.is_empty() {
        app.set_status(format!("Usage: :add-{kind} <name>"));
    } else if app.add_category(kind, name) {
        app.set_status(format!("Added {kind} expense: {name}"));
    } else {
        app.set_status(format!("Category '{name}' already exists"));
    }
}

fn cmd_remove(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :remove <category>");
        return Ok(());
    }
    match app.remove_category(args) {
        Some(kind) => app.set_status(format!("Removed {kind} expense: {args}")),
        None => app.set_status(format!("Category '{args}' not found")),
    }
    Ok(())
}

fn cmd_reset(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.reset_form();
    app.screen = Screen::Form;
    app.set_status("Form reset");
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
