use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::form::BudgetRequest;
use crate::models::BudgetModel;
use crate::ui::util::{format_amount, progress_bar, shellexpand};

#[derive(Debug, Parser)]
#[command(
    name = "budgetform",
    version,
    about = "budgetform - monthly budget form: income, fixed and variable expenses, surplus",
    long_about = "Run without a command to open the interactive form."
)]
pub(crate) struct Cli {
    /// Config file (default: platform config dir/budgetform/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Print the budget table and insights
    #[command(alias = "s")]
    Summary {
        #[command(flatten)]
        budget: BudgetArgs,
        /// Print the JSON summary instead
        #[arg(long)]
        json: bool,
    },
    /// Write the JSON summary to a file
    Export {
        /// Output file (default: configured export directory + file name)
        path: Option<String>,
        #[command(flatten)]
        budget: BudgetArgs,
    },
    /// Print the budget table, or write it as CSV
    Table {
        #[command(flatten)]
        budget: BudgetArgs,
        /// Write CSV to this file ("-" for stdout)
        #[arg(long, value_name = "PATH")]
        csv: Option<String>,
    },
    /// Print the expense distribution
    Chart {
        #[command(flatten)]
        budget: BudgetArgs,
    },
    /// Print a previously exported JSON summary
    Show {
        file: PathBuf,
        /// Re-emit the JSON instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Print the config file location and effective settings
    Config,
}

/// Form values given on the command line.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct BudgetArgs {
    /// Monthly income (default: configured default_income)
    #[arg(long, allow_hyphen_values = true)]
    income: Option<String>,
    /// Month 1-12 (default: current month)
    #[arg(long)]
    month: Option<String>,
    /// Year (default: current year)
    #[arg(long)]
    year: Option<String>,
    /// Fixed expense, repeatable
    #[arg(long = "fixed", value_name = "NAME=AMOUNT", value_parser = parse_entry)]
    fixed: Vec<(String, String)>,
    /// Variable expense, repeatable
    #[arg(long = "variable", value_name = "NAME=AMOUNT", value_parser = parse_entry)]
    variable: Vec<(String, String)>,
}

impl BudgetArgs {
    /// Configured categories start blank (zero); flags fill them in or add new ones.
    pub(crate) fn to_request(&self, config: &Config) -> BudgetRequest {
        let mut req =
            BudgetRequest::with_categories(&config.fixed_categories, &config.variable_categories);
        req.income = self
            .income
            .clone()
            .unwrap_or_else(|| config.default_income.to_string());
        req.month = self.month.clone().unwrap_or_default();
        req.year = self.year.clone().unwrap_or_default();
        for (name, amount) in &self.fixed {
            req.set_fixed(name, amount.as_str());
        }
        for (name, amount) in &self.variable {
            req.set_variable(name, amount.as_str());
        }
        req
    }

    fn build(&self, config: &Config) -> Result<BudgetModel> {
        Ok(self.to_request(config).build()?)
    }
}

fn parse_entry(s: &str) -> Result<(String, String), String> {
    let (name, amount) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=AMOUNT, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing category name in '{s}'"));
    }
    Ok((name.to_string(), amount.trim().to_string()))
}

pub(crate) fn as_cli(command: Command, config: &Config, config_path: &Path) -> Result<()> {
    match command {
        Command::Summary { budget, json } => {
            let model = budget.build(config)?;
            if json {
                println!("{}", model.to_json());
            } else {
                print_summary(&model, &config.currency);
            }
            Ok(())
        }
        Command::Export { path, budget } => {
            let model = budget.build(config)?;
            let path = path
                .map(|p| PathBuf::from(shellexpand(&p)))
                .unwrap_or_else(|| config.default_export_path());
            crate::export::write_json(&model, &path)?;
            println!("Saved {} summary to {}", model.period_label(), path.display());
            Ok(())
        }
        Command::Table { budget, csv } => {
            let model = budget.build(config)?;
            let rows = model.to_table();
            match csv.as_deref() {
                Some("-") => crate::export::write_table_csv_to(&rows, std::io::stdout().lock()),
                Some(p) => {
                    let path = PathBuf::from(shellexpand(p));
                    let count = crate::export::write_table_csv(&rows, &path)?;
                    println!("Wrote {count} rows to {}", path.display());
                    Ok(())
                }
                None => {
                    print_table(&model, &config.currency);
                    Ok(())
                }
            }
        }
        Command::Chart { budget } => {
            let model = budget.build(config)?;
            print_distribution(&model, &config.currency);
            Ok(())
        }
        Command::Show { file, json } => {
            let model = crate::export::read_json(&file)?;
            if json {
                println!("{}", model.to_json());
            } else {
                print_summary(&model, &config.currency);
            }
            Ok(())
        }
        Command::Config => {
            println!("Config file: {}", config_path.display());
            if !config_path.exists() {
                println!("(not present, using defaults)");
            }
            println!();
            print!("{}", config.to_toml().context("Failed to render config")?);
            Ok(())
        }
    }
}

fn print_table(model: &BudgetModel, currency: &str) {
    println!("{:<24} {:>20}", "Category", "Amount");
    println!("{}", "─".repeat(45));
    for row in model.to_table() {
        println!("{:<24} {:>20}", row.category, format_amount(row.amount, currency));
    }
}

fn print_summary(model: &BudgetModel, currency: &str) {
    println!("Budget Summary — {}", model.period_label());
    println!();
    print_table(model, currency);
    if model.fixed_expenses().is_empty() && model.variable_expenses().is_empty() {
        println!("(no expense categories)");
    }
    println!();
    println!("Insights:");
    println!(
        "  Total Expenses: {}",
        format_amount(model.total_expenses(), currency)
    );
    println!("  Surplus:        {}", format_amount(model.surplus(), currency));
}

fn print_distribution(model: &BudgetModel, currency: &str) {
    use rust_decimal::prelude::ToPrimitive;

    let Some(shares) = model.expense_distribution() else {
        println!("Enter expense values to see the expense distribution.");
        return;
    };

    println!("Expense Distribution — {}", model.period_label());
    println!("{}", "─".repeat(60));
    for share in &shares {
        let pct = share.percent.to_f64().unwrap_or(0.0);
        println!(
            "  {:<18} {} {pct:>5.1}%  {}",
            share.category,
            progress_bar(pct / 100.0, 20),
            format_amount(share.amount, currency)
        );
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
