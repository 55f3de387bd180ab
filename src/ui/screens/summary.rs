use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{BudgetModel, RowKind};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(model) = app.model.as_ref() else {
        render_empty(f, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),      // Insight cards
            Constraint::Min(8),         // Table + bar chart
            Constraint::Percentage(35), // Expense distribution
        ])
        .split(area);

    render_insights(f, chunks[0], app, model);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);
    render_table(f, middle[0], app, model);
    render_bar_chart(f, middle[1], app, model);

    render_distribution(f, chunks[2], app, model);
}

fn titled_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_insights(f: &mut Frame, area: Rect, app: &App, model: &BudgetModel) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let surplus = model.surplus();
    render_card(f, cards[0], "Income", model.income(), theme::GREEN, &app.currency);
    render_card(
        f,
        cards[1],
        "Total Expenses",
        model.total_expenses(),
        theme::RED,
        &app.currency,
    );
    render_card(
        f,
        cards[2],
        if surplus < Decimal::ZERO { "Deficit" } else { "Surplus" },
        surplus,
        theme::balance_color(surplus >= Decimal::ZERO),
        &app.currency,
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
    currency: &str,
) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount, currency),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(titled_block(format!(" {title} ")));

    f.render_widget(text, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &App, model: &BudgetModel) {
    let name_width = (area.width as usize).saturating_sub(24).clamp(8, 28);
    let mut items = vec![ListItem::new(Line::from(Span::styled(
        format!(" {:<name_width$} {:>18}", "Category", "Amount"),
        theme::header_style(),
    )))];

    items.extend(
        model
            .to_table()
            .iter()
            .enumerate()
            .take(area.height.saturating_sub(3) as usize)
            .map(|(i, row)| {
                let base = if i % 2 == 0 {
                    theme::alt_row_style()
                } else {
                    theme::normal_style()
                };
                let color = theme::row_color(row.kind, row.amount < Decimal::ZERO);
                let name_style = match row.kind {
                    RowKind::Income | RowKind::Surplus => base.add_modifier(Modifier::BOLD),
                    _ => base,
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!(" {:<name_width$}", truncate(&row.category, name_width)),
                        name_style,
                    ),
                    Span::styled(
                        format!(" {:>18}", format_amount(row.amount, &app.currency)),
                        base.fg(color),
                    ),
                ]))
            }),
    );

    let period = period_title(model);
    let title = if app.summary_stale {
        format!(" Budget {period} (outdated, press s) ")
    } else {
        format!(" Budget {period} ")
    };
    f.render_widget(List::new(items).block(titled_block(title)), area);
}

/// "March 2025", or the raw "M/YYYY" label when the month is out of range.
fn period_title(model: &BudgetModel) -> String {
    u8::try_from(model.month())
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| format!("{} {}", m.name(), model.year()))
        .unwrap_or_else(|| model.period_label())
}

fn render_bar_chart(f: &mut Frame, area: Rect, app: &App, model: &BudgetModel) {
    let rows = model.to_table();
    let bars: Vec<Bar> = rows
        .iter()
        .map(|row| {
            let negative = row.amount < Decimal::ZERO;
            let color = theme::row_color(row.kind, negative);
            Bar::default()
                .value(row.amount.abs().to_u64().unwrap_or(0))
                .text_value(format_amount(row.amount, ""))
                .label(Line::from(truncate(&row.category, 9)))
                .style(Style::default().fg(color))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(titled_block(format!(" Budget Bar Chart ({}) ", app.currency)))
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_distribution(f: &mut Frame, area: Rect, app: &App, model: &BudgetModel) {
    let block = titled_block(" Expense Distribution ".into());

    let Some(shares) = model.expense_distribution() else {
        let msg = Paragraph::new(Line::from(Span::styled(
            "Enter expense values to see the expense distribution.",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    };

    let bar_width = (area.width as usize).saturating_sub(50).clamp(10, 40);
    let items: Vec<ListItem> = shares
        .iter()
        .take(area.height.saturating_sub(2) as usize)
        .map(|share| {
            let pct = share.percent.to_f64().unwrap_or(0.0);
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:<18}", truncate(&share.category, 17)),
                    theme::normal_style(),
                ),
                Span::styled(progress_bar(pct / 100.0, bar_width), Style::default().fg(theme::ACCENT)),
                Span::styled(
                    format!(" {pct:>5.1}%"),
                    Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", format_amount(share.amount, &app.currency)),
                    theme::dim_style(),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No summary generated yet", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Fill in the form and press s (or :generate)",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(titled_block(" Summary ".into()));
    f.render_widget(msg, area);
}
