use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let screens = Screen::all();
    let titles = screens
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("{}:{s}", i + 1)));
    let selected = screens.iter().position(|s| *s == app.screen);

    let tabs = Tabs::new(titles)
        .select(selected.unwrap_or(0))
        .style(Style::default().fg(theme::TEXT_DIM).bg(theme::HEADER_BG))
        .highlight_style(
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Form => super::screens::form::render(f, area, app),
        Screen::Summary => super::screens::summary::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
        InputMode::Command => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::GREEN)
            .add_modifier(Modifier::BOLD),
        InputMode::Editing => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::YELLOW)
            .add_modifier(Modifier::BOLD),
    };

    let period = format!("{}/{}", app.request.month, app.request.year);
    let info = match &app.model {
        Some(_) if app.summary_stale => format!(" {} | {period} | summary outdated", app.screen),
        Some(model) => format!(" {} | {period} | summary {}", app.screen, model.period_label()),
        None => format!(" {} | {period}", app.screen),
    };

    let right = match app.screen {
        Screen::Form => " Enter edit | +/- month | s generate | ? help ",
        Screen::Summary => " e export JSON | :csv | Tab form | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Editing => {
            let label = format!("{}> ", app.field_label(app.selected_field()));
            let offset = (label.chars().count() + app.command_input.chars().count()) as u16;
            (
                Line::from(vec![
                    Span::styled(label, Style::default().fg(theme::YELLOW)),
                    Span::styled(&app.command_input, theme::command_bar_style()),
                ]),
                Some(offset),
            )
        }
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, Enter to edit a field, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

/// Key bindings handled in normal mode, shown two per help line.
const KEY_HELP: &[(&str, &str)] = &[
    ("j/k", "Move cursor"),
    ("g/G", "First/last field"),
    ("Enter", "Edit field"),
    ("+/-", "Step month/year"),
    ("s", "Generate summary"),
    ("e", "Export JSON"),
    ("1/2", "Form/Summary"),
    ("Tab", "Next/prev tab"),
    (":", "Command mode"),
    ("Esc", "Back"),
    ("?", "This help"),
    ("Ctrl-q", "Quit"),
];

fn help_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            " budgetform ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(" Keys", theme::section_style())),
    ];
    lines.extend(KEY_HELP.chunks(2).map(|pair| {
        let text: String = pair
            .iter()
            .map(|(key, what)| format!("  {key:<8}{what:<22}"))
            .collect();
        Line::from(Span::styled(text, theme::normal_style()))
    }));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Commands", theme::section_style())));

    // Short aliases are left out; one line per description.
    let mut by_desc: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 2 {
            continue;
        }
        match by_desc.iter_mut().find(|(_, d)| *d == cmd.description) {
            Some(entry) if entry.0.len() < name.len() => entry.0 = name,
            Some(_) => {}
            None => by_desc.push((name, cmd.description)),
        }
    }
    by_desc.sort_unstable();
    lines.extend(by_desc.into_iter().map(|(name, desc)| {
        Line::from(Span::styled(
            format!("  :{name:<14} {desc}"),
            theme::normal_style(),
        ))
    }));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Press any key to close ",
        theme::dim_style(),
    )));
    lines
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let lines = help_lines();
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let width = 72.min(area.width.saturating_sub(4));
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .style(Style::default().bg(theme::HEADER_BG)),
        ),
        popup,
    );
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
