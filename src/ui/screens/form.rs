use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::ui::app::{App, Field, InputMode};
use crate::ui::theme;
use crate::ui::util::truncate;

/// Section headers drawn between groups of fields.
pub(crate) const SECTION_COUNT: usize = 3;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let fields = app.fields();
    let page = app.visible_rows.max(1);
    let window = app.field_scroll..app.field_scroll + page;
    let label_width = 24usize;

    let mut items: Vec<ListItem> = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        if !window.contains(&i) {
            continue;
        }
        if let Some(title) = section_title(*field) {
            items.push(ListItem::new(Line::from(Span::styled(
                format!(" {title}"),
                theme::section_style(),
            ))));
        }

        let selected = i == app.field_index;
        let editing = selected && app.input_mode == InputMode::Editing;
        let style = if selected {
            theme::selected_style()
        } else if i % 2 == 0 {
            theme::alt_row_style()
        } else {
            theme::normal_style()
        };

        let label = truncate(&app.field_label(*field), label_width - 1);
        let value = if editing {
            format!("{}▏", app.command_input)
        } else {
            display_value(app, *field)
        };

        items.push(ListItem::new(Line::from(vec![
            Span::styled(format!("   {label:<label_width$}"), style),
            Span::styled(
                format!(" {value}"),
                if editing {
                    Style::default().fg(theme::YELLOW).add_modifier(Modifier::BOLD)
                } else {
                    style
                },
            ),
        ])));
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Budget Form ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

fn section_title(field: Field) -> Option<&'static str> {
    match field {
        Field::Month => Some("Period & Income"),
        Field::Fixed(0) => Some("Fixed Expenses"),
        Field::Variable(0) => Some("Variable Expenses"),
        _ => None,
    }
}

fn display_value(app: &App, field: Field) -> String {
    let raw = app.field_value(field);
    match field {
        Field::Month => {
            let name = raw
                .trim()
                .parse::<u8>()
                .ok()
                .and_then(|m| chrono::Month::try_from(m).ok())
                .map(|m| m.name())
                .unwrap_or("current month");
            format!("{raw} ({name})")
        }
        Field::Year if raw.trim().is_empty() => "(current year)".into(),
        Field::Income | Field::Fixed(_) | Field::Variable(_) if raw.trim().is_empty() => {
            "0".into()
        }
        _ => raw.to_string(),
    }
}
