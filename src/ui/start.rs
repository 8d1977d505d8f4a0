//! Start screen: player name, category, difficulty and mode.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{Field, Mode, StartForm};
use crate::models::Category;

pub fn render(frame: &mut Frame, area: Rect, form: &StartForm) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(16),
        Constraint::Fill(1),
    ])
    .split(area);
    let columns = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(56),
        Constraint::Fill(1),
    ])
    .split(chunks[1]);

    let mode = match form.mode {
        Mode::Single => "Single player",
        Mode::Versus => "Versus (2 players)",
    };

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled("QUIZLY", Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
        name_line(form),
        Line::from(""),
        choice_line("Category", category_label(form), form.focus == Field::Category),
        choice_line(
            "Difficulty",
            form.difficulty().label().to_string(),
            form.focus == Field::Difficulty,
        ),
        choice_line("Mode", mode.to_string(), form.focus == Field::Mode),
        Line::from(""),
    ];

    match &form.error {
        Some(err) => content.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        ))),
        None => content.push(Line::from("")),
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "Tab/arrows move  ·  ←/→ change  ·  [Enter] start  ·  [Esc] quit",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, columns[1]);
}

fn label_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::White)
    }
}

fn name_line(form: &StartForm) -> Line<'_> {
    let focused = form.focus == Field::Name;
    let mut spans = vec![
        Span::styled("Name: ", label_style(focused)),
        Span::styled(form.name.as_str(), Style::default().fg(Color::Yellow)),
    ];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

fn category_label(form: &StartForm) -> String {
    let category = form.category();
    if Category::KNOWN.iter().any(|(known, _)| *known == category) {
        category.label().to_string()
    } else {
        format!("{} ({})", category.label(), category.code())
    }
}

fn choice_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let arrows = if focused { ("< ", " >") } else { ("  ", "  ") };
    Line::from(vec![
        Span::styled(format!("{}: ", label), label_style(focused)),
        Span::styled(arrows.0, Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::Cyan)),
        Span::styled(arrows.1, Style::default().fg(Color::DarkGray)),
    ])
}
