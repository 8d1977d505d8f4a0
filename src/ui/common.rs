//! Widgets shared by the single-player and versus screens.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::engine::{Phase, Selection};
use crate::models::Question;
use crate::runtime::SessionStatus;

const OPTION_LABELS: [char; 4] = ['1', '2', '3', '4'];

/// Renders the loading and failure states. Returns false once the session runs.
pub fn render_status(frame: &mut Frame, area: Rect, status: &SessionStatus) -> bool {
    let content = match status {
        SessionStatus::Running(_) => return false,
        SessionStatus::Loading => vec![Line::from(Span::styled(
            "Loading questions...",
            Style::default().fg(Color::Yellow),
        ))],
        SessionStatus::Failed(reason) => vec![
            Line::from(Span::styled(
                "Could not load questions",
                Style::default().fg(Color::Red).bold(),
            )),
            Line::from(""),
            Line::from(reason.as_str().fg(Color::Gray)),
            Line::from(""),
            Line::from("[Enter] back to menu".fg(Color::DarkGray)),
        ],
        SessionStatus::Closed => vec![Line::from("Session closed".fg(Color::DarkGray))],
    };

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(7),
        Constraint::Fill(1),
    ])
    .split(area);

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, chunks[1]);
    true
}

pub fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

/// Answer list. Once locked, the correct answer turns green and a wrong pick red.
pub fn render_answers(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    cursor: usize,
    phase: Phase,
    selected: Option<&Selection>,
    disabled: &[String],
) {
    let revealed = phase != Phase::Active;
    let picked = selected.and_then(Selection::answer);

    let lines: Vec<Line> = question
        .answers
        .iter()
        .enumerate()
        .flat_map(|(index, answer)| {
            let is_cursor = index == cursor && !revealed;
            let style = if disabled.contains(answer) {
                Style::default().fg(Color::DarkGray).crossed_out()
            } else if revealed && question.is_correct(answer) {
                Style::default().fg(Color::Green).bold()
            } else if revealed && picked == Some(answer.as_str()) {
                Style::default().fg(Color::Red).bold()
            } else if is_cursor {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if is_cursor { "> " } else { "  " };
            let label = OPTION_LABELS.get(index).copied().unwrap_or(' ');

            [
                Line::from(vec![
                    Span::styled(prefix, style),
                    Span::styled(format!("{}) ", label), style),
                    Span::styled(answer.clone(), style),
                ]),
                Line::from(""),
            ]
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Answers ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

pub fn render_controls(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}

pub fn score_color(score: i32) -> Color {
    if score < 0 { Color::Red } else { Color::Green }
}
