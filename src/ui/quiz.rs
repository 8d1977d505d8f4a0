//! Timed single-player screen.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
};

use super::common;
use crate::app::ActiveSession;
use crate::engine::{SessionView, SingleView};

const LOW_TIME_SECONDS: u32 = 5;

pub fn render(frame: &mut Frame, area: Rect, session: &ActiveSession) {
    if common::render_status(frame, area, &session.status) {
        return;
    }
    let Some(SessionView::Single(view)) = session.view() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1), // Progress and score
        Constraint::Length(3), // Timer
        Constraint::Length(6), // Question text
        Constraint::Min(9),    // Answers
        Constraint::Length(1), // Power-ups
        Constraint::Length(1), // Controls
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], session, view);
    render_timer(frame, chunks[1], view);
    common::render_question_text(frame, chunks[2], &view.question.text);
    common::render_answers(
        frame,
        chunks[3],
        &view.question,
        session.cursor,
        view.phase,
        view.selected.as_ref(),
        &view.disabled,
    );
    render_power_ups(frame, chunks[4], view);
    common::render_controls(
        frame,
        chunks[5],
        "j/k select  ·  Enter/1-4 answer  ·  f 50/50  ·  s skip  ·  Esc menu",
    );
}

fn render_header(frame: &mut Frame, area: Rect, session: &ActiveSession, view: &SingleView) {
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let player = session.player.as_deref().unwrap_or_default();
    let progress = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Question {} of {}", view.index + 1, view.total),
            Style::default().fg(Color::Cyan).bold(),
        ),
        Span::styled(format!("  ·  {}", player), Style::default().fg(Color::DarkGray)),
    ]));

    let score = Paragraph::new(Span::styled(
        format!("Score {}", session.displayed_score),
        Style::default().fg(common::score_color(session.displayed_score)).bold(),
    ))
    .alignment(Alignment::Right);

    frame.render_widget(progress, halves[0]);
    frame.render_widget(score, halves[1]);
}

fn render_timer(frame: &mut Frame, area: Rect, view: &SingleView) {
    let color = if view.time_remaining <= LOW_TIME_SECONDS {
        Color::Red
    } else {
        Color::Green
    };
    let ratio = if view.question_seconds == 0 {
        0.0
    } else {
        f64::from(view.time_remaining) / f64::from(view.question_seconds)
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(Style::default().fg(color))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{}s", view.time_remaining));

    frame.render_widget(gauge, area);
}

fn render_power_ups(frame: &mut Frame, area: Rect, view: &SingleView) {
    let badge = |label: &'static str, used: bool| {
        let style = if used {
            Style::default().fg(Color::DarkGray).crossed_out()
        } else {
            Style::default().fg(Color::Magenta).bold()
        };
        Span::styled(label, style)
    };

    let line = Line::from(vec![
        badge("[f] 50/50", view.fifty_fifty_used),
        Span::raw("   "),
        badge("[s] Skip", view.skip_used),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
