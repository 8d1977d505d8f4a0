//! Two players on one keyboard, alternating turns.

use ratatui::{prelude::*, widgets::Paragraph};

use super::common;
use crate::app::ActiveSession;
use crate::engine::{Phase, SessionView, VersusView};
use crate::models::{Player, SessionResult};

pub fn render(frame: &mut Frame, area: Rect, session: &ActiveSession) {
    if common::render_status(frame, area, &session.status) {
        return;
    }
    let Some(SessionView::Versus(view)) = session.view() else {
        return;
    };

    if view.phase == Phase::Finished {
        render_verdict(frame, area, view, session.outcome.as_ref());
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Progress
        Constraint::Length(2), // Scoreboard
        Constraint::Length(6), // Question text
        Constraint::Min(9),    // Answers
        Constraint::Length(1), // Controls
    ])
    .margin(1)
    .split(area);

    let progress = Paragraph::new(format!("Question {} of {}", view.index + 1, view.total))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(progress, chunks[0]);

    render_scoreboard(frame, chunks[1], view);
    common::render_question_text(frame, chunks[2], &view.question.text);
    common::render_answers(
        frame,
        chunks[3],
        &view.question,
        session.cursor,
        view.phase,
        view.selected.as_ref(),
        &[],
    );
    common::render_controls(frame, chunks[4], "j/k select  ·  Enter/1-4 answer  ·  Esc menu");
}

fn render_scoreboard(frame: &mut Frame, area: Rect, view: &VersusView) {
    let entry = |player: Player, score: i32| {
        let active = player == view.active_player;
        let name_style = if active {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        vec![
            Span::styled(if active { "> " } else { "  " }, name_style),
            Span::styled(player.to_string(), name_style),
            Span::styled(
                format!("  {}", score),
                Style::default().fg(common::score_color(score)),
            ),
        ]
    };

    let mut spans = entry(Player::One, view.p1_score);
    spans.push(Span::raw("     "));
    spans.extend(entry(Player::Two, view.p2_score));

    let widget = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_verdict(
    frame: &mut Frame,
    area: Rect,
    view: &VersusView,
    outcome: Option<&SessionResult>,
) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(9),
        Constraint::Fill(1),
    ])
    .split(area);

    let verdict = match outcome.map(SessionResult::winner) {
        Some(Some(player)) => format!("{} wins!", player),
        Some(None) => "It's a draw!".to_string(),
        None => "Game over".to_string(),
    };

    let content = vec![
        Line::from(Span::styled("VERSUS", Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
        Line::from(Span::styled(verdict, Style::default().fg(Color::Yellow).bold())),
        Line::from(""),
        Line::from(format!("{}: {}", Player::One, view.p1_score)),
        Line::from(format!("{}: {}", Player::Two, view.p2_score)),
        Line::from(""),
        Line::from("[Enter] back to menu".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}
