use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::Finished;
use crate::models::{Rank, SessionResult};

pub fn render(frame: &mut Frame, area: Rect, finished: &Finished) {
    let score = match finished.result {
        SessionResult::Single { score, .. } => score,
        SessionResult::Versus { p1_score, .. } => p1_score,
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(9),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], finished, score);
    render_leaderboard(frame, chunks[2], finished);
    render_controls(frame, chunks[3]);
}

fn get_grade_color(score: i32, max_score: i32) -> Color {
    if score < 0 {
        return Color::Red;
    }
    let percentage = if max_score > 0 {
        score * 100 / max_score
    } else {
        0
    };
    match percentage {
        90.. => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, finished: &Finished, score: i32) {
    let rank = Rank::for_score(score);
    let result = &finished.result;

    let content = vec![
        Line::from(Span::styled(
            format!("RESULTS · {}", finished.player),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}", score, finished.max_score),
            Style::default()
                .fg(get_grade_color(score, finished.max_score))
                .bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(rank.title, Style::default().fg(Color::Yellow).bold())),
        Line::from(rank.description.fg(Color::Gray)),
        Line::from(""),
        Line::from(
            format!(
                "{} · {}",
                result.category().label(),
                result.difficulty().label()
            )
            .fg(Color::DarkGray),
        ),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_leaderboard(frame: &mut Frame, area: Rect, finished: &Finished) {
    let mut lines = vec![
        Line::from(Span::styled(
            "LEADERBOARD",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
    ];

    if finished.leaderboard.is_empty() {
        lines.push(Line::from("No saved scores".fg(Color::DarkGray)));
    }

    for (index, entry) in finished.leaderboard.iter().enumerate() {
        let is_player = entry.name.eq_ignore_ascii_case(&finished.player);
        let style = if is_player {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::Gray)
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("{:2}. ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(format!("{:<16}", entry.name), style),
            Span::styled(format!("{:>6}", entry.score), style),
            Span::styled(
                format!("  {} · {}", entry.category, entry.difficulty.label()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("[Enter] play again  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
