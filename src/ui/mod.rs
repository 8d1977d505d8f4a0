mod common;
mod quiz;
mod result;
mod start;
mod versus;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.screen {
        Screen::Start => start::render(frame, area, &app.form),
        Screen::Single(session) => quiz::render(frame, area, session),
        Screen::Versus(session) => versus::render(frame, area, session),
        Screen::Result(finished) => result::render(frame, area, finished),
    }
}
