mod complete;
mod feedback;
mod question;
mod road;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, Screen};
use crate::runner::Phase;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.screen {
        Screen::Title => welcome::render(frame, area, app),
        Screen::Playing => match app.runner().phase() {
            Phase::Intro | Phase::Answered | Phase::Advancing => road::render(frame, area, app),
            Phase::Questioning => question::render(frame, area, app),
            Phase::Feedback => feedback::render(frame, area, app),
        },
        Screen::Complete { route } => complete::render(frame, area, app, route.as_deref()),
    }
}
