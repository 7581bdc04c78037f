use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::runner::{DEFAULT_WRONG_FEEDBACK, Phase};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    let correct = app.runner().is_correct() == Some(true);
    let (verdict, color) = if correct {
        ("CORRECT", Color::Green)
    } else {
        ("WRONG", Color::Red)
    };

    let banner = Paragraph::new(Span::styled(
        verdict,
        Style::default().fg(color).bold(),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[1]);

    debug_assert_eq!(app.runner().phase(), Phase::Feedback);
    let text = app.runner().feedback().unwrap_or(DEFAULT_WRONG_FEEDBACK);
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .fg(Color::White)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(color)
                .padding(Padding::horizontal(2)),
        );
    frame.render_widget(widget, chunks[2]);

    let controls = Paragraph::new("enter continue  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[4]);
}
