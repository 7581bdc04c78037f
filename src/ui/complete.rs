use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App, route: Option<&str>) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(9),
        Constraint::Fill(1),
    ])
    .split(area);

    let next = match route {
        Some(route) => format!("next up: {}", route),
        None => "end of the road".to_string(),
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "SCENARIO COMPLETE",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from(""),
        Line::from(app.runner().scenario().title.clone().fg(Color::White)),
        Line::from(next.fg(Color::DarkGray)),
        Line::from(""),
        Line::from(Span::styled("Q", Style::default().fg(Color::Cyan).bold())),
        Line::from("to quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
