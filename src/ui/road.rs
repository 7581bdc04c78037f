//! The scrolling road strip shown while an animation plays.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::app::App;
use crate::runner::Phase;

const ACTOR: &str = "[car]";

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], app);
    render_road(frame, chunks[2], app);
    render_gauge(frame, chunks[4], app);
    render_caption(frame, chunks[5], app);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let progress = format!(
        "{}/{}",
        app.runner().current_question_index() + 1,
        app.runner().total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_road(frame: &mut Frame, area: Rect, app: &App) {
    let play = app.runner().playthrough();
    let width = area.width.saturating_sub(2) as usize;
    let offset = app.runner().scenario().checkpoint_offset.max(f32::EPSILON);
    let fraction = (play.actor_position.0 / offset).clamp(0.0, 1.0);
    let column = (fraction * width.saturating_sub(ACTOR.len()) as f32) as usize;

    let mut actor_row = " ".repeat(width);
    if play.actor_visible {
        let end = (column + ACTOR.len()).min(width);
        actor_row.replace_range(column..end, &ACTOR[..end - column]);
    }

    let lines = vec![
        Line::from("─".repeat(width).fg(Color::DarkGray)),
        Line::from(Span::styled(actor_row, Style::default().fg(Color::Yellow))),
        Line::from("╌".repeat(width).fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_gauge(frame: &mut Frame, area: Rect, app: &App) {
    let label = match app.runner().phase() {
        Phase::Intro => "approaching".to_string(),
        _ => app.branch_name().unwrap_or("playing").to_string(),
    };
    let widget = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(label))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(f64::from(app.animation_progress()).clamp(0.0, 1.0));
    frame.render_widget(widget, area);
}

fn render_caption(frame: &mut Frame, area: Rect, app: &App) {
    let caption = match app.runner().phase() {
        Phase::Intro => "driving to the checkpoint...",
        Phase::Answered => "watch what happens...",
        _ => "",
    };
    let widget = Paragraph::new(caption)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
