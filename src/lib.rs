//! # roadcheck
//!
//! A terminal driving-education quiz game: an actor travels a road strip to a
//! checkpoint, a traffic-law question appears, the chosen answer plays its
//! own branch animation, and explanatory feedback follows before the next
//! question.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use roadcheck::{Game, GameError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), GameError> {
//!     // Load a scenario from a JSON file and play it.
//!     let game = Game::from_json("scenarios/crosswalk.json")?;
//!     game.run().await?;
//!     Ok(())
//! }
//! ```

mod app;
pub mod backend;
mod data;
mod models;
pub mod nav;
pub mod runner;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

pub use app::{App, ProgressTarget, Screen};
pub use data::{LoadError, load_scenario_from_json, parse_scenario};
pub use models::{AnswerOption, BranchCue, OptionId, Question, Scenario};

use backend::BackendClient;
use nav::RouteLog;
use runner::Phase;

/// Error type for game operations.
#[derive(Debug)]
pub enum GameError {
    /// Error loading the scenario file.
    Load(LoadError),
    /// IO error during play.
    Io(io::Error),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::Load(e) => write!(f, "failed to load scenario: {}", e),
            GameError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Load(e) => Some(e),
            GameError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for GameError {
    fn from(err: LoadError) -> Self {
        GameError::Load(err)
    }
}

impl From<io::Error> for GameError {
    fn from(err: io::Error) -> Self {
        GameError::Io(err)
    }
}

/// A playable scenario session.
pub struct Game {
    app: App,
}

impl Game {
    /// Create a game from an already validated scenario.
    pub fn new(scenario: Scenario) -> Self {
        Self {
            app: App::new(scenario, Box::new(RouteLog::new()), None, None),
        }
    }

    /// Load a game from a scenario JSON file.
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let scenario = load_scenario_from_json(path)?;
        Ok(Self::new(scenario))
    }

    /// Attach a backend for the fire-and-forget progress upsert.
    pub fn with_backend(scenario: Scenario, backend: Arc<BackendClient>, target: ProgressTarget) -> Self {
        Self {
            app: App::new(
                scenario,
                Box::new(RouteLog::new()),
                Some(backend),
                Some(target),
            ),
        }
    }

    /// Run the game in the terminal.
    ///
    /// Takes over the terminal, plays the scenario, and returns when the user
    /// quits or finishes. Animations are owned by the session and are
    /// cancelled on every exit path.
    pub async fn run(mut self) -> Result<(), GameError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app).await;
        terminal::restore()?;
        result
    }

    /// The underlying app, for custom hosts.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Mutable access to the underlying app, for custom hosts.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

async fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), GameError> {
    loop {
        app.tick();
        terminal.draw(|frame| ui::render(frame, app))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the game should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.screen {
        Screen::Title => handle_title_input(app, key),
        Screen::Playing => handle_playing_input(app, key),
        Screen::Complete { .. } => handle_complete_input(key),
    }
}

fn handle_title_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_playing_input(app: &mut App, key: KeyCode) -> bool {
    match (app.runner().phase(), key) {
        (_, KeyCode::Char('q') | KeyCode::Char('Q')) => true,
        (Phase::Questioning, KeyCode::Up | KeyCode::Char('k')) => {
            app.select_previous_option();
            false
        }
        (Phase::Questioning, KeyCode::Down | KeyCode::Char('j')) => {
            app.select_next_option();
            false
        }
        (Phase::Questioning, KeyCode::Enter | KeyCode::Char(' ')) => {
            app.submit_selected();
            false
        }
        (Phase::Feedback, KeyCode::Enter | KeyCode::Char(' ')) => {
            app.advance();
            false
        }
        // Keys during animations are ignored; the runner would reject them
        // anyway.
        _ => false,
    }
}

fn handle_complete_input(key: KeyCode) -> bool {
    matches!(
        key,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc | KeyCode::Enter
    )
}
