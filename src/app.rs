//! Host application: owns the runner, drives playback, talks to the
//! navigator and the backend.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::backend::{BackendClient, UserProgress};
use crate::models::Scenario;
use crate::nav::Navigator;
use crate::runner::{Advance, Animation, Phase, ScenarioRunner};

/// Actor travel speed during the intro, in road tiles per second.
const INTRO_SPEED: f32 = 3.0;

/// Which screen is on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Title,
    Playing,
    Complete { route: Option<String> },
}

/// Where to record progress when the scenario completes.
#[derive(Debug, Clone)]
pub struct ProgressTarget {
    pub user_id: Uuid,
    pub category_id: u32,
    pub phase: u32,
    pub next_scenario_index: usize,
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    runner: ScenarioRunner,
    /// The currently playing intro or branch animation. Dropping the app
    /// (or replacing the animation) cancels the underlying timer.
    animation: Option<Animation>,
    branch_name: Option<String>,
    selected: usize,
    navigator: Box<dyn Navigator>,
    backend: Option<Arc<BackendClient>>,
    progress: Option<ProgressTarget>,
}

impl App {
    pub fn new(
        scenario: Scenario,
        navigator: Box<dyn Navigator>,
        backend: Option<Arc<BackendClient>>,
        progress: Option<ProgressTarget>,
    ) -> Self {
        Self {
            screen: Screen::Title,
            should_quit: false,
            runner: ScenarioRunner::new(scenario),
            animation: None,
            branch_name: None,
            selected: 0,
            navigator,
            backend,
            progress,
        }
    }

    pub fn runner(&self) -> &ScenarioRunner {
        &self.runner
    }

    /// Index of the highlighted option on the question screen.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Name of the branch animation currently playing, if any.
    pub fn branch_name(&self) -> Option<&str> {
        self.branch_name.as_deref()
    }

    /// Progress of the current animation, `0.0..=1.0`.
    pub fn animation_progress(&self) -> f32 {
        self.animation.as_ref().map_or(1.0, Animation::progress)
    }

    /// Leave the title screen and start the first intro.
    pub fn start(&mut self) {
        if self.screen != Screen::Title {
            return;
        }
        self.screen = Screen::Playing;
        self.start_intro();
    }

    fn start_intro(&mut self) {
        let offset = self.runner.scenario().checkpoint_offset;
        let duration = Duration::from_secs_f32(offset / INTRO_SPEED);
        self.runner.set_actor(true, (0.0, 0.0));
        self.animation = Some(Animation::start(duration));
    }

    /// Advance animations. Called once per event-loop iteration.
    pub fn tick(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }

        match self.runner.phase() {
            Phase::Intro => {
                let Some(animation) = self.animation.as_mut() else {
                    return;
                };
                let progress = animation.progress();
                let offset = self.runner.scenario().checkpoint_offset;
                let finished = animation.poll_finished();
                self.runner.set_actor(true, (progress * offset, 0.0));
                if finished {
                    self.animation = None;
                    if let Err(e) = self.runner.checkpoint_reached() {
                        log::error!("playback desync: {}", e);
                    }
                }
            }
            Phase::Answered => {
                let Some(animation) = self.animation.as_mut() else {
                    return;
                };
                if animation.poll_finished() {
                    self.animation = None;
                    self.branch_name = None;
                    if let Err(e) = self.runner.branch_finished() {
                        log::error!("playback desync: {}", e);
                    }
                }
            }
            _ => {}
        }
    }

    pub fn select_next_option(&mut self) {
        if self.runner.phase() != Phase::Questioning {
            return;
        }
        let n = self.runner.current_question().options.len();
        self.selected = (self.selected + 1) % n;
    }

    pub fn select_previous_option(&mut self) {
        if self.runner.phase() != Phase::Questioning {
            return;
        }
        let n = self.runner.current_question().options.len();
        self.selected = (self.selected + n - 1) % n;
    }

    /// Submit the highlighted option.
    pub fn submit_selected(&mut self) {
        if self.runner.phase() != Phase::Questioning {
            return;
        }
        let option_id = self.runner.current_question().options[self.selected].id.clone();
        match self.runner.submit_answer(&option_id) {
            Ok(cue) => {
                self.branch_name = Some(cue.name);
                self.animation = Some(Animation::start_ms(cue.duration_ms));
            }
            Err(e) => log::warn!("answer rejected: {}", e),
        }
    }

    /// Advance past feedback: next question, or complete the scenario.
    pub fn advance(&mut self) {
        match self.runner.advance() {
            Ok(Advance::NextQuestion { index }) => {
                log::debug!("advancing to question {}", index);
                self.selected = 0;
                self.start_intro();
            }
            Ok(Advance::ScenarioComplete { route }) => {
                if let Some(route) = &route {
                    self.navigator.navigate_to(route);
                }
                self.sync_progress();
                self.animation = None;
                self.screen = Screen::Complete { route };
            }
            // Double-tap on the advance control lands here; nothing to do.
            Err(e) => log::debug!("advance ignored: {}", e),
        }
    }

    /// Fire-and-forget progress upsert. Backend failures are logged and never
    /// interrupt the session.
    fn sync_progress(&self) {
        let (Some(backend), Some(target)) = (self.backend.clone(), self.progress.clone()) else {
            return;
        };
        tokio::spawn(async move {
            let progress = UserProgress {
                user_id: target.user_id,
                current_category_id: target.category_id,
                current_phase: target.phase,
                current_scenario_index: target.next_scenario_index,
            };
            match backend.upsert_progress(&progress).await {
                Ok(()) => log::info!(
                    "progress saved: category {} phase {} scenario {}",
                    target.category_id,
                    target.phase,
                    target.next_scenario_index
                ),
                Err(e) => log::warn!("progress not saved: {}", e),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_scenario;
    use crate::nav::RouteLog;

    fn scenario() -> Scenario {
        parse_scenario(
            r#"{
                "title": "Test drive",
                "checkpoint_offset": 3.0,
                "next_route": "phase-2",
                "questions": [{
                    "prompt": "Light turns amber. You:",
                    "options": [
                        { "id": "brake", "label": "Brake smoothly" },
                        { "id": "floor", "label": "Accelerate through" }
                    ],
                    "correct_option_id": "brake",
                    "wrong_explanations": { "floor": "Amber means stop if safe." }
                }]
            }"#,
        )
        .unwrap()
    }

    fn app() -> App {
        App::new(scenario(), Box::new(RouteLog::new()), None, None)
    }

    #[tokio::test(start_paused = true)]
    async fn full_playthrough_reaches_complete_screen() {
        let mut app = app();
        assert_eq!(app.screen, Screen::Title);
        app.start();
        assert_eq!(app.screen, Screen::Playing);
        assert_eq!(app.runner().phase(), Phase::Intro);

        // Let the intro travel finish (3 tiles at 3 tiles/s).
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        app.tick();
        assert_eq!(app.runner().phase(), Phase::Questioning);

        app.select_next_option();
        app.submit_selected();
        assert_eq!(app.runner().phase(), Phase::Answered);
        assert_eq!(app.branch_name(), Some("collision"));

        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(3)).await;
        tokio::task::yield_now().await;
        app.tick();
        assert_eq!(app.runner().phase(), Phase::Feedback);
        assert_eq!(app.runner().feedback(), Some("Amber means stop if safe."));

        app.advance();
        assert_eq!(
            app.screen,
            Screen::Complete {
                route: Some("phase-2".to_string())
            }
        );

        // Advance control double-tap after completion stays harmless.
        app.advance();
        assert_eq!(
            app.screen,
            Screen::Complete {
                route: Some("phase-2".to_string())
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn selection_wraps_and_is_inert_outside_questioning() {
        let mut app = app();
        app.start();
        // Still in Intro: selection controls do nothing.
        app.select_next_option();
        assert_eq!(app.selected(), 0);

        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        app.tick();

        app.select_next_option();
        assert_eq!(app.selected(), 1);
        app.select_next_option();
        assert_eq!(app.selected(), 0);
        app.select_previous_option();
        assert_eq!(app.selected(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn intro_moves_the_actor_toward_the_checkpoint() {
        let mut app = app();
        app.start();
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(500)).await;
        tokio::task::yield_now().await;
        app.tick();
        let (x, _) = app.runner().playthrough().actor_position;
        assert!(x > 0.0 && x < 3.0, "actor at {} tiles", x);
        assert_eq!(app.runner().phase(), Phase::Intro);
    }
}
