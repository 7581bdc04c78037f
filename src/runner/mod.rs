//! The Scenario Runner state machine.
//!
//! Every game screen plays the same loop over its own scenario data: intro
//! travel animation up to a checkpoint, one question, a per-option branch
//! animation, feedback text, then advance to the next question or hand the
//! next route to the navigator. This module is that loop, factored out of the
//! screens: the screens differ only in scenario data and in how they render
//! the animations.
//!
//! Misuse (answering outside `Questioning`, advancing outside `Feedback`,
//! submitting an unknown option) is reported as a typed [`RunnerError`] and
//! leaves the state untouched.

mod playback;
mod state;

pub use playback::Animation;
pub use state::{Phase, Playthrough};

use crate::models::{BranchCue, OptionId, Question, Scenario};

/// Feedback shown for a correct answer when the question has no
/// `correct_explanation`.
pub const DEFAULT_CORRECT_FEEDBACK: &str = "Correct!";

/// Feedback shown for a wrong answer when the question has no
/// `wrong_explanations` entry for the chosen option.
pub const DEFAULT_WRONG_FEEDBACK: &str = "Wrong!";

/// Branch cue used when the chosen option does not script its own.
const DEFAULT_BRANCH_MS: u64 = 1200;

/// Caller-misuse errors. None of these change runner state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerError {
    /// `submit_answer` was called with an id that is not among the current
    /// question's options.
    InvalidOption(OptionId),
    /// An operation was called outside its legal phase.
    InvalidState {
        operation: &'static str,
        phase: Phase,
    },
}

impl std::fmt::Display for RunnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunnerError::InvalidOption(id) => {
                write!(f, "option '{}' is not part of the current question", id)
            }
            RunnerError::InvalidState { operation, phase } => {
                write!(f, "{} is not legal in the {} phase", operation, phase.name())
            }
        }
    }
}

impl std::error::Error for RunnerError {}

/// Outcome of a successful [`ScenarioRunner::advance`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Transients reset, next intro starting.
    NextQuestion { index: usize },
    /// The scenario is finished; hand `route` to the navigator. Not an error.
    ScenarioComplete { route: Option<String> },
}

/// Drives one playthrough of one scenario.
pub struct ScenarioRunner {
    scenario: Scenario,
    play: Playthrough,
}

impl ScenarioRunner {
    /// Start a playthrough at question 0 in the `Intro` phase.
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            play: Playthrough::new(),
        }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn playthrough(&self) -> &Playthrough {
        &self.play
    }

    pub fn phase(&self) -> Phase {
        self.play.phase
    }

    pub fn current_question_index(&self) -> usize {
        self.play.current_question_index
    }

    pub fn current_question(&self) -> &Question {
        &self.scenario.questions[self.play.current_question_index]
    }

    pub fn total_questions(&self) -> usize {
        self.scenario.questions.len()
    }

    pub fn selected_option(&self) -> Option<&OptionId> {
        self.play.selected_option.as_ref()
    }

    pub fn is_correct(&self) -> Option<bool> {
        self.play.is_correct
    }

    /// True once the final `advance` has signalled `ScenarioComplete`.
    pub fn is_complete(&self) -> bool {
        self.play.phase == Phase::Advancing
    }

    /// Playback-driver hook: move the actor sprite. Legal in any phase; the
    /// actor is also animated during branch playback.
    pub fn set_actor(&mut self, visible: bool, position: (f32, f32)) {
        self.play.actor_visible = visible;
        self.play.actor_position = position;
    }

    /// Playback driver reports that the intro travel reached the checkpoint.
    ///
    /// `Intro` -> `Questioning`; the question is now revealed.
    pub fn checkpoint_reached(&mut self) -> Result<(), RunnerError> {
        if self.play.phase != Phase::Intro {
            return Err(RunnerError::InvalidState {
                operation: "checkpoint_reached",
                phase: self.play.phase,
            });
        }
        self.play.phase = Phase::Questioning;
        Ok(())
    }

    /// Submit the one answer the current question accepts.
    ///
    /// Grades synchronously and returns the branch cue to play for the chosen
    /// option. `Questioning` -> `Answered`.
    pub fn submit_answer(&mut self, option_id: &OptionId) -> Result<BranchCue, RunnerError> {
        if self.play.phase != Phase::Questioning {
            return Err(RunnerError::InvalidState {
                operation: "submit_answer",
                phase: self.play.phase,
            });
        }

        let question = &self.scenario.questions[self.play.current_question_index];
        let Some(option) = question.option(option_id) else {
            return Err(RunnerError::InvalidOption(option_id.clone()));
        };

        let is_correct = question.is_correct(option_id);
        let cue = option.branch.clone().unwrap_or_else(|| BranchCue {
            name: if is_correct { "proceed" } else { "collision" }.to_string(),
            duration_ms: DEFAULT_BRANCH_MS,
        });

        self.play.selected_option = Some(option_id.clone());
        self.play.is_correct = Some(is_correct);
        self.play.phase = Phase::Answered;
        Ok(cue)
    }

    /// Playback driver reports that the branch animation finished.
    ///
    /// `Answered` -> `Feedback`; the feedback text is now available.
    pub fn branch_finished(&mut self) -> Result<(), RunnerError> {
        if self.play.phase != Phase::Answered {
            return Err(RunnerError::InvalidState {
                operation: "branch_finished",
                phase: self.play.phase,
            });
        }
        self.play.phase = Phase::Feedback;
        Ok(())
    }

    /// The explanatory text for the graded answer. Only present in the
    /// `Feedback` phase.
    pub fn feedback(&self) -> Option<&str> {
        if self.play.phase != Phase::Feedback {
            return None;
        }
        let question = &self.scenario.questions[self.play.current_question_index];
        let selected = self.play.selected_option.as_ref()?;
        let text = if self.play.is_correct == Some(true) {
            question
                .correct_explanation
                .as_deref()
                .unwrap_or(DEFAULT_CORRECT_FEEDBACK)
        } else {
            question
                .wrong_explanation(selected)
                .unwrap_or(DEFAULT_WRONG_FEEDBACK)
        };
        Some(text)
    }

    /// Advance past the feedback screen.
    ///
    /// With questions remaining, resets all transient state and re-enters
    /// `Intro` at the next index. On the last question, signals
    /// `ScenarioComplete` and leaves the runner terminal: any further call
    /// (including a repeated `advance`) reports `InvalidState` without
    /// touching the question index.
    pub fn advance(&mut self) -> Result<Advance, RunnerError> {
        if self.play.phase != Phase::Feedback {
            return Err(RunnerError::InvalidState {
                operation: "advance",
                phase: self.play.phase,
            });
        }

        self.play.phase = Phase::Advancing;
        if self.play.current_question_index + 1 < self.scenario.questions.len() {
            self.play.reset_for_next_question();
            Ok(Advance::NextQuestion {
                index: self.play.current_question_index,
            })
        } else {
            Ok(Advance::ScenarioComplete {
                route: self.scenario.next_route.clone(),
            })
        }
    }
}
