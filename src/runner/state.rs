//! Per-playthrough mutable state.

use crate::models::OptionId;

/// Where the runner is within the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Intro travel animation is playing; the question is not yet revealed.
    Intro,
    /// Question is on screen, waiting for exactly one answer.
    Questioning,
    /// Answer graded, branch animation is playing.
    Answered,
    /// Feedback text is on screen, waiting for the advance control.
    Feedback,
    /// Terminal: the last question's feedback has been advanced past.
    Advancing,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Intro => "Intro",
            Phase::Questioning => "Questioning",
            Phase::Answered => "Answered",
            Phase::Feedback => "Feedback",
            Phase::Advancing => "Advancing",
        }
    }
}

/// The only mutable entity in a scenario playthrough.
///
/// Owned exclusively by one [`ScenarioRunner`](super::ScenarioRunner); created
/// on screen mount, destroyed on navigation away, never persisted.
#[derive(Debug, Clone)]
pub struct Playthrough {
    pub current_question_index: usize,
    pub phase: Phase,
    pub selected_option: Option<OptionId>,
    pub is_correct: Option<bool>,
    pub actor_visible: bool,
    pub actor_position: (f32, f32),
}

impl Playthrough {
    pub fn new() -> Self {
        Self {
            current_question_index: 0,
            phase: Phase::Intro,
            selected_option: None,
            is_correct: None,
            actor_visible: true,
            actor_position: (0.0, 0.0),
        }
    }

    /// Clear everything transient and re-enter `Intro` for the next question.
    pub fn reset_for_next_question(&mut self) {
        self.current_question_index += 1;
        self.phase = Phase::Intro;
        self.selected_option = None;
        self.is_correct = None;
        self.actor_visible = true;
        self.actor_position = (0.0, 0.0);
    }
}

impl Default for Playthrough {
    fn default() -> Self {
        Self::new()
    }
}
