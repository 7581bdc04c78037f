//! Scenario data types.
//!
//! A scenario is authored as a JSON file: an ordered list of questions, each
//! with answer options, the id of the correct option, and per-wrong-option
//! explanation text. Correctness is decided by option id, never by comparing
//! display labels.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

/// Stable identifier for an answer option within a question.
///
/// Display labels are free to change without affecting grading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct OptionId(String);

impl OptionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A scripted follow-up animation, chosen per option.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchCue {
    /// Animation name, e.g. "proceed", "collision", "near-miss".
    pub name: String,
    /// Playback length in milliseconds.
    pub duration_ms: u64,
}

/// One selectable answer.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerOption {
    pub id: OptionId,
    pub label: String,
    /// Branch animation for this option. Options without an explicit cue get
    /// a default cue based on correctness.
    #[serde(default)]
    pub branch: Option<BranchCue>,
}

/// A single multiple-choice traffic-law question.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub prompt: String,
    /// 2-3 options; validated by the loader.
    pub options: Vec<AnswerOption>,
    pub correct_option_id: OptionId,
    /// Explanation per wrong option. Missing entries fall back to a generic
    /// message at feedback time.
    #[serde(default)]
    pub wrong_explanations: HashMap<OptionId, String>,
    #[serde(default)]
    pub correct_explanation: Option<String>,
}

impl Question {
    /// Look up an option by id.
    pub fn option(&self, id: &OptionId) -> Option<&AnswerOption> {
        self.options.iter().find(|o| &o.id == id)
    }

    pub fn is_correct(&self, id: &OptionId) -> bool {
        id == &self.correct_option_id
    }

    pub fn wrong_explanation(&self, id: &OptionId) -> Option<&str> {
        self.wrong_explanations.get(id).map(String::as_str)
    }
}

/// An ordered set of questions within one themed driving situation.
///
/// Immutable for the lifetime of a playthrough.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub title: String,
    pub questions: Vec<Question>,
    /// Distance (in road tiles) the actor travels before the question is
    /// revealed.
    pub checkpoint_offset: f32,
    /// Opaque route identifier handed to the navigator on completion.
    #[serde(default)]
    pub next_route: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        serde_json::from_str(
            r#"{
                "prompt": "A pedestrian waits at the zebra crossing. You should:",
                "options": [
                    { "id": "stop", "label": "Stop and let them cross" },
                    { "id": "honk", "label": "Honk and keep driving",
                      "branch": { "name": "near-miss", "duration_ms": 900 } }
                ],
                "correct_option_id": "stop",
                "wrong_explanations": { "honk": "Pedestrians have priority on zebra crossings." }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn grades_by_id_not_label() {
        let q = question();
        assert!(q.is_correct(&OptionId::new("stop")));
        assert!(!q.is_correct(&OptionId::new("honk")));
        assert!(!q.is_correct(&OptionId::new("Stop and let them cross")));
    }

    #[test]
    fn wrong_explanation_lookup() {
        let q = question();
        assert_eq!(
            q.wrong_explanation(&OptionId::new("honk")),
            Some("Pedestrians have priority on zebra crossings.")
        );
        assert_eq!(q.wrong_explanation(&OptionId::new("stop")), None);
    }

    #[test]
    fn branch_cue_deserializes() {
        let q = question();
        let honk = q.option(&OptionId::new("honk")).unwrap();
        let cue = honk.branch.as_ref().unwrap();
        assert_eq!(cue.name, "near-miss");
        assert_eq!(cue.duration_ms, 900);
        assert!(q.option(&OptionId::new("stop")).unwrap().branch.is_none());
    }
}
