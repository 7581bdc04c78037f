//! Scenario file loading and validation.

use std::fs;
use std::io;
use std::path::Path;

use crate::models::{Question, Scenario};

/// Error loading or validating a scenario file.
#[derive(Debug)]
pub enum LoadError {
    /// File could not be read.
    Io(io::Error),
    /// File is not valid scenario JSON.
    Parse(serde_json::Error),
    /// File parsed but violates a scenario invariant.
    Invalid(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read scenario file: {}", e),
            LoadError::Parse(e) => write!(f, "failed to parse scenario JSON: {}", e),
            LoadError::Invalid(msg) => write!(f, "invalid scenario: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            LoadError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err)
    }
}

/// Load and validate a scenario from a JSON file.
pub fn load_scenario_from_json<P: AsRef<Path>>(path: P) -> Result<Scenario, LoadError> {
    let json = fs::read_to_string(path)?;
    parse_scenario(&json)
}

/// Parse and validate a scenario from a JSON string.
pub fn parse_scenario(json: &str) -> Result<Scenario, LoadError> {
    let scenario: Scenario = serde_json::from_str(json)?;
    validate(&scenario)?;
    Ok(scenario)
}

fn validate(scenario: &Scenario) -> Result<(), LoadError> {
    if scenario.questions.is_empty() {
        return Err(LoadError::Invalid(
            "scenario must contain at least one question".to_string(),
        ));
    }

    if !scenario.checkpoint_offset.is_finite() || scenario.checkpoint_offset <= 0.0 {
        return Err(LoadError::Invalid(format!(
            "checkpoint_offset must be a positive distance, got {}",
            scenario.checkpoint_offset
        )));
    }

    for (index, question) in scenario.questions.iter().enumerate() {
        validate_question(index, question)?;
    }

    Ok(())
}

fn validate_question(index: usize, question: &Question) -> Result<(), LoadError> {
    let n = question.options.len();
    if !(2..=3).contains(&n) {
        return Err(LoadError::Invalid(format!(
            "question {} must have 2-3 options, has {}",
            index, n
        )));
    }

    for (i, a) in question.options.iter().enumerate() {
        if question.options[..i].iter().any(|b| b.id == a.id) {
            return Err(LoadError::Invalid(format!(
                "question {} has duplicate option id '{}'",
                index, a.id
            )));
        }
    }

    if question.option(&question.correct_option_id).is_none() {
        return Err(LoadError::Invalid(format!(
            "question {} correct_option_id '{}' does not match any option",
            index, question.correct_option_id
        )));
    }

    for id in question.wrong_explanations.keys() {
        if question.option(id).is_none() {
            return Err(LoadError::Invalid(format!(
                "question {} has a wrong_explanation for unknown option '{}'",
                index, id
            )));
        }
        if question.is_correct(id) {
            return Err(LoadError::Invalid(format!(
                "question {} has a wrong_explanation for the correct option '{}'",
                index, id
            )));
        }
    }

    // A wrong option without an explanation is allowed: feedback falls back
    // to the generic message. Flag it for the author anyway.
    for option in &question.options {
        if !question.is_correct(&option.id) && question.wrong_explanation(&option.id).is_none() {
            log::debug!(
                "question {}: option '{}' has no wrong_explanation, generic feedback will be used",
                index,
                option.id
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "title": "Crosswalk",
        "checkpoint_offset": 6.0,
        "questions": [{
            "prompt": "What now?",
            "options": [
                { "id": "a", "label": "Stop" },
                { "id": "b", "label": "Go" }
            ],
            "correct_option_id": "a",
            "wrong_explanations": { "b": "No." }
        }]
    }"#;

    #[test]
    fn parses_valid_scenario() {
        let scenario = parse_scenario(VALID).unwrap();
        assert_eq!(scenario.title, "Crosswalk");
        assert_eq!(scenario.questions.len(), 1);
        assert_eq!(scenario.next_route, None);
    }

    #[test]
    fn rejects_empty_question_list() {
        let json = r#"{ "title": "x", "checkpoint_offset": 1.0, "questions": [] }"#;
        assert!(matches!(
            parse_scenario(json),
            Err(LoadError::Invalid(msg)) if msg.contains("at least one question")
        ));
    }

    #[test]
    fn rejects_dangling_correct_option_id() {
        let json = VALID.replace("\"correct_option_id\": \"a\"", "\"correct_option_id\": \"z\"");
        assert!(matches!(
            parse_scenario(&json),
            Err(LoadError::Invalid(msg)) if msg.contains("does not match any option")
        ));
    }

    #[test]
    fn rejects_single_option_question() {
        let json = VALID.replace(
            "{ \"id\": \"a\", \"label\": \"Stop\" },\n                { \"id\": \"b\", \"label\": \"Go\" }",
            "{ \"id\": \"a\", \"label\": \"Stop\" }",
        );
        // The replacement leaves "b" in wrong_explanations dangling, but the
        // option-count check fires first.
        assert!(matches!(
            parse_scenario(&json),
            Err(LoadError::Invalid(msg)) if msg.contains("2-3 options")
        ));
    }

    #[test]
    fn rejects_duplicate_option_ids() {
        let json = VALID.replace("\"id\": \"b\"", "\"id\": \"a\"");
        let err = parse_scenario(&json);
        assert!(matches!(
            err,
            Err(LoadError::Invalid(msg)) if msg.contains("duplicate option id")
        ));
    }

    #[test]
    fn rejects_explanation_for_correct_option() {
        let json = VALID.replace("\"wrong_explanations\": { \"b\": \"No.\" }",
                                 "\"wrong_explanations\": { \"a\": \"No.\" }");
        assert!(matches!(
            parse_scenario(&json),
            Err(LoadError::Invalid(msg)) if msg.contains("correct option")
        ));
    }

    #[test]
    fn rejects_non_positive_checkpoint() {
        let json = VALID.replace("6.0", "0.0");
        assert!(matches!(
            parse_scenario(&json),
            Err(LoadError::Invalid(msg)) if msg.contains("checkpoint_offset")
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(parse_scenario("not json"), Err(LoadError::Parse(_))));
    }

    #[test]
    fn missing_wrong_explanation_is_accepted() {
        let json = VALID.replace("\"wrong_explanations\": { \"b\": \"No.\" }",
                                 "\"wrong_explanations\": {}");
        assert!(parse_scenario(&json).is_ok());
    }
}
