//! End-to-end playthrough of the bundled crosswalk scenario.

use roadcheck::OptionId;
use roadcheck::load_scenario_from_json;
use roadcheck::nav::{Navigator, RouteLog};
use roadcheck::runner::{Advance, Phase, RunnerError, ScenarioRunner};

fn crosswalk() -> roadcheck::Scenario {
    load_scenario_from_json(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/scenarios/crosswalk.json"
    ))
    .expect("bundled scenario must validate")
}

#[test]
fn bundled_scenario_validates() {
    let scenario = crosswalk();
    assert_eq!(scenario.title, "Zebra crossing");
    assert_eq!(scenario.questions.len(), 2);
    assert_eq!(scenario.next_route.as_deref(), Some("town/roundabout"));
}

#[test]
fn wrong_then_correct_playthrough() {
    let mut runner = ScenarioRunner::new(crosswalk());
    let mut nav = RouteLog::new();

    // Question 1: answer wrong with the scripted swerve option.
    runner.checkpoint_reached().unwrap();
    let cue = runner.submit_answer(&OptionId::new("swerve")).unwrap();
    assert_eq!(cue.name, "near-miss");
    assert_eq!(runner.is_correct(), Some(false));
    runner.branch_finished().unwrap();
    assert_eq!(
        runner.feedback(),
        Some("Swerving at speed risks hitting the pedestrian or oncoming traffic.")
    );
    assert_eq!(
        runner.advance().unwrap(),
        Advance::NextQuestion { index: 1 }
    );

    // Transients are gone; the next intro starts fresh.
    let play = runner.playthrough();
    assert_eq!(play.phase, Phase::Intro);
    assert_eq!(play.selected_option, None);
    assert_eq!(play.is_correct, None);

    // Question 2: answer correctly.
    runner.checkpoint_reached().unwrap();
    runner.submit_answer(&OptionId::new("go")).unwrap();
    assert_eq!(runner.is_correct(), Some(true));
    runner.branch_finished().unwrap();
    assert_eq!(
        runner.feedback(),
        Some("Once your half of the crossing is clear you may proceed with care.")
    );

    // Completion hands the authored route to the navigator.
    match runner.advance().unwrap() {
        Advance::ScenarioComplete { route } => {
            let route = route.expect("crosswalk scenario has a next route");
            nav.navigate_to(&route);
        }
        other => panic!("expected completion, got {:?}", other),
    }
    assert_eq!(nav.last(), Some("town/roundabout"));
    assert!(runner.is_complete());
}

#[test]
fn misuse_never_corrupts_a_playthrough() {
    let mut runner = ScenarioRunner::new(crosswalk());

    // Answer before the checkpoint: rejected.
    assert!(matches!(
        runner.submit_answer(&OptionId::new("stop")),
        Err(RunnerError::InvalidState { .. })
    ));

    runner.checkpoint_reached().unwrap();

    // Unknown option (a display label, not an id): rejected, state intact.
    let label = OptionId::new("Slow down and stop before the crossing");
    assert!(matches!(
        runner.submit_answer(&label),
        Err(RunnerError::InvalidOption(_))
    ));
    assert_eq!(runner.phase(), Phase::Questioning);

    // Advance before feedback: rejected.
    assert!(matches!(
        runner.advance(),
        Err(RunnerError::InvalidState { .. })
    ));
    assert_eq!(runner.current_question_index(), 0);

    // The playthrough still works after all of that.
    runner.submit_answer(&OptionId::new("stop")).unwrap();
    assert_eq!(runner.is_correct(), Some(true));
}
