//! Brief-building properties
//!
//! End-to-end checks of extraction, merging and question selection through
//! the public API.

use std::collections::BTreeSet;

use campaignbrief::{Draft, Goal, Limits, Platform, Question, apply_turn, next_question, readiness};
use proptest::prelude::*;

fn replay(turns: &[&str]) -> Draft {
    let limits = Limits::default();
    turns
        .iter()
        .fold(Draft::default(), |draft, turn| apply_turn(&draft, turn, &limits))
}

fn expected_brief() -> Draft {
    Draft {
        industry: Some("B2B SaaS for dentists".to_string()),
        target_audience: Some("clinic owners".to_string()),
        primary_goal: Some(Goal::Leads),
        platforms: BTreeSet::from([Platform::Linkedin, Platform::Instagram]),
        resources_per_week: Some(5),
        ..Default::default()
    }
}

// =============================================================================
// Multi-turn and single-turn briefs
// =============================================================================

#[test]
fn test_multi_turn_brief() {
    let draft = replay(&[
        "Industry: B2B SaaS for dentists",
        "Audience: clinic owners",
        "Goal: leads",
        "Platforms: LinkedIn + IG",
        "5/week",
    ]);
    assert_eq!(draft, expected_brief());
    assert!(readiness(&draft).is_ready());
}

#[test]
fn test_single_turn_matches_multi_turn() {
    let draft = replay(&["B2B SaaS for dentists. Audience: clinic owners. Goal: leads. Platforms: LinkedIn + IG. 5/week."]);
    assert_eq!(draft, expected_brief());
    assert!(readiness(&draft).is_ready());
}

#[test]
fn test_answers_to_questions_in_plain_text() {
    let draft = replay(&[
        "Dental clinic software",
        "Clinic owners in Norway",
        "We want more demo bookings",
        "LinkedIn",
        "3",
    ]);
    assert_eq!(draft.industry.as_deref(), Some("Dental clinic software"));
    assert_eq!(draft.target_audience.as_deref(), Some("Clinic owners in Norway"));
    assert_eq!(draft.primary_goal, Some(Goal::Leads));
    assert_eq!(draft.platforms, BTreeSet::from([Platform::Linkedin]));
    assert_eq!(draft.resources_per_week, Some(3));
}

// =============================================================================
// No-ops and idempotence
// =============================================================================

#[test]
fn test_unrecognised_turn_is_noop() {
    let limits = Limits::default();
    let prior = expected_brief();
    for text in ["ok", "hmm, let me think", "thanks!", "???"] {
        assert_eq!(apply_turn(&prior, text, &limits), prior, "turn {text:?} changed the draft");
    }
}

#[test]
fn test_platforms_idempotent() {
    let limits = Limits::default();
    let once = apply_turn(&expected_brief(), "LinkedIn and Instagram", &limits);
    let twice = apply_turn(&once, "Instagram and LinkedIn", &limits);
    assert_eq!(twice.platforms.len(), 2);
    assert_eq!(once, twice);
}

// =============================================================================
// Numeric disambiguation
// =============================================================================

#[test]
fn test_bare_number_on_empty_draft_ignored() {
    let draft = replay(&["5"]);
    assert_eq!(draft.resources_per_week, None);
    assert_eq!(draft, Draft::default());
}

#[test]
fn test_bare_number_fills_last_gap() {
    let draft = replay(&[
        "Industry: B2B SaaS for dentists",
        "Audience: clinic owners",
        "Goal: leads",
        "Platforms: LinkedIn",
        "5",
    ]);
    assert_eq!(draft.resources_per_week, Some(5));
}

#[test]
fn test_out_of_range_count_clamped() {
    let draft = replay(&["500 per week"]);
    assert_eq!(draft.resources_per_week, Some(100));

    let draft = replay(&["0 posts per week"]);
    assert_eq!(draft.resources_per_week, Some(1));
}

// =============================================================================
// Question order
// =============================================================================

#[test]
fn test_question_sequence_from_empty() {
    let limits = Limits::default();
    let answers = [
        (Question::Industry, "Industry: Bakery"),
        (Question::Audience, "Audience: families nearby"),
        (Question::PrimaryGoal, "Goal: sales"),
        (Question::Platforms, "Instagram"),
        (Question::Resources, "3 posts per week"),
        (Question::Tone, "skip"),
    ];

    let mut draft = Draft::default();
    for (expected, answer) in answers {
        assert_eq!(next_question(&draft), Some(expected));
        draft = apply_turn(&draft, answer, &limits);
    }
    assert_eq!(next_question(&draft), None);
    assert!(readiness(&draft).is_ready());
}

proptest! {
    #[test]
    fn prop_resources_always_in_bounds(n in any::<u64>(), unit in prop::sample::select(vec!["per week", "posts a week", "/week", "x per week"])) {
        let limits = Limits::default();
        let draft = apply_turn(&Draft::default(), &format!("{} {}", n, unit), &limits);
        let value = draft.resources_per_week.unwrap();
        prop_assert!((limits.resources_min..=limits.resources_max).contains(&value));
    }

    #[test]
    fn prop_bare_number_always_in_bounds(n in any::<u64>()) {
        let limits = Limits::default();
        let prior = Draft {
            industry: Some("Bakery".to_string()),
            target_audience: Some("locals".to_string()),
            primary_goal: Some(Goal::Sales),
            platforms: BTreeSet::from([Platform::Instagram]),
            ..Default::default()
        };
        let draft = apply_turn(&prior, &n.to_string(), &limits);
        let value = draft.resources_per_week.unwrap();
        prop_assert!((limits.resources_min..=limits.resources_max).contains(&value));
    }

    #[test]
    fn prop_extraction_never_panics(text in ".{0,200}") {
        let limits = Limits::default();
        let draft = apply_turn(&Draft::default(), &text, &limits);
        if let Some(value) = draft.resources_per_week {
            prop_assert!(value >= limits.resources_min && value <= limits.resources_max);
        }
    }
}
