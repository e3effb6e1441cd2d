//! Rule-based field extraction
//!
//! Each extractor reads one turn and contributes at most one partial update
//! for its field. Extraction never fails: a turn with no recognised keyword
//! or directive simply yields an empty patch.
//!
//! ```text
//! turn text → normalize ─┬→ platform ─┐
//!          → segment  ───┼→ goal     ─┤
//!                        ├→ resources ┼→ DraftPatch + leftovers
//!                        ├→ tone     ─┤
//!                        ├→ constraints
//!                        └→ fields   ─┘
//! ```

pub mod clauses;
pub mod constraints;
pub mod fields;
pub mod goal;
pub mod normalize;
pub mod platform;
pub mod resources;
pub mod tone;

use serde::Serialize;
use tracing::debug;

use crate::domain::{DEFAULT_TONE, DraftPatch, Limits};
use normalize::normalize;

/// Everything one turn contributes before merging
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnExtraction {
    /// Field updates found in the turn
    pub patch: DraftPatch,

    /// Free text no extractor or directive consumed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leftovers: Option<String>,

    /// Set when the whole turn is a bare integer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_only: Option<u64>,
}

/// Extract a patch from one turn, independent of the prior draft
pub fn extract_turn(text: &str, limits: &Limits) -> TurnExtraction {
    debug!(text_len = text.len(), "extract_turn: called");
    let normalized = normalize(text);

    if tone::is_skip(&normalized) {
        debug!("extract_turn: tone skip shortcut");
        return TurnExtraction {
            patch: DraftPatch {
                tone: Some(DEFAULT_TONE.to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
    }

    let numeric_only = resources::numeric_only(text);
    let segmented = clauses::segment(text);
    let explicit = fields::explicit(&segmented);

    let goals = goal::extract(&normalized, &segmented);
    let mut goals = goals.into_iter();
    let primary_goal = goals.next();
    let secondary_goals: Vec<_> = goals.take(limits.max_secondary_goals).collect();

    let mut constraints = constraints::extract(text, &normalized, &segmented);
    constraints.truncate(limits.max_constraints);

    let patch = DraftPatch {
        industry: explicit.industry,
        target_audience: explicit.target_audience,
        primary_goal,
        secondary_goals,
        platforms: platform::extract(text, &segmented),
        resources_per_week: resources::extract(&normalized.lowered, limits),
        tone: tone::extract(&normalized, &segmented),
        constraints,
    };

    let leftovers = if numeric_only.is_some() {
        None
    } else {
        fields::leftover(
            segmented
                .fragments
                .iter()
                .map(String::as_str)
                .filter(|f| !fragment_is_consumed(f, limits)),
        )
    };

    debug!(?patch, ?leftovers, ?numeric_only, "extract_turn: done");
    TurnExtraction {
        patch,
        leftovers,
        numeric_only,
    }
}

/// A fragment is consumed when it names platforms or a resource count.
/// Goal, tone and constraint keywords leave it free for the leftover assigner.
fn fragment_is_consumed(fragment: &str, limits: &Limits) -> bool {
    let normalized = normalize(fragment);
    !platform::detect(fragment).is_empty()
        || resources::extract(&normalized.lowered, limits).is_some()
        || resources::numeric_only(fragment).is_some()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::{Goal, Platform};

    fn run(text: &str) -> TurnExtraction {
        extract_turn(text, &Limits::default())
    }

    #[test]
    fn test_single_turn_brief() {
        let ex = run("B2B SaaS for dentists. Audience: clinic owners. Goal: leads. Platforms: LinkedIn + IG. 5/week.");
        assert_eq!(ex.patch.industry, None);
        assert_eq!(ex.patch.target_audience.as_deref(), Some("clinic owners"));
        assert_eq!(ex.patch.primary_goal, Some(Goal::Leads));
        assert!(ex.patch.secondary_goals.is_empty());
        assert_eq!(
            ex.patch.platforms,
            BTreeSet::from([Platform::Linkedin, Platform::Instagram])
        );
        assert_eq!(ex.patch.resources_per_week, Some(5));
        assert_eq!(ex.patch.tone, None);
        assert_eq!(ex.leftovers.as_deref(), Some("B2B SaaS for dentists"));
    }

    #[test]
    fn test_no_keywords_yields_empty_patch() {
        let ex = run("hmm, let me think");
        assert!(ex.patch.is_empty());
        assert_eq!(ex.leftovers.as_deref(), Some("hmm, let me think"));
    }

    #[test]
    fn test_skip_shortcut_only_sets_tone() {
        let ex = run("no tone");
        assert_eq!(ex.patch.tone.as_deref(), Some(DEFAULT_TONE));
        assert!(ex.patch.constraints.is_empty());
        assert_eq!(ex.leftovers, None);
    }

    #[test]
    fn test_numeric_only_turn_has_no_leftovers() {
        let ex = run("5");
        assert!(ex.patch.is_empty());
        assert_eq!(ex.numeric_only, Some(5));
        assert_eq!(ex.leftovers, None);
    }

    #[test]
    fn test_consumed_fragments_are_not_leftovers() {
        let ex = run("We want leads on LinkedIn");
        assert_eq!(ex.leftovers, None);
        let ex = run("3 posts per week");
        assert_eq!(ex.leftovers, None);
    }

    #[test]
    fn test_goal_and_constraint_fragments_stay_leftover() {
        let ex = run("Brand design agency");
        assert_eq!(ex.patch.primary_goal, Some(Goal::Awareness));
        assert_eq!(ex.leftovers.as_deref(), Some("Brand design agency"));

        let ex = run("Bakery with no online presence");
        assert_eq!(ex.patch.constraints, vec!["Bakery with no online presence"]);
        assert_eq!(ex.leftovers.as_deref(), Some("Bakery with no online presence"));
    }

    #[test]
    fn test_secondary_goals_are_capped() {
        let limits = Limits {
            max_secondary_goals: 1,
            ..Limits::default()
        };
        let ex = extract_turn("leads, brand reach, revenue and community", &limits);
        assert_eq!(ex.patch.primary_goal, Some(Goal::Leads));
        assert_eq!(ex.patch.secondary_goals, vec![Goal::Awareness]);
    }

    #[test]
    fn test_tone_keyword_does_not_consume_fragment() {
        let ex = run("Friendly neighbourhood bakery");
        assert_eq!(ex.patch.tone.as_deref(), Some("Friendly"));
        assert_eq!(ex.leftovers.as_deref(), Some("Friendly neighbourhood bakery"));
    }
}
