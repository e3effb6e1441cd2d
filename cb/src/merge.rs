//! Draft merging
//!
//! Folds one turn's extraction into the prior draft as a pure function:
//! scalars are replaced by non-empty new values, sets and sequences grow by
//! union. After the merge, a bare-number turn may fill the resource count and
//! leftover text may fill industry or audience.

use tracing::debug;

use crate::domain::{Draft, Limits};
use crate::extract::{TurnExtraction, extract_turn};

/// Apply one turn of text to `prior`, returning the new draft
pub fn apply_turn(prior: &Draft, text: &str, limits: &Limits) -> Draft {
    let extraction = extract_turn(text, limits);
    merge(prior, &extraction, limits)
}

/// Merge a turn's extraction into `prior`
pub fn merge(prior: &Draft, extraction: &TurnExtraction, limits: &Limits) -> Draft {
    debug!("merge: called");
    let patch = &extraction.patch;
    let mut draft = prior.clone();

    replace_text(&mut draft.industry, &patch.industry);
    replace_text(&mut draft.target_audience, &patch.target_audience);
    replace_text(&mut draft.tone, &patch.tone);
    if patch.primary_goal.is_some() {
        draft.primary_goal = patch.primary_goal;
    }
    if patch.resources_per_week.is_some() {
        draft.resources_per_week = patch.resources_per_week;
    }

    for goal in &patch.secondary_goals {
        if !draft.secondary_goals.contains(goal) {
            draft.secondary_goals.push(*goal);
        }
    }
    if let Some(primary) = draft.primary_goal {
        draft.secondary_goals.retain(|g| *g != primary);
    }
    draft.secondary_goals.truncate(limits.max_secondary_goals);

    draft.platforms.extend(patch.platforms.iter().copied());

    for constraint in &patch.constraints {
        if !draft.constraints.contains(constraint) {
            draft.constraints.push(constraint.clone());
        }
    }
    draft.constraints.truncate(limits.max_constraints);

    if let Some(value) = extraction.numeric_only {
        disambiguate_number(&mut draft, value, limits);
    }

    if let Some(text) = &extraction.leftovers {
        assign_leftover(&mut draft, text);
    }

    draft
}

fn replace_text(slot: &mut Option<String>, value: &Option<String>) {
    if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        *slot = Some(v.to_string());
    }
}

/// A bare integer fills resources/week only when that is the last required gap
fn disambiguate_number(draft: &mut Draft, value: u64, limits: &Limits) {
    let only_resources_missing = draft.resources_per_week.is_none()
        && draft.industry.is_some()
        && draft.target_audience.is_some()
        && draft.primary_goal.is_some()
        && !draft.platforms.is_empty();

    if only_resources_missing {
        let clamped = limits.clamp_resources(value);
        debug!(value, clamped, "disambiguate_number: assigned to resources_per_week");
        draft.resources_per_week = Some(clamped);
    } else {
        debug!(value, "disambiguate_number: not assigned");
    }
}

/// Leftover text fills industry first, then audience, else it is dropped
fn assign_leftover(draft: &mut Draft, text: &str) {
    if draft.industry.is_none() {
        debug!(%text, "assign_leftover: industry");
        draft.industry = Some(text.to_string());
    } else if draft.target_audience.is_none() {
        debug!(%text, "assign_leftover: target_audience");
        draft.target_audience = Some(text.to_string());
    } else {
        debug!("assign_leftover: nothing left to fill, discarded");
    }
}
