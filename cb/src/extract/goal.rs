//! Primary and secondary goal extraction

use tracing::debug;

use super::clauses::{DirectiveKey, Segmented};
use super::normalize::{Normalized, normalize};
use crate::domain::Goal;

/// Trigger phrases per goal; table order breaks ties at the same position
pub const GOAL_KEYWORDS: &[(Goal, &[&str])] = &[
    (
        Goal::Leads,
        &["lead", "leads", "book calls", "bookings", "appointments", "pipeline"],
    ),
    (
        Goal::Awareness,
        &["awareness", "brand", "reach", "top of funnel", "visibility"],
    ),
    (
        Goal::Sales,
        &["sales", "revenue", "close", "conversions", "purchase", "buy"],
    ),
    (
        Goal::Community,
        &["community", "followers", "engagement", "loyalty", "retention"],
    ),
];

/// Goals mentioned in `normalized`, ordered by where they first appear
pub fn scan(normalized: &Normalized) -> Vec<Goal> {
    let mut hits: Vec<(usize, usize, Goal)> = GOAL_KEYWORDS
        .iter()
        .enumerate()
        .filter_map(|(rank, (goal, keywords))| {
            keywords
                .iter()
                .filter_map(|k| normalized.phrase_position(k))
                .min()
                .map(|pos| (pos, rank, *goal))
        })
        .collect();
    hits.sort();
    hits.into_iter().map(|(_, _, goal)| goal).collect()
}

/// Distinct goals for one turn: `goal:` values first, then the whole turn
pub fn extract(normalized: &Normalized, segmented: &Segmented) -> Vec<Goal> {
    let mut found: Vec<Goal> = Vec::new();

    let directed = segmented.values(DirectiveKey::Goal).flat_map(|v| scan(&normalize(v)));
    for goal in directed.chain(scan(normalized)) {
        if !found.contains(&goal) {
            found.push(goal);
        }
    }

    debug!(?found, "goal::extract: done");
    found
}
