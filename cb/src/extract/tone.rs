//! Tone extraction

use tracing::debug;

use super::clauses::{DirectiveKey, Segmented};
use super::normalize::Normalized;

/// Tone labels with their trigger words; the first matching row wins
pub const TONE_KEYWORDS: &[(&str, &[&str])] = &[
    ("Professional", &["professional", "formal", "corporate", "serious"]),
    ("Friendly", &["friendly", "warm", "approachable", "casual"]),
    ("Bold", &["bold", "confident", "direct"]),
    ("Playful", &["playful", "fun", "humor", "humour", "witty"]),
    ("Educational", &["educational", "teach", "explain", "how to", "informative"]),
];

/// Whole-turn replies that decline the tone question
const SKIP_REPLIES: &[&[&str]] = &[&["skip"], &["skip", "tone"], &["no", "tone"]];

/// True when the entire turn is a skip shortcut such as `skip` or `no tone`
pub fn is_skip(normalized: &Normalized) -> bool {
    SKIP_REPLIES.iter().any(|reply| normalized.is_exactly(reply))
}

/// Tone for one turn: an explicit `tone:` value verbatim, else the keyword table
pub fn extract(normalized: &Normalized, segmented: &Segmented) -> Option<String> {
    if let Some(value) = segmented.first(DirectiveKey::Tone) {
        debug!(%value, "tone::extract: explicit directive");
        return Some(value.to_string());
    }

    TONE_KEYWORDS
        .iter()
        .find(|(_, triggers)| triggers.iter().any(|t| normalized.has_phrase(t)))
        .map(|(label, _)| {
            debug!(%label, "tone::extract: keyword match");
            label.to_string()
        })
}
