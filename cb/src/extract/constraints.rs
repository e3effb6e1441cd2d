//! Constraint extraction

use tracing::debug;

use super::clauses::{DirectiveKey, Segmented};
use super::normalize::Normalized;

/// Phrases that mark a turn as stating a restriction
pub const NEGATIVE_SIGNALS: &[&str] = &[
    "avoid", "no", "can't", "cannot", "do not", "dont", "don't", "must not", "without",
];

/// True when `normalized` contains any negative-signal phrase
pub fn has_negative_signal(normalized: &Normalized) -> bool {
    NEGATIVE_SIGNALS.iter().any(|s| normalized.has_phrase(s))
}

/// Constraints for one turn
///
/// `constraints:` values are split on commas. Without such a directive, a turn
/// carrying a negative signal is kept whole as a single constraint.
pub fn extract(raw: &str, normalized: &Normalized, segmented: &Segmented) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    if segmented.has(DirectiveKey::Constraints) {
        for value in segmented.values(DirectiveKey::Constraints) {
            for item in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                if !found.iter().any(|f| f == item) {
                    found.push(item.to_string());
                }
            }
        }
    } else if has_negative_signal(normalized) {
        found.push(raw.trim().to_string());
    }

    debug!(count = found.len(), "constraints::extract: done");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::clauses::segment;
    use crate::extract::normalize::normalize;

    fn run(text: &str) -> Vec<String> {
        extract(text, &normalize(text), &segment(text))
    }

    #[test]
    fn test_directive_split_on_commas() {
        assert_eq!(
            run("Constraints: no paid ads, weekdays only, , no paid ads"),
            vec!["no paid ads", "weekdays only"]
        );
    }

    #[test]
    fn test_negative_signal_keeps_whole_turn() {
        assert_eq!(run("  Avoid memes please "), vec!["Avoid memes please"]);
        assert_eq!(run("We can't film video"), vec!["We can't film video"]);
        assert_eq!(run("do not mention pricing"), vec!["do not mention pricing"]);
    }

    #[test]
    fn test_no_signal_inside_words() {
        // "piano " must not count as "no "
        assert!(run("piano lessons for kids").is_empty());
        assert!(run("know your audience").is_empty());
    }

    #[test]
    fn test_directive_suppresses_whole_turn_capture() {
        assert_eq!(run("Constraints: avoid memes"), vec!["avoid memes"]);
    }
}
