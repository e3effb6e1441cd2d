//! Weekly resource count extraction
//!
//! Three patterns are tried in precedence order; the first that matches
//! wins. Every parsed number is clamped into the configured bounds.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::Limits;

/// One resource-count pattern; group 1 captures the number
pub struct ResourcePattern {
    pub name: &'static str,
    pub regex: Regex,
}

/// Patterns in precedence order
pub static RESOURCE_PATTERNS: LazyLock<Vec<ResourcePattern>> = LazyLock::new(|| {
    // Static literal patterns; compilation cannot fail.
    #[allow(clippy::expect_used)]
    let build = |name: &'static str, pattern: &str| ResourcePattern {
        name,
        regex: Regex::new(pattern).expect("resource pattern"),
    };
    vec![
        // "resources per week: 5", "posts/week = 5"
        build(
            "directive",
            r"\b(?:resources?|posts?|pieces?|content)\s*(?:per\s*week|/\s*week)\s*[:=]?\s*(\d+)\b",
        ),
        // "5 posts a week", "5 pieces per week"
        build(
            "trailing-unit",
            r"\b(\d+)\s*(?:content\s+)?(?:posts?|pieces?|content|resources?)(?:\s+of\s+content)?\s*(?:a\s*week|per\s*week|/\s*week|weekly)\b",
        ),
        // "5 per week", "5x/week", "5 weekly"
        build(
            "generic",
            r"\b(\d+)\s*(?:x|times)?\s*(?:per\s*week|/\s*week|a\s*week|weekly)\b",
        ),
    ]
});

static NUMERIC_ONLY_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^\s*(\d+)\s*$").expect("numeric-only regex")
});

/// Parse digits, saturating instead of failing on overflow
fn parse_count(digits: &str) -> u64 {
    digits.parse::<u64>().unwrap_or(u64::MAX)
}

/// Weekly count stated in `lowered`, clamped into `limits`
pub fn extract(lowered: &str, limits: &Limits) -> Option<u32> {
    for pattern in RESOURCE_PATTERNS.iter() {
        if let Some(digits) = pattern.regex.captures(lowered).and_then(|c| c.get(1)) {
            let value = limits.clamp_resources(parse_count(digits.as_str()));
            debug!(pattern = pattern.name, value, "resources::extract: matched");
            return Some(value);
        }
    }
    None
}

/// The bare integer when the whole turn is a single integer literal
pub fn numeric_only(text: &str) -> Option<u64> {
    NUMERIC_ONLY_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| parse_count(m.as_str()))
}
