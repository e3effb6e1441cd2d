//! Platform extraction

use std::collections::BTreeSet;

use tracing::debug;

use super::clauses::{DirectiveKey, Segmented};
use super::normalize::normalize;
use crate::domain::Platform;

/// Whole-token or whole-phrase triggers per platform
pub const PLATFORM_RULES: &[(Platform, &[&str])] = &[
    (Platform::Linkedin, &["linkedin", "linked in"]),
    (Platform::Instagram, &["instagram", "ig", "insta"]),
    (Platform::Tiktok, &["tiktok", "tik tok", "tt"]),
];

/// Platforms mentioned anywhere in `text`
pub fn detect(text: &str) -> BTreeSet<Platform> {
    let normalized = normalize(text);
    PLATFORM_RULES
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|t| normalized.has_phrase(t)))
        .map(|(platform, _)| *platform)
        .collect()
}

/// Platforms for one turn: the free-text pass unioned with any `platforms:` values
pub fn extract(text: &str, segmented: &Segmented) -> BTreeSet<Platform> {
    let mut found = detect(text);
    for value in segmented.values(DirectiveKey::Platforms) {
        found.extend(detect(value));
    }
    debug!(?found, "platform::extract: done");
    found
}
