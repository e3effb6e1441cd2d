//! Explicit industry and audience directives, and leftover text

use tracing::debug;

use super::clauses::{DirectiveKey, Segmented};

/// Explicit `industry:` and `audience:` values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplicitFields {
    pub industry: Option<String>,
    pub target_audience: Option<String>,
}

/// Read explicit industry/audience directives from a segmented turn
pub fn explicit(segmented: &Segmented) -> ExplicitFields {
    let fields = ExplicitFields {
        industry: segmented.first(DirectiveKey::Industry).map(String::from),
        target_audience: segmented.first(DirectiveKey::Audience).map(String::from),
    };
    debug!(?fields, "fields::explicit: done");
    fields
}

/// Join the fragments no extractor consumed into one leftover string
pub fn leftover<'a>(unconsumed: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let parts: Vec<&str> = unconsumed.into_iter().map(str::trim).filter(|s| !s.is_empty()).collect();
    if parts.is_empty() { None } else { Some(parts.join(". ")) }
}
