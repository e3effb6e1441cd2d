//! Clause segmentation and directive scanning
//!
//! A turn is split into clauses at sentence ends, semicolons and line breaks.
//! A directive (`audience: clinic owners`) owns the text up to the next
//! directive in the same clause or the clause end, so several directives can
//! share one message. Text outside any directive is kept as fragments for the
//! leftover assigner.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Clause boundaries: sentence punctuation followed by space or end, `;`, newlines
static CLAUSE_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Static literal pattern; compilation cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"[.!?]+(?:\s+|$)|[;\r\n]+").expect("clause split regex")
});

/// `key:` / `key =` markers, longest keys first so `primary goal` wins over `goal`
static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(
        r"(?i)\b(primary\s+goal|target\s+audience|industry|audience|goals?|platforms?|tone|constraints?)\s*[:=]",
    )
    .expect("directive regex")
});

/// Field named by an explicit directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKey {
    Industry,
    Audience,
    Goal,
    Platforms,
    Tone,
    Constraints,
}

impl DirectiveKey {
    fn from_keyword(keyword: &str) -> Option<Self> {
        let words = keyword.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        match words.as_str() {
            "industry" => Some(Self::Industry),
            "audience" | "target audience" => Some(Self::Audience),
            "goal" | "goals" | "primary goal" => Some(Self::Goal),
            "platform" | "platforms" => Some(Self::Platforms),
            "tone" => Some(Self::Tone),
            "constraint" | "constraints" => Some(Self::Constraints),
            _ => None,
        }
    }
}

/// One `key: value` directive found in a turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub key: DirectiveKey,
    /// Value with original letter case, trimmed
    pub value: String,
}

/// A turn split into directives and free-text fragments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmented {
    pub directives: Vec<Directive>,
    pub fragments: Vec<String>,
}

impl Segmented {
    /// First non-empty value for `key`
    pub fn first(&self, key: DirectiveKey) -> Option<&str> {
        self.values(key).next()
    }

    /// All non-empty values for `key`, in text order
    pub fn values(&self, key: DirectiveKey) -> impl Iterator<Item = &str> {
        self.directives
            .iter()
            .filter(move |d| d.key == key && !d.value.is_empty())
            .map(|d| d.value.as_str())
    }

    /// True when the turn carried a directive for `key`, even an empty one
    pub fn has(&self, key: DirectiveKey) -> bool {
        self.directives.iter().any(|d| d.key == key)
    }
}

/// Split raw turn text into clauses
pub fn clauses(text: &str) -> Vec<&str> {
    CLAUSE_SPLIT_RE
        .split(text)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect()
}

/// Segment a turn into directives and fragments
pub fn segment(text: &str) -> Segmented {
    debug!(text_len = text.len(), "segment: called");
    let mut segmented = Segmented::default();

    for clause in clauses(text) {
        let markers: Vec<_> = DIRECTIVE_RE.captures_iter(clause).collect();

        if markers.is_empty() {
            push_fragment(&mut segmented.fragments, clause);
            continue;
        }

        if let Some(first) = markers.first().and_then(|c| c.get(0)) {
            push_fragment(&mut segmented.fragments, &clause[..first.start()]);
        }

        for (i, caps) in markers.iter().enumerate() {
            let (Some(whole), Some(keyword)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let end = markers
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(clause.len());

            let Some(key) = DirectiveKey::from_keyword(keyword.as_str()) else {
                continue;
            };
            let value = trim_value(&clause[whole.end()..end]);
            debug!(?key, %value, "segment: directive");
            segmented.directives.push(Directive {
                key,
                value: value.to_string(),
            });
        }
    }

    segmented
}

fn push_fragment(fragments: &mut Vec<String>, text: &str) {
    let fragment = trim_value(text);
    if !fragment.is_empty() {
        fragments.push(fragment.to_string());
    }
}

fn trim_value(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':' | '-'))
}
