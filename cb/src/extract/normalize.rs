//! Text normalization shared by every field extractor
//!
//! Keywords are matched against whole tokens so that a short keyword such as
//! `ig` never fires inside a longer word such as `big`.

use tracing::debug;

/// A turn prepared for keyword matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Trimmed, lower-cased text
    pub lowered: String,

    /// Lower-cased alphanumeric tokens, empty tokens dropped
    pub tokens: Vec<String>,
}

impl Normalized {
    /// Token index where `phrase` first starts, if it occurs
    ///
    /// The phrase is tokenized the same way as the text, so `"linked in"`
    /// matches `Linked   In` and `can't` matches `can’t`.
    pub fn phrase_position(&self, phrase: &str) -> Option<usize> {
        let needle = tokenize(phrase);
        if needle.is_empty() || needle.len() > self.tokens.len() {
            return None;
        }
        self.tokens
            .windows(needle.len())
            .position(|window| window.iter().zip(&needle).all(|(a, b)| a == b))
    }

    /// True when `phrase` occurs as a run of whole tokens
    pub fn has_phrase(&self, phrase: &str) -> bool {
        self.phrase_position(phrase).is_some()
    }

    /// True when every token is in `words`, in order
    pub fn is_exactly(&self, words: &[&str]) -> bool {
        self.tokens.len() == words.len() && self.tokens.iter().zip(words).all(|(a, b)| a == b)
    }
}

/// Normalize raw turn text
pub fn normalize(text: &str) -> Normalized {
    debug!(text_len = text.len(), "normalize: called");
    Normalized {
        lowered: text.trim().to_lowercase(),
        tokens: tokenize(text),
    }
}

/// Split on any run of non-alphanumeric characters, lower-cased
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect()
}
