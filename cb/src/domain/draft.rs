//! Campaign brief draft
//!
//! The draft is the structured brief accumulated across chat turns. Scalar
//! fields are replaced only by a new explicit value; set and sequence fields
//! grow by union.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tone sentinel recorded when the user explicitly skips the tone question
pub const DEFAULT_TONE: &str = "Default";

/// Marketing goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Goal {
    Awareness,
    Leads,
    Sales,
    Community,
}

impl Goal {
    /// Upper-case wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Awareness => "AWARENESS",
            Self::Leads => "LEADS",
            Self::Sales => "SALES",
            Self::Community => "COMMUNITY",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Social platform a campaign can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    Linkedin,
    Instagram,
    Tiktok,
}

impl Platform {
    /// Upper-case wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linkedin => "LINKEDIN",
            Self::Instagram => "INSTAGRAM",
            Self::Tiktok => "TIKTOK",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bounds applied while extracting and merging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Lowest accepted resources-per-week value
    pub resources_min: u32,

    /// Highest accepted resources-per-week value
    pub resources_max: u32,

    /// Maximum number of secondary goals kept
    pub max_secondary_goals: usize,

    /// Maximum number of constraints kept (oldest first)
    pub max_constraints: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            resources_min: 1,
            resources_max: 100,
            max_secondary_goals: 5,
            max_constraints: 20,
        }
    }
}

impl Limits {
    /// Clamp a parsed weekly count into the accepted range
    pub fn clamp_resources(&self, value: u64) -> u32 {
        let clamped = value
            .max(u64::from(self.resources_min))
            .min(u64::from(self.resources_max));
        debug!(value, clamped, "Limits::clamp_resources: called");
        // min() against a u32 bound keeps this in range
        u32::try_from(clamped).unwrap_or(self.resources_max)
    }
}

/// The accumulating campaign brief
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub industry: Option<String>,
    pub target_audience: Option<String>,
    pub primary_goal: Option<Goal>,
    #[serde(default)]
    pub secondary_goals: Vec<Goal>,
    #[serde(default)]
    pub platforms: BTreeSet<Platform>,
    pub resources_per_week: Option<u32>,
    pub tone: Option<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
}

impl Draft {
    /// Tone to send downstream; the skip sentinel maps to none
    pub fn requested_tone(&self) -> Option<&str> {
        self.tone.as_deref().filter(|t| *t != DEFAULT_TONE)
    }

    /// Human-readable summary of everything captured so far
    pub fn summary(&self) -> String {
        debug!("Draft::summary: called");
        let platforms = self.platforms.iter().map(Platform::as_str).collect::<Vec<_>>().join(", ");
        let secondary = self.secondary_goals.iter().map(Goal::as_str).collect::<Vec<_>>().join(", ");
        let constraints = self
            .constraints
            .iter()
            .take(5)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" | ");

        let mut lines = vec![
            format!("Industry: {}", self.industry.as_deref().unwrap_or("-")),
            format!("Target audience: {}", self.target_audience.as_deref().unwrap_or("-")),
            format!(
                "Primary goal: {}",
                self.primary_goal.map(|g| g.as_str()).unwrap_or("-")
            ),
        ];
        if !secondary.is_empty() {
            lines.push(format!("Secondary goals: {}", secondary));
        }
        lines.push(format!(
            "Platforms: {}",
            if platforms.is_empty() { "-" } else { platforms.as_str() }
        ));
        lines.push(format!(
            "Resources/week: {}",
            self.resources_per_week
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string())
        ));
        if let Some(tone) = &self.tone {
            lines.push(format!("Tone: {}", tone));
        }
        if !constraints.is_empty() {
            lines.push(format!("Constraints: {}", constraints));
        }

        lines.join("\n")
    }
}

/// Partial field updates produced by one turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_goal: Option<Goal>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secondary_goals: Vec<Goal>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub platforms: BTreeSet<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources_per_week: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<String>,
}

impl DraftPatch {
    /// True when the turn produced no field updates at all
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
