//! Completeness oracle and question selector
//!
//! A fixed-priority checklist over the draft. The first unmet item is the
//! next question to ask; tone is optional and never blocks readiness.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::domain::Draft;

/// One item on the checklist, in asking order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Question {
    Industry,
    Audience,
    PrimaryGoal,
    Platforms,
    Resources,
    Tone,
}

impl Question {
    /// Canonical prompt shown to the user
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Industry => "What industry are you in? (e.g. \"B2B SaaS for dentists\")",
            Self::Audience => "Who is your target audience? (be specific)",
            Self::PrimaryGoal => {
                "What's the primary goal? (LEADS / AWARENESS / SALES / COMMUNITY) You can also say it in plain English."
            }
            Self::Platforms => "Which platforms do you want to focus on? (LinkedIn, Instagram, TikTok)",
            Self::Resources => "How many content pieces can you ship per week? (e.g. \"5/week\")",
            Self::Tone => {
                "Optional: What tone should we use? (professional, friendly, bold, playful, educational) Or say \"skip\"."
            }
        }
    }

    /// Whether an answer is needed before a plan can be generated
    pub fn is_required(&self) -> bool {
        !matches!(self, Self::Tone)
    }

    /// Field label used in summaries and logs
    pub fn field(&self) -> &'static str {
        match self {
            Self::Industry => "industry",
            Self::Audience => "targetAudience",
            Self::PrimaryGoal => "primaryGoal",
            Self::Platforms => "platforms",
            Self::Resources => "resourcesPerWeek",
            Self::Tone => "tone",
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prompt())
    }
}

/// Whether the draft holds every required field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    Incomplete,
    Ready,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

type Check = fn(&Draft) -> bool;

const CHECKLIST: &[(Question, Check)] = &[
    (Question::Industry, |d| d.industry.is_some()),
    (Question::Audience, |d| d.target_audience.is_some()),
    (Question::PrimaryGoal, |d| d.primary_goal.is_some()),
    (Question::Platforms, |d| !d.platforms.is_empty()),
    (Question::Resources, |d| d.resources_per_week.is_some()),
    (Question::Tone, |d| d.tone.is_some()),
];

/// Unmet checklist items in asking order, tone included
pub fn missing_fields(draft: &Draft) -> Vec<Question> {
    CHECKLIST
        .iter()
        .filter(|(_, satisfied)| !satisfied(draft))
        .map(|(question, _)| *question)
        .collect()
}

/// Ready when no required item is missing
pub fn readiness(draft: &Draft) -> Readiness {
    let ready = missing_fields(draft).iter().all(|q| !q.is_required());
    debug!(ready, "readiness: called");
    if ready { Readiness::Ready } else { Readiness::Incomplete }
}

/// First unmet item, or none when everything including tone is set
pub fn next_question(draft: &Draft) -> Option<Question> {
    let next = missing_fields(draft).into_iter().next();
    debug!(?next, "next_question: called");
    next
}
