//! Async conversation driver
//!
//! Owns the current `Session` snapshot and the plan client. Each user turn is
//! processed to completion, including any plan generation it triggers, before
//! the next one is accepted.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use eyre::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::client::{GeneratePlanRequest, PlanClient, PlanResponse};
use crate::domain::{Draft, Message};
use crate::questions::{Question, Readiness};
use crate::session::{Session, SessionError};

/// What one call produced
#[derive(Debug, Clone)]
pub struct Exchange {
    /// Assistant messages appended by this call, in order
    pub replies: Vec<Message>,
    pub readiness: Readiness,
    pub next_question: Option<Question>,
    pub plan: Option<PlanResponse>,
    pub saved_to: Option<PathBuf>,
}

/// A session bound to a plan client
pub struct Conversation {
    session: Session,
    client: Arc<dyn PlanClient>,
    plans_dir: Option<PathBuf>,
}

impl Conversation {
    pub fn new(session: Session, client: Arc<dyn PlanClient>) -> Self {
        debug!("Conversation::new: called");
        Self {
            session,
            client,
            plans_dir: None,
        }
    }

    /// Save each generated plan under `dir`
    pub fn with_plans_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.plans_dir = Some(dir.into());
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Process one user turn, generating a plan when it completes the brief
    pub async fn send(&mut self, text: &str) -> Result<Exchange, SessionError> {
        debug!(text_len = text.len(), "Conversation::send: called");
        let start = self.session.messages().len();
        let outcome = self.session.submit_turn(text)?;
        self.session = outcome.session;

        let (plan, saved_to) = match outcome.submission {
            Some(request) => self.run_generation(request).await,
            None => (None, None),
        };

        Ok(self.exchange(start, plan, saved_to))
    }

    /// Generate on demand for a ready draft
    pub async fn generate(&mut self) -> Result<Exchange, SessionError> {
        debug!("Conversation::generate: called");
        let start = self.session.messages().len();
        let (session, request) = self.session.request_generation()?;
        self.session = session;
        let (plan, saved_to) = self.run_generation(request).await;
        Ok(self.exchange(start, plan, saved_to))
    }

    /// Start over with an empty draft
    pub fn reset(&mut self) {
        debug!("Conversation::reset: called");
        self.session = self.session.reset();
    }

    async fn run_generation(&mut self, request: GeneratePlanRequest) -> (Option<PlanResponse>, Option<PathBuf>) {
        let result = self.client.generate(request).await;
        self.session = self.session.complete_generation(&result);

        let plan = match result {
            Ok(plan) => plan,
            Err(_) => return (None, None),
        };

        let saved_to = match &self.plans_dir {
            Some(dir) => match save_plan(dir, self.session.draft(), &plan) {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!(error = %e, "run_generation: failed to save plan");
                    None
                }
            },
            None => None,
        };
        (Some(plan), saved_to)
    }

    fn exchange(&self, start: usize, plan: Option<PlanResponse>, saved_to: Option<PathBuf>) -> Exchange {
        Exchange {
            replies: self
                .session
                .messages()
                .iter()
                .skip(start)
                .filter(|m| m.role == crate::domain::Role::Assistant)
                .cloned()
                .collect(),
            readiness: self.session.readiness(),
            next_question: self.session.next_question(),
            plan,
            saved_to,
        }
    }
}

/// On-disk record of one generated plan
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SavedPlan<'a> {
    saved_at: DateTime<Utc>,
    brief: &'a Draft,
    plan: &'a PlanResponse,
}

/// Write a plan as pretty JSON to `<dir>/<timestamp>-<industry-slug>.json`
pub fn save_plan(dir: &Path, draft: &Draft, plan: &PlanResponse) -> Result<PathBuf> {
    debug!(dir = %dir.display(), "save_plan: called");
    std::fs::create_dir_all(dir).context("Failed to create plans directory")?;

    let now = Utc::now();
    let slug = slugify(draft.industry.as_deref().unwrap_or("plan"));
    let slug = if slug.is_empty() { "plan".to_string() } else { slug };
    let filename = format!("{}-{}.json", now.format("%Y%m%d-%H%M%S"), slug);
    let file_path = dir.join(filename);

    let record = SavedPlan {
        saved_at: now,
        brief: draft,
        plan,
    };
    let content = serde_json::to_string_pretty(&record).context("Failed to serialize plan")?;
    std::fs::write(&file_path, content).context("Failed to write plan file")?;

    info!(path = %file_path.display(), "save_plan: written");
    Ok(file_path)
}

fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(50)
        .collect()
}
