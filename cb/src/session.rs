//! Chat session as immutable snapshots
//!
//! Every operation returns a new `Session`; the value it was called on is
//! left untouched. A session owns its transcript and draft exclusively. The
//! plan service only ever sees a `GeneratePlanRequest` built from a copy.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::client::{ErrorCategory, GeneratePlanRequest, PlanError, PlanResponse};
use crate::config::EngineConfig;
use crate::domain::{Draft, Limits, Message, MessageId};
use crate::merge::apply_turn;
use crate::questions::{self, Question, Readiness};

pub const GREETING: &str = "Hey! Describe your business in one message (industry, audience, goal, platforms, posts/week). I'll pick it up and ask only what's missing.";
pub const OPENING_QUESTION: &str = "Let's start: what industry are you in?";
pub const GENERATING_NOTICE: &str = "Generating your plan now...";
pub const PLAN_READY_NOTICE: &str = "Done. Your plan is ready.";
const FALLBACK_PROMPT: &str = "Tell me a bit more.";

/// Reasons a session operation is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("A plan is being generated; wait for it to finish")]
    Busy,

    #[error("Empty message ignored")]
    EmptyTurn,

    #[error("The brief is missing: {}", .missing.join(", "))]
    NotReady { missing: Vec<&'static str> },
}

/// Per-session behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub limits: Limits,

    /// Hand the draft off as soon as it becomes ready
    pub auto_submit: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            auto_submit: true,
        }
    }
}

impl From<&EngineConfig> for SessionOptions {
    fn from(config: &EngineConfig) -> Self {
        Self {
            limits: config.limits(),
            auto_submit: config.auto_submit,
        }
    }
}

/// The most recent generation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastError {
    pub category: ErrorCategory,
    pub message: String,
}

/// Result of one user turn
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub session: Session,
    pub readiness: Readiness,
    pub next_question: Option<Question>,

    /// Request to send when this turn triggered a hand-off
    pub submission: Option<GeneratePlanRequest>,
}

/// Transcript, draft and hand-off state for one conversation
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    options: SessionOptions,
    messages: Vec<Message>,
    draft: Draft,
    loading: bool,
    last_error: Option<LastError>,
    next_id: u64,
}

impl Session {
    /// Fresh session seeded with the greeting
    pub fn new(options: SessionOptions) -> Self {
        debug!(?options, "Session::new: called");
        let mut session = Self {
            options,
            messages: Vec::new(),
            draft: Draft::default(),
            loading: false,
            last_error: None,
            next_id: 1,
        };
        session.say(GREETING);
        session.say(OPENING_QUESTION);
        session
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&LastError> {
        self.last_error.as_ref()
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn readiness(&self) -> Readiness {
        questions::readiness(&self.draft)
    }

    pub fn next_question(&self) -> Option<Question> {
        questions::next_question(&self.draft)
    }

    /// Process one user turn
    pub fn submit_turn(&self, text: &str) -> Result<TurnOutcome, SessionError> {
        debug!(text_len = text.len(), loading = self.loading, "submit_turn: called");
        if self.loading {
            debug!("submit_turn: refused, generation outstanding");
            return Err(SessionError::Busy);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyTurn);
        }

        let mut next = self.clone();
        next.last_error = None;
        let id = next.allocate_id();
        next.record(Message::user(id, text));
        next.draft = apply_turn(&self.draft, text, &self.options.limits);

        let readiness = questions::readiness(&next.draft);
        let next_question = questions::next_question(&next.draft);
        let mut submission = None;

        if !readiness.is_ready() {
            next.say(next_question.map_or(FALLBACK_PROMPT, |q| q.prompt()));
        } else {
            if next.draft.tone.is_none() {
                next.say(Question::Tone.prompt());
            }
            if self.options.auto_submit {
                submission = next.hand_off();
            }
        }

        debug!(?readiness, ?next_question, submitted = submission.is_some(), "submit_turn: done");
        Ok(TurnOutcome {
            session: next,
            readiness,
            next_question,
            submission,
        })
    }

    /// Hand a ready draft off on demand
    pub fn request_generation(&self) -> Result<(Session, GeneratePlanRequest), SessionError> {
        debug!("request_generation: called");
        if self.loading {
            return Err(SessionError::Busy);
        }
        let mut next = self.clone();
        next.last_error = None;
        match next.hand_off() {
            Some(request) => Ok((next, request)),
            None => {
                let missing = questions::missing_fields(&self.draft)
                    .into_iter()
                    .filter(Question::is_required)
                    .map(|q| q.field())
                    .collect();
                Err(SessionError::NotReady { missing })
            }
        }
    }

    /// Record the outcome of an outstanding generation call
    pub fn complete_generation(&self, result: &Result<PlanResponse, PlanError>) -> Session {
        debug!(ok = result.is_ok(), "complete_generation: called");
        let mut next = self.clone();
        next.loading = false;
        match result {
            Ok(_) => {
                info!("complete_generation: plan ready");
                next.last_error = None;
                next.say(PLAN_READY_NOTICE);
            }
            Err(e) => {
                let category = e.category();
                let message = e.user_message();
                warn!(%category, error = %e, "complete_generation: generation failed");
                next.say(format!("Warning: {}", message));
                next.last_error = Some(LastError { category, message });
            }
        }
        next
    }

    /// Back to the initial greeting with an empty draft
    pub fn reset(&self) -> Session {
        debug!("reset: called");
        Session::new(self.options)
    }

    /// Summarise the draft, flag loading and build the request
    fn hand_off(&mut self) -> Option<GeneratePlanRequest> {
        let request = GeneratePlanRequest::from_draft(&self.draft)?;
        let summary = format!("Perfect. Here's what I understood:\n\n{}", self.draft.summary());
        self.say(summary);
        self.say(GENERATING_NOTICE);
        self.loading = true;
        info!(industry = %request.industry, "hand_off: draft submitted");
        Some(request)
    }

    fn allocate_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        id
    }

    fn say(&mut self, text: impl Into<String>) {
        let id = self.allocate_id();
        self.record(Message::assistant(id, text));
    }

    fn record(&mut self, message: Message) {
        self.messages.push(message);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}
