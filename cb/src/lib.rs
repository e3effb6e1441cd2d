//! Campaignbrief - slot-filling chat engine for campaign briefs
//!
//! Turns free-form chat messages into a structured brief, asks only for what
//! is still missing, and hands the completed brief to a plan service.
//!
//! # Core Concepts
//!
//! - **Extraction is total**: a turn with nothing recognisable is a no-op, never an error
//! - **Pure reducer**: `(draft, turn) -> draft`, with no hidden state
//! - **Immutable sessions**: every turn yields a new `Session` snapshot
//! - **One call in flight**: turns are refused while a plan is being generated
//!
//! # Modules
//!
//! - [`extract`] - Rule tables and per-field extractors
//! - [`merge`] - Draft merging, numeric disambiguation, leftover assignment
//! - [`questions`] - Readiness and next-question selection
//! - [`session`] - Transcript, draft and loading state
//! - [`client`] - Plan service client and error categories
//! - [`conversation`] - Async driver binding a session to a client
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod client;
pub mod config;
pub mod conversation;
pub mod domain;
pub mod extract;
pub mod merge;
pub mod questions;
pub mod repl;
pub mod session;

// Re-export commonly used types
pub use client::{ErrorCategory, GeneratePlanRequest, HttpPlanClient, PlanClient, PlanError, PlanResponse, create_client};
pub use config::Config;
pub use conversation::{Conversation, Exchange, save_plan};
pub use domain::{DEFAULT_TONE, Draft, DraftPatch, Goal, Limits, Message, MessageId, Platform, Role};
pub use extract::{TurnExtraction, extract_turn};
pub use merge::{apply_turn, merge};
pub use questions::{Question, Readiness, missing_fields, next_question, readiness};
pub use session::{LastError, Session, SessionError, SessionOptions, TurnOutcome};
