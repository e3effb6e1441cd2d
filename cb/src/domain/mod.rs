//! Domain types for the campaign brief engine
//!
//! Core types: Draft (the accumulating brief), DraftPatch (one turn's
//! updates) and the transcript Message.

mod draft;
mod message;

pub use draft::{DEFAULT_TONE, Draft, DraftPatch, Goal, Limits, Platform};
pub use message::{Message, MessageId, Role};
