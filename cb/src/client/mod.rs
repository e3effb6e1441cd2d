//! Plan generation client
//!
//! The plan service is the one external collaborator: it receives a read-only
//! request built from a ready draft and returns a plan or a categorised error.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod http;
mod types;

pub use client::PlanClient;
pub use error::{ErrorCategory, PlanError};
pub use http::{CORRELATION_HEADER, HttpPlanClient};
pub use types::{ApiErrorResponse, FieldViolation, GeneratePlanRequest, PlanResponse};

use crate::config::ApiConfig;

/// Create the HTTP plan client from configuration
pub fn create_client(config: &ApiConfig) -> Result<Arc<dyn PlanClient>, PlanError> {
    debug!(url = %config.plan_url(), "create_client: called");
    Ok(Arc::new(HttpPlanClient::from_config(config)?))
}
