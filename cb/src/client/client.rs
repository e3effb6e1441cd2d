//! PlanClient trait definition

use async_trait::async_trait;

use super::{GeneratePlanRequest, PlanError, PlanResponse};

/// Collaborator that turns a completed brief into a plan
///
/// Each call is independent; implementations never retry.
#[async_trait]
pub trait PlanClient: Send + Sync {
    /// Generate a plan for the given request
    async fn generate(&self, request: GeneratePlanRequest) -> Result<PlanResponse, PlanError>;
}
