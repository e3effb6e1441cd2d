//! Plan service request/response types
//!
//! These model the JSON the marketing plan endpoint accepts and returns.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Draft, Goal, Platform};

/// Body of a plan generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanRequest {
    pub industry: String,
    pub target_audience: String,
    pub primary_goal: Goal,
    pub secondary_goals: Vec<Goal>,
    pub platforms: Vec<Platform>,
    pub resources_per_week: u32,
    /// Absent when the user skipped the tone question
    pub tone: Option<String>,
    pub constraints: Vec<String>,
}

impl GeneratePlanRequest {
    /// Build a request from a draft, or none when a required field is missing
    pub fn from_draft(draft: &Draft) -> Option<Self> {
        debug!("GeneratePlanRequest::from_draft: called");
        if draft.platforms.is_empty() {
            debug!("GeneratePlanRequest::from_draft: no platforms");
            return None;
        }
        Some(Self {
            industry: draft.industry.clone()?,
            target_audience: draft.target_audience.clone()?,
            primary_goal: draft.primary_goal?,
            secondary_goals: draft.secondary_goals.clone(),
            platforms: draft.platforms.iter().copied().collect(),
            resources_per_week: draft.resources_per_week?,
            tone: draft.requested_tone().map(str::to_string),
            constraints: draft.constraints.clone(),
        })
    }
}

/// A generated plan
///
/// Only the headline fields are typed; the rest of the payload is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,

    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

/// One rejected field in an error body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    pub field: Option<String>,
    pub message: Option<String>,
}

/// Error body returned by the plan service
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiErrorResponse {
    pub status: Option<u16>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub path: Option<String>,
    pub correlation_id: Option<String>,
    pub timestamp: Option<String>,
    pub violations: Option<Vec<FieldViolation>>,
}

impl ApiErrorResponse {
    /// Message with field violations appended
    pub fn describe(&self) -> String {
        let mut out = self.message.clone().unwrap_or_default();
        for v in self.violations.iter().flatten() {
            let field = v.field.as_deref().unwrap_or("?");
            let message = v.message.as_deref().unwrap_or("invalid");
            if !out.is_empty() {
                out.push_str("; ");
            }
            out.push_str(&format!("{}: {}", field, message));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_TONE;

    fn ready_draft() -> Draft {
        let mut draft = Draft {
            industry: Some("B2B SaaS for dentists".to_string()),
            target_audience: Some("clinic owners".to_string()),
            primary_goal: Some(Goal::Leads),
            resources_per_week: Some(5),
            ..Default::default()
        };
        draft.platforms.insert(Platform::Instagram);
        draft.platforms.insert(Platform::Linkedin);
        draft
    }

    #[test]
    fn test_from_draft_requires_fields() {
        assert!(GeneratePlanRequest::from_draft(&Draft::default()).is_none());

        let mut draft = ready_draft();
        draft.platforms.clear();
        assert!(GeneratePlanRequest::from_draft(&draft).is_none());
    }

    #[test]
    fn test_request_json_shape() {
        let request = GeneratePlanRequest::from_draft(&ready_draft()).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["industry"], "B2B SaaS for dentists");
        assert_eq!(json["targetAudience"], "clinic owners");
        assert_eq!(json["primaryGoal"], "LEADS");
        assert_eq!(json["platforms"], serde_json::json!(["LINKEDIN", "INSTAGRAM"]));
        assert_eq!(json["resourcesPerWeek"], 5);
        assert!(json["tone"].is_null());
        assert_eq!(json["secondaryGoals"], serde_json::json!([]));
    }

    #[test]
    fn test_default_tone_sent_as_null() {
        let mut draft = ready_draft();
        draft.tone = Some(DEFAULT_TONE.to_string());
        let request = GeneratePlanRequest::from_draft(&draft).unwrap();
        assert_eq!(request.tone, None);

        draft.tone = Some("Playful".to_string());
        let request = GeneratePlanRequest::from_draft(&draft).unwrap();
        assert_eq!(request.tone.as_deref(), Some("Playful"));
    }

    #[test]
    fn test_plan_response_keeps_unknown_fields() {
        let json = r#"{
            "summary": "Focus on LinkedIn thought leadership",
            "generatedAt": "2026-01-01T00:00:00Z",
            "platformPlans": [{"platform": "LINKEDIN", "frequencyPerWeek": 3}],
            "planPeriodWeeks": 4
        }"#;
        let plan: PlanResponse = serde_json::from_str(json).unwrap();
        assert_eq!(plan.summary.as_deref(), Some("Focus on LinkedIn thought leadership"));
        assert_eq!(plan.generated_at.as_deref(), Some("2026-01-01T00:00:00Z"));
        assert_eq!(plan.rest["planPeriodWeeks"], 4);
        assert!(plan.rest.contains_key("platformPlans"));

        let back = serde_json::to_value(&plan).unwrap();
        assert_eq!(back["platformPlans"][0]["platform"], "LINKEDIN");
    }

    #[test]
    fn test_api_error_describe() {
        let json = r#"{
            "status": 400,
            "code": "VALIDATION_FAILED",
            "message": "Request validation failed",
            "path": "/api/v1/marketing/plan",
            "correlationId": "c-1",
            "timestamp": "2026-01-01T00:00:00Z",
            "violations": [{"field": "industry", "message": "must not be blank"}]
        }"#;
        let body: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.code.as_deref(), Some("VALIDATION_FAILED"));
        assert_eq!(body.correlation_id.as_deref(), Some("c-1"));
        assert_eq!(
            body.describe(),
            "Request validation failed; industry: must not be blank"
        );
    }
}
