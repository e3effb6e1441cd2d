//! HTTP plan client
//!
//! Posts the brief to the plan service with Basic credentials and a fresh
//! correlation id. Failures are returned as-is; nothing is retried here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{ApiErrorResponse, GeneratePlanRequest, PlanClient, PlanError, PlanResponse};
use crate::config::ApiConfig;

/// Header carrying the per-call correlation id
pub const CORRELATION_HEADER: &str = "X-Correlation-Id";

/// Plan service client over HTTP
pub struct HttpPlanClient {
    url: String,
    credentials: Option<(String, String)>,
    http: Client,
    timeout: Duration,
}

impl HttpPlanClient {
    /// Create a new client from configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self, PlanError> {
        debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "from_config: called");
        let timeout = config.timeout();
        let http = Client::builder().timeout(timeout).build().map_err(PlanError::Network)?;

        let credentials = config.credentials();
        if credentials.is_none() {
            debug!(
                username_env = %config.username_env,
                password_env = %config.password_env,
                "from_config: no credentials in environment, calling without auth"
            );
        }

        Ok(Self {
            url: config.plan_url(),
            credentials,
            http,
            timeout,
        })
    }

    fn error_from_body(status: u16, text: &str) -> PlanError {
        match serde_json::from_str::<ApiErrorResponse>(text) {
            Ok(body) => PlanError::Api {
                status,
                message: body.describe(),
                code: body.code,
                correlation_id: body.correlation_id,
            },
            Err(_) => PlanError::Api {
                status,
                code: None,
                message: text.to_string(),
                correlation_id: None,
            },
        }
    }
}

#[async_trait]
impl PlanClient for HttpPlanClient {
    async fn generate(&self, request: GeneratePlanRequest) -> Result<PlanResponse, PlanError> {
        let correlation_id = Uuid::now_v7().to_string();
        debug!(url = %self.url, %correlation_id, "generate: called");

        let mut builder = self
            .http
            .post(&self.url)
            .header(CORRELATION_HEADER, &correlation_id)
            .json(&request);
        if let Some((user, password)) = &self.credentials {
            builder = builder.basic_auth(user, Some(password));
        }

        let response = match builder.send().await {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                warn!(%correlation_id, "generate: timed out");
                return Err(PlanError::Timeout(self.timeout));
            }
            Err(e) => {
                warn!(%correlation_id, error = %e, "generate: network error");
                return Err(PlanError::Network(e));
            }
        };

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = Self::error_from_body(status, &text);
            warn!(%correlation_id, status, error = %err, "generate: API error");
            return Err(err);
        }

        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                PlanError::Timeout(self.timeout)
            } else {
                PlanError::Network(e)
            }
        })?;
        let plan: PlanResponse = serde_json::from_str(&text)
            .map_err(|e| PlanError::InvalidResponse(format!("plan body is not valid JSON: {}", e)))?;

        info!(%correlation_id, "generate: plan received");
        Ok(plan)
    }
}
