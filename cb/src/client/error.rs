//! Plan generation error types and user-facing categories

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while generating a plan
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
        correlation_id: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Unauthorized,
    Forbidden,
    ValidationRejected,
    Server,
    Timeout,
    Unknown,
}

impl ErrorCategory {
    /// Classify an HTTP status code
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            400 | 422 => Self::ValidationRejected,
            408 | 504 => Self::Timeout,
            500..=599 => Self::Server,
            _ => Self::Unknown,
        }
    }

    /// Fixed message appended to the transcript
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Unauthorized => "HTTP 401: Unauthorized. Check Basic Auth / credentials.",
            Self::Forbidden => "HTTP 403: Forbidden. Check security config.",
            Self::ValidationRejected => "Validation error. The brief didn't match what the plan service accepts.",
            Self::Server => "Server error. Check backend logs for the correlation id.",
            Self::Timeout => "Request timed out. Increase backend timeout or reduce output size.",
            Self::Unknown => "Something went wrong while generating the plan.",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::ValidationRejected => "validation-rejected",
            Self::Server => "server",
            Self::Timeout => "timeout",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

impl PlanError {
    /// Category used for the transcript message
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlanError::Api { status, .. } => ErrorCategory::from_status(*status),
            PlanError::Timeout(_) => ErrorCategory::Timeout,
            PlanError::Network(e) if e.is_timeout() => ErrorCategory::Timeout,
            PlanError::Network(e) => e.status().map_or(ErrorCategory::Unknown, |s| {
                ErrorCategory::from_status(s.as_u16())
            }),
            PlanError::InvalidResponse(_) | PlanError::Json(_) => ErrorCategory::Unknown,
        }
    }

    /// Server-assigned correlation id, when the error body carried one
    pub fn correlation_id(&self) -> Option<&str> {
        match self {
            PlanError::Api { correlation_id, .. } => correlation_id.as_deref(),
            _ => None,
        }
    }

    /// Message for the transcript, with the correlation id when known
    pub fn user_message(&self) -> String {
        let base = self.category().user_message();
        match self.correlation_id() {
            Some(id) => format!("{} (correlationId: {})", base, id),
            None => base.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> PlanError {
        PlanError::Api {
            status,
            code: None,
            message: "boom".to_string(),
            correlation_id: None,
        }
    }

    #[test]
    fn test_status_categories() {
        assert_eq!(api(401).category(), ErrorCategory::Unauthorized);
        assert_eq!(api(403).category(), ErrorCategory::Forbidden);
        assert_eq!(api(400).category(), ErrorCategory::ValidationRejected);
        assert_eq!(api(422).category(), ErrorCategory::ValidationRejected);
        assert_eq!(api(500).category(), ErrorCategory::Server);
        assert_eq!(api(502).category(), ErrorCategory::Server);
        assert_eq!(api(504).category(), ErrorCategory::Timeout);
        assert_eq!(api(408).category(), ErrorCategory::Timeout);
        assert_eq!(api(404).category(), ErrorCategory::Unknown);
        assert_eq!(api(429).category(), ErrorCategory::Unknown);
    }

    #[test]
    fn test_non_http_categories() {
        assert_eq!(
            PlanError::Timeout(Duration::from_secs(5)).category(),
            ErrorCategory::Timeout
        );
        assert_eq!(
            PlanError::InvalidResponse("nope".to_string()).category(),
            ErrorCategory::Unknown
        );
    }

    #[test]
    fn test_messages_are_distinct() {
        let categories = [
            ErrorCategory::Unauthorized,
            ErrorCategory::Forbidden,
            ErrorCategory::ValidationRejected,
            ErrorCategory::Server,
            ErrorCategory::Timeout,
            ErrorCategory::Unknown,
        ];
        let messages: std::collections::HashSet<_> = categories.iter().map(|c| c.user_message()).collect();
        assert_eq!(messages.len(), categories.len());
    }

    #[test]
    fn test_user_message_includes_correlation_id() {
        let err = PlanError::Api {
            status: 500,
            code: Some("INTERNAL_SERVER_ERROR".to_string()),
            message: "Unexpected error".to_string(),
            correlation_id: Some("abc-123".to_string()),
        };
        let msg = err.user_message();
        assert!(msg.starts_with("Server error"));
        assert!(msg.contains("abc-123"));
        assert_eq!(api(401).user_message(), ErrorCategory::Unauthorized.user_message());
    }
}
