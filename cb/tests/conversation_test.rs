//! Conversation flows against a scripted plan service

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use campaignbrief::{
    Conversation, ErrorCategory, GeneratePlanRequest, PlanClient, PlanError, PlanResponse, Question, Session,
    SessionError,
};
use tempfile::TempDir;

/// Returns the given HTTP statuses in order; 200 yields a plan
struct ScriptedClient {
    statuses: Vec<u16>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    fn new(statuses: Vec<u16>) -> Arc<Self> {
        Arc::new(Self {
            statuses,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlanClient for ScriptedClient {
    async fn generate(&self, request: GeneratePlanRequest) -> Result<PlanResponse, PlanError> {
        let idx = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.statuses.get(idx).copied().unwrap_or(500) {
            200 => Ok(serde_json::from_value(serde_json::json!({
                "summary": format!("Plan for {}", request.industry),
                "platformPlans": [],
            }))?),
            status => Err(PlanError::Api {
                status,
                code: None,
                message: "scripted".to_string(),
                correlation_id: Some(format!("corr-{}", idx)),
            }),
        }
    }
}

const TURNS: [&str; 5] = [
    "Industry: B2B SaaS for dentists",
    "Audience: clinic owners",
    "Goal: leads",
    "Platforms: LinkedIn + IG",
    "5/week",
];

#[tokio::test]
async fn test_questions_then_plan() {
    let client = ScriptedClient::new(vec![200]);
    let mut conversation = Conversation::new(Session::default(), client.clone());

    let expected = [
        Some(Question::Audience),
        Some(Question::PrimaryGoal),
        Some(Question::Platforms),
        Some(Question::Resources),
        Some(Question::Tone),
    ];
    for (turn, next) in TURNS.iter().zip(expected) {
        let exchange = conversation.send(turn).await.unwrap();
        assert_eq!(exchange.next_question, next, "after {turn:?}");
    }

    assert_eq!(client.calls(), 1);
    assert!(!conversation.session().is_loading());
    assert!(conversation.session().last_error().is_none());
}

#[tokio::test]
async fn test_each_error_category_reported() {
    let cases = [
        (401, ErrorCategory::Unauthorized),
        (403, ErrorCategory::Forbidden),
        (422, ErrorCategory::ValidationRejected),
        (500, ErrorCategory::Server),
        (504, ErrorCategory::Timeout),
        (418, ErrorCategory::Unknown),
    ];

    for (status, category) in cases {
        let client = ScriptedClient::new(vec![status]);
        let mut conversation = Conversation::new(Session::default(), client);
        for turn in TURNS {
            conversation.send(turn).await.unwrap();
        }

        let session = conversation.session();
        let error = session.last_error().unwrap();
        assert_eq!(error.category, category, "status {status}");
        assert!(error.message.contains("corr-0"));
        assert_eq!(session.draft().resources_per_week, Some(5), "draft kept after {status}");
        assert!(!session.is_loading());
    }
}

#[tokio::test]
async fn test_resend_after_failure() {
    let dir = TempDir::new().unwrap();
    let client = ScriptedClient::new(vec![500, 200]);
    let mut conversation = Conversation::new(Session::default(), client.clone()).with_plans_dir(dir.path());
    for turn in TURNS {
        conversation.send(turn).await.unwrap();
    }
    assert!(conversation.session().last_error().is_some());

    let exchange = conversation.send("Tone: professional").await.unwrap();
    assert_eq!(client.calls(), 2);
    assert_eq!(
        exchange.plan.and_then(|p| p.summary).as_deref(),
        Some("Plan for B2B SaaS for dentists")
    );
    assert!(exchange.saved_to.unwrap().exists());
    assert_eq!(exchange.next_question, None);
}

#[tokio::test]
async fn test_empty_turn_refused() {
    let client = ScriptedClient::new(vec![]);
    let mut conversation = Conversation::new(Session::default(), client);
    assert_eq!(conversation.send("  ").await.unwrap_err(), SessionError::EmptyTurn);
    assert_eq!(conversation.session().messages().len(), 2);
}
