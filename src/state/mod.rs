//! Session-keyed result storage for the server.
//!
//! Each analysis run owns exactly one slot. `begin` replaces the whole slot
//! in a single write, so partial results from a failed prior run can never
//! appear next to a new run's output. Nothing survives process restart.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::analysis::AnalysisOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Pending,
    Complete,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionRecord {
    pub status: RunStatus,
    pub outcome: Option<AnalysisOutcome>,
    pub error: Option<String>,
    /// Raw upstream text associated with a failure, when available.
    pub error_detail: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    fn pending() -> Self {
        Self {
            status: RunStatus::Pending,
            outcome: None,
            error: None,
            error_detail: None,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Clone, Default)]
pub struct ResultStore {
    sessions: Arc<RwLock<HashMap<String, SessionRecord>>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically reset a session's slot to a fresh pending record.
    pub async fn begin(&self, session_id: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id.to_string(), SessionRecord::pending());
    }

    pub async fn complete(&self, session_id: &str, outcome: AnalysisOutcome) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            session_id.to_string(),
            SessionRecord {
                status: RunStatus::Complete,
                outcome: Some(outcome),
                error: None,
                error_detail: None,
                updated_at: Utc::now(),
            },
        );
    }

    pub async fn fail(&self, session_id: &str, error: String, error_detail: Option<String>) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            session_id.to_string(),
            SessionRecord {
                status: RunStatus::Failed,
                outcome: None,
                error: Some(error),
                error_detail,
                updated_at: Utc::now(),
            },
        );
    }

    pub async fn get(&self, session_id: &str) -> Option<SessionRecord> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{
        calculate_solar_potential, estimate_roi, generate_recommendations, AnalysisOutcome,
    };

    fn outcome() -> AnalysisOutcome {
        let analysis = serde_json::from_str(r#"{"total_estimated_usable_area_sqm": 20.0}"#).unwrap();
        let solar_potential = calculate_solar_potential(Some(&analysis));
        let roi_estimate = estimate_roi(&solar_potential, 100.0);
        let recommendations = generate_recommendations(Some(&analysis), Some(&solar_potential));
        AnalysisOutcome {
            analysis,
            solar_potential,
            roi_estimate,
            recommendations,
            raw_response: serde_json::json!({}),
        }
    }

    #[tokio::test]
    async fn begin_wipes_the_previous_run() {
        let store = ResultStore::new();

        store.begin("s1").await;
        store.complete("s1", outcome()).await;
        let record = store.get("s1").await.unwrap();
        assert_eq!(record.status, RunStatus::Complete);
        assert!(record.outcome.is_some());

        // A new run must not expose anything from the finished one.
        store.begin("s1").await;
        let record = store.get("s1").await.unwrap();
        assert_eq!(record.status, RunStatus::Pending);
        assert!(record.outcome.is_none());
        assert!(record.error.is_none());
        assert!(record.error_detail.is_none());
    }

    #[tokio::test]
    async fn failure_keeps_diagnostic_detail() {
        let store = ResultStore::new();
        store.begin("s2").await;
        store
            .fail("s2", "boom".to_string(), Some("raw body".to_string()))
            .await;

        let record = store.get("s2").await.unwrap();
        assert_eq!(record.status, RunStatus::Failed);
        assert_eq!(record.error.as_deref(), Some("boom"));
        assert_eq!(record.error_detail.as_deref(), Some("raw body"));
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = ResultStore::new();
        store.begin("a").await;
        store.complete("a", outcome()).await;
        store.begin("b").await;

        assert_eq!(store.get("a").await.unwrap().status, RunStatus::Complete);
        assert_eq!(store.get("b").await.unwrap().status, RunStatus::Pending);
        assert!(store.get("c").await.is_none());
    }
}
