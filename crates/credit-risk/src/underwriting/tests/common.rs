use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::underwriting::domain::{
    Education, HomeOwnership, LoanApplication, LoanIntent, PreviousDefaults,
};
use crate::underwriting::features::FeatureRow;
use crate::underwriting::scoring::{Scorer, ScoringError};
use crate::underwriting::{decision_router, DecisionEngine};

/// Application that clears every eligibility rule.
pub(super) fn eligible_application() -> LoanApplication {
    LoanApplication {
        age: 25.0,
        education: Education::Bachelor,
        income: 50_000.0,
        home_ownership: HomeOwnership::Rent,
        loan_amount: 10_000.0,
        loan_intent: LoanIntent::Education,
        interest_rate: 5.0,
        loan_percent_income: 0.2,
        credit_score: 700.0,
        previous_defaults: PreviousDefaults::No,
    }
}

/// Scorer returning a fixed label and recording every row it was handed.
pub(super) struct RecordingScorer {
    label: u8,
    rows: Mutex<Vec<FeatureRow>>,
}

impl RecordingScorer {
    pub(super) fn returning(label: u8) -> Self {
        Self {
            label,
            rows: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn rows(&self) -> Vec<FeatureRow> {
        self.rows.lock().expect("scorer mutex poisoned").clone()
    }

    pub(super) fn calls(&self) -> usize {
        self.rows.lock().expect("scorer mutex poisoned").len()
    }
}

impl Scorer for RecordingScorer {
    fn predict(&self, row: &FeatureRow) -> Result<u8, ScoringError> {
        self.rows
            .lock()
            .expect("scorer mutex poisoned")
            .push(row.clone());
        Ok(self.label)
    }
}

pub(super) struct FailingScorer;

impl Scorer for FailingScorer {
    fn predict(&self, _row: &FeatureRow) -> Result<u8, ScoringError> {
        Err(ScoringError::Unavailable("weights not loaded".to_string()))
    }
}

pub(super) fn engine_returning(
    label: u8,
) -> (DecisionEngine<RecordingScorer>, Arc<RecordingScorer>) {
    let scorer = Arc::new(RecordingScorer::returning(label));
    (DecisionEngine::new(scorer.clone()), scorer)
}

pub(super) fn router_returning(label: u8) -> (axum::Router, Arc<RecordingScorer>) {
    let (engine, scorer) = engine_returning(label);
    (decision_router(engine), scorer)
}

pub(super) async fn read_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_str(&body).expect("json payload")
}
