use std::sync::Arc;

use tracing::debug;

use super::domain::{Decision, LoanApplication, RiskLevel};
use super::eligibility::{self, Disqualification};
use super::features::FeatureRow;
use super::scoring::{Scorer, ScoringError};

/// Applicant-correctable input problem; no scoring is attempted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Age must be greater than 0")]
    NonPositiveAge { age: f64 },
}

/// Failure raised by [`DecisionEngine::evaluate`].
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("field {field} must be a finite number")]
    MalformedInput { field: &'static str },
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Which path produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionBasis {
    EligibilityRule(Disqualification),
    Model,
}

/// Outcome of a single evaluation. Built per request and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub decision: Decision,
    pub reason: Option<String>,
    pub risk: RiskLevel,
    pub basis: DecisionBasis,
}

impl Verdict {
    fn disqualified(rule: Disqualification) -> Self {
        Self {
            decision: Decision::Disapproved,
            reason: rule.reason().map(str::to_string),
            risk: RiskLevel::High,
            basis: DecisionBasis::EligibilityRule(rule),
        }
    }

    fn from_prediction(label: u8) -> Self {
        let (decision, risk) = if label == 1 {
            (Decision::Approved, RiskLevel::Low)
        } else {
            (Decision::Disapproved, RiskLevel::High)
        };

        Self {
            decision,
            reason: None,
            risk,
            basis: DecisionBasis::Model,
        }
    }
}

/// Stateless evaluator combining the eligibility rules with an injected scorer.
pub struct DecisionEngine<S> {
    scorer: Arc<S>,
}

impl<S> Clone for DecisionEngine<S> {
    fn clone(&self) -> Self {
        Self {
            scorer: Arc::clone(&self.scorer),
        }
    }
}

impl<S: Scorer> DecisionEngine<S> {
    pub fn new(scorer: Arc<S>) -> Self {
        Self { scorer }
    }

    pub fn evaluate(&self, application: &LoanApplication) -> Result<Verdict, EvaluationError> {
        // NaN fails this comparison and falls through to the finiteness check.
        if application.age <= 0.0 {
            return Err(ValidationError::NonPositiveAge {
                age: application.age,
            }
            .into());
        }

        if let Some(field) = application.non_finite_field() {
            return Err(EvaluationError::MalformedInput { field });
        }

        if let Some(rule) = eligibility::screen(application) {
            debug!(?rule, "application disqualified before scoring");
            return Ok(Verdict::disqualified(rule));
        }

        let row = FeatureRow::from_application(application);
        let label = self.scorer.predict(&row)?;
        debug!(label, "model scored application");

        Ok(Verdict::from_prediction(label))
    }
}
