//! Loan underwriting: eligibility rules, the feature transform, and the model-backed decision.

pub mod batch;
pub mod domain;
pub mod eligibility;
pub mod engine;
pub mod features;
pub mod page;
pub mod router;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use batch::{score_csv, BatchError, BatchSummary};
pub use domain::{
    Decision, Education, HomeOwnership, LoanApplication, LoanIntent, PreviousDefaults, RiskLevel,
};
pub use eligibility::Disqualification;
pub use engine::{DecisionBasis, DecisionEngine, EvaluationError, ValidationError, Verdict};
pub use features::{FeatureRow, FeatureValue};
pub use router::{decision_router, public_message, PredictionResponse, GENERIC_ERROR_MESSAGE};
pub use scoring::{Scorer, ScoringError};
