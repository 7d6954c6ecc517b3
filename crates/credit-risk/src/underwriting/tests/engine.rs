use super::common::*;
use crate::underwriting::domain::{Decision, RiskLevel};
use crate::underwriting::eligibility::Disqualification;
use crate::underwriting::engine::{DecisionBasis, EvaluationError, ValidationError};
use crate::underwriting::features::{FeatureRow, LOG_COLUMNS};
use crate::underwriting::scoring::ScoringError;
use crate::underwriting::DecisionEngine;
use std::sync::Arc;

#[test]
fn non_positive_age_is_a_validation_error() {
    let (engine, scorer) = engine_returning(1);

    for age in [0.0, -1.0, -30.5] {
        let mut application = eligible_application();
        application.age = age;

        match engine.evaluate(&application) {
            Err(EvaluationError::Validation(ValidationError::NonPositiveAge { age: reported })) => {
                assert_eq!(reported, age);
            }
            other => panic!("expected validation error for age {age}, got {other:?}"),
        }
    }
    assert_eq!(scorer.calls(), 0);
}

#[test]
fn minors_are_disapproved_without_reason_or_scoring() {
    let (engine, scorer) = engine_returning(1);

    for age in [0.5, 1.0, 17.0, 17.99] {
        let mut application = eligible_application();
        application.age = age;

        let verdict = engine.evaluate(&application).expect("minor evaluates");
        assert_eq!(verdict.decision, Decision::Disapproved);
        assert_eq!(verdict.risk, RiskLevel::High);
        assert_eq!(verdict.reason, None);
        assert_eq!(
            verdict.basis,
            DecisionBasis::EligibilityRule(Disqualification::Underage)
        );
    }
    assert_eq!(scorer.calls(), 0);
}

#[test]
fn income_just_below_minimum_is_disapproved_with_reason() {
    let (engine, scorer) = engine_returning(1);
    let mut application = eligible_application();
    application.income = 9_999.99;

    let verdict = engine.evaluate(&application).expect("evaluates");

    assert_eq!(verdict.decision, Decision::Disapproved);
    assert_eq!(verdict.reason.as_deref(), Some("Income below $10,000"));
    assert_eq!(scorer.calls(), 0);
}

#[test]
fn eligible_application_follows_positive_model_label() {
    let (engine, scorer) = engine_returning(1);

    let verdict = engine.evaluate(&eligible_application()).expect("evaluates");

    assert_eq!(verdict.decision, Decision::Approved);
    assert_eq!(verdict.risk, RiskLevel::Low);
    assert_eq!(verdict.reason, None);
    assert_eq!(verdict.basis, DecisionBasis::Model);
    assert_eq!(scorer.calls(), 1);
}

#[test]
fn eligible_application_follows_negative_model_label() {
    let (engine, _) = engine_returning(0);

    let verdict = engine.evaluate(&eligible_application()).expect("evaluates");

    assert_eq!(verdict.decision, Decision::Disapproved);
    assert_eq!(verdict.risk, RiskLevel::High);
    assert_eq!(verdict.basis, DecisionBasis::Model);
}

#[test]
fn labels_other_than_one_are_high_risk() {
    let (engine, _) = engine_returning(7);

    let verdict = engine.evaluate(&eligible_application()).expect("evaluates");

    assert_eq!(verdict.decision, Decision::Disapproved);
    assert_eq!(verdict.risk, RiskLevel::High);
}

#[test]
fn scorer_receives_log_transformed_row() {
    let (engine, scorer) = engine_returning(1);
    let mut application = eligible_application();
    application.age = 30.0;

    engine.evaluate(&application).expect("evaluates");

    let rows = scorer.rows();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert!((row.person_age - 31f64.ln()).abs() < 1e-12);
    assert_ne!(row.person_age, 30.0);
    assert_eq!(row.person_income, 50_000f64.ln_1p());
    assert_eq!(row.loan_amnt, 10_000f64.ln_1p());
    assert_eq!(row.loan_percent_income, 0.2f64.ln_1p());
    assert_eq!(row.loan_int_rate, 5.0);
    assert_eq!(row.credit_score, 700.0);
    assert_eq!(row.person_education, "Bachelor");
    assert_eq!(row.person_home_ownership, "RENT");
    assert_eq!(row.loan_intent, "EDUCATION");
    assert_eq!(row.previous_loan_defaults_on_file, "No");
}

#[test]
fn row_columns_follow_training_order() {
    let (engine, scorer) = engine_returning(1);
    engine.evaluate(&eligible_application()).expect("evaluates");

    let names: Vec<&str> = scorer.rows()[0]
        .columns()
        .iter()
        .map(|(name, _)| *name)
        .collect();
    assert_eq!(names, crate::underwriting::features::COLUMNS.to_vec());
}

#[test]
fn only_log_columns_are_transformed() {
    let application = eligible_application();
    let row = FeatureRow::from_application(&application);

    let transformed: Vec<&str> = application
        .numeric_fields()
        .into_iter()
        .filter(|(name, raw)| row.numeric(name) != Some(*raw))
        .map(|(name, _)| name)
        .collect();
    assert_eq!(transformed, LOG_COLUMNS.to_vec());

    for column in LOG_COLUMNS {
        let raw = application
            .numeric_fields()
            .into_iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
            .expect("log column is numeric");
        assert_eq!(row.numeric(column), Some(raw.ln_1p()));
    }
}

#[test]
fn negative_infinite_age_is_a_validation_error() {
    let (engine, scorer) = engine_returning(1);
    let mut application = eligible_application();
    application.age = f64::NEG_INFINITY;

    assert!(matches!(
        engine.evaluate(&application),
        Err(EvaluationError::Validation(ValidationError::NonPositiveAge { .. }))
    ));
    assert_eq!(scorer.calls(), 0);
}

#[test]
fn non_finite_numbers_are_malformed_input() {
    let (engine, scorer) = engine_returning(1);
    let mut application = eligible_application();
    application.age = f64::NAN;

    match engine.evaluate(&application) {
        Err(EvaluationError::MalformedInput { field }) => assert_eq!(field, "person_age"),
        other => panic!("expected malformed input, got {other:?}"),
    }

    application.age = 30.0;
    application.credit_score = f64::INFINITY;
    assert!(matches!(
        engine.evaluate(&application),
        Err(EvaluationError::MalformedInput {
            field: "credit_score"
        })
    ));
    assert_eq!(scorer.calls(), 0);
}

#[test]
fn scoring_failures_propagate() {
    let engine = DecisionEngine::new(Arc::new(FailingScorer));

    match engine.evaluate(&eligible_application()) {
        Err(EvaluationError::Scoring(ScoringError::Unavailable(message))) => {
            assert!(message.contains("weights"));
        }
        other => panic!("expected scoring failure, got {other:?}"),
    }
}
