use std::collections::BTreeMap;

use serde::Deserialize;

use crate::underwriting::features::{is_categorical_column, is_numeric_column};
use crate::underwriting::FeatureRow;

/// Logistic regression over the transformed numeric columns and one-hot encoded categoricals.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogisticModel {
    pub intercept: f64,
    #[serde(default)]
    pub numeric: BTreeMap<String, f64>,
    /// Weight per column and category value. Values missing here contribute nothing.
    #[serde(default)]
    pub categorical: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default = "super::default_threshold")]
    pub threshold: f64,
}

impl LogisticModel {
    pub(super) fn validate(&self) -> Result<(), String> {
        super::check_threshold(self.threshold)?;

        if !self.intercept.is_finite() {
            return Err("intercept must be finite".to_string());
        }
        if self.numeric.is_empty() && self.categorical.is_empty() {
            return Err("logistic model has no weights".to_string());
        }

        for (column, weight) in &self.numeric {
            if !is_numeric_column(column) {
                return Err(format!("unknown numeric column '{column}'"));
            }
            if !weight.is_finite() {
                return Err(format!("weight for '{column}' must be finite"));
            }
        }

        for (column, weights) in &self.categorical {
            if !is_categorical_column(column) {
                return Err(format!("unknown categorical column '{column}'"));
            }
            if let Some((value, _)) = weights.iter().find(|(_, weight)| !weight.is_finite()) {
                return Err(format!("weight for '{column}={value}' must be finite"));
            }
        }

        Ok(())
    }

    pub(super) fn probability(&self, row: &FeatureRow) -> f64 {
        let numeric: f64 = self
            .numeric
            .iter()
            .filter_map(|(column, weight)| row.numeric(column).map(|value| value * weight))
            .sum();

        let categorical: f64 = self
            .categorical
            .iter()
            .filter_map(|(column, weights)| {
                row.categorical(column)
                    .and_then(|value| weights.get(value))
            })
            .sum();

        sigmoid(self.intercept + numeric + categorical)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::underwriting::domain::{
        Education, HomeOwnership, LoanApplication, LoanIntent, PreviousDefaults,
    };

    fn row(previous_defaults: PreviousDefaults) -> FeatureRow {
        FeatureRow::from_application(&LoanApplication {
            age: 30.0,
            education: Education::Bachelor,
            income: 60_000.0,
            home_ownership: HomeOwnership::Mortgage,
            loan_amount: 8_000.0,
            loan_intent: LoanIntent::Personal,
            interest_rate: 7.5,
            loan_percent_income: 0.13,
            credit_score: 680.0,
            previous_defaults,
        })
    }

    fn model() -> LogisticModel {
        LogisticModel {
            intercept: -1.0,
            numeric: BTreeMap::from([("loan_int_rate".to_string(), 0.2)]),
            categorical: BTreeMap::from([(
                "previous_loan_defaults_on_file".to_string(),
                BTreeMap::from([("Yes".to_string(), -8.0)]),
            )]),
            threshold: 0.5,
        }
    }

    #[test]
    fn probability_combines_numeric_and_categorical_weights() {
        let clean = model().probability(&row(PreviousDefaults::No));
        let defaulted = model().probability(&row(PreviousDefaults::Yes));

        let expected_clean = sigmoid(-1.0 + 0.2 * 7.5);
        assert!((clean - expected_clean).abs() < 1e-12);
        assert!(defaulted < 0.01);
    }

    #[test]
    fn unseen_category_contributes_nothing() {
        let mut model = model();
        model.categorical.insert(
            "person_education".to_string(),
            BTreeMap::from([("Doctorate".to_string(), 3.0)]),
        );

        let with_unseen = model.probability(&row(PreviousDefaults::No));
        assert!((with_unseen - sigmoid(-1.0 + 0.2 * 7.5)).abs() < 1e-12);
    }

    #[test]
    fn validation_rejects_unknown_and_mistyped_columns() {
        let mut unknown = model();
        unknown.numeric.insert("favourite_colour".to_string(), 1.0);
        assert!(unknown.validate().unwrap_err().contains("favourite_colour"));

        let mut mistyped = model();
        mistyped.numeric.insert("loan_intent".to_string(), 1.0);
        assert!(mistyped.validate().is_err());

        let mut empty = model();
        empty.numeric.clear();
        empty.categorical.clear();
        assert!(empty.validate().is_err());
    }
}
