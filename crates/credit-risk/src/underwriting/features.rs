use super::domain::LoanApplication;

/// Column names in the order the model pipeline was trained with.
pub const COLUMNS: [&str; 10] = [
    "person_age",
    "person_education",
    "person_income",
    "person_home_ownership",
    "loan_amnt",
    "loan_intent",
    "loan_int_rate",
    "loan_percent_income",
    "credit_score",
    "previous_loan_defaults_on_file",
];

/// Columns that go through `ln(1 + x)` before inference.
pub const LOG_COLUMNS: [&str; 4] = [
    "person_age",
    "person_income",
    "loan_amnt",
    "loan_percent_income",
];

/// A single cell handed to the scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Numeric(f64),
    Categorical(&'static str),
}

/// Transformed application row, ready for the scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub person_age: f64,
    pub person_education: &'static str,
    pub person_income: f64,
    pub person_home_ownership: &'static str,
    pub loan_amnt: f64,
    pub loan_intent: &'static str,
    pub loan_int_rate: f64,
    pub loan_percent_income: f64,
    pub credit_score: f64,
    pub previous_loan_defaults_on_file: &'static str,
}

impl FeatureRow {
    /// Applies the training-time transform. `ln_1p` matches the pipeline's `log1p`.
    pub fn from_application(application: &LoanApplication) -> Self {
        Self {
            person_age: scaled("person_age", application.age),
            person_education: application.education.label(),
            person_income: scaled("person_income", application.income),
            person_home_ownership: application.home_ownership.label(),
            loan_amnt: scaled("loan_amnt", application.loan_amount),
            loan_intent: application.loan_intent.label(),
            loan_int_rate: scaled("loan_int_rate", application.interest_rate),
            loan_percent_income: scaled("loan_percent_income", application.loan_percent_income),
            credit_score: scaled("credit_score", application.credit_score),
            previous_loan_defaults_on_file: application.previous_defaults.label(),
        }
    }

    pub fn columns(&self) -> [(&'static str, FeatureValue); 10] {
        use FeatureValue::{Categorical, Numeric};
        [
            (COLUMNS[0], Numeric(self.person_age)),
            (COLUMNS[1], Categorical(self.person_education)),
            (COLUMNS[2], Numeric(self.person_income)),
            (COLUMNS[3], Categorical(self.person_home_ownership)),
            (COLUMNS[4], Numeric(self.loan_amnt)),
            (COLUMNS[5], Categorical(self.loan_intent)),
            (COLUMNS[6], Numeric(self.loan_int_rate)),
            (COLUMNS[7], Numeric(self.loan_percent_income)),
            (COLUMNS[8], Numeric(self.credit_score)),
            (COLUMNS[9], Categorical(self.previous_loan_defaults_on_file)),
        ]
    }

    pub fn get(&self, column: &str) -> Option<FeatureValue> {
        self.columns()
            .into_iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    pub fn numeric(&self, column: &str) -> Option<f64> {
        match self.get(column)? {
            FeatureValue::Numeric(value) => Some(value),
            FeatureValue::Categorical(_) => None,
        }
    }

    pub fn categorical(&self, column: &str) -> Option<&'static str> {
        match self.get(column)? {
            FeatureValue::Categorical(value) => Some(value),
            FeatureValue::Numeric(_) => None,
        }
    }
}

fn scaled(column: &str, value: f64) -> f64 {
    if LOG_COLUMNS.contains(&column) {
        value.ln_1p()
    } else {
        value
    }
}

pub fn is_numeric_column(column: &str) -> bool {
    matches!(
        column,
        "person_age"
            | "person_income"
            | "loan_amnt"
            | "loan_int_rate"
            | "loan_percent_income"
            | "credit_score"
    )
}

pub fn is_categorical_column(column: &str) -> bool {
    COLUMNS.contains(&column) && !is_numeric_column(column)
}
