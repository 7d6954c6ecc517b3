use super::domain::LoanApplication;

pub const MINIMUM_AGE: f64 = 18.0;
pub const MINIMUM_INCOME: f64 = 10_000.0;
pub const MAX_LOAN_PERCENT_INCOME: f64 = 0.5;
pub const MAX_DEBT_TO_INCOME: f64 = 0.35;
pub const MIN_CREDIT_SCORE: f64 = 300.0;
pub const MAX_CREDIT_SCORE: f64 = 850.0;
pub const MIN_INCOME_TO_LOAN_RATIO: f64 = 0.1;

/// Business rule that rejects an application before the model is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disqualification {
    Underage,
    IncomeBelowMinimum,
    NonPositiveLoanAmount,
    NonPositiveInterestRate,
    LoanPercentIncomeOutOfRange,
    CreditScoreOutOfRange,
    IncomeTooLowForLoan,
    DebtToIncomeTooHigh,
}

impl Disqualification {
    /// Applicant-facing reason. Underage rejections carry none.
    pub const fn reason(self) -> Option<&'static str> {
        match self {
            Disqualification::Underage => None,
            Disqualification::IncomeBelowMinimum => Some("Income below $10,000"),
            Disqualification::NonPositiveLoanAmount => Some("Loan amount must be positive"),
            Disqualification::NonPositiveInterestRate => Some("Interest rate must be positive"),
            Disqualification::LoanPercentIncomeOutOfRange => {
                Some("Loan percent income must be between 0 and 0.5")
            }
            Disqualification::CreditScoreOutOfRange => {
                Some("Credit score must be between 300 and 850")
            }
            Disqualification::IncomeTooLowForLoan => Some("Income too low compared to loan amount"),
            Disqualification::DebtToIncomeTooHigh => Some("Debt-to-income ratio too high"),
        }
    }
}

/// Runs the disqualification predicates in order and returns the first that fires.
///
/// Assumes the caller already rejected non-positive and non-finite ages.
pub fn screen(application: &LoanApplication) -> Option<Disqualification> {
    let checks: [(bool, Disqualification); 8] = [
        (application.age < MINIMUM_AGE, Disqualification::Underage),
        (
            application.income < MINIMUM_INCOME,
            Disqualification::IncomeBelowMinimum,
        ),
        (
            application.loan_amount <= 0.0,
            Disqualification::NonPositiveLoanAmount,
        ),
        (
            application.interest_rate <= 0.0,
            Disqualification::NonPositiveInterestRate,
        ),
        (
            application.loan_percent_income <= 0.0
                || application.loan_percent_income > MAX_LOAN_PERCENT_INCOME,
            Disqualification::LoanPercentIncomeOutOfRange,
        ),
        (
            application.credit_score < MIN_CREDIT_SCORE
                || application.credit_score > MAX_CREDIT_SCORE,
            Disqualification::CreditScoreOutOfRange,
        ),
        (
            income_to_loan_ratio(application) < MIN_INCOME_TO_LOAN_RATIO,
            Disqualification::IncomeTooLowForLoan,
        ),
        (
            application.loan_percent_income > MAX_DEBT_TO_INCOME,
            Disqualification::DebtToIncomeTooHigh,
        ),
    ];

    checks
        .into_iter()
        .find(|(fired, _)| *fired)
        .map(|(_, rule)| rule)
}

// Only meaningful once the loan amount check has passed; earlier rules win otherwise.
fn income_to_loan_ratio(application: &LoanApplication) -> f64 {
    if application.loan_amount > 0.0 {
        application.income / application.loan_amount
    } else {
        f64::INFINITY
    }
}
