use serde::Deserialize;

/// Loan application as captured by the JSON endpoint, the HTML form, and batch CSV files.
///
/// Field names on the wire follow the training dataset columns so payloads built for the
/// model pipeline can be posted unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoanApplication {
    #[serde(rename = "person_age", alias = "age")]
    pub age: f64,
    #[serde(rename = "person_education", alias = "education")]
    pub education: Education,
    #[serde(rename = "person_income", alias = "income")]
    pub income: f64,
    #[serde(rename = "person_home_ownership", alias = "home_ownership")]
    pub home_ownership: HomeOwnership,
    #[serde(rename = "loan_amnt", alias = "loan_amount")]
    pub loan_amount: f64,
    pub loan_intent: LoanIntent,
    #[serde(rename = "loan_int_rate", alias = "interest_rate")]
    pub interest_rate: f64,
    pub loan_percent_income: f64,
    pub credit_score: f64,
    #[serde(rename = "previous_loan_defaults_on_file", alias = "previous_defaults")]
    pub previous_defaults: PreviousDefaults,
}

impl LoanApplication {
    /// Numeric fields paired with their wire names, in column order.
    pub fn numeric_fields(&self) -> [(&'static str, f64); 6] {
        [
            ("person_age", self.age),
            ("person_income", self.income),
            ("loan_amnt", self.loan_amount),
            ("loan_int_rate", self.interest_rate),
            ("loan_percent_income", self.loan_percent_income),
            ("credit_score", self.credit_score),
        ]
    }

    /// First numeric field holding NaN or an infinity, if any.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        self.numeric_fields()
            .into_iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(name, _)| name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Education {
    Bachelor,
    Master,
    #[serde(rename = "High School", alias = "HighSchool")]
    HighSchool,
    Associate,
    Doctorate,
}

impl Education {
    pub const ALL: [Education; 5] = [
        Education::Bachelor,
        Education::Master,
        Education::HighSchool,
        Education::Associate,
        Education::Doctorate,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Education::Bachelor => "Bachelor",
            Education::Master => "Master",
            Education::HighSchool => "High School",
            Education::Associate => "Associate",
            Education::Doctorate => "Doctorate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HomeOwnership {
    Rent,
    Own,
    Mortgage,
    Other,
}

impl HomeOwnership {
    pub const ALL: [HomeOwnership; 4] = [
        HomeOwnership::Rent,
        HomeOwnership::Own,
        HomeOwnership::Mortgage,
        HomeOwnership::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            HomeOwnership::Rent => "RENT",
            HomeOwnership::Own => "OWN",
            HomeOwnership::Mortgage => "MORTGAGE",
            HomeOwnership::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanIntent {
    Education,
    Venture,
    Medical,
    DebtConsolidation,
    HomeImprovement,
    Personal,
}

impl LoanIntent {
    pub const ALL: [LoanIntent; 6] = [
        LoanIntent::Education,
        LoanIntent::Venture,
        LoanIntent::Medical,
        LoanIntent::DebtConsolidation,
        LoanIntent::HomeImprovement,
        LoanIntent::Personal,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            LoanIntent::Education => "EDUCATION",
            LoanIntent::Venture => "VENTURE",
            LoanIntent::Medical => "MEDICAL",
            LoanIntent::DebtConsolidation => "DEBTCONSOLIDATION",
            LoanIntent::HomeImprovement => "HOMEIMPROVEMENT",
            LoanIntent::Personal => "PERSONAL",
        }
    }
}

/// Whether the applicant has previous loan defaults on file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PreviousDefaults {
    Yes,
    No,
}

impl PreviousDefaults {
    pub const ALL: [PreviousDefaults; 2] = [PreviousDefaults::No, PreviousDefaults::Yes];

    pub const fn label(self) -> &'static str {
        match self {
            PreviousDefaults::Yes => "Yes",
            PreviousDefaults::No => "No",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Disapproved,
}

impl Decision {
    pub const fn label(self) -> &'static str {
        match self {
            Decision::Approved => "Approved",
            Decision::Disapproved => "Disapproved",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Low,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::High => "High Risk",
            RiskLevel::Low => "Low Risk",
        }
    }

    /// Binary label as reported by the prediction endpoint.
    pub const fn prediction(self) -> u8 {
        match self {
            RiskLevel::High => 0,
            RiskLevel::Low => 1,
        }
    }
}
