//! Serialized classifiers exported from the training pipeline.
//!
//! The artifact is loaded once at startup and shared read-only between requests. Structural
//! checks run in [`ModelArtifact::from_reader`]; a model assembled in code without them still
//! scores to a [`ScoringError`] rather than a panic.

mod forest;
mod logistic;

pub use forest::{ForestModel, ForestNode, Tree};
pub use logistic::LogisticModel;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::underwriting::{FeatureRow, Scorer, ScoringError};

pub const DEFAULT_MODEL_PATH: &str = "model/credit_risk_model.json";

/// Errors raised while loading a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("unable to open model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model artifact rejected: {0}")]
    Invalid(String),
}

/// Trained classifier in one of the supported export formats.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Logistic(LogisticModel),
    Forest(ForestModel),
}

impl ModelArtifact {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact = Self::from_reader(BufReader::new(file))?;
        info!(path = %path.display(), kind = artifact.kind(), "model artifact loaded");
        Ok(artifact)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelLoadError> {
        let artifact: ModelArtifact = serde_json::from_reader(reader)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::Logistic(_) => "logistic",
            ModelArtifact::Forest(_) => "forest",
        }
    }

    fn threshold(&self) -> f64 {
        match self {
            ModelArtifact::Logistic(model) => model.threshold,
            ModelArtifact::Forest(model) => model.threshold,
        }
    }

    fn validate(&self) -> Result<(), ModelLoadError> {
        match self {
            ModelArtifact::Logistic(model) => model.validate(),
            ModelArtifact::Forest(model) => model.validate(),
        }
        .map_err(ModelLoadError::Invalid)
    }
}

impl Scorer for ModelArtifact {
    fn predict(&self, row: &FeatureRow) -> Result<u8, ScoringError> {
        let probability = match self {
            ModelArtifact::Logistic(model) => model.probability(row),
            ModelArtifact::Forest(model) => model.probability(row)?,
        };

        if !probability.is_finite() {
            return Err(ScoringError::NonFiniteScore);
        }

        Ok(u8::from(probability >= self.threshold()))
    }
}

pub(crate) fn default_threshold() -> f64 {
    0.5
}

pub(crate) fn check_threshold(threshold: f64) -> Result<(), String> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(format!("threshold {threshold} must lie in [0, 1]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::underwriting::domain::{
        Education, HomeOwnership, LoanApplication, LoanIntent, PreviousDefaults,
    };

    fn row() -> FeatureRow {
        FeatureRow::from_application(&LoanApplication {
            age: 25.0,
            education: Education::Master,
            income: 50_000.0,
            home_ownership: HomeOwnership::Rent,
            loan_amount: 10_000.0,
            loan_intent: LoanIntent::Education,
            interest_rate: 5.0,
            loan_percent_income: 0.2,
            credit_score: 700.0,
            previous_defaults: PreviousDefaults::No,
        })
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let err = ModelArtifact::from_reader(r#"{"kind":"svm"}"#.as_bytes())
            .expect_err("unsupported kind");
        assert!(matches!(err, ModelLoadError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ModelArtifact::from_path("does/not/exist.json").expect_err("missing file");
        match err {
            ModelLoadError::Io { path, .. } => assert_eq!(path, PathBuf::from("does/not/exist.json")),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn threshold_outside_unit_interval_is_rejected() {
        let err = ModelArtifact::from_reader(
            r#"{"kind":"logistic","intercept":0.0,"numeric":{"credit_score":0.01},"threshold":1.5}"#
                .as_bytes(),
        )
        .expect_err("threshold out of range");
        assert!(matches!(err, ModelLoadError::Invalid(message) if message.contains("threshold")));
    }

    #[test]
    fn bundled_artifact_loads_and_scores() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../model/credit_risk_model.json");
        let artifact = ModelArtifact::from_path(path).expect("bundled model loads");

        let label = artifact.predict(&row()).expect("scores");
        assert!(label <= 1);
    }

    #[test]
    fn threshold_decides_label() {
        let strict = ModelArtifact::from_reader(
            r#"{"kind":"logistic","intercept":0.0,"numeric":{},"categorical":{"previous_loan_defaults_on_file":{"No":0.0}},"threshold":0.6}"#
                .as_bytes(),
        )
        .expect("loads");
        let lenient = ModelArtifact::from_reader(
            r#"{"kind":"logistic","intercept":0.0,"numeric":{},"categorical":{"previous_loan_defaults_on_file":{"No":0.0}},"threshold":0.5}"#
                .as_bytes(),
        )
        .expect("loads");

        assert_eq!(strict.predict(&row()).expect("scores"), 0);
        assert_eq!(lenient.predict(&row()).expect("scores"), 1);
    }
}
