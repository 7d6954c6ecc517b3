use super::features::FeatureRow;

/// Trained classifier consulted once an application clears the eligibility rules.
///
/// Implementations must tolerate concurrent calls; the engine shares a single instance
/// across all requests.
pub trait Scorer: Send + Sync {
    /// Returns the binary label, where `1` means low risk.
    fn predict(&self, row: &FeatureRow) -> Result<u8, ScoringError>;
}

/// Scoring failure raised by a model implementation.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("model produced a non-finite score")]
    NonFiniteScore,
    #[error("model structure is invalid: {0}")]
    InvalidModel(String),
    #[error("model unavailable: {0}")]
    Unavailable(String),
}
