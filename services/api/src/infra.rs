use crate::cli::ModelArgs;
use credit_risk::config::AppConfig;
use credit_risk::error::AppError;
use credit_risk::model::ModelArtifact;
use credit_risk::underwriting::DecisionEngine;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Model loaded once per process and shared by every request.
pub(crate) type ModelEngine = DecisionEngine<ModelArtifact>;

pub(crate) fn model_path(config: &AppConfig, args: &ModelArgs) -> PathBuf {
    args.path
        .clone()
        .unwrap_or_else(|| config.model.path.clone())
}

pub(crate) fn load_engine(path: &Path) -> Result<ModelEngine, AppError> {
    let artifact = ModelArtifact::from_path(path)?;
    Ok(DecisionEngine::new(Arc::new(artifact)))
}
