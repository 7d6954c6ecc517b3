use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use super::domain::LoanApplication;
use super::engine::{DecisionEngine, EvaluationError, Verdict};
use super::page::{render_form_page, FormResult};
use super::scoring::Scorer;

/// Message shown for every failure that is not an applicant-correctable validation error.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred during processing";

pub const BANNER: &str = "Loan Prediction API is running!";

/// Body returned by `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResponse {
    pub prediction: u8,
    pub risk_level: &'static str,
    pub decision: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&Verdict> for PredictionResponse {
    fn from(verdict: &Verdict) -> Self {
        Self {
            prediction: verdict.risk.prediction(),
            risk_level: verdict.risk.label(),
            decision: verdict.decision.label(),
            reason: verdict.reason.clone(),
        }
    }
}

/// Router builder exposing the prediction endpoint and the HTML form.
pub fn decision_router<S>(engine: DecisionEngine<S>) -> Router
where
    S: Scorer + 'static,
{
    Router::new()
        .route("/", get(banner_handler))
        .route("/predict", post(predict_handler::<S>))
        .route("/form", get(form_page_handler).post(form_submit_handler::<S>))
        .with_state(engine)
}

/// Message surfaced to callers for an evaluation failure.
pub fn public_message(error: &EvaluationError) -> String {
    match error {
        EvaluationError::Validation(validation) => validation.to_string(),
        EvaluationError::MalformedInput { .. } | EvaluationError::Scoring(_) => {
            GENERIC_ERROR_MESSAGE.to_string()
        }
    }
}

fn error_status(error: &EvaluationError) -> StatusCode {
    match error {
        EvaluationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EvaluationError::MalformedInput { .. } => StatusCode::BAD_REQUEST,
        EvaluationError::Scoring(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) async fn banner_handler() -> &'static str {
    BANNER
}

pub(crate) async fn predict_handler<S>(
    State(engine): State<DecisionEngine<S>>,
    payload: Result<Json<LoanApplication>, JsonRejection>,
) -> Response
where
    S: Scorer + 'static,
{
    let application = match payload {
        Ok(Json(application)) => application,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected prediction payload");
            let body = json!({ "error": GENERIC_ERROR_MESSAGE });
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    match engine.evaluate(&application) {
        Ok(verdict) => {
            info!(
                decision = verdict.decision.label(),
                risk = verdict.risk.label(),
                "prediction served"
            );
            (StatusCode::OK, Json(PredictionResponse::from(&verdict))).into_response()
        }
        Err(error) => {
            warn!(%error, "prediction failed");
            let body = json!({ "error": public_message(&error) });
            (error_status(&error), Json(body)).into_response()
        }
    }
}

pub(crate) async fn form_page_handler() -> Html<String> {
    Html(render_form_page(None))
}

pub(crate) async fn form_submit_handler<S>(
    State(engine): State<DecisionEngine<S>>,
    payload: Result<Form<LoanApplication>, FormRejection>,
) -> Html<String>
where
    S: Scorer + 'static,
{
    let result = match payload {
        Ok(Form(application)) => match engine.evaluate(&application) {
            Ok(verdict) => {
                info!(decision = verdict.decision.label(), "form decision rendered");
                FormResult::Verdict(verdict)
            }
            Err(error) => {
                warn!(%error, "form evaluation failed");
                FormResult::Error(public_message(&error))
            }
        },
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected form submission");
            FormResult::Error(GENERIC_ERROR_MESSAGE.to_string())
        }
    };

    Html(render_form_page(Some(&result)))
}
