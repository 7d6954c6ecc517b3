use crate::cli::ModelArgs;
use crate::infra::{load_engine, model_path, ModelEngine};
use clap::Args;
use credit_risk::config::AppConfig;
use credit_risk::error::AppError;
use credit_risk::underwriting::{score_csv, LoanApplication, PredictionResponse};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON file holding one application, keyed by the training column names
    #[arg(long)]
    pub(crate) input: PathBuf,
    #[command(flatten)]
    pub(crate) model: ModelArgs,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file whose header uses the training column names
    #[arg(long)]
    pub(crate) input: PathBuf,
    #[command(flatten)]
    pub(crate) model: ModelArgs,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = load_engine(&model_path(&config, &args.model))?;

    let reader = BufReader::new(File::open(&args.input)?);
    let response = evaluate_application(&engine, reader)?;

    let rendered = serde_json::to_string_pretty(&response)?;
    println!("{rendered}");
    Ok(())
}

fn evaluate_application<R: Read>(
    engine: &ModelEngine,
    reader: R,
) -> Result<PredictionResponse, AppError> {
    let application: LoanApplication = serde_json::from_reader(reader)?;
    let verdict = engine.evaluate(&application)?;
    Ok(PredictionResponse::from(&verdict))
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = load_engine(&model_path(&config, &args.model))?;

    let input = BufReader::new(File::open(&args.input)?);
    let stdout = io::stdout();
    let summary = score_csv(&engine, input, stdout.lock())?;

    eprintln!(
        "Scored {} application(s): {} approved, {} disapproved, {} error(s)",
        summary.rows, summary.approved, summary.disapproved, summary.errors
    );
    Ok(())
}
