use std::io::{Read, Write};

use tracing::{debug, warn};

use super::domain::{Decision, LoanApplication};
use super::engine::DecisionEngine;
use super::scoring::Scorer;

const OUTPUT_COLUMNS: [&str; 3] = ["decision", "risk_level", "reason"];
const ERROR_DECISION: &str = "error";

/// Fatal batch failures. Per-row problems are written to the output instead.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to read or write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush batch output: {0}")]
    Io(#[from] std::io::Error),
}

/// Row counts for a completed batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: usize,
    pub approved: usize,
    pub disapproved: usize,
    pub errors: usize,
}

/// Scores every application in a CSV export whose header uses the training column names.
///
/// The output repeats each input row followed by the decision, risk label and reason.
pub fn score_csv<S, R, W>(
    engine: &DecisionEngine<S>,
    input: R,
    output: W,
) -> Result<BatchSummary, BatchError>
where
    S: Scorer,
    R: Read,
    W: Write,
{
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let mut writer = csv::Writer::from_writer(output);

    let headers = reader.headers()?.clone();
    let mut output_headers = headers.clone();
    for column in OUTPUT_COLUMNS {
        output_headers.push_field(column);
    }
    writer.write_record(&output_headers)?;

    let mut summary = BatchSummary::default();
    for record in reader.records() {
        let record = record?;
        summary.rows += 1;

        let outcome = record
            .deserialize::<LoanApplication>(Some(&headers))
            .map_err(|err| err.to_string())
            .and_then(|application| {
                engine
                    .evaluate(&application)
                    .map_err(|err| err.to_string())
            });

        let mut row = record;
        match outcome {
            Ok(verdict) => {
                match verdict.decision {
                    Decision::Approved => summary.approved += 1,
                    Decision::Disapproved => summary.disapproved += 1,
                }
                row.push_field(verdict.decision.label());
                row.push_field(verdict.risk.label());
                row.push_field(verdict.reason.as_deref().unwrap_or_default());
            }
            Err(message) => {
                warn!(row = summary.rows, %message, "batch row could not be scored");
                summary.errors += 1;
                row.push_field(ERROR_DECISION);
                row.push_field("");
                row.push_field(&message);
            }
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    debug!(?summary, "batch scoring finished");
    Ok(summary)
}
