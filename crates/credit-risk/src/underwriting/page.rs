use std::fmt::Write;

use super::domain::{Decision, Education, HomeOwnership, LoanIntent, PreviousDefaults};
use super::engine::Verdict;

/// What the form page shows under the inputs after a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum FormResult {
    Verdict(Verdict),
    Error(String),
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Credit Risk Form</title>
    <style>
        body { margin: 0; background-color: #1f2a40; font-family: 'Segoe UI', Tahoma, sans-serif; color: #ffffff; }
        .container { max-width: 700px; margin: 50px auto; background-color: #27344f; padding: 40px; border-radius: 15px; }
        h1 { text-align: center; color: #ff9800; margin-bottom: 30px; }
        label { display: block; margin-bottom: 5px; color: #ffcc80; }
        input, select { width: 100%; padding: 10px; border: none; border-radius: 5px; margin-bottom: 20px; font-size: 14px; }
        input[type="submit"] { background-color: #ff9800; color: #fff; font-weight: bold; cursor: pointer; }
        .result { text-align: center; margin-top: 30px; padding-top: 20px; border-top: 1px solid #ff9800; }
        .approved { color: green; }
        .disapproved { color: red; }
        .error { color: #ffcc80; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Automated Credit Risk Modelling</h1>
        <form method="POST" action="/form">
"#;

const PAGE_TAIL: &str = "    </div>\n</body>\n</html>\n";

/// Renders the application form, followed by the outcome of the last submission if any.
pub fn render_form_page(result: Option<&FormResult>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(PAGE_HEAD);

    number_input(&mut html, "Age", "person_age", "1");
    select_input(
        &mut html,
        "Education",
        "person_education",
        Education::ALL.iter().map(|value| value.label()),
    );
    number_input(&mut html, "Income", "person_income", "any");
    select_input(
        &mut html,
        "Ownership",
        "person_home_ownership",
        HomeOwnership::ALL.iter().map(|value| value.label()),
    );
    number_input(&mut html, "Loan Amount", "loan_amnt", "any");
    select_input(
        &mut html,
        "Loan Intent",
        "loan_intent",
        LoanIntent::ALL.iter().map(|value| value.label()),
    );
    number_input(&mut html, "Interest Rate", "loan_int_rate", "0.01");
    number_input(&mut html, "Percent Income", "loan_percent_income", "0.01");
    number_input(&mut html, "Credit Score", "credit_score", "1");
    select_input(
        &mut html,
        "Defaults",
        "previous_loan_defaults_on_file",
        PreviousDefaults::ALL.iter().map(|value| value.label()),
    );
    html.push_str("            <input type=\"submit\" value=\"Submit\">\n        </form>\n");

    if let Some(result) = result {
        render_result(&mut html, result);
    }

    html.push_str(PAGE_TAIL);
    html
}

fn number_input(html: &mut String, label: &str, name: &str, step: &str) {
    let _ = writeln!(
        html,
        "            <label for=\"{name}\">{label}:</label>\n            <input type=\"number\" id=\"{name}\" name=\"{name}\" step=\"{step}\" required>"
    );
}

fn select_input<'a>(
    html: &mut String,
    label: &str,
    name: &str,
    options: impl Iterator<Item = &'a str>,
) {
    let _ = writeln!(
        html,
        "            <label for=\"{name}\">{label}:</label>\n            <select id=\"{name}\" name=\"{name}\" required>"
    );
    for option in options {
        let _ = writeln!(html, "                <option>{}</option>", escape(option));
    }
    html.push_str("            </select>\n");
}

fn render_result(html: &mut String, result: &FormResult) {
    html.push_str("        <div class=\"result\">\n");
    match result {
        FormResult::Verdict(verdict) => {
            let class = match verdict.decision {
                Decision::Approved => "approved",
                Decision::Disapproved => "disapproved",
            };
            let _ = writeln!(
                html,
                "            <h2 class=\"{class}\"><strong>Decision:</strong> {}</h2>",
                verdict.decision.label()
            );
            let _ = writeln!(
                html,
                "            <p class=\"{class}\"><strong>Prediction:</strong> {}</p>",
                verdict.risk.label()
            );
            if let Some(reason) = &verdict.reason {
                let _ = writeln!(
                    html,
                    "            <p><strong>Reason:</strong> {}</p>",
                    escape(reason)
                );
            }
        }
        FormResult::Error(message) => {
            let _ = writeln!(
                html,
                "            <p class=\"error\"><strong>Error:</strong> {}</p>",
                escape(message)
            );
        }
    }
    html.push_str("        </div>\n");
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
