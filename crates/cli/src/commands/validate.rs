//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::ReportConfig;
use ingestion::InputLoader;
use serde::Serialize;
use tracing::info;

use super::resolve_config;
use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    approvals_path: String,
    requests_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<InputSummary>,
}

#[derive(Serialize)]
struct InputSummary {
    approval_rows: usize,
    request_rows: usize,
    po_approval_rows: usize,
    president_approval_rows: usize,
    blank_programs: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    let config = resolve_config(
        args.config.as_deref(),
        args.approvals.as_deref(),
        args.requests.as_deref(),
        None,
    )?;
    info!(
        approvals = %config.inputs.approvals.path.display(),
        requests = %config.inputs.requests.path.display(),
        "Validating inputs"
    );

    let result = validate_inputs(&config);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Input validation failed")
    }
}

fn validate_inputs(config: &ReportConfig) -> ValidationResult {
    let approvals_path = config.inputs.approvals.path.display().to_string();
    let requests_path = config.inputs.requests.path.display().to_string();

    match InputLoader::new(config).load() {
        Ok(inputs) => {
            let count_step = |step: &str| {
                inputs
                    .approvals
                    .iter()
                    .filter(|e| e.step_name == step)
                    .count()
            };
            let summary = InputSummary {
                approval_rows: inputs.approvals.len(),
                request_rows: inputs.requests.len(),
                po_approval_rows: count_step(config.steps.po_approval.as_str()),
                president_approval_rows: count_step(config.steps.president_approval.as_str()),
                blank_programs: inputs
                    .requests
                    .iter()
                    .filter(|r| r.program.is_none())
                    .count(),
            };
            let warnings = collect_warnings(config, &summary);

            ValidationResult {
                valid: true,
                approvals_path,
                requests_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(summary),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            approvals_path,
            requests_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect non-fatal issues
fn collect_warnings(config: &ReportConfig, summary: &InputSummary) -> Vec<String> {
    let mut warnings = Vec::new();

    if summary.po_approval_rows == 0 {
        warnings.push(format!(
            "No '{}' rows found - the report will be empty",
            config.steps.po_approval
        ));
    }
    if summary.president_approval_rows == 0 {
        warnings.push(format!(
            "No '{}' rows found - the report will be empty",
            config.steps.president_approval
        ));
    }
    if summary.blank_programs > 0 {
        warnings.push(format!(
            "{} request(s) have a blank program",
            summary.blank_programs
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Inputs are valid");
        println!("  Approvals: {}", result.approvals_path);
        println!("  Requests: {}", result.requests_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Approval rows: {}", summary.approval_rows);
            println!("  PO approval rows: {}", summary.po_approval_rows);
            println!(
                "  President approval rows: {}",
                summary.president_approval_rows
            );
            println!("  Request rows: {}", summary.request_rows);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Inputs are invalid");
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
