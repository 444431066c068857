//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::ReportConfig;
use tracing::info;

use crate::cli::InfoArgs;

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    match args.config {
        Some(ref path) => info!(config = %path.display(), "Loading configuration info"),
        None => info!("No configuration file given, showing defaults"),
    }

    let config = config_loader::ConfigLoader::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;

    if args.json {
        let json = config_loader::ConfigLoader::to_json(&config)
            .context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&config);
    }

    Ok(())
}

fn print_config_info(config: &ReportConfig) {
    println!("Approval Report Configuration");
    println!("=============================\n");

    println!("📂 Inputs");
    println!(
        "   ├─ Approvals: {} ({:?})",
        config.inputs.approvals.path.display(),
        config.inputs.approvals.encoding
    );
    println!(
        "   └─ Requests: {} ({:?})",
        config.inputs.requests.path.display(),
        config.inputs.requests.encoding
    );

    println!("\n🧾 Columns");
    println!("   ├─ Record name: {}", config.columns.record_name);
    println!("   ├─ Step name: {}", config.columns.step_name);
    println!("   ├─ Step completed date: {}", config.columns.step_completed_date);
    println!("   ├─ Reference number: {}", config.columns.reference_number);
    println!("   └─ Program: {}", config.columns.program);

    println!("\n🔀 Steps");
    println!("   ├─ Start: {}", config.steps.po_approval);
    println!("   └─ End: {}", config.steps.president_approval);

    let processing = &config.processing;
    println!("\n⚙️  Processing");
    println!("   ├─ Duplicates: {:?}", processing.duplicate_policy);
    println!("   ├─ Out of order: {:?}", processing.out_of_order);
    println!("   ├─ Unmatched program: {:?}", processing.unmatched_program);
    println!("   ├─ Rounding: {:?}", processing.rounding);
    println!("   └─ Date formats: {}", processing.date_formats.len());
    for (i, format) in processing.date_formats.iter().enumerate() {
        let branch = if i + 1 == processing.date_formats.len() {
            "└─"
        } else {
            "├─"
        };
        println!("       {} {}", branch, format);
    }

    println!("\n📤 Output");
    println!("   ├─ Path: {}", config.output.path.display());
    println!("   ├─ Float format: {:?}", config.output.float_format);
    println!("   └─ Print table: {}", config.output.print_table);
    println!();
}
