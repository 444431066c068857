//! `run` command implementation.

use anyhow::Result;
use tracing::info;

use super::resolve_config;
use crate::cli::RunArgs;
use crate::pipeline::Pipeline;

/// Execute the `run` command
pub fn run_pipeline(args: &RunArgs) -> Result<()> {
    let mut config = resolve_config(
        args.config.as_deref(),
        args.approvals.as_deref(),
        args.requests.as_deref(),
        args.output.as_deref(),
    )?;
    if args.no_table {
        config.output.print_table = false;
    }

    info!(
        approvals = %config.inputs.approvals.path.display(),
        requests = %config.inputs.requests.path.display(),
        output = %config.output.path.display(),
        "Configuration resolved"
    );

    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        return Ok(());
    }

    let stats = Pipeline::new(config).run()?;
    stats.log_summary();

    Ok(())
}
