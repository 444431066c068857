//! CLI command implementations.

mod info;
mod run;
mod validate;

pub use info::run_info;
pub use run::run_pipeline;
pub use validate::run_validate;

use anyhow::{Context, Result};
use contracts::ReportConfig;
use std::path::Path;

/// Load the configuration (or defaults), apply path overrides and validate
pub(crate) fn resolve_config(
    config: Option<&Path>,
    approvals: Option<&Path>,
    requests: Option<&Path>,
    output: Option<&Path>,
) -> Result<ReportConfig> {
    let mut config = config_loader::ConfigLoader::load_or_default(config)
        .context("Failed to load configuration")?;

    if let Some(path) = approvals {
        config.inputs.approvals.path = path.to_path_buf();
    }
    if let Some(path) = requests {
        config.inputs.requests.path = path.to_path_buf();
    }
    if let Some(path) = output {
        config.output.path = path.to_path_buf();
    }

    config_loader::ConfigLoader::validate(&config).context("Invalid configuration")?;
    Ok(config)
}
