//! Pipeline orchestrator: load -> compute -> dispatch.

use std::time::Instant;

use anyhow::{Context, Result};
use approval_engine::ApprovalEngine;
use contracts::ReportConfig;
use ingestion::InputLoader;
use report_writer::DispatcherBuilder;
use tracing::{info, instrument};

use super::stats::PipelineStats;

/// One report run over a resolved configuration
pub struct Pipeline {
    config: ReportConfig,
}

impl Pipeline {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline to completion
    #[instrument(name = "pipeline_run", skip(self))]
    pub fn run(self) -> Result<PipelineStats> {
        let start = Instant::now();

        let inputs = InputLoader::new(&self.config)
            .load()
            .context("Failed to load inputs")?;
        info!(
            approval_rows = inputs.approvals.len(),
            request_rows = inputs.requests.len(),
            "Inputs loaded"
        );

        let engine = ApprovalEngine::new(
            self.config.steps.clone(),
            self.config.processing.clone(),
        );
        let output = engine
            .run(&inputs.approvals, &inputs.requests)
            .context("Failed to compute report")?;

        let dispatcher = DispatcherBuilder::from_output_config(&self.config.output)
            .build()
            .context("Failed to create sinks")?;
        let active_sinks = dispatcher
            .dispatch(&output.report)
            .context("Failed to write report")?;

        Ok(PipelineStats {
            approval_rows: inputs.approvals.len(),
            request_rows: inputs.requests.len(),
            report_rows: output.report.len(),
            years: output.report.years(),
            active_sinks,
            duration: start.elapsed(),
            engine: output.stats,
        })
    }
}
