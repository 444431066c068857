//! Pipeline statistics.

use std::time::Duration;

use approval_engine::EngineStats;
use tracing::{info, warn};

/// Statistics from a pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Rows read from the approvals input
    pub approval_rows: usize,

    /// Rows read from the requests input
    pub request_rows: usize,

    /// Rows in the written report
    pub report_rows: usize,

    /// Years covered by the report
    pub years: Vec<i32>,

    /// Number of sinks that received the report
    pub active_sinks: usize,

    /// Total duration of the pipeline run
    pub duration: Duration,

    /// Engine counters
    pub engine: EngineStats,
}

impl PipelineStats {
    /// Share of joined combinations that lacked a completion date, in percent
    pub fn incomplete_rate(&self) -> f64 {
        let total = self.engine.pairs + self.engine.incomplete_pairs;
        if total > 0 {
            (self.engine.incomplete_pairs as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Emit the run summary as log events
    pub fn log_summary(&self) {
        info!(
            duration_ms = self.duration.as_millis() as u64,
            approval_rows = self.approval_rows,
            request_rows = self.request_rows,
            po_rows = self.engine.po_rows,
            president_rows = self.engine.president_rows,
            pairs = self.engine.pairs,
            report_rows = self.report_rows,
            sinks = self.active_sinks,
            years = ?self.years,
            "Pipeline completed"
        );

        if self.engine.incomplete_pairs > 0 {
            info!(
                incomplete = self.engine.incomplete_pairs,
                rate = format!("{:.2}%", self.incomplete_rate()),
                "Pairs skipped for missing completion dates"
            );
        }
        if self.engine.out_of_order_pairs > 0 {
            warn!(
                out_of_order = self.engine.out_of_order_pairs,
                excluded = self.engine.excluded_pairs,
                "Out-of-order approval pairs seen"
            );
        }
        if self.engine.unmatched_programs > 0 {
            info!(
                unmatched = self.engine.unmatched_programs,
                "Pairs without a matching request"
            );
        }
    }
}
