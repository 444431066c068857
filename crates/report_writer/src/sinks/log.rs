//! LogSink - logs report rows via tracing

use contracts::{Report, ReportError, ReportSink};
use tracing::{debug, info, instrument};

/// Sink that logs one event per report row for debugging
pub struct LogSink {
    name: String,
}

impl LogSink {
    /// Create a new LogSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ReportSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "log_sink_write", skip(self, report), fields(sink = %self.name))]
    fn write(&mut self, report: &Report) -> Result<(), ReportError> {
        for row in &report.rows {
            debug!(
                year = row.year,
                program = row.program.as_deref().unwrap_or("-"),
                avg_days = row.avg_days,
                avg_business_days = row.avg_business_days,
                count = row.count,
                "Report row"
            );
        }
        info!(rows = report.len(), years = ?report.years(), "Report summary");
        Ok(())
    }
}
