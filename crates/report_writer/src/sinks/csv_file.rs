//! CsvSink - writes the report table to disk

use std::fs;
use std::path::{Path, PathBuf};

use contracts::{FloatFormat, Report, ReportError, ReportSink};
use tracing::{debug, error, info, instrument};

use super::REPORT_HEADER;

/// Sink that writes the report as a CSV file
pub struct CsvSink {
    name: String,
    path: PathBuf,
    float_format: FloatFormat,
    rows_written: usize,
}

impl CsvSink {
    /// Create a new CsvSink; the parent directory is created on write
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        float_format: FloatFormat,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            float_format,
            rows_written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    fn write_to_disk(&self, report: &Report) -> Result<(), csv::Error> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(REPORT_HEADER)?;
        for row in &report.rows {
            writer.write_record([
                row.year.to_string(),
                row.program.clone().unwrap_or_default(),
                row.avg_days
                    .map(|v| self.float_format.format(v))
                    .unwrap_or_default(),
                self.float_format.format(row.avg_business_days),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl ReportSink for CsvSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "csv_sink_write",
        skip(self, report),
        fields(sink = %self.name, path = %self.path.display(), rows = report.len())
    )]
    fn write(&mut self, report: &Report) -> Result<(), ReportError> {
        self.write_to_disk(report).map_err(|e| {
            error!(sink = %self.name, error = %e, "Write failed");
            ReportError::sink_write(&self.name, format!("{}: {e}", self.path.display()))
        })?;
        self.rows_written = report.len();
        info!(rows = report.len(), "Report written");
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        debug!(sink = %self.name, "CsvSink closed");
        Ok(())
    }
}
