//! Dispatcher - fan-out of the finished report to sinks

use contracts::{OutputConfig, Report, ReportSink};
use tracing::{debug, info, instrument};

use crate::error::WriterError;
use crate::sinks::{ConsoleSink, CsvSink, LogSink};

/// Builder for creating a Dispatcher
#[derive(Default)]
pub struct DispatcherBuilder {
    sinks: Vec<Box<dyn ReportSink>>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard sinks for an output configuration: CSV file, log, console
    pub fn from_output_config(config: &OutputConfig) -> Self {
        Self::new()
            .with_sink(CsvSink::new("csv", &config.path, config.float_format))
            .with_sink(LogSink::new("log"))
            .with_sink(ConsoleSink::stdout(
                "console",
                &config.path,
                config.float_format,
                config.print_table,
            ))
    }

    /// Append a sink; sinks are written in insertion order
    pub fn with_sink(mut self, sink: impl ReportSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Build the dispatcher
    pub fn build(self) -> Result<Dispatcher, WriterError> {
        if self.sinks.is_empty() {
            return Err(WriterError::sink_creation("dispatcher", "no sinks configured"));
        }
        Ok(Dispatcher { sinks: self.sinks })
    }
}

/// Writes a report to every sink
pub struct Dispatcher {
    sinks: Vec<Box<dyn ReportSink>>,
}

impl Dispatcher {
    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    /// Write then finish every sink; stops at the first failure
    #[instrument(
        name = "dispatcher_dispatch",
        skip_all,
        fields(sinks = self.sinks.len(), rows = report.len())
    )]
    pub fn dispatch(mut self, report: &Report) -> Result<usize, WriterError> {
        for sink in &mut self.sinks {
            debug!(sink = sink.name(), "Dispatching report");
            sink.write(report)?;
        }
        for sink in &mut self.sinks {
            sink.finish()?;
        }
        info!(sinks = self.sinks.len(), "Report dispatched");
        Ok(self.sinks.len())
    }
}
