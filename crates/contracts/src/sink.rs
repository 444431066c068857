//! ReportSink trait - report output interface
//!
//! Defines the abstract interface for sinks.

use crate::{Report, ReportError};

/// Report output trait
///
/// All sink implementations must implement this trait.
pub trait ReportSink {
    /// Sink name (used for logging)
    fn name(&self) -> &str;

    /// Write the finished report
    ///
    /// # Errors
    /// Returns write error (should include context)
    fn write(&mut self, report: &Report) -> Result<(), ReportError>;

    /// Flush and release resources
    fn finish(&mut self) -> Result<(), ReportError> {
        Ok(())
    }
}
