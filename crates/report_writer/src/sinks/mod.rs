//! Sink implementations
//!
//! Contains CsvSink, ConsoleSink, and LogSink.

mod console;
mod csv_file;
mod log;

pub use self::console::{render_table, ConsoleSink};
pub use self::csv_file::CsvSink;
pub use self::log::LogSink;

/// Header row of the output table
pub const REPORT_HEADER: [&str; 4] = [
    "Year",
    "Program",
    "Approval Time (Average)",
    "Approval Time Excl. Weekends (Average)",
];
