//! # Report Writer
//!
//! 报告输出模块。
//!
//! 负责：
//! - 消费已完成的 `Report`
//! - Fan-out 到多个 sinks (CSV 文件 / 控制台 / 日志)
//! - 任一 sink 失败即终止

pub mod dispatcher;
pub mod error;
pub mod sinks;

pub use contracts::{Report, ReportSink};
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use error::WriterError;
pub use sinks::{render_table, ConsoleSink, CsvSink, LogSink, REPORT_HEADER};
