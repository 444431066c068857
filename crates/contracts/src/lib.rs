//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace: the
//! approval data model, the report configuration and the unified error type.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Step completion timestamps are naive local date-times (`chrono::NaiveDateTime`)
//! - Date-only inputs are interpreted as midnight

mod error;
mod record;
mod report_config;
mod sink;

pub use error::*;
pub use record::*;
pub use report_config::*;
pub use sink::ReportSink;
