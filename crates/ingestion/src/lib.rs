//! # Ingestion
//!
//! CSV input loading module.
//!
//! Responsibilities:
//! - Decode input files (UTF-8 or Latin-1)
//! - Resolve required columns by header name
//! - Parse step completion dates into `NaiveDateTime`
//! - Produce `ApprovalEvent` / `RequestRecord` relations
//!
//! ## Usage Example
//!
//! ```ignore
//! use ingestion::InputLoader;
//!
//! let loader = InputLoader::new(&config);
//! let inputs = loader.load()?;
//! println!("{} approval rows", inputs.approvals.len());
//! ```

mod dates;
mod decode;
mod loader;
mod table;

// Re-exports
pub use contracts::{ApprovalEvent, RequestRecord};
pub use dates::DateParser;
pub use decode::decode;
pub use loader::{load_approvals, load_requests, InputLoader, LoadedInputs};
