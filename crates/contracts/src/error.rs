//! Layered error definitions
//!
//! Categorized by source: input / config / data / sink

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ReportError {
    // ===== Input Errors =====
    /// Input file does not exist
    #[error("input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// Required column absent from the header row
    #[error("missing required column '{column}' in {}", path.display())]
    Schema { path: PathBuf, column: String },

    /// Non-blank date cell that matches none of the configured formats
    #[error("cannot parse date '{value}' in {} (line {line})", path.display())]
    DateParse {
        path: PathBuf,
        line: u64,
        value: String,
    },

    /// File content is not valid in the declared encoding
    #[error("encoding error in {}: {message}", path.display())]
    Encoding { path: PathBuf, message: String },

    /// Malformed CSV record
    #[error("csv error in {}: {message}", path.display())]
    Csv {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Data Errors =====
    /// Data quality violation that the configured policy treats as fatal
    #[error("data quality error for record '{record}': {message}")]
    DataQuality { record: String, message: String },

    // ===== Sink Errors =====
    /// Sink write error
    #[error("sink '{sink_name}' write error: {message}")]
    SinkWrite { sink_name: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// Create missing file error
    pub fn missing_file(path: impl AsRef<Path>) -> Self {
        Self::MissingFile {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create schema error
    pub fn schema(path: impl AsRef<Path>, column: impl Into<String>) -> Self {
        Self::Schema {
            path: path.as_ref().to_path_buf(),
            column: column.into(),
        }
    }

    /// Create date parse error
    pub fn date_parse(path: impl AsRef<Path>, line: u64, value: impl Into<String>) -> Self {
        Self::DateParse {
            path: path.as_ref().to_path_buf(),
            line,
            value: value.into(),
        }
    }

    /// Create CSV error wrapping the reader error
    pub fn csv(path: impl AsRef<Path>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.as_ref().to_path_buf(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create data quality error
    pub fn data_quality(record: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataQuality {
            record: record.into(),
            message: message.into(),
        }
    }

    /// Create sink write error
    pub fn sink_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }
}

/// Result alias over [`ReportError`]
pub type Result<T> = std::result::Result<T, ReportError>;
