//! ReportConfig - Config Loader output
//!
//! Describes the complete report run: input files, column names, step names,
//! processing policies and output routing. Every field has a default so an
//! empty configuration reproduces the standard report.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete report configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub version: ConfigVersion,

    #[serde(default)]
    pub inputs: InputsConfig,

    #[serde(default)]
    pub columns: ColumnNames,

    #[serde(default)]
    pub steps: StepNames,

    #[serde(default)]
    pub processing: ProcessingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// The two input tables
///
/// Each table is merged over its own default, so `[inputs.requests]` with
/// only a `path` still reads Latin-1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputsConfig {
    #[serde(
        default = "default_approvals_source",
        deserialize_with = "deserialize_approvals"
    )]
    pub approvals: InputSource,

    #[serde(
        default = "default_requests_source",
        deserialize_with = "deserialize_requests"
    )]
    pub requests: InputSource,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            approvals: default_approvals_source(),
            requests: default_requests_source(),
        }
    }
}

fn default_approvals_source() -> InputSource {
    InputSource {
        path: PathBuf::from("approvals_00OUf000004eCTBMA2.csv"),
        encoding: InputEncoding::Utf8,
    }
}

fn default_requests_source() -> InputSource {
    InputSource {
        path: PathBuf::from("requests_00OUf000005GbLiMAK.csv"),
        encoding: InputEncoding::Latin1,
    }
}

fn deserialize_approvals<'de, D>(deserializer: D) -> Result<InputSource, D::Error>
where
    D: Deserializer<'de>,
{
    InputSourceOverride::deserialize(deserializer).map(|o| o.apply(default_approvals_source()))
}

fn deserialize_requests<'de, D>(deserializer: D) -> Result<InputSource, D::Error>
where
    D: Deserializer<'de>,
{
    InputSourceOverride::deserialize(deserializer).map(|o| o.apply(default_requests_source()))
}

/// Input table as written in a config file; absent keys keep the default
#[derive(Deserialize)]
struct InputSourceOverride {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    encoding: Option<InputEncoding>,
}

impl InputSourceOverride {
    fn apply(self, base: InputSource) -> InputSource {
        InputSource {
            path: self.path.unwrap_or(base.path),
            encoding: self.encoding.unwrap_or(base.encoding),
        }
    }
}

/// A single CSV input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSource {
    pub path: PathBuf,

    #[serde(default)]
    pub encoding: InputEncoding,
}

impl InputSource {
    pub fn new(path: impl Into<PathBuf>, encoding: InputEncoding) -> Self {
        Self {
            path: path.into(),
            encoding,
        }
    }
}

/// Text encoding of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEncoding {
    #[default]
    Utf8,
    /// ISO-8859-1; every byte maps to the code point of the same value
    Latin1,
}

/// Header names of the required columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub record_name: String,
    pub step_name: String,
    pub step_completed_date: String,
    pub reference_number: String,
    pub program: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            record_name: "Record Name".to_string(),
            step_name: "Step: Name".to_string(),
            step_completed_date: "Step Completed Date".to_string(),
            reference_number: "Request: Reference Number".to_string(),
            program: "Top Level Primary Program".to_string(),
        }
    }
}

/// Names of the two measured workflow steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepNames {
    pub po_approval: String,
    pub president_approval: String,
}

impl Default for StepNames {
    fn default() -> Self {
        Self {
            po_approval: "PO Approval".to_string(),
            president_approval: "President Approval".to_string(),
        }
    }
}

/// Pipeline policies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub duplicate_policy: DuplicatePolicy,
    pub out_of_order: OutOfOrderPolicy,
    pub unmatched_program: UnmatchedProgramPolicy,
    pub rounding: RoundingMode,
    /// `chrono` formats tried in order after RFC 3339
    pub date_formats: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::default(),
            out_of_order: OutOfOrderPolicy::default(),
            unmatched_program: UnmatchedProgramPolicy::default(),
            rounding: RoundingMode::default(),
            date_formats: default_date_formats(),
        }
    }
}

/// Default date formats, date-time formats before date-only ones
pub fn default_date_formats() -> Vec<String> {
    [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%m/%d/%Y %I:%M %p",
        "%m/%d/%Y %H:%M",
        "%m/%d/%Y, %I:%M %p",
        "%Y-%m-%d",
        "%m/%d/%Y",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Handling of repeated step rows for the same record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep every occurrence; the join multiplies them
    #[default]
    KeepAll,
    /// Keep only the latest occurrence per record and step
    Latest,
}

/// Handling of pairs whose president approval precedes the PO approval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfOrderPolicy {
    /// Aggregate them (negative days, zero business days) and warn
    #[default]
    Include,
    /// Drop them before aggregation
    Exclude,
    /// Fail the run
    Reject,
}

/// Handling of pairs with no matching request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedProgramPolicy {
    /// Report them under an empty program
    #[default]
    Keep,
    /// Leave them out of the report
    Drop,
}

/// Tie-breaking rule for rounding averages to 2 decimals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Banker's rounding
    #[default]
    HalfEven,
    HalfAwayFromZero,
}

impl RoundingMode {
    /// Round `value` to 2 decimal places
    pub fn round2(self, value: f64) -> f64 {
        let scaled = value * 100.0;
        let rounded = match self {
            Self::HalfEven => scaled.round_ties_even(),
            Self::HalfAwayFromZero => scaled.round(),
        };
        rounded / 100.0
    }
}

/// Output routing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub float_format: FloatFormat,
    /// Print the report table to stdout
    pub print_table: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("outputs/approval_days_by_program.csv"),
            float_format: FloatFormat::default(),
            print_table: true,
        }
    }
}

/// Rendering of average values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatFormat {
    /// Shortest round-trip form with at least one decimal ("5.0", "5.33")
    #[default]
    Shortest,
    /// Always two decimals ("5.00")
    Fixed,
}

impl FloatFormat {
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Shortest => format!("{value:?}"),
            Self::Fixed => format!("{value:.2}"),
        }
    }
}
