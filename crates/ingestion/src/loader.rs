//! Approval and request loaders

use contracts::{
    ApprovalEvent, ColumnNames, InputSource, ReportConfig, ReportError, RequestRecord,
};
use tracing::{info, instrument};

use crate::dates::DateParser;
use crate::table::{field, CsvTable};

/// Both input relations of a report run
#[derive(Debug, Clone, Default)]
pub struct LoadedInputs {
    pub approvals: Vec<ApprovalEvent>,
    pub requests: Vec<RequestRecord>,
}

/// Loads the configured inputs
pub struct InputLoader<'a> {
    config: &'a ReportConfig,
    dates: DateParser,
}

impl<'a> InputLoader<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self {
            config,
            dates: DateParser::new(config.processing.date_formats.clone()),
        }
    }

    /// Load approvals then requests; the first error aborts the load
    pub fn load(&self) -> Result<LoadedInputs, ReportError> {
        let approvals = load_approvals(
            &self.config.inputs.approvals,
            &self.config.columns,
            &self.dates,
        )?;
        let requests = load_requests(&self.config.inputs.requests, &self.config.columns)?;
        Ok(LoadedInputs {
            approvals,
            requests,
        })
    }
}

/// Load the approval event log
///
/// # Errors
/// - `MissingFile`, `Encoding`, `Csv` from the reader
/// - `Schema` if a required column is absent
/// - `DateParse` for the first non-blank date that matches no format
#[instrument(name = "load_approvals", skip_all, fields(path = %source.path.display()))]
pub fn load_approvals(
    source: &InputSource,
    columns: &ColumnNames,
    dates: &DateParser,
) -> Result<Vec<ApprovalEvent>, ReportError> {
    let mut table = CsvTable::open(source)?;
    let record_idx = table.column(&columns.record_name)?;
    let step_idx = table.column(&columns.step_name)?;
    let date_idx = table.column(&columns.step_completed_date)?;
    let path = table.path().to_path_buf();

    let mut events = Vec::new();
    for row in table.rows() {
        let (line, record) = row?;
        let raw_date = field(&record, date_idx);
        let step_completed_date = dates
            .parse(raw_date)
            .map_err(|()| ReportError::date_parse(&path, line, raw_date))?;

        events.push(ApprovalEvent {
            record_name: field(&record, record_idx).to_string(),
            step_name: field(&record, step_idx).to_string(),
            step_completed_date,
        });
    }

    info!(rows = events.len(), "Approvals loaded");
    Ok(events)
}

/// Load the request metadata table
///
/// Blank program cells become `None`.
#[instrument(name = "load_requests", skip_all, fields(path = %source.path.display()))]
pub fn load_requests(
    source: &InputSource,
    columns: &ColumnNames,
) -> Result<Vec<RequestRecord>, ReportError> {
    let mut table = CsvTable::open(source)?;
    let reference_idx = table.column(&columns.reference_number)?;
    let program_idx = table.column(&columns.program)?;

    let mut requests = Vec::new();
    for row in table.rows() {
        let (_, record) = row?;
        let program = field(&record, program_idx);
        requests.push(RequestRecord {
            reference_number: field(&record, reference_idx).to_string(),
            program: (!program.is_empty()).then(|| program.to_string()),
        });
    }

    info!(rows = requests.len(), "Requests loaded");
    Ok(requests)
}
