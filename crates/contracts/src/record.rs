//! Approval data model
//!
//! Input relations (`ApprovalEvent`, `RequestRecord`), derived relations
//! (`StepApproval`, `ApprovalPair`, `EnrichedPair`) and the final `Report`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One row of the approval event log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalEvent {
    /// Record key (e.g. "REQ-0001")
    pub record_name: String,
    /// Workflow step name (e.g. "PO Approval")
    pub step_name: String,
    /// Completion timestamp; `None` when the step is not completed yet
    pub step_completed_date: Option<NaiveDateTime>,
}

/// One row of the request metadata table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    /// Join key matching `ApprovalEvent::record_name`
    pub reference_number: String,
    /// Top level program; `None` when the cell is blank
    pub program: Option<String>,
}

/// Projection of an approval event onto a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepApproval {
    pub record_name: String,
    pub date: Option<NaiveDateTime>,
}

/// PO approval and president approval joined for one record
///
/// The president date is always present since it carries the year. A blank
/// PO date leaves `days` unset and `business_days` at 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalPair {
    pub record_name: String,
    pub po_approval_date: Option<NaiveDateTime>,
    pub president_approval_date: NaiveDateTime,
    /// Whole calendar days between the approvals (floored, may be negative)
    pub days: Option<i64>,
    /// Monday..Friday instants in the inclusive range
    pub business_days: u32,
    /// Year of the president approval
    pub year: i32,
}

impl ApprovalPair {
    /// Whether the president approval precedes the PO approval
    pub fn is_out_of_order(&self) -> bool {
        self.po_approval_date
            .is_some_and(|po| self.president_approval_date < po)
    }
}

/// Approval pair with its program attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedPair {
    #[serde(flatten)]
    pub pair: ApprovalPair,
    /// `None` when no request matches the record
    pub program: Option<String>,
}

/// Grouping key of the report; `None` programs sort first within a year
pub type GroupKey = (i32, Option<String>);

/// One output row: averages for a (year, program) bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub year: i32,
    pub program: Option<String>,
    /// Mean calendar days over rows with a PO date, rounded to 2 decimals;
    /// `None` when no row in the bucket has one
    pub avg_days: Option<f64>,
    /// Mean business days, rounded to 2 decimals
    pub avg_business_days: f64,
    /// Number of enriched pairs in the bucket
    pub count: usize,
}

/// Finished report, sorted ascending by (year, program)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub rows: Vec<AggregateRow>,
}

impl Report {
    /// Create a report from rows already in output order
    pub fn new(rows: Vec<AggregateRow>) -> Self {
        Self { rows }
    }

    /// Number of output rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct years covered, ascending
    pub fn years(&self) -> Vec<i32> {
        self.rows
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
