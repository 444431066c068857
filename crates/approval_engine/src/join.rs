//! Joins: PO x President (inner) and pairs x requests (left).

use std::collections::HashMap;

use chrono::{Datelike, NaiveDateTime};
use contracts::{ApprovalPair, EnrichedPair, RequestRecord, StepApproval};
use tracing::debug;

use crate::business_days::{count_business_days, days_between};
use crate::reshape::StepSplit;

/// Result of the inner join
#[derive(Debug, Clone, Default)]
pub struct JoinOutcome {
    pub pairs: Vec<ApprovalPair>,
    /// Joined combinations dropped for a blank president date
    pub incomplete: usize,
}

/// Result of the program left join
#[derive(Debug, Clone, Default)]
pub struct EnrichOutcome {
    pub rows: Vec<EnrichedPair>,
    /// Pairs with no matching request
    pub unmatched: usize,
}

/// Build the metrics for one joined pair
///
/// Without a PO date there is no duration: `days` is `None` and no business
/// day is counted.
pub fn measure(
    record_name: &str,
    po_approval_date: Option<NaiveDateTime>,
    president_approval_date: NaiveDateTime,
) -> ApprovalPair {
    ApprovalPair {
        record_name: record_name.to_string(),
        po_approval_date,
        president_approval_date,
        days: po_approval_date.map(|start| days_between(start, president_approval_date)),
        business_days: po_approval_date
            .map_or(0, |start| count_business_days(start, president_approval_date)),
        year: president_approval_date.year(),
    }
}

/// Inner join PO and president approvals on the record name.
///
/// Every PO row combines with every president row of the same record, in PO
/// order and then president order. Records missing either side vanish, and
/// so do combinations whose president date is blank since they have no year.
pub fn pair_approvals(split: &StepSplit) -> JoinOutcome {
    let mut president_by_record: HashMap<&str, Vec<&StepApproval>> = HashMap::new();
    for row in &split.president_approvals {
        president_by_record
            .entry(row.record_name.as_str())
            .or_default()
            .push(row);
    }

    let mut outcome = JoinOutcome::default();
    for po in &split.po_approvals {
        let Some(presidents) = president_by_record.get(po.record_name.as_str()) else {
            continue;
        };
        for president in presidents {
            match president.date {
                Some(end) => outcome.pairs.push(measure(&po.record_name, po.date, end)),
                None => {
                    debug!(record = %po.record_name, "Skipping pair without president date");
                    outcome.incomplete += 1;
                }
            }
        }
    }
    outcome
}

/// Left join pairs with request programs on record name = reference number.
///
/// A reference number listed more than once yields one row per listing.
pub fn enrich(pairs: Vec<ApprovalPair>, requests: &[RequestRecord]) -> EnrichOutcome {
    let mut programs_by_ref: HashMap<&str, Vec<&Option<String>>> = HashMap::new();
    for request in requests {
        programs_by_ref
            .entry(request.reference_number.as_str())
            .or_default()
            .push(&request.program);
    }

    let mut outcome = EnrichOutcome::default();
    for pair in pairs {
        match programs_by_ref.get(pair.record_name.as_str()) {
            Some(programs) => {
                for program in programs {
                    outcome.rows.push(EnrichedPair {
                        pair: pair.clone(),
                        program: (*program).clone(),
                    });
                }
            }
            None => {
                debug!(record = %pair.record_name, "No request matches record");
                outcome.unmatched += 1;
                outcome.rows.push(EnrichedPair {
                    pair,
                    program: None,
                });
            }
        }
    }
    outcome
}
