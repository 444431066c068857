//! Filter/reshape: split the event log into per-step projections.

use std::collections::HashMap;

use contracts::{ApprovalEvent, DuplicatePolicy, StepApproval, StepNames};

/// PO and president approvals projected out of the event log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepSplit {
    pub po_approvals: Vec<StepApproval>,
    pub president_approvals: Vec<StepApproval>,
}

/// Project the two measured steps, keeping source order. Other steps are ignored.
pub fn split_steps(events: &[ApprovalEvent], steps: &StepNames) -> StepSplit {
    let project = |name: &str| -> Vec<StepApproval> {
        events
            .iter()
            .filter(|e| e.step_name == name)
            .map(|e| StepApproval {
                record_name: e.record_name.clone(),
                date: e.step_completed_date,
            })
            .collect()
    };

    StepSplit {
        po_approvals: project(&steps.po_approval),
        president_approvals: project(&steps.president_approval),
    }
}

impl StepSplit {
    /// Apply the duplicate policy to both projections
    pub fn deduplicate(self, policy: DuplicatePolicy) -> Self {
        match policy {
            DuplicatePolicy::KeepAll => self,
            DuplicatePolicy::Latest => Self {
                po_approvals: keep_latest(self.po_approvals),
                president_approvals: keep_latest(self.president_approvals),
            },
        }
    }
}

/// Keep one row per record: the latest date, later rows winning ties.
///
/// `None < Some(_)`, so an undated row only survives when no row is dated.
/// Survivors stay at the position of the record's first occurrence.
fn keep_latest(rows: Vec<StepApproval>) -> Vec<StepApproval> {
    let mut slot_of: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<StepApproval> = Vec::new();

    for row in rows {
        match slot_of.get(&row.record_name) {
            Some(&slot) => {
                if row.date >= kept[slot].date {
                    kept[slot] = row;
                }
            }
            None => {
                slot_of.insert(row.record_name.clone(), kept.len());
                kept.push(row);
            }
        }
    }
    kept
}
