//! Main approval engine: reshape -> join -> enrich -> aggregate.

use contracts::{
    ApprovalEvent, ApprovalPair, OutOfOrderPolicy, ProcessingConfig, Report, ReportError,
    RequestRecord, StepNames, UnmatchedProgramPolicy,
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::aggregate::aggregate;
use crate::join::{enrich, pair_approvals};
use crate::reshape::split_steps;

/// Counters collected during one engine run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    /// PO approval rows after deduplication
    pub po_rows: usize,
    /// President approval rows after deduplication
    pub president_rows: usize,
    /// Completed pairs produced by the inner join
    pub pairs: usize,
    /// Joined combinations dropped for a blank president date
    pub incomplete_pairs: usize,
    /// Pairs whose president approval precedes the PO approval
    pub out_of_order_pairs: usize,
    /// Out-of-order pairs removed by `OutOfOrderPolicy::Exclude`
    pub excluded_pairs: usize,
    /// Pairs with no matching request
    pub unmatched_programs: usize,
    /// Enriched rows fed into aggregation
    pub aggregated_rows: usize,
    /// Output groups
    pub groups: usize,
}

/// Engine output
#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub report: Report,
    pub stats: EngineStats,
}

/// Approval time engine
#[derive(Debug, Clone, Default)]
pub struct ApprovalEngine {
    steps: StepNames,
    processing: ProcessingConfig,
}

impl ApprovalEngine {
    pub fn new(steps: StepNames, processing: ProcessingConfig) -> Self {
        Self { steps, processing }
    }

    /// Run the full computation over loaded inputs
    ///
    /// # Errors
    /// `DataQuality` when `OutOfOrderPolicy::Reject` meets an out-of-order pair
    #[instrument(
        name = "approval_engine_run",
        skip_all,
        fields(approvals = approvals.len(), requests = requests.len())
    )]
    pub fn run(
        &self,
        approvals: &[ApprovalEvent],
        requests: &[RequestRecord],
    ) -> Result<EngineOutput, ReportError> {
        let mut stats = EngineStats::default();

        let split =
            split_steps(approvals, &self.steps).deduplicate(self.processing.duplicate_policy);
        stats.po_rows = split.po_approvals.len();
        stats.president_rows = split.president_approvals.len();
        debug!(
            po_rows = stats.po_rows,
            president_rows = stats.president_rows,
            policy = ?self.processing.duplicate_policy,
            "Steps split"
        );

        let joined = pair_approvals(&split);
        stats.pairs = joined.pairs.len();
        stats.incomplete_pairs = joined.incomplete;

        let pairs = self.apply_out_of_order_policy(joined.pairs, &mut stats)?;

        let enriched = enrich(pairs, requests);
        stats.unmatched_programs = enriched.unmatched;
        let rows = match self.processing.unmatched_program {
            UnmatchedProgramPolicy::Keep => enriched.rows,
            UnmatchedProgramPolicy::Drop => enriched
                .rows
                .into_iter()
                .filter(|r| r.program.is_some())
                .collect(),
        };
        stats.aggregated_rows = rows.len();

        let report = Report::new(aggregate(&rows, self.processing.rounding));
        stats.groups = report.len();

        info!(
            pairs = stats.pairs,
            incomplete = stats.incomplete_pairs,
            unmatched_programs = stats.unmatched_programs,
            groups = stats.groups,
            "Approval times aggregated"
        );

        Ok(EngineOutput { report, stats })
    }

    fn apply_out_of_order_policy(
        &self,
        pairs: Vec<ApprovalPair>,
        stats: &mut EngineStats,
    ) -> Result<Vec<ApprovalPair>, ReportError> {
        stats.out_of_order_pairs = pairs.iter().filter(|p| p.is_out_of_order()).count();
        if stats.out_of_order_pairs == 0 {
            return Ok(pairs);
        }

        match self.processing.out_of_order {
            OutOfOrderPolicy::Include => {
                warn!(
                    count = stats.out_of_order_pairs,
                    "President approval precedes PO approval; negative durations included"
                );
                Ok(pairs)
            }
            OutOfOrderPolicy::Exclude => {
                let before = pairs.len();
                let kept: Vec<_> = pairs.into_iter().filter(|p| !p.is_out_of_order()).collect();
                stats.excluded_pairs = before - kept.len();
                warn!(count = stats.excluded_pairs, "Out-of-order pairs excluded");
                Ok(kept)
            }
            OutOfOrderPolicy::Reject => {
                let first = pairs.iter().find(|p| p.is_out_of_order());
                let record = first.map(|p| p.record_name.clone()).unwrap_or_default();
                Err(ReportError::data_quality(
                    record,
                    format!(
                        "president approval precedes PO approval ({} pair(s) affected)",
                        stats.out_of_order_pairs
                    ),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use contracts::{DuplicatePolicy, RoundingMode};

    fn d(month: u32, day: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2024, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
    }

    fn event(record: &str, step: &str, date: Option<NaiveDateTime>) -> ApprovalEvent {
        ApprovalEvent {
            record_name: record.into(),
            step_name: step.into(),
            step_completed_date: date,
        }
    }

    fn request(reference: &str, program: &str) -> RequestRecord {
        RequestRecord {
            reference_number: reference.into(),
            program: Some(program.into()),
        }
    }

    fn engine_with(processing: ProcessingConfig) -> ApprovalEngine {
        ApprovalEngine::new(StepNames::default(), processing)
    }

    #[test]
    fn test_single_record_monday_to_monday() {
        let approvals = vec![
            event("REQ1", "PO Approval", d(1, 1)),
            event("REQ1", "President Approval", d(1, 8)),
        ];
        let requests = vec![request("REQ1", "ProgramA")];

        let output = ApprovalEngine::default().run(&approvals, &requests).unwrap();
        let rows = &output.report.rows;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, 2024);
        assert_eq!(rows[0].program.as_deref(), Some("ProgramA"));
        assert_eq!(rows[0].avg_days, Some(7.0));
        assert_eq!(rows[0].avg_business_days, 6.0);
    }

    #[test]
    fn test_po_only_record_is_excluded() {
        let approvals = vec![
            event("REQ1", "PO Approval", d(1, 1)),
            event("REQ1", "President Approval", d(1, 8)),
            event("REQ2", "PO Approval", d(1, 1)),
        ];
        let requests = vec![request("REQ1", "ProgramA"), request("REQ2", "ProgramB")];

        let output = ApprovalEngine::default().run(&approvals, &requests).unwrap();
        assert_eq!(output.report.len(), 1);
        assert_eq!(output.stats.pairs, 1);
        assert_eq!(output.stats.po_rows, 2);
    }

    #[test]
    fn test_unmatched_program_policy() {
        let approvals = vec![
            event("REQ1", "PO Approval", d(1, 1)),
            event("REQ1", "President Approval", d(1, 2)),
        ];

        let kept = ApprovalEngine::default().run(&approvals, &[]).unwrap();
        assert_eq!(kept.report.rows[0].program, None);
        assert_eq!(kept.stats.unmatched_programs, 1);

        let dropped = engine_with(ProcessingConfig {
            unmatched_program: UnmatchedProgramPolicy::Drop,
            ..Default::default()
        })
        .run(&approvals, &[])
        .unwrap();
        assert!(dropped.report.is_empty());
        assert_eq!(dropped.stats.unmatched_programs, 1);
    }

    fn out_of_order_inputs() -> (Vec<ApprovalEvent>, Vec<RequestRecord>) {
        let approvals = vec![
            event("GOOD", "PO Approval", d(1, 1)),
            event("GOOD", "President Approval", d(1, 3)),
            event("BAD", "PO Approval", d(1, 10)),
            event("BAD", "President Approval", d(1, 5)),
        ];
        let requests = vec![request("GOOD", "A"), request("BAD", "A")];
        (approvals, requests)
    }

    #[test]
    fn test_out_of_order_include() {
        let (approvals, requests) = out_of_order_inputs();
        let output = ApprovalEngine::default().run(&approvals, &requests).unwrap();
        // (2 + -5) / 2 and (3 + 0) / 2
        assert_eq!(output.report.rows[0].avg_days, Some(-1.5));
        assert_eq!(output.report.rows[0].avg_business_days, 1.5);
        assert_eq!(output.stats.out_of_order_pairs, 1);
    }

    #[test]
    fn test_out_of_order_exclude() {
        let (approvals, requests) = out_of_order_inputs();
        let output = engine_with(ProcessingConfig {
            out_of_order: OutOfOrderPolicy::Exclude,
            ..Default::default()
        })
        .run(&approvals, &requests)
        .unwrap();
        assert_eq!(output.report.rows[0].avg_days, Some(2.0));
        assert_eq!(output.stats.excluded_pairs, 1);
    }

    #[test]
    fn test_out_of_order_reject() {
        let (approvals, requests) = out_of_order_inputs();
        let err = engine_with(ProcessingConfig {
            out_of_order: OutOfOrderPolicy::Reject,
            ..Default::default()
        })
        .run(&approvals, &requests)
        .unwrap_err();
        match err {
            ReportError::DataQuality { record, .. } => assert_eq!(record, "BAD"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_policies() {
        let approvals = vec![
            event("R", "PO Approval", d(1, 1)),
            event("R", "PO Approval", d(1, 3)),
            event("R", "President Approval", d(1, 5)),
        ];
        let requests = vec![request("R", "A")];

        let keep_all = ApprovalEngine::default().run(&approvals, &requests).unwrap();
        assert_eq!(keep_all.stats.pairs, 2);
        assert_eq!(keep_all.report.rows[0].avg_days, Some(3.0));

        let latest = engine_with(ProcessingConfig {
            duplicate_policy: DuplicatePolicy::Latest,
            ..Default::default()
        })
        .run(&approvals, &requests)
        .unwrap();
        assert_eq!(latest.stats.pairs, 1);
        assert_eq!(latest.report.rows[0].avg_days, Some(2.0));
    }

    #[test]
    fn test_blank_po_date_counts_in_bucket() {
        let approvals = vec![
            event("A", "PO Approval", d(1, 1)),
            event("A", "President Approval", d(1, 8)),
            event("B", "PO Approval", None),
            event("B", "President Approval", d(1, 10)),
            event("C", "PO Approval", d(1, 2)),
            event("C", "President Approval", None),
        ];
        let requests = vec![request("A", "P"), request("B", "P"), request("C", "P")];

        let output = ApprovalEngine::default().run(&approvals, &requests).unwrap();
        let rows = &output.report.rows;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].avg_days, Some(7.0));
        assert_eq!(rows[0].avg_business_days, 3.0);
        assert_eq!(output.stats.pairs, 2);
        assert_eq!(output.stats.incomplete_pairs, 1);
    }

    #[test]
    fn test_group_count_matches_rows() {
        let approvals = vec![
            event("A", "PO Approval", d(2, 5)),
            event("A", "President Approval", d(2, 9)),
            event("B", "PO Approval", d(3, 4)),
            event("B", "President Approval", d(3, 10)),
        ];
        let requests = vec![request("A", "P"), request("B", "P")];
        let output = engine_with(ProcessingConfig {
            rounding: RoundingMode::HalfAwayFromZero,
            ..Default::default()
        })
        .run(&approvals, &requests)
        .unwrap();
        assert_eq!(output.report.rows[0].count, 2);
        assert_eq!(output.report.rows[0].avg_days, Some(5.0));
        assert_eq!(output.stats.aggregated_rows, 2);
    }
}
