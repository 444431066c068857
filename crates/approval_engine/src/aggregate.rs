//! Group by (year, program) and average.

use std::collections::BTreeMap;

use contracts::{AggregateRow, EnrichedPair, GroupKey, RoundingMode};

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    days: i64,
    /// Rows contributing to `days`
    dated: usize,
    business_days: u64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, row: &EnrichedPair) {
        if let Some(days) = row.pair.days {
            self.days += days;
            self.dated += 1;
        }
        self.business_days += u64::from(row.pair.business_days);
        self.count += 1;
    }

    fn mean_days(&self) -> Option<f64> {
        (self.dated > 0).then(|| self.days as f64 / self.dated as f64)
    }

    fn mean_business_days(&self) -> f64 {
        self.business_days as f64 / self.count as f64
    }
}

/// Average days and business days per (year, program).
///
/// Output is sorted by year, then program with `None` first. The day mean
/// skips rows without a duration; the business-day mean and `count` cover
/// every row of the bucket.
pub fn aggregate(rows: &[EnrichedPair], rounding: RoundingMode) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<GroupKey, Accumulator> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.pair.year, row.program.clone()))
            .or_default()
            .push(row);
    }

    groups
        .into_iter()
        .map(|((year, program), acc)| AggregateRow {
            year,
            program,
            avg_days: acc.mean_days().map(|mean| rounding.round2(mean)),
            avg_business_days: rounding.round2(acc.mean_business_days()),
            count: acc.count,
        })
        .collect()
}
