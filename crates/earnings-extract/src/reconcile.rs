//! Quarter Reconciler.
//!
//! Derives quarters that filings never report directly: a fourth quarter from the
//! annual figure and the first three quarters, and discrete quarters from
//! year-to-date cash flow statements. Derived values only fill gaps; a reported
//! value is never replaced.

use std::collections::BTreeSet;

use tracing::debug;

use earnings_core::{DomainTable, FiscalPeriod, Quarter, QuarterRecord};

use crate::statement::round_amount;

/// Computes the fourth quarter as `annual - (q1 + q2 + q3)` per metric.
///
/// A metric is present in the result only when the annual value and all three
/// quarterly values are present and non-null; it is never zero-filled.
#[must_use]
pub fn compute_q4(annual: &QuarterRecord, quarters: [&QuarterRecord; 3]) -> QuarterRecord {
    annual
        .iter()
        .filter_map(|(key, value)| {
            let total = value?;
            let mut sum = 0.0;
            for quarter in quarters {
                sum += quarter.get(key)?;
            }
            Some((key, Some(round_amount(total - sum))))
        })
        .collect()
}

/// Fills metrics of `target` that are absent or `null` from `source`.
///
/// Returns the number of values written.
pub fn merge_missing(target: &mut QuarterRecord, source: &QuarterRecord) -> usize {
    target.merge_missing(source)
}

/// Converts cumulative fiscal-year-to-date records into discrete quarters.
///
/// Q1 is the first year-to-date value; later quarters are the difference between
/// consecutive year-to-date values, with the table's annual record standing in
/// for a missing fourth year-to-date record. A quarter whose operands are missing
/// gets `null` for that metric.
#[must_use]
pub fn quarterize_year_to_date(ytd: &DomainTable) -> DomainTable {
    let years: BTreeSet<i32> = ytd
        .periods()
        .map(|period| period.year)
        .chain(ytd.annual_years())
        .collect();

    let mut quarters = DomainTable::new();
    for year in years {
        let cumulative = |quarter: Quarter| {
            let period = FiscalPeriod::new(year, quarter);
            match (ytd.get(period), quarter) {
                (Some(record), _) => Some(record),
                (None, Quarter::Q4) => ytd.annual(year),
                (None, _) => None,
            }
        };

        for quarter in Quarter::ALL {
            let Some(current) = cumulative(quarter) else {
                continue;
            };
            let previous = match quarter {
                Quarter::Q1 => None,
                _ => Some(cumulative(FiscalPeriod::new(year, quarter).previous().quarter)),
            };
            let record: QuarterRecord = current
                .iter()
                .map(|(key, value)| {
                    let value = match previous {
                        None => value,
                        Some(Some(prior)) => value
                            .zip(prior.get(key))
                            .map(|(now, before)| round_amount(now - before)),
                        Some(None) => None,
                    };
                    (key, value)
                })
                .collect();
            quarters.fill(FiscalPeriod::new(year, quarter), &record);
        }
    }
    quarters
}

fn additive_only(record: &QuarterRecord, non_additive: &BTreeSet<String>) -> QuarterRecord {
    record
        .iter()
        .filter(|(key, _)| !non_additive.contains(*key))
        .collect()
}

/// Completes a domain table in place.
///
/// First fills quarters from the year-to-date table, then derives fourth
/// quarters from annual records. Keys in `non_additive` (share counts,
/// per-share amounts) are never derived. Returns the number of values written.
pub fn reconcile(table: &mut DomainTable, ytd: &DomainTable, non_additive: &BTreeSet<String>) -> usize {
    let mut written = 0;
    for (period, record) in quarterize_year_to_date(ytd).iter() {
        written += table.fill(*period, &additive_only(record, non_additive));
    }

    let years: Vec<i32> = table.annual_years().collect();
    for year in years {
        let (Some(annual), Some(q1), Some(q2), Some(q3)) = (
            table.annual(year),
            table.get(FiscalPeriod::new(year, Quarter::Q1)),
            table.get(FiscalPeriod::new(year, Quarter::Q2)),
            table.get(FiscalPeriod::new(year, Quarter::Q3)),
        ) else {
            continue;
        };
        let q4 = compute_q4(&additive_only(annual, non_additive), [q1, q2, q3]);
        if q4.is_empty() {
            continue;
        }
        let filled = table.fill(FiscalPeriod::new(year, Quarter::Q4), &q4);
        debug!(year, filled, "Derived fourth quarter from annual figures");
        written += filled;
    }
    written
}
