use serde::{Deserialize, Serialize};

use tracing::debug;

use super::schedule::AmortizationEntry;
use crate::limits::{nominal_years, LoanLimits, MONTHS_PER_YEAR};
use crate::types::Money;

/// Twelve periods of the schedule rolled up for charting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyAggregate {
    /// 1-indexed loan year.
    pub year: u32,
    /// Calendar label for chart axes when a start year is supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_year: Option<i32>,
    pub principal: Money,
    pub interest: Money,
    pub total_paid: Money,
    /// Balance after the last period in the bucket.
    pub balance: Money,
}

impl YearlyAggregate {
    fn empty(year: u32, calendar_year: Option<i32>) -> Self {
        YearlyAggregate {
            year,
            calendar_year,
            principal: 0.0,
            interest: 0.0,
            total_paid: 0.0,
            balance: 0.0,
        }
    }
}

/// Bucket `schedule` into `years` consecutive 12-period groups, using the
/// default `LoanLimits`.
///
/// The output always has exactly `years` entries, capped at the longest
/// term the limits allow. Years past the end of the schedule (early payoff,
/// or an empty schedule from rejected inputs) are zero-valued so chart series
/// keep a stable length.
pub fn aggregate_by_year(
    schedule: &[AmortizationEntry],
    years: u32,
    start_year: Option<i32>,
) -> Vec<YearlyAggregate> {
    aggregate_by_year_with(schedule, years, start_year, &LoanLimits::default())
}

/// `aggregate_by_year` against caller-supplied limits.
///
/// A calendar label that would overflow `i32` is left as `None`.
pub fn aggregate_by_year_with(
    schedule: &[AmortizationEntry],
    years: u32,
    start_year: Option<i32>,
    limits: &LoanLimits,
) -> Vec<YearlyAggregate> {
    let max_years = nominal_years(limits.max_term_years, limits);
    if years > max_years {
        debug!(years, max_years, "yearly bucket count capped");
    }
    let years = years.min(max_years);
    let per_year = MONTHS_PER_YEAR as usize;

    (0..years)
        .map(|i| {
            let year = i + 1;
            let calendar_year = start_year.and_then(|y| y.checked_add_unsigned(i));
            let start = i as usize * per_year;
            if start >= schedule.len() {
                return YearlyAggregate::empty(year, calendar_year);
            }

            let end = (start + per_year).min(schedule.len());
            let bucket = &schedule[start..end];
            let principal: Money = bucket.iter().map(|e| e.principal_portion).sum();
            let interest: Money = bucket.iter().map(|e| e.interest_portion).sum();

            YearlyAggregate {
                year,
                calendar_year,
                principal,
                interest,
                total_paid: principal + interest,
                balance: bucket[bucket.len() - 1].remaining_balance,
            }
        })
        .collect()
}
