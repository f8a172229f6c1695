use serde::{Deserialize, Serialize};

use crate::types::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreakdownCategory {
    Principal,
    Interest,
}

impl BreakdownCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BreakdownCategory::Principal => "Principal Loan Amount",
            BreakdownCategory::Interest => "Total Interest",
        }
    }
}

/// One slice of the principal-vs-interest pie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownSlice {
    pub category: BreakdownCategory,
    pub label: String,
    pub value: Money,
    /// Share of `principal + total_interest`, 0..=100.
    pub percent: f64,
}

/// Split the lifetime cost into principal and interest shares.
///
/// Non-finite inputs count as zero. Both percentages are zero when the total
/// is not positive.
pub fn compute_breakdown(principal: Money, total_interest: Money) -> Vec<BreakdownSlice> {
    let principal = finite_or_zero(principal);
    let interest = finite_or_zero(total_interest);
    let total = principal + interest;

    let share = |value: Money| if total > 0.0 { value / total * 100.0 } else { 0.0 };

    [
        (BreakdownCategory::Principal, principal),
        (BreakdownCategory::Interest, interest),
    ]
    .into_iter()
    .map(|(category, value)| BreakdownSlice {
        category,
        label: category.label().to_string(),
        value,
        percent: share(value),
    })
    .collect()
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
