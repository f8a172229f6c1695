//! Level-payment amortization: periodic payment, per-period schedule, yearly
//! chart buckets and the principal/interest breakdown.
//!
//! Every function here is pure and never fails. Inputs outside `LoanLimits`
//! yield `0.0`, an empty schedule or zero-valued aggregates so a caller can
//! render a "no result" state without handling errors.

pub mod breakdown;
pub mod payment;
pub mod schedule;
pub mod yearly;

pub use breakdown::{compute_breakdown, BreakdownCategory, BreakdownSlice};
pub use payment::{compute_payment, compute_payment_with, loan_totals, LoanTotals};
pub use schedule::{generate_schedule, generate_schedule_with, AmortizationEntry};
pub use yearly::{aggregate_by_year, aggregate_by_year_with, YearlyAggregate};
