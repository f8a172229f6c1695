pub mod amortization;
pub mod calculator;
pub mod error;
pub mod limits;
pub mod types;

#[cfg(feature = "format")]
pub mod format;

pub use amortization::{
    aggregate_by_year, compute_breakdown, compute_payment, generate_schedule, AmortizationEntry,
    BreakdownCategory, BreakdownSlice, YearlyAggregate,
};
pub use error::EmiError;
pub use types::*;

/// Standard result type for all emi-core operations
pub type EmiResult<T> = Result<T, EmiError>;
