//! One-shot EMI calculation: payment, totals, schedule, yearly buckets and
//! breakdown in a single envelope, which is what a calculator widget renders
//! on every input change.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::amortization::payment::level_payment;
use crate::amortization::schedule::build_schedule;
use crate::amortization::{
    aggregate_by_year_with, compute_breakdown, AmortizationEntry, BreakdownSlice, YearlyAggregate,
};
#[cfg(feature = "format")]
use crate::format::{format_currency, format_percent, Locale};
use crate::limits::{clamp_inputs, nominal_years, validate_inputs, LoanLimits, UiClamps};
use crate::types::{with_metadata, ComputationOutput, LoanInputs, Money};
use crate::{EmiError, EmiResult};

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiInput {
    #[serde(flatten)]
    pub loan: LoanInputs,
    /// Calendar year of the first payment, used to label yearly buckets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    /// Snap inputs into the calculator widget's ranges before validating.
    #[serde(default)]
    pub clamp: bool,
    #[serde(default)]
    pub limits: LoanLimits,
    #[cfg(feature = "format")]
    #[serde(default)]
    pub locale: Locale,
}

impl EmiInput {
    pub fn new(loan: LoanInputs) -> Self {
        EmiInput {
            loan,
            start_year: None,
            clamp: false,
            limits: LoanLimits::default(),
            #[cfg(feature = "format")]
            locale: Locale::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiSummary {
    /// The inputs actually used, after clamping.
    pub inputs: LoanInputs,
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    pub periods: u32,
    pub schedule: Vec<AmortizationEntry>,
    pub yearly: Vec<YearlyAggregate>,
    pub breakdown: Vec<BreakdownSlice>,
    #[cfg(feature = "format")]
    pub display: DisplaySummary,
}

/// Pre-formatted strings for the headline figures.
#[cfg(feature = "format")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySummary {
    pub monthly_payment: String,
    pub total_interest: String,
    pub total_payment: String,
    pub principal_percent: String,
    pub interest_percent: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the full calculation.
///
/// Unlike the bare numeric functions in `amortization`, this returns the
/// validation error so callers can explain why no result was produced.
/// A payment that overflows under loosened `limits` is `NonFiniteResult`.
pub fn calculate_emi(input: &EmiInput) -> EmiResult<ComputationOutput<EmiSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let loan_inputs = if input.clamp {
        let clamped = clamp_inputs(&input.loan, &UiClamps::default());
        if clamped != input.loan {
            warnings.push(format!(
                "Inputs clamped to calculator ranges: principal {}, rate {}%, term {} years",
                clamped.principal, clamped.annual_rate_percent, clamped.term_years
            ));
        }
        clamped
    } else {
        input.loan
    };

    let loan = validate_inputs(&loan_inputs, &input.limits)?;

    if loan.monthly_rate == 0.0 {
        warnings.push("Zero interest rate: principal amortizes linearly".into());
    }

    let monthly_payment = level_payment(&loan);
    if monthly_payment <= 0.0 {
        return Err(EmiError::NonFiniteResult {
            context: "monthly_payment".into(),
        });
    }
    let schedule = build_schedule(&loan, monthly_payment, input.limits.max_periods);

    if !schedule.is_empty() && schedule.len() < loan.periods as usize {
        warnings.push(format!(
            "Balance retired after {} of {} periods",
            schedule.len(),
            loan.periods
        ));
    }

    let total_payment = monthly_payment * loan.periods as f64;
    let total_interest = total_payment - loan.principal;

    let years = nominal_years(loan_inputs.term_years, &input.limits);
    let yearly = aggregate_by_year_with(&schedule, years, input.start_year, &input.limits);
    let breakdown = compute_breakdown(loan.principal, total_interest);

    #[cfg(feature = "format")]
    let display = DisplaySummary {
        monthly_payment: format_currency(monthly_payment, input.locale),
        total_interest: format_currency(total_interest, input.locale),
        total_payment: format_currency(total_payment, input.locale),
        principal_percent: format_percent(breakdown[0].percent, 1),
        interest_percent: format_percent(breakdown[1].percent, 1),
    };

    debug!(
        principal = loan.principal,
        periods = loan.periods,
        monthly_payment,
        "emi calculated"
    );

    let summary = EmiSummary {
        inputs: loan_inputs,
        monthly_payment,
        total_interest,
        total_payment,
        periods: loan.periods,
        schedule,
        yearly,
        breakdown,
        #[cfg(feature = "format")]
        display,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization: EMI = P*r*(1+r)^n / ((1+r)^n - 1), linear when r = 0",
        &serde_json::json!({
            "principal": loan_inputs.principal,
            "annual_rate_percent": loan_inputs.annual_rate_percent,
            "term_years": loan_inputs.term_years,
            "monthly_rate": loan.monthly_rate,
            "compounding": "monthly",
        }),
        warnings,
        elapsed,
        summary,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_matches_parts() {
        let input = EmiInput::new(LoanInputs::new(100_000.0, 4.0, 8.0));
        let out = calculate_emi(&input).unwrap();
        let s = &out.result;
        assert_eq!(s.periods, 96);
        assert_eq!(s.schedule.len(), 96);
        assert_eq!(s.yearly.len(), 8);
        assert!((s.total_payment - s.monthly_payment * 96.0).abs() < 1e-6);
        assert!((s.total_interest - (s.total_payment - 100_000.0)).abs() < 1e-6);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_zero_rate_warns() {
        let input = EmiInput::new(LoanInputs::new(1_000.0, 0.0, 1.0));
        let out = calculate_emi(&input).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("Zero interest rate")));
        assert!(out.result.total_interest.abs() < 1e-9);
    }

    #[test]
    fn test_clamp_applies_ui_ranges() {
        let mut input = EmiInput::new(LoanInputs::new(500.0, 0.0, 40.0));
        input.clamp = true;
        let out = calculate_emi(&input).unwrap();
        assert_eq!(out.result.inputs, LoanInputs::new(1_000.0, 1.0, 30.0));
        assert_eq!(out.result.periods, 360);
        assert!(out.warnings.iter().any(|w| w.contains("clamped")));
    }

    #[test]
    fn test_rejected_inputs_error() {
        let input = EmiInput::new(LoanInputs::new(2e9, 5.0, 10.0));
        match calculate_emi(&input) {
            Err(EmiError::LimitExceeded { field, .. }) => assert_eq!(field, "principal"),
            other => panic!("Expected LimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_overflowing_payment_errors() {
        let mut input = EmiInput::new(LoanInputs::new(1e308, 100.0, 30.0));
        input.limits.max_principal = f64::MAX;
        match calculate_emi(&input) {
            Err(EmiError::NonFiniteResult { context }) => assert_eq!(context, "monthly_payment"),
            other => panic!("Expected NonFiniteResult, got {other:?}"),
        }
    }

    #[test]
    fn test_calendar_years() {
        let mut input = EmiInput::new(LoanInputs::new(10_000.0, 5.0, 3.0));
        input.start_year = Some(2026);
        let out = calculate_emi(&input).unwrap();
        let labels: Vec<Option<i32>> = out.result.yearly.iter().map(|y| y.calendar_year).collect();
        assert_eq!(labels, vec![Some(2026), Some(2027), Some(2028)]);
    }

    #[cfg(feature = "format")]
    #[test]
    fn test_display_strings() {
        let mut input = EmiInput::new(LoanInputs::new(1_000_000.0, 8.5, 20.0));
        input.locale = Locale::EnIn;
        let out = calculate_emi(&input).unwrap();
        assert_eq!(out.result.display.monthly_payment, "₹8,678");
        assert!(out.result.display.total_payment.starts_with("₹20,"));
    }

    #[test]
    fn test_envelope_metadata() {
        let input = EmiInput::new(LoanInputs::new(50_000.0, 6.0, 5.0));
        let out = calculate_emi(&input).unwrap();
        assert_eq!(out.metadata.precision, "f64");
        assert_eq!(out.assumptions["compounding"], "monthly");
    }

    #[test]
    fn test_input_deserializes_flat() {
        let json = r#"{"principal": 250000, "annual_rate_percent": 7.1, "term_years": 15}"#;
        let input: EmiInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.loan, LoanInputs::new(250_000.0, 7.1, 15.0));
        assert_eq!(input.limits, LoanLimits::default());
        assert!(!input.clamp);
    }
}
