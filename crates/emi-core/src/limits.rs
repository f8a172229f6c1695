//! Input bounds for the amortization engine.
//!
//! `LoanLimits` holds the hard caps the engine enforces on every call, so the
//! numeric API is safe to call without any front-end validation. `UiClamps`
//! holds the softer ranges a calculator widget snaps its inputs to when a
//! field loses focus.

use serde::{Deserialize, Serialize};

use crate::error::EmiError;
use crate::types::{LoanInputs, Money, RatePercent, Years};
use crate::EmiResult;

pub const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Hard caps enforced by the engine. Inputs outside them produce a zero or
/// empty result instead of an unbounded computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanLimits {
    pub max_principal: Money,
    pub max_annual_rate_percent: RatePercent,
    pub min_term_years: Years,
    pub max_term_years: Years,
    pub max_periods: u32,
}

impl Default for LoanLimits {
    fn default() -> Self {
        LoanLimits {
            max_principal: 1_000_000_000.0,
            max_annual_rate_percent: 100.0,
            min_term_years: 1.0,
            max_term_years: 30.0,
            max_periods: 360,
        }
    }
}

/// Ranges a calculator widget snaps its fields to on blur.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiClamps {
    pub min_principal: Money,
    pub max_principal: Money,
    pub min_annual_rate_percent: RatePercent,
    pub max_annual_rate_percent: RatePercent,
    pub min_term_years: Years,
    pub max_term_years: Years,
}

impl Default for UiClamps {
    fn default() -> Self {
        UiClamps {
            min_principal: 1_000.0,
            max_principal: 100_000_000.0,
            min_annual_rate_percent: 1.0,
            max_annual_rate_percent: 20.0,
            min_term_years: 1.0,
            max_term_years: 30.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Inputs that passed `validate_inputs`, converted to per-period terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedLoan {
    pub principal: Money,
    /// Periodic (monthly) rate as a decimal, e.g. 0.0025 for 3% p.a.
    pub monthly_rate: f64,
    pub periods: u32,
}

/// Check inputs against `limits` and convert them to monthly terms.
///
/// A zero annual rate is valid; the payment formula falls back to linear
/// amortization for it.
pub fn validate_inputs(inputs: &LoanInputs, limits: &LoanLimits) -> EmiResult<ValidatedLoan> {
    let LoanInputs {
        principal,
        annual_rate_percent,
        term_years,
    } = *inputs;

    require_finite("principal", principal)?;
    require_finite("annual_rate_percent", annual_rate_percent)?;
    require_finite("term_years", term_years)?;

    if principal <= 0.0 {
        return Err(EmiError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if principal > limits.max_principal {
        return Err(EmiError::LimitExceeded {
            field: "principal".into(),
            value: principal,
            limit: limits.max_principal,
        });
    }

    if annual_rate_percent < 0.0 {
        return Err(EmiError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if annual_rate_percent > limits.max_annual_rate_percent {
        return Err(EmiError::LimitExceeded {
            field: "annual_rate_percent".into(),
            value: annual_rate_percent,
            limit: limits.max_annual_rate_percent,
        });
    }

    if term_years < limits.min_term_years {
        return Err(EmiError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Term must be at least {} year(s)", limits.min_term_years),
        });
    }
    if term_years > limits.max_term_years {
        return Err(EmiError::LimitExceeded {
            field: "term_years".into(),
            value: term_years,
            limit: limits.max_term_years,
        });
    }

    let periods = (term_years * MONTHS_PER_YEAR as f64).round();
    if periods < 1.0 {
        return Err(EmiError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must cover at least one monthly period".into(),
        });
    }
    if periods > limits.max_periods as f64 {
        return Err(EmiError::LimitExceeded {
            field: "periods".into(),
            value: periods,
            limit: limits.max_periods as f64,
        });
    }

    Ok(ValidatedLoan {
        principal,
        monthly_rate: annual_rate_percent / MONTHS_PER_YEAR as f64 / 100.0,
        periods: periods as u32,
    })
}

fn require_finite(field: &str, value: f64) -> EmiResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EmiError::InvalidInput {
            field: field.into(),
            reason: "Value must be a finite number".into(),
        })
    }
}

/// Snap each field into its `UiClamps` range. Non-finite values snap to the
/// lower bound.
pub fn clamp_inputs(inputs: &LoanInputs, clamps: &UiClamps) -> LoanInputs {
    LoanInputs {
        principal: clamp_field(inputs.principal, clamps.min_principal, clamps.max_principal),
        annual_rate_percent: clamp_field(
            inputs.annual_rate_percent,
            clamps.min_annual_rate_percent,
            clamps.max_annual_rate_percent,
        ),
        term_years: clamp_field(inputs.term_years, clamps.min_term_years, clamps.max_term_years),
    }
}

fn clamp_field(value: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() || value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Number of yearly chart buckets for a term: whole years rounded up, capped
/// at `max_term_years`. Zero for a non-positive or non-finite term.
pub fn nominal_years(term_years: Years, limits: &LoanLimits) -> u32 {
    if !term_years.is_finite() || term_years <= 0.0 {
        return 0;
    }
    term_years.ceil().min(limits.max_term_years.ceil()) as u32
}
