use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::limits::{validate_inputs, LoanLimits, ValidatedLoan};
use crate::types::{LoanInputs, Money, RatePercent, Years};

/// Payment and lifetime totals for a loan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanTotals {
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    pub periods: u32,
}

/// Equated monthly installment for a fully amortizing loan.
///
/// `payment = P * r * (1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate and
/// `n` the term in whole months. A zero rate amortizes linearly (`P / n`).
/// Returns `0.0` for inputs outside the default `LoanLimits` or when the
/// result is not finite.
pub fn compute_payment(principal: Money, annual_rate_percent: RatePercent, term_years: Years) -> Money {
    compute_payment_with(
        &LoanInputs::new(principal, annual_rate_percent, term_years),
        &LoanLimits::default(),
    )
}

/// `compute_payment` against caller-supplied limits.
pub fn compute_payment_with(inputs: &LoanInputs, limits: &LoanLimits) -> Money {
    match validate_inputs(inputs, limits) {
        Ok(loan) => level_payment(&loan),
        Err(e) => {
            debug!(error = %e, "inputs rejected; payment is zero");
            0.0
        }
    }
}

/// Payment, total paid (`payment * n`) and total interest (`total - P`).
/// All zero when the inputs are rejected.
pub fn loan_totals(inputs: &LoanInputs, limits: &LoanLimits) -> LoanTotals {
    let loan = match validate_inputs(inputs, limits) {
        Ok(loan) => loan,
        Err(e) => {
            debug!(error = %e, "inputs rejected; totals are zero");
            return LoanTotals::default();
        }
    };

    let monthly_payment = level_payment(&loan);
    if monthly_payment == 0.0 {
        return LoanTotals::default();
    }

    let total_payment = monthly_payment * loan.periods as f64;
    LoanTotals {
        monthly_payment,
        total_interest: total_payment - loan.principal,
        total_payment,
        periods: loan.periods,
    }
}

pub(crate) fn level_payment(loan: &ValidatedLoan) -> Money {
    let n = loan.periods as f64;
    let r = loan.monthly_rate;

    let payment = if r == 0.0 {
        loan.principal / n
    } else {
        let growth = (1.0 + r).powi(loan.periods as i32);
        let annuity = growth - 1.0;
        // A rate small enough to vanish in (1+r)^n is effectively zero.
        if annuity > 0.0 {
            loan.principal * r * growth / annuity
        } else {
            loan.principal / n
        }
    };

    if payment.is_finite() && payment > 0.0 {
        payment
    } else {
        warn!(
            principal = loan.principal,
            monthly_rate = r,
            periods = loan.periods,
            "payment is not finite; returning zero"
        );
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 0.05;

    fn assert_close(actual: f64, expected: f64, tol: f64, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff = {})",
            msg,
            expected,
            actual,
            diff
        );
    }

    #[test]
    fn test_payment_100k_4pct_8y() {
        let payment = compute_payment(100_000.0, 4.0, 8.0);
        assert_close(payment, 1218.93, TOL, "100k @ 4% over 8y");
    }

    #[test]
    fn test_payment_10_lakh_8_5pct_20y() {
        let payment = compute_payment(1_000_000.0, 8.5, 20.0);
        assert_close(payment, 8678.23, TOL, "10 lakh @ 8.5% over 20y");
    }

    #[test]
    fn test_zero_rate_is_linear() {
        let payment = compute_payment(1_000.0, 0.0, 1.0);
        assert!(payment.is_finite());
        assert_close(payment, 1_000.0 / 12.0, 1e-9, "zero rate");
    }

    #[test]
    fn test_tiny_rate_stays_finite() {
        let payment = compute_payment(1_000.0, 1e-14, 30.0);
        assert!(payment.is_finite());
        assert_close(payment, 1_000.0 / 360.0, 1e-6, "near-zero rate");
    }

    #[test]
    fn test_out_of_bounds_is_zero() {
        assert_eq!(compute_payment(2e9, 5.0, 10.0), 0.0);
        assert_eq!(compute_payment(0.0, 5.0, 10.0), 0.0);
        assert_eq!(compute_payment(-10.0, 5.0, 10.0), 0.0);
        assert_eq!(compute_payment(1_000.0, 150.0, 10.0), 0.0);
        assert_eq!(compute_payment(1_000.0, 5.0, 100.0), 0.0);
        assert_eq!(compute_payment(f64::NAN, 5.0, 10.0), 0.0);
    }

    #[test]
    fn test_totals() {
        let totals = loan_totals(
            &LoanInputs::new(1_000_000.0, 8.5, 20.0),
            &LoanLimits::default(),
        );
        assert_eq!(totals.periods, 240);
        assert_close(
            totals.total_payment,
            totals.monthly_payment * 240.0,
            1e-6,
            "total payment",
        );
        assert!(totals.total_interest > 0.0);
    }

    #[test]
    fn test_totals_zero_rate_has_no_interest() {
        let totals = loan_totals(&LoanInputs::new(1_000.0, 0.0, 1.0), &LoanLimits::default());
        assert_close(totals.total_interest, 0.0, 1e-9, "zero-rate interest");
        assert_close(totals.total_payment, 1_000.0, 1e-9, "zero-rate total");
    }

    #[test]
    fn test_totals_rejected_inputs_are_zero() {
        let totals = loan_totals(&LoanInputs::new(2e9, 5.0, 10.0), &LoanLimits::default());
        assert_eq!(totals, LoanTotals::default());
    }
}
