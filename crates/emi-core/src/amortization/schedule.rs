use serde::{Deserialize, Serialize};
use tracing::debug;

use super::payment::level_payment;
use crate::limits::{validate_inputs, LoanLimits, ValidatedLoan};
use crate::types::{LoanInputs, Money, RatePercent, Years};

/// One month of the amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// 1-indexed period number.
    pub period: u32,
    pub interest_portion: Money,
    pub principal_portion: Money,
    /// Balance after this period's payment. Never negative.
    pub remaining_balance: Money,
    pub payment_amount: Money,
}

/// Month-by-month amortization schedule using the default `LoanLimits`.
///
/// Empty when the inputs are rejected or the payment is not usable.
pub fn generate_schedule(
    principal: Money,
    annual_rate_percent: RatePercent,
    term_years: Years,
) -> Vec<AmortizationEntry> {
    generate_schedule_with(
        &LoanInputs::new(principal, annual_rate_percent, term_years),
        &LoanLimits::default(),
    )
}

/// `generate_schedule` against caller-supplied limits.
pub fn generate_schedule_with(inputs: &LoanInputs, limits: &LoanLimits) -> Vec<AmortizationEntry> {
    let loan = match validate_inputs(inputs, limits) {
        Ok(loan) => loan,
        Err(e) => {
            debug!(error = %e, "inputs rejected; schedule is empty");
            return Vec::new();
        }
    };

    let payment = level_payment(&loan);
    if payment <= 0.0 {
        return Vec::new();
    }

    build_schedule(&loan, payment, limits.max_periods)
}

pub(crate) fn build_schedule(
    loan: &ValidatedLoan,
    payment: Money,
    max_periods: u32,
) -> Vec<AmortizationEntry> {
    let periods = loan.periods.min(max_periods);
    let mut schedule = Vec::with_capacity(periods as usize);
    let mut balance = loan.principal;

    for period in 1..=periods {
        let interest = balance * loan.monthly_rate;
        let mut principal_portion = payment - interest;

        // The loan's last payment retires whatever floating-point residue is
        // left. A schedule cut short by `max_periods` keeps the level payment.
        if period == loan.periods || principal_portion >= balance {
            principal_portion = balance;
        }

        balance = (balance - principal_portion).max(0.0);

        schedule.push(AmortizationEntry {
            period,
            interest_portion: interest,
            principal_portion,
            remaining_balance: balance,
            payment_amount: interest + principal_portion,
        });

        if balance <= 0.0 {
            break;
        }
    }

    if schedule.len() < periods as usize {
        debug!(
            paid_off_at = schedule.len(),
            nominal_periods = periods,
            "schedule retired the balance early"
        );
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_length_and_payoff() {
        let schedule = generate_schedule(100_000.0, 4.0, 8.0);
        assert_eq!(schedule.len(), 96);
        assert_eq!(schedule.first().unwrap().period, 1);
        assert_eq!(schedule.last().unwrap().period, 96);
        assert_eq!(schedule.last().unwrap().remaining_balance, 0.0);
    }

    #[test]
    fn test_first_period_split() {
        let schedule = generate_schedule(100_000.0, 4.0, 8.0);
        let first = schedule[0];
        // 100k * 4% / 12
        assert!((first.interest_portion - 333.333_333).abs() < 1e-3);
        assert!(
            (first.interest_portion + first.principal_portion - first.payment_amount).abs() < 1e-9
        );
    }

    #[test]
    fn test_principal_sums_to_loan() {
        let schedule = generate_schedule(250_000.0, 7.25, 15.0);
        let repaid: f64 = schedule.iter().map(|e| e.principal_portion).sum();
        assert!((repaid - 250_000.0).abs() < 1e-2);
    }

    #[test]
    fn test_zero_rate_schedule_is_flat() {
        let schedule = generate_schedule(1_200.0, 0.0, 1.0);
        assert_eq!(schedule.len(), 12);
        for entry in &schedule {
            assert_eq!(entry.interest_portion, 0.0);
            assert!((entry.principal_portion - 100.0).abs() < 1e-9);
        }
        assert_eq!(schedule[11].remaining_balance, 0.0);
    }

    #[test]
    fn test_rejected_inputs_give_empty_schedule() {
        assert!(generate_schedule(2e9, 5.0, 10.0).is_empty());
        assert!(generate_schedule(1_000.0, -2.0, 10.0).is_empty());
        assert!(generate_schedule(1_000.0, 5.0, f64::INFINITY).is_empty());
    }

    #[test]
    fn test_period_cap_truncates() {
        let loan = ValidatedLoan {
            principal: 10_000.0,
            monthly_rate: 0.005,
            periods: 120,
        };
        let payment = level_payment(&loan);
        let schedule = build_schedule(&loan, payment, 24);
        assert_eq!(schedule.len(), 24);

        let last = schedule[23];
        assert!((last.payment_amount - payment).abs() < 1e-9);
        assert!(last.remaining_balance > 5_000.0);
        assert!(last.remaining_balance < schedule[22].remaining_balance);
    }
}
