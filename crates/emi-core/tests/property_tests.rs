use emi_core::amortization::{aggregate_by_year, compute_breakdown, compute_payment, generate_schedule};
use proptest::prelude::*;

proptest! {
    #[test]
    fn principal_portions_sum_to_principal(
        principal in 1_000.0f64..1e9,
        rate in 0.0f64..100.0,
        years in 1u32..=30,
    ) {
        let schedule = generate_schedule(principal, rate, years as f64);
        prop_assert!(!schedule.is_empty());
        let repaid: f64 = schedule.iter().map(|e| e.principal_portion).sum();
        prop_assert!((repaid - principal).abs() < 1e-2, "repaid {} of {}", repaid, principal);
        prop_assert_eq!(schedule.last().unwrap().remaining_balance, 0.0);
    }

    #[test]
    fn balance_never_increases_or_goes_negative(
        principal in 1.0f64..1e9,
        rate in 0.0f64..100.0,
        years in 1u32..=30,
    ) {
        let schedule = generate_schedule(principal, rate, years as f64);
        let mut previous = principal;
        for entry in &schedule {
            prop_assert!(entry.remaining_balance >= 0.0);
            prop_assert!(entry.remaining_balance <= previous);
            prop_assert!(entry.interest_portion >= 0.0);
            prop_assert!(entry.principal_portion >= 0.0);
            previous = entry.remaining_balance;
        }
    }

    #[test]
    fn payment_increases_with_principal(
        principal in 1_000.0f64..1e8,
        bump in 1.01f64..5.0,
        rate in 0.0f64..50.0,
        years in 1u32..=30,
    ) {
        let low = compute_payment(principal, rate, years as f64);
        let high = compute_payment(principal * bump, rate, years as f64);
        prop_assert!(high > low);
    }

    #[test]
    fn payment_increases_with_rate(
        principal in 1_000.0f64..1e9,
        rate in 0.0f64..90.0,
        step in 0.5f64..10.0,
        years in 1u32..=30,
    ) {
        let low = compute_payment(principal, rate, years as f64);
        let high = compute_payment(principal, rate + step, years as f64);
        prop_assert!(high > low);
    }

    #[test]
    fn payment_decreases_with_term(
        principal in 1_000.0f64..1e9,
        rate in 0.0f64..100.0,
        years in 1u32..30,
    ) {
        let short = compute_payment(principal, rate, years as f64);
        let long = compute_payment(principal, rate, (years + 1) as f64);
        prop_assert!(long < short);
    }

    #[test]
    fn zero_rate_is_linear(principal in 1.0f64..1e9, years in 1u32..=30) {
        let payment = compute_payment(principal, 0.0, years as f64);
        prop_assert!(payment.is_finite());
        let expected = principal / (years as f64 * 12.0);
        prop_assert!((payment - expected).abs() <= expected * 1e-12);
    }

    #[test]
    fn yearly_length_equals_term(
        principal in 1.0f64..3e9,
        rate in 0.0f64..100.0,
        years in 1u32..=30,
    ) {
        let schedule = generate_schedule(principal, rate, years as f64);
        let yearly = aggregate_by_year(&schedule, years, None);
        prop_assert_eq!(yearly.len(), years as usize);
    }

    #[test]
    fn breakdown_shares_sum_to_100(principal in 0.0f64..1e9, interest in 0.0f64..1e9) {
        let slices = compute_breakdown(principal, interest);
        let sum: f64 = slices.iter().map(|s| s.percent).sum();
        if principal + interest > 0.0 {
            prop_assert!((sum - 100.0).abs() < 1e-9);
        } else {
            prop_assert!(slices.iter().all(|s| s.percent == 0.0));
        }
    }
}
