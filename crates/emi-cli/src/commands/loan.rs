use clap::{Args, ValueEnum};
use serde::Serialize;
use serde_json::Value;

use emi_core::amortization;
use emi_core::calculator::{self, EmiInput};
use emi_core::format::Locale;
use emi_core::limits::{clamp_inputs, validate_inputs, UiClamps};
use emi_core::LoanInputs;

use crate::input;

/// Loan inputs shared by every calculation command
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<f64>,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long)]
    pub rate: Option<f64>,

    /// Loan term in years
    #[arg(long)]
    pub years: Option<f64>,

    /// Snap inputs into the calculator ranges before calculating
    #[arg(long)]
    pub clamp: bool,

    /// Path to JSON file overriding the engine limits
    #[arg(long)]
    pub limits: Option<String>,
}

/// Build the calculation input from `--input`, flags or piped stdin, in
/// that order.
pub fn resolve_input(args: &LoanArgs) -> Result<EmiInput, Box<dyn std::error::Error>> {
    let mut emi_input: EmiInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(principal) = args.principal {
        let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
        let years = args.years.ok_or("--years is required (or provide --input)")?;
        EmiInput::new(LoanInputs::new(principal, rate, years))
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--principal, --rate and --years (or --input <file.json>, or stdin) required".into());
    };

    if args.clamp {
        emi_input.clamp = true;
    }
    if let Some(ref path) = args.limits {
        emi_input.limits = input::file::read_json(path)?;
    }
    Ok(emi_input)
}

/// The loan the engine will actually see.
pub fn effective_loan(emi_input: &EmiInput) -> LoanInputs {
    if emi_input.clamp {
        clamp_inputs(&emi_input.loan, &UiClamps::default())
    } else {
        emi_input.loan
    }
}

/// Log and return the reason the engine will reject these inputs, if any.
pub fn report_rejection(emi_input: &EmiInput) -> Vec<String> {
    match validate_inputs(&effective_loan(emi_input), &emi_input.limits) {
        Ok(_) => Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "inputs rejected");
            vec![e.to_string()]
        }
    }
}

/// A command result plus the reasons it may be empty or zero.
#[derive(Serialize)]
struct Report<T> {
    result: T,
    warnings: Vec<String>,
}

/// Wrap `result` with any rejection reasons for `emi_input`.
pub fn report<T: Serialize>(
    result: T,
    emi_input: &EmiInput,
) -> Result<Value, Box<dyn std::error::Error>> {
    let report = Report {
        result,
        warnings: report_rejection(emi_input),
    };
    Ok(serde_json::to_value(report)?)
}

// ---------------------------------------------------------------------------
// payment
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct PaymentArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let emi_input = resolve_input(&args.loan)?;
    let totals = amortization::loan_totals(&effective_loan(&emi_input), &emi_input.limits);
    report(totals, &emi_input)
}

// ---------------------------------------------------------------------------
// breakdown
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct BreakdownArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Lifetime interest; with --principal, skips the payment calculation
    #[arg(long)]
    pub total_interest: Option<f64>,
}

pub fn run_breakdown(args: BreakdownArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if let (Some(principal), Some(total_interest)) = (args.loan.principal, args.total_interest) {
        let slices = amortization::compute_breakdown(principal, total_interest);
        return Ok(serde_json::to_value(slices)?);
    }

    let emi_input = resolve_input(&args.loan)?;
    let loan = effective_loan(&emi_input);
    let totals = amortization::loan_totals(&loan, &emi_input.limits);
    let principal = if totals.periods > 0 { loan.principal } else { 0.0 };
    report(
        amortization::compute_breakdown(principal, totals.total_interest),
        &emi_input,
    )
}

// ---------------------------------------------------------------------------
// summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LocaleArg {
    EnUs,
    EnIn,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::EnUs => Locale::EnUs,
            LocaleArg::EnIn => Locale::EnIn,
        }
    }
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Calendar year of the first payment (defaults to the current year)
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Grouping and currency for the formatted figures
    #[arg(long)]
    pub locale: Option<LocaleArg>,
}

pub fn run_summary(args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut emi_input = resolve_input(&args.loan)?;
    emi_input.start_year = args
        .start_year
        .or(emi_input.start_year)
        .or_else(|| Some(crate::current_year()));
    if let Some(locale) = args.locale {
        emi_input.locale = locale.into();
    }
    let result = calculator::calculate_emi(&emi_input)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_carries_rejection_reason() {
        let emi_input = EmiInput::new(LoanInputs::new(2e9, 5.0, 10.0));
        let schedule =
            amortization::generate_schedule_with(&effective_loan(&emi_input), &emi_input.limits);
        let value = report(schedule, &emi_input).unwrap();
        assert_eq!(value["result"], serde_json::json!([]));
        let warnings = value["warnings"].as_array().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].as_str().unwrap().contains("principal"));
    }

    #[test]
    fn test_report_has_no_warnings_for_valid_loan() {
        let emi_input = EmiInput::new(LoanInputs::new(100_000.0, 4.0, 8.0));
        let totals = amortization::loan_totals(&emi_input.loan, &emi_input.limits);
        let value = report(totals, &emi_input).unwrap();
        assert_eq!(value["result"]["periods"], 96);
        assert_eq!(value["warnings"], serde_json::json!([]));
    }

    #[test]
    fn test_clamp_flag_snaps_before_validation() {
        let mut emi_input = EmiInput::new(LoanInputs::new(2e9, 5.0, 10.0));
        emi_input.clamp = true;
        assert_eq!(effective_loan(&emi_input).principal, 100_000_000.0);
        assert!(report_rejection(&emi_input).is_empty());
    }
}
